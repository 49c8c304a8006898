#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid arguments for '{command}': {reason}")]
    InvalidArgument { command: String, reason: String },

    #[error("'{0}' is not supported by this client")]
    Unsupported(String),

    #[error("connection is closed")]
    NotConnected,

    #[error("{0}")]
    Driver(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

impl ClientError {
    pub fn invalid_argument(command: &str, reason: impl Into<String>) -> Self {
        ClientError::InvalidArgument {
            command: command.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the failure happened before anything reached the driver.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ClientError::InvalidArgument { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
