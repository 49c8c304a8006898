use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::outcome::ConnectionMetadata;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Unix socket path; takes precedence over host/port.
    pub socket: Option<String>,
    pub db: i64,
    pub password: Option<String>,
    /// Connect/read/write timeout in seconds.
    pub timeout: u64,
    pub loglevel: String,
    /// Print the collected records on exit.
    pub profile: bool,
    /// Print records as JSON lines instead of text.
    pub json: bool,
    /// Positional arguments: a command to run instead of the prompt.
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 6379,
            socket: None,
            db: 0,
            password: None,
            timeout: 5,
            loglevel: "info".to_string(),
            profile: false,
            json: false,
            command: Vec::new(),
        }
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> ClientResult<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| ClientError::Config(format!("{flag} requires a value")))
}

fn parse_num<T: std::str::FromStr>(raw: &str, what: &str) -> ClientResult<T> {
    raw.parse()
        .map_err(|_| ClientError::Config(format!("invalid {what}: '{raw}'")))
}

impl Config {
    pub fn from_args(args: &[String]) -> ClientResult<Self> {
        let mut config = Config::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                flag @ ("--host" | "-h") => {
                    config.host = value_of(args, i, flag)?.to_string();
                    i += 1;
                }
                flag @ ("--port" | "-p") => {
                    config.port = parse_num(value_of(args, i, flag)?, "port")?;
                    i += 1;
                }
                flag @ ("--socket" | "-s") => {
                    config.socket = Some(value_of(args, i, flag)?.to_string());
                    i += 1;
                }
                flag @ ("--db" | "-n") => {
                    config.db = parse_num(value_of(args, i, flag)?, "database index")?;
                    i += 1;
                }
                flag @ ("--password" | "-a") => {
                    config.password = Some(value_of(args, i, flag)?.to_string());
                    i += 1;
                }
                "--timeout" => {
                    config.timeout = parse_num(value_of(args, i, "--timeout")?, "timeout")?;
                    i += 1;
                }
                "--loglevel" => {
                    config.loglevel = value_of(args, i, "--loglevel")?.to_string();
                    i += 1;
                }
                "--profile" => config.profile = true,
                "--json" => config.json = true,
                // everything from the first positional on is the command
                _ => {
                    config.command = args[i..].to_vec();
                    break;
                }
            }
            i += 1;
        }
        Ok(config)
    }

    /// Overlay `REDTRACE_*` environment variables.
    pub fn apply_env(&mut self) -> ClientResult<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    pub fn apply_env_with<F>(&mut self, var: F) -> ClientResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("REDTRACE_HOST") {
            self.host = host;
        }
        if let Some(port) = var("REDTRACE_PORT") {
            self.port = parse_num(&port, "REDTRACE_PORT")?;
        }
        if let Some(db) = var("REDTRACE_DB") {
            self.db = parse_num(&db, "REDTRACE_DB")?;
        }
        if let Some(password) = var("REDTRACE_PASSWORD") {
            self.password = Some(password);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }

    /// Connection URL understood by the `redis` crate. The password is
    /// percent-encoded.
    pub fn url(&self) -> String {
        let password = self.password.as_deref().map(urlencoding::encode);
        match &self.socket {
            Some(path) => {
                let pass = match &password {
                    Some(password) => format!("&pass={password}"),
                    None => String::new(),
                };
                format!("redis+unix://{path}?db={}{pass}", self.db)
            }
            None => {
                let auth = match &password {
                    Some(password) => format!(":{password}@"),
                    None => String::new(),
                };
                format!("redis://{auth}{}:{}/{}", self.host, self.port, self.db)
            }
        }
    }

    pub fn metadata(&self) -> ConnectionMetadata {
        match &self.socket {
            Some(path) => ConnectionMetadata::new(path.clone(), None, self.db),
            None => ConnectionMetadata::new(self.host.clone(), Some(self.port), self.db),
        }
    }
}
