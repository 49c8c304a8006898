use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

/// Connection-level operations.
pub trait ConnectionCommands: KeyValueClient {
    fn auth(&mut self, password: &str) -> ClientResult<Value> {
        self.execute(Command::new("auth").arg("password", Arg::Secret(password.to_string())))
    }

    /// Drop the connection. Handled by the driver without a round trip.
    fn close(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("close"))
    }

    fn echo(&mut self, message: &str) -> ClientResult<Value> {
        self.execute(Command::new("cEcho").text("message", message))
    }

    fn get_option(&mut self, name: &str) -> ClientResult<Value> {
        self.execute(Command::new("getOption").text("name", name))
    }

    /// Connectivity probe. Through the instrumented client a transport
    /// failure yields `Value::Nil` instead of an error.
    fn ping(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("ping"))
    }

    fn select(&mut self, db: i64) -> ClientResult<Value> {
        self.execute(Command::new("select").int("dbIndex", db))
    }

    fn set_option(&mut self, name: &str, value: &str) -> ClientResult<Value> {
        self.execute(
            Command::new("setOption")
                .text("name", name)
                .text("value", value),
        )
    }

    fn get_mode(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("getMode"))
    }

    /// Send an arbitrary command; the first token names it.
    fn raw_command(&mut self, command: &str, arguments: &[&str]) -> ClientResult<Value> {
        self.execute(
            Command::new("rawCommand")
                .text("command", command)
                .arg(
                    "arguments",
                    Arg::Texts(arguments.iter().map(|a| a.to_string()).collect()),
                ),
        )
    }

    fn wait(&mut self, replicas: i64, timeout_ms: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("wait")
                .int("numSlaves", replicas)
                .int("timeout", timeout_ms),
        )
    }
}

impl<C: KeyValueClient + ?Sized> ConnectionCommands for C {}
