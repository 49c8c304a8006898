use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

/// Server administration. Most of these report any falsy reply as an error,
/// so `db_size` on an empty database is recorded as one.
pub trait ServerCommands: KeyValueClient {
    fn bgrewriteaof(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("bgrewriteaof"))
    }

    fn bgsave(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("bgsave"))
    }

    /// `CONFIG <operation> <key> [value]`; the value is never recorded.
    fn config(&mut self, operation: &str, key: &str, value: Option<&str>) -> ClientResult<Value> {
        self.execute(
            Command::new("config")
                .text("operation", operation)
                .text("key", key)
                .opt_arg("value", value.map(|v| Arg::Secret(v.to_string()))),
        )
    }

    fn db_size(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("dbSize"))
    }

    fn flush_all(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("flushAll"))
    }

    fn flush_db(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("flushDB"))
    }

    fn info(&mut self, section: Option<&str>) -> ClientResult<Value> {
        self.execute(
            Command::new("info").opt_arg("option", section.map(|s| Arg::Text(s.to_string()))),
        )
    }

    fn last_save(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("lastSave"))
    }

    fn reset_stat(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("resetStat"))
    }

    fn save(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("save"))
    }

    /// Replicate from `host:port`, or stop replicating with `None`.
    fn slaveof(&mut self, primary: Option<(&str, u16)>) -> ClientResult<Value> {
        let cmd = match primary {
            Some((host, port)) => Command::new("slaveof")
                .text("host", host)
                .int("port", i64::from(port)),
            None => Command::new("slaveof")
                .arg("mode", Arg::Texts(vec!["NO".to_string(), "ONE".to_string()])),
        };
        self.execute(cmd)
    }

    fn time(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("time"))
    }

    /// `SLOWLOG GET [n]`, `SLOWLOG LEN` or `SLOWLOG RESET`.
    fn slowlog(&mut self, operation: &str, length: Option<i64>) -> ClientResult<Value> {
        self.execute(
            Command::new("slowlog")
                .text("operation", operation)
                .opt_arg("length", length.map(Arg::Int)),
        )
    }
}

impl<C: KeyValueClient + ?Sized> ServerCommands for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::wire::encode;
    use crate::testing::StubClient;

    fn tokens(stub: &StubClient) -> Vec<String> {
        encode(&stub.last_command().unwrap())
            .unwrap()
            .into_iter()
            .map(|t| String::from_utf8(t).unwrap())
            .collect()
    }

    #[test]
    fn test_bgsave_is_bgsave() {
        let mut stub = StubClient::new();
        stub.bgsave().unwrap();
        assert_eq!(tokens(&stub), vec!["BGSAVE"]);
    }

    #[test]
    fn test_config_set_masks_value() {
        let mut stub = StubClient::new();
        stub.config("SET", "requirepass", Some("s3cret")).unwrap();
        assert_eq!(tokens(&stub), vec!["CONFIG", "SET", "requirepass", "s3cret"]);
        let snapshot = stub.last_command().unwrap().snapshot();
        assert_eq!(snapshot.to_string(), "operation=SET key=requirepass value=***");
    }

    #[test]
    fn test_slaveof_no_one() {
        let mut stub = StubClient::new();
        stub.slaveof(None).unwrap();
        assert_eq!(tokens(&stub), vec!["SLAVEOF", "NO", "ONE"]);
        stub.slaveof(Some(("10.0.0.1", 6380))).unwrap();
        assert_eq!(tokens(&stub), vec!["SLAVEOF", "10.0.0.1", "6380"]);
    }

    #[test]
    fn test_reset_stat_subcommand() {
        let mut stub = StubClient::new();
        stub.reset_stat().unwrap();
        assert_eq!(tokens(&stub), vec!["CONFIG", "RESETSTAT"]);
    }
}
