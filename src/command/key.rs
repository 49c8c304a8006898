use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

pub trait KeyCommands: KeyValueClient {
    /// Delete keys; the reply is the number removed.
    fn del(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("del").keys("keys", keys))
    }

    fn dump(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("dump").key("key", key))
    }

    fn exists(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("exists").key("key", key))
    }

    fn expire(&mut self, key: &str, ttl: i64) -> ClientResult<Value> {
        self.execute(Command::new("expire").key("key", key).int("ttl", ttl))
    }

    fn expire_at(&mut self, key: &str, timestamp: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("expireAt")
                .key("key", key)
                .int("timestamp", timestamp),
        )
    }

    fn keys(&mut self, pattern: &str) -> ClientResult<Value> {
        self.execute(Command::new("keys").text("pattern", pattern))
    }

    fn migrate(
        &mut self,
        host: &str,
        port: u16,
        key: &str,
        db: i64,
        timeout_ms: i64,
        copy: bool,
        replace: bool,
    ) -> ClientResult<Value> {
        self.execute(
            Command::new("migrate")
                .text("host", host)
                .int("port", i64::from(port))
                .key("key", key)
                .int("db", db)
                .int("timeout", timeout_ms)
                .arg("copy", Arg::Flag("COPY", copy))
                .arg("replace", Arg::Flag("REPLACE", replace)),
        )
    }

    fn move_key(&mut self, key: &str, db: i64) -> ClientResult<Value> {
        self.execute(Command::new("move").key("key", key).int("dbIndex", db))
    }

    /// `OBJECT <subcommand> <key>`, e.g. `encoding` or `idletime`.
    fn object(&mut self, subcommand: &str, key: &str) -> ClientResult<Value> {
        self.execute(
            Command::new("object")
                .text("string", subcommand)
                .key("key", key),
        )
    }

    fn persist(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("persist").key("key", key))
    }

    fn random_key(&mut self) -> ClientResult<Value> {
        self.execute(Command::new("randomKey"))
    }

    fn rename(&mut self, src: &str, dst: &str) -> ClientResult<Value> {
        self.execute(Command::new("rename").key("srcKey", src).key("dstKey", dst))
    }

    fn rename_nx(&mut self, src: &str, dst: &str) -> ClientResult<Value> {
        self.execute(Command::new("renameNx").key("srcKey", src).key("dstKey", dst))
    }

    fn key_type(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("type").key("key", key))
    }

    /// `SORT key [options...]`, options passed as raw tokens
    /// (`["BY", "w_*", "LIMIT", "0", "10", "ALPHA"]`).
    fn sort(&mut self, key: &str, options: &[&str]) -> ClientResult<Value> {
        self.execute(
            Command::new("sort")
                .key("key", key)
                .arg("option", Arg::Texts(options.iter().map(|o| o.to_string()).collect())),
        )
    }

    fn ttl(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("ttl").key("key", key))
    }

    fn restore(&mut self, key: &str, ttl: i64, serialized: &[u8]) -> ClientResult<Value> {
        self.execute(
            Command::new("restore")
                .key("key", key)
                .int("ttl", ttl)
                .value("value", serialized),
        )
    }
}

impl<C: KeyValueClient + ?Sized> KeyCommands for C {}
