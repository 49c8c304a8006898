use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

fn fields(fields: &[&str]) -> Arg {
    Arg::Texts(fields.iter().map(|f| f.to_string()).collect())
}

pub trait HashCommands: KeyValueClient {
    fn h_del(&mut self, key: &str, hash_keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("hDel").key("key", key).arg("hashKeys", fields(hash_keys)))
    }

    fn h_exists(&mut self, key: &str, hash_key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hExists").key("key", key).text("hashKey", hash_key))
    }

    fn h_get(&mut self, key: &str, hash_key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hGet").key("key", key).text("hashKey", hash_key))
    }

    fn h_get_all(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hGetAll").key("key", key))
    }

    fn h_incr_by(&mut self, key: &str, hash_key: &str, value: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("hIncrBy")
                .key("key", key)
                .text("hashKey", hash_key)
                .int("value", value),
        )
    }

    fn h_incr_by_float(&mut self, key: &str, field: &str, increment: f64) -> ClientResult<Value> {
        self.execute(
            Command::new("hIncrByFloat")
                .key("key", key)
                .text("field", field)
                .float("increment", increment),
        )
    }

    fn h_keys(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hKeys").key("key", key))
    }

    fn h_len(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hLen").key("key", key))
    }

    fn h_mget(&mut self, key: &str, hash_keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("hMGet").key("key", key).arg("hashKeys", fields(hash_keys)))
    }

    /// Field values are sent but only field names are recorded.
    fn h_mset<T: AsRef<[u8]>>(&mut self, key: &str, pairs: &[(&str, T)]) -> ClientResult<Value> {
        self.execute(Command::new("hMSet").key("key", key).pairs("hashKeys", pairs))
    }

    fn h_set(&mut self, key: &str, hash_key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("hSet")
                .key("key", key)
                .text("hashKey", hash_key)
                .value("value", value),
        )
    }

    fn h_set_nx(&mut self, key: &str, hash_key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("hSetNx")
                .key("key", key)
                .text("hashKey", hash_key)
                .value("value", value),
        )
    }

    fn h_vals(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("hVals").key("key", key))
    }
}

impl<C: KeyValueClient + ?Sized> HashCommands for C {}
