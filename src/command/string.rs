use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

pub trait StringCommands: KeyValueClient {
    fn append(&mut self, key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("append").key("key", key).value("value", value))
    }

    fn bit_count(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("bitCount").key("key", key))
    }

    /// Position of the first bit set to `bit`. `end` requires `start`.
    fn bitpos(
        &mut self,
        key: &str,
        bit: bool,
        start: Option<i64>,
        end: Option<i64>,
    ) -> ClientResult<Value> {
        self.execute(
            Command::new("bitpos")
                .key("key", key)
                .int("bit", i64::from(bit))
                .opt_arg("start", start.map(Arg::Int))
                .opt_arg("end", end.map(Arg::Int)),
        )
    }

    fn decr(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("decr").key("key", key))
    }

    fn decr_by(&mut self, key: &str, value: i64) -> ClientResult<Value> {
        self.execute(Command::new("decrBy").key("key", key).int("value", value))
    }

    fn get(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("get").key("key", key))
    }

    fn get_bit(&mut self, key: &str, offset: i64) -> ClientResult<Value> {
        self.execute(Command::new("getBit").key("key", key).int("offset", offset))
    }

    fn get_range(&mut self, key: &str, start: i64, end: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("getRange")
                .key("key", key)
                .int("start", start)
                .int("end", end),
        )
    }

    fn get_set(&mut self, key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("getSet").key("key", key).value("value", value))
    }

    fn incr(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("incr").key("key", key))
    }

    fn incr_by(&mut self, key: &str, value: i64) -> ClientResult<Value> {
        self.execute(Command::new("incrBy").key("key", key).int("value", value))
    }

    fn incr_by_float(&mut self, key: &str, increment: f64) -> ClientResult<Value> {
        self.execute(
            Command::new("incrByFloat")
                .key("key", key)
                .float("increment", increment),
        )
    }

    fn mget(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("mget").keys("array", keys))
    }

    /// Only the keys are recorded, not the values.
    fn mset<T: AsRef<[u8]>>(&mut self, pairs: &[(&str, T)]) -> ClientResult<Value> {
        self.execute(Command::new("mset").pairs("array", pairs))
    }

    /// `SET key value [EX timeout]`; a timeout of zero or less sets no expiry.
    fn set(&mut self, key: &str, value: impl AsRef<[u8]>, timeout: i64) -> ClientResult<Value> {
        let expiry = (timeout > 0).then(|| Arg::keyword("EX", Arg::Int(timeout)));
        self.execute(
            Command::new("set")
                .key("key", key)
                .value("value", value)
                .opt_arg("timeout", expiry),
        )
    }

    fn set_bit(&mut self, key: &str, offset: i64, value: bool) -> ClientResult<Value> {
        self.execute(
            Command::new("setBit")
                .key("key", key)
                .int("offset", offset)
                .int("value", i64::from(value)),
        )
    }

    fn setex(&mut self, key: &str, ttl: i64, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("setex")
                .key("key", key)
                .int("ttl", ttl)
                .value("value", value),
        )
    }

    fn setnx(&mut self, key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("setnx").key("key", key).value("value", value))
    }

    fn set_range(&mut self, key: &str, offset: i64, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("setRange")
                .key("key", key)
                .int("offset", offset)
                .value("value", value),
        )
    }

    fn strlen(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("strlen").key("key", key))
    }
}

impl<C: KeyValueClient + ?Sized> StringCommands for C {}
