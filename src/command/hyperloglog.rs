use crate::client::KeyValueClient;
use crate::command::Command;
use crate::error::ClientResult;
use crate::value::Value;

pub trait HyperLogLogCommands: KeyValueClient {
    fn pf_add<T: AsRef<[u8]>>(&mut self, key: &str, elements: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("pfAdd").key("key", key).members("elements", elements))
    }

    fn pf_count(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("pfCount").keys("key", keys))
    }

    fn pf_merge(&mut self, dst: &str, sources: &[&str]) -> ClientResult<Value> {
        self.execute(
            Command::new("pfMerge")
                .key("destKey", dst)
                .keys("sourceKeys", sources),
        )
    }
}

impl<C: KeyValueClient + ?Sized> HyperLogLogCommands for C {}
