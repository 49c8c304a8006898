use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

pub trait SetCommands: KeyValueClient {
    fn s_add<T: AsRef<[u8]>>(&mut self, key: &str, members: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("sAdd").key("key", key).members("members", members))
    }

    fn s_card(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("sCard").key("key", key))
    }

    fn s_contains(&mut self, key: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("sContains").key("key", key).member("value", member))
    }

    fn s_diff(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sDiff").keys("keys", keys))
    }

    fn s_diff_store(&mut self, dst: &str, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sDiffStore").key("dstKey", dst).keys("keys", keys))
    }

    fn s_get_members(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("sGetMembers").key("key", key))
    }

    fn s_inter(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sInter").keys("keys", keys))
    }

    fn s_inter_store(&mut self, dst: &str, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sInterStore").key("dstKey", dst).keys("keys", keys))
    }

    fn s_is_member(&mut self, key: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("sIsMember").key("key", key).member("value", member))
    }

    fn s_members(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("sMembers").key("key", key))
    }

    fn s_move(&mut self, src: &str, dst: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("sMove")
                .key("srcKey", src)
                .key("dstKey", dst)
                .member("member", member),
        )
    }

    fn s_pop(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("sPop").key("key", key))
    }

    fn s_rand_member(&mut self, key: &str, count: Option<i64>) -> ClientResult<Value> {
        self.execute(
            Command::new("sRandMember")
                .key("key", key)
                .opt_arg("count", count.map(Arg::Int)),
        )
    }

    fn s_rem<T: AsRef<[u8]>>(&mut self, key: &str, members: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("sRem").key("key", key).members("members", members))
    }

    fn s_remove<T: AsRef<[u8]>>(&mut self, key: &str, members: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("sRemove").key("key", key).members("members", members))
    }

    fn s_size(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("sSize").key("key", key))
    }

    fn s_union(&mut self, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sUnion").keys("keys", keys))
    }

    fn s_union_store(&mut self, dst: &str, keys: &[&str]) -> ClientResult<Value> {
        self.execute(Command::new("sUnionStore").key("dstKey", dst).keys("keys", keys))
    }
}

impl<C: KeyValueClient + ?Sized> SetCommands for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ParamValue;
    use crate::testing::StubClient;

    #[test]
    fn test_s_contains_is_not_s_inter_store() {
        let mut stub = StubClient::new();
        stub.s_contains("s", "m").unwrap();
        let cmd = stub.last_command().unwrap();
        assert_eq!(cmd.name(), "sContains");
        assert_eq!(cmd.snapshot().get("value"), Some(&ParamValue::Text("m".into())));
    }

    #[test]
    fn test_s_rand_member_count_is_optional() {
        let mut stub = StubClient::new();
        stub.s_rand_member("s", None).unwrap();
        assert_eq!(stub.last_command().unwrap().labels(), vec!["key"]);
        stub.s_rand_member("s", Some(3)).unwrap();
        assert_eq!(stub.last_command().unwrap().labels(), vec!["key", "count"]);
    }
}
