use crate::client::KeyValueClient;
use crate::command::Command;
use crate::error::ClientResult;
use crate::value::Value;

/// Where `LINSERT` places the new element relative to the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Before,
    After,
}

impl InsertPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertPosition::Before => "BEFORE",
            InsertPosition::After => "AFTER",
        }
    }
}

pub trait ListCommands: KeyValueClient {
    fn bl_pop(&mut self, keys: &[&str], timeout: i64) -> ClientResult<Value> {
        self.execute(Command::new("blPop").keys("keys", keys).int("timeout", timeout))
    }

    fn br_pop(&mut self, keys: &[&str], timeout: i64) -> ClientResult<Value> {
        self.execute(Command::new("brPop").keys("keys", keys).int("timeout", timeout))
    }

    fn br_pop_l_push(&mut self, src: &str, dst: &str, timeout: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("brPoplPush")
                .key("srcKey", src)
                .key("dstKey", dst)
                .int("timeout", timeout),
        )
    }

    fn l_index(&mut self, key: &str, index: i64) -> ClientResult<Value> {
        self.execute(Command::new("lIndex").key("key", key).int("index", index))
    }

    fn l_get(&mut self, key: &str, index: i64) -> ClientResult<Value> {
        self.execute(Command::new("lGet").key("key", key).int("index", index))
    }

    fn l_get_range(&mut self, key: &str, start: i64, end: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("lGetRange")
                .key("key", key)
                .int("start", start)
                .int("end", end),
        )
    }

    /// Reply is the new length, or `-1` when the pivot was not found.
    fn l_insert(
        &mut self,
        key: &str,
        position: InsertPosition,
        pivot: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> ClientResult<Value> {
        self.execute(
            Command::new("lInsert")
                .key("key", key)
                .text("position", position.as_str())
                .member("pivot", pivot)
                .value("value", value),
        )
    }

    fn l_len(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("lLen").key("key", key))
    }

    fn l_pop(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("lPop").key("key", key))
    }

    fn l_push<T: AsRef<[u8]>>(&mut self, key: &str, values: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("lPush").key("key", key).values("values", values))
    }

    fn l_pushx(&mut self, key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("lPushx").key("key", key).value("value", value))
    }

    fn l_range(&mut self, key: &str, start: i64, end: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("lRange")
                .key("key", key)
                .int("start", start)
                .int("end", end),
        )
    }

    fn l_rem(&mut self, key: &str, value: impl AsRef<[u8]>, count: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("lRem")
                .key("key", key)
                .int("count", count)
                .value("value", value),
        )
    }

    fn l_remove(&mut self, key: &str, value: impl AsRef<[u8]>, count: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("lRemove")
                .key("key", key)
                .int("count", count)
                .value("value", value),
        )
    }

    fn l_set(&mut self, key: &str, index: i64, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("lSet")
                .key("key", key)
                .int("index", index)
                .value("value", value),
        )
    }

    fn l_size(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("lSize").key("key", key))
    }

    fn l_trim(&mut self, key: &str, start: i64, stop: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("lTrim")
                .key("key", key)
                .int("start", start)
                .int("stop", stop),
        )
    }

    fn list_trim(&mut self, key: &str, start: i64, stop: i64) -> ClientResult<Value> {
        self.execute(
            Command::new("listTrim")
                .key("key", key)
                .int("start", start)
                .int("stop", stop),
        )
    }

    fn r_pop(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("rPop").key("key", key))
    }

    fn r_pop_l_push(&mut self, src: &str, dst: &str) -> ClientResult<Value> {
        self.execute(Command::new("rPopLPush").key("srcKey", src).key("dstKey", dst))
    }

    fn r_push<T: AsRef<[u8]>>(&mut self, key: &str, values: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("rPush").key("key", key).values("values", values))
    }

    fn r_pushx(&mut self, key: &str, value: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("rPushx").key("key", key).value("value", value))
    }
}

impl<C: KeyValueClient + ?Sized> ListCommands for C {}

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
    fn test_l_insert_wire_order() {
        let mut stub = StubClient::new();
        stub.l_insert("l", InsertPosition::After, "pivot", "new").unwrap();
        assert_eq!(tokens(&stub), vec!["LINSERT", "l", "AFTER", "pivot", "new"]);
    }

    #[test]
    fn test_l_rem_puts_count_before_value() {
        let mut stub = StubClient::new();
        stub.l_rem("l", "x", 2).unwrap();
        assert_eq!(tokens(&stub), vec!["LREM", "l", "2", "x"]);
        stub.l_remove("l", "x", -1).unwrap();
        assert_eq!(tokens(&stub), vec!["LREM", "l", "-1", "x"]);
        assert_eq!(stub.last_command().unwrap().name(), "lRemove");
    }

    #[test]
    fn test_push_values_not_recorded() {
        let mut stub = StubClient::new();
        stub.r_push("l", &["a", "b", "c"]).unwrap();
        assert_eq!(tokens(&stub), vec!["RPUSH", "l", "a", "b", "c"]);
        assert_eq!(stub.last_command().unwrap().snapshot().labels(), vec!["key"]);
    }
}
