use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

/// Score aggregation for `ZINTERSTORE` / `ZUNIONSTORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Min,
    Max,
}

impl Aggregate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregate::Sum => "SUM",
            Aggregate::Min => "MIN",
            Aggregate::Max => "MAX",
        }
    }
}

/// Options of the by-score range queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreRange {
    pub withscores: bool,
    /// `(offset, count)`
    pub limit: Option<(i64, i64)>,
}

impl ScoreRange {
    pub fn with_scores(mut self) -> Self {
        self.withscores = true;
        self
    }

    pub fn limit(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some((offset, count));
        self
    }
}

fn store_command(
    name: &'static str,
    output: &str,
    keys: &[&str],
    weights: Option<&[f64]>,
    aggregate: Option<Aggregate>,
) -> Command {
    Command::new(name)
        .key("output", output)
        .arg("keys", Arg::CountedKeys(keys.iter().map(|k| k.to_string()).collect()))
        .opt_arg("weights", weights.map(|w| Arg::keyword("WEIGHTS", Arg::Floats(w.to_vec()))))
        .opt_arg(
            "aggregate",
            aggregate.map(|a| Arg::keyword("AGGREGATE", Arg::Text(a.as_str().to_string()))),
        )
}

fn by_score(name: &'static str, key: &str, start: &str, end: &str, options: ScoreRange) -> Command {
    Command::new(name)
        .key("key", key)
        .text("start", start)
        .text("end", end)
        .arg("withscores", Arg::Flag("WITHSCORES", options.withscores))
        .opt_arg(
            "limit",
            options
                .limit
                .map(|(offset, count)| Arg::keyword("LIMIT", Arg::Ints(vec![offset, count]))),
        )
}

fn by_lex(
    name: &'static str,
    key: &str,
    min: &str,
    max: &str,
    offset: Option<i64>,
    limit: Option<i64>,
) -> Command {
    Command::new(name)
        .key("key", key)
        .text("min", min)
        .text("max", max)
        .opt_arg("offset", offset.map(|o| Arg::keyword("LIMIT", Arg::Int(o))))
        .opt_arg("limit", limit.map(Arg::Int))
}

fn range(name: &'static str, key: &str, start: i64, end: i64) -> Command {
    Command::new(name)
        .key("key", key)
        .int("start", start)
        .int("end", end)
}

fn score_bounds(name: &'static str, key: &str, start: &str, end: &str) -> Command {
    Command::new(name)
        .key("key", key)
        .text("start", start)
        .text("end", end)
}

/// Sorted-set operations. Score bounds are strings so that `-inf`, `+inf`
/// and exclusive bounds like `(1.5` pass through untouched.
pub trait SortedSetCommands: KeyValueClient {
    /// Only the scores are recorded, not the members.
    fn z_add<T: AsRef<[u8]>>(&mut self, key: &str, members: &[(f64, T)]) -> ClientResult<Value> {
        self.execute(Command::new("zAdd").key("key", key).scored("scores", members))
    }

    fn z_card(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("zCard").key("key", key))
    }

    fn z_count(&mut self, key: &str, start: &str, end: &str) -> ClientResult<Value> {
        self.execute(score_bounds("zCount", key, start, end))
    }

    fn z_incr_by(&mut self, key: &str, value: f64, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(
            Command::new("zIncrBy")
                .key("key", key)
                .float("value", value)
                .member("member", member),
        )
    }

    fn z_inter(
        &mut self,
        output: &str,
        keys: &[&str],
        weights: Option<&[f64]>,
        aggregate: Option<Aggregate>,
    ) -> ClientResult<Value> {
        self.execute(store_command("zInter", output, keys, weights, aggregate))
    }

    fn z_range(&mut self, key: &str, start: i64, end: i64, withscores: bool) -> ClientResult<Value> {
        self.execute(
            range("zRange", key, start, end).arg("withscores", Arg::Flag("WITHSCORES", withscores)),
        )
    }

    fn z_range_by_score(
        &mut self,
        key: &str,
        start: &str,
        end: &str,
        options: ScoreRange,
    ) -> ClientResult<Value> {
        self.execute(by_score("zRangeByScore", key, start, end, options))
    }

    /// Note the bounds run high to low: `start` is the maximum.
    fn z_rev_range_by_score(
        &mut self,
        key: &str,
        start: &str,
        end: &str,
        options: ScoreRange,
    ) -> ClientResult<Value> {
        self.execute(by_score("zRevRangeByScore", key, start, end, options))
    }

    /// `offset` and `limit` must be given together.
    fn z_range_by_lex(
        &mut self,
        key: &str,
        min: &str,
        max: &str,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> ClientResult<Value> {
        self.execute(by_lex("zRangeByLex", key, min, max, offset, limit))
    }

    fn z_rev_range_by_lex(
        &mut self,
        key: &str,
        min: &str,
        max: &str,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> ClientResult<Value> {
        self.execute(by_lex("zRevRangeByLex", key, min, max, offset, limit))
    }

    fn z_rank(&mut self, key: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("zRank").key("key", key).member("member", member))
    }

    fn z_rev_rank(&mut self, key: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("zRevRank").key("key", key).member("member", member))
    }

    fn z_rem<T: AsRef<[u8]>>(&mut self, key: &str, members: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("zRem").key("key", key).members("members", members))
    }

    fn z_delete<T: AsRef<[u8]>>(&mut self, key: &str, members: &[T]) -> ClientResult<Value> {
        self.execute(Command::new("zDelete").key("key", key).members("members", members))
    }

    fn z_delete_range_by_rank(&mut self, key: &str, start: i64, end: i64) -> ClientResult<Value> {
        self.execute(range("zDeleteRangeByRank", key, start, end))
    }

    fn z_delete_range_by_score(&mut self, key: &str, start: &str, end: &str) -> ClientResult<Value> {
        self.execute(score_bounds("zDeleteRangeByScore", key, start, end))
    }

    fn z_rem_range_by_rank(&mut self, key: &str, start: i64, end: i64) -> ClientResult<Value> {
        self.execute(range("zRemRangeByRank", key, start, end))
    }

    fn z_rem_range_by_score(&mut self, key: &str, start: &str, end: &str) -> ClientResult<Value> {
        self.execute(score_bounds("zRemRangeByScore", key, start, end))
    }

    fn z_score(&mut self, key: &str, member: impl AsRef<[u8]>) -> ClientResult<Value> {
        self.execute(Command::new("zScore").key("key", key).member("member", member))
    }

    fn z_size(&mut self, key: &str) -> ClientResult<Value> {
        self.execute(Command::new("zSize").key("key", key))
    }

    fn z_union(
        &mut self,
        output: &str,
        keys: &[&str],
        weights: Option<&[f64]>,
        aggregate: Option<Aggregate>,
    ) -> ClientResult<Value> {
        self.execute(store_command("zUnion", output, keys, weights, aggregate))
    }
}

impl<C: KeyValueClient + ?Sized> SortedSetCommands for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ParamValue;
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
    fn test_z_add_records_scores() {
        let mut stub = StubClient::new();
        stub.z_add("board", &[(10.0, "alice"), (7.5, "bob")]).unwrap();
        assert_eq!(tokens(&stub), vec!["ZADD", "board", "10", "alice", "7.5", "bob"]);
        assert_eq!(
            stub.last_command().unwrap().snapshot().get("scores"),
            Some(&ParamValue::Floats(vec![10.0, 7.5]))
        );
    }

    #[test]
    fn test_z_range_records_start_and_end() {
        let mut stub = StubClient::new();
        stub.z_range("z", 0, 5, true).unwrap();
        let snapshot = stub.last_command().unwrap().snapshot();
        assert_eq!(snapshot.get("start"), Some(&ParamValue::Int(0)));
        assert_eq!(snapshot.get("end"), Some(&ParamValue::Int(5)));
        assert_eq!(tokens(&stub), vec!["ZRANGE", "z", "0", "5", "WITHSCORES"]);
    }

    #[test]
    fn test_z_range_by_score_options() {
        let mut stub = StubClient::new();
        stub.z_range_by_score("z", "-inf", "(5", ScoreRange::default().with_scores().limit(0, 10))
            .unwrap();
        assert_eq!(
            tokens(&stub),
            vec!["ZRANGEBYSCORE", "z", "-inf", "(5", "WITHSCORES", "LIMIT", "0", "10"]
        );
    }

    #[test]
    fn test_z_union_weights_and_aggregate() {
        let mut stub = StubClient::new();
        stub.z_union("out", &["a", "b"], Some(&[2.0, 1.0][..]), Some(Aggregate::Min))
            .unwrap();
        assert_eq!(
            tokens(&stub),
            vec!["ZUNIONSTORE", "out", "2", "a", "b", "WEIGHTS", "2", "1", "AGGREGATE", "MIN"]
        );
    }

    #[test]
    fn test_z_range_by_lex_limit() {
        let mut stub = StubClient::new();
        stub.z_range_by_lex("z", "[a", "[z", Some(1), Some(2)).unwrap();
        assert_eq!(
            tokens(&stub),
            vec!["ZRANGEBYLEX", "z", "[a", "[z", "LIMIT", "1", "2"]
        );
    }
}
