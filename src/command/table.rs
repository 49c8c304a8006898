//! Declarative command table.
//!
//! Every operation the client surface exposes has one entry here naming the
//! Redis command it is sent as, how its reply is classified, which argument
//! shapes it accepts, and whether its reply is copied into the snapshot.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::command::Command;
use crate::error::{ClientError, ClientResult};
use crate::outcome::Policy::{self, *};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Redis command (possibly with a subcommand), `None` for operations the
    /// client answers locally. An empty string takes the command from the
    /// first argument.
    pub wire: Option<&'static str>,
    pub policy: Policy,
    /// Accepted label sequences; empty means any.
    pub shapes: &'static [&'static [&'static str]],
    /// Snapshot label the reply is recorded under, if any.
    pub reply_label: Option<&'static str>,
}

impl CommandSpec {
    const fn new(name: &'static str, wire: &'static str, policy: Policy) -> Self {
        CommandSpec {
            name,
            wire: Some(wire),
            policy,
            shapes: &[],
            reply_label: None,
        }
    }

    const fn local(name: &'static str, policy: Policy) -> Self {
        CommandSpec {
            name,
            wire: None,
            policy,
            shapes: &[],
            reply_label: None,
        }
    }

    const fn shapes(self, shapes: &'static [&'static [&'static str]]) -> Self {
        CommandSpec { shapes, ..self }
    }

    const fn reply_as(self, label: &'static str) -> Self {
        CommandSpec {
            reply_label: Some(label),
            ..self
        }
    }

    /// Spec used for operations missing from the table. The wire command is
    /// derived from the name when encoding.
    fn fallback(name: &'static str) -> Self {
        CommandSpec {
            name,
            wire: None,
            policy: FalseIsWarning,
            shapes: &[],
            reply_label: None,
        }
    }

    /// Reject an invocation whose labelled arguments match none of the
    /// accepted shapes.
    pub fn validate(&self, cmd: &Command) -> ClientResult<()> {
        if self.shapes.is_empty() {
            return Ok(());
        }
        let labels = cmd.labels();
        if self.shapes.iter().any(|shape| *shape == labels.as_slice()) {
            return Ok(());
        }
        let expected: Vec<String> = self.shapes.iter().map(|s| s.join(" ")).collect();
        Err(ClientError::invalid_argument(
            self.name,
            format!(
                "expected one of ({}), got ({})",
                expected.join(" | "),
                labels.join(" ")
            ),
        ))
    }
}

const BITPOS_SHAPES: &[&[&str]] = &[
    &["key", "bit"],
    &["key", "bit", "start"],
    &["key", "bit", "start", "end"],
];

const BYLEX_SHAPES: &[&[&str]] = &[
    &["key", "min", "max"],
    &["key", "min", "max", "offset", "limit"],
];

pub static COMMANDS: &[CommandSpec] = &[
    // Connection
    CommandSpec::new("auth", "AUTH", FalseIsWarning),
    CommandSpec::local("close", Informational),
    CommandSpec::new("cEcho", "ECHO", FalseIsWarning),
    CommandSpec::local("getOption", FalseIsWarning),
    CommandSpec::new("ping", "PING", Probe),
    CommandSpec::new("select", "SELECT", FalseIsWarning),
    CommandSpec::local("setOption", FalseIsWarning),
    CommandSpec::local("getMode", Informational),
    CommandSpec::new("rawCommand", "", Informational),
    CommandSpec::new("wait", "WAIT", Informational),
    // Keys
    CommandSpec::new("del", "DEL", Informational).reply_as("result"),
    CommandSpec::new("dump", "DUMP", FalseIsWarning),
    CommandSpec::new("exists", "EXISTS", Informational),
    CommandSpec::new("expire", "EXPIRE", FalseIsWarning),
    CommandSpec::new("expireAt", "EXPIREAT", FalseIsWarning),
    CommandSpec::new("keys", "KEYS", Informational),
    CommandSpec::new("migrate", "MIGRATE", FalseIsWarning),
    CommandSpec::new("move", "MOVE", FalseIsWarning),
    CommandSpec::new("object", "OBJECT", FalseIsWarning),
    CommandSpec::new("persist", "PERSIST", FalseIsWarning),
    CommandSpec::new("randomKey", "RANDOMKEY", FalseIsWarning),
    CommandSpec::new("rename", "RENAME", FalseIsWarning),
    CommandSpec::new("renameNx", "RENAMENX", FalseIsWarning),
    CommandSpec::new("type", "TYPE", FalseIsWarning),
    CommandSpec::new("sort", "SORT", FalseIsWarning),
    CommandSpec::new("ttl", "TTL", FalseIsWarning),
    CommandSpec::new("restore", "RESTORE", FalseIsWarning),
    // Strings
    CommandSpec::new("append", "APPEND", Informational).reply_as("stringSize"),
    CommandSpec::new("bitCount", "BITCOUNT", Informational),
    CommandSpec::new("bitpos", "BITPOS", FalseIsWarning).shapes(BITPOS_SHAPES),
    CommandSpec::new("decr", "DECR", FalseIsWarning),
    CommandSpec::new("decrBy", "DECRBY", FalseIsWarning),
    CommandSpec::new("get", "GET", FalseIsWarning),
    CommandSpec::new("getBit", "GETBIT", FalseIsWarning),
    CommandSpec::new("getRange", "GETRANGE", FalseIsWarning),
    CommandSpec::new("getSet", "GETSET", FalseIsWarning),
    CommandSpec::new("incr", "INCR", FalseIsWarning),
    CommandSpec::new("incrBy", "INCRBY", FalseIsWarning),
    CommandSpec::new("incrByFloat", "INCRBYFLOAT", FalseIsWarning),
    CommandSpec::new("mget", "MGET", FalseIsWarning),
    CommandSpec::new("mset", "MSET", FalseIsWarning),
    CommandSpec::new("set", "SET", FalsyIsError),
    CommandSpec::new("setBit", "SETBIT", FalsyIsError),
    CommandSpec::new("setex", "SETEX", FalsyIsError),
    CommandSpec::new("setnx", "SETNX", Informational).reply_as("notExistingKey"),
    CommandSpec::new("setRange", "SETRANGE", FalsyIsError),
    CommandSpec::new("strlen", "STRLEN", FalsyIsError),
    // Hashes
    CommandSpec::new("hDel", "HDEL", FalseIsWarning),
    CommandSpec::new("hExists", "HEXISTS", Informational),
    CommandSpec::new("hGet", "HGET", FalseIsWarning),
    CommandSpec::new("hGetAll", "HGETALL", FalseIsWarning),
    CommandSpec::new("hIncrBy", "HINCRBY", FalseIsWarning),
    CommandSpec::new("hIncrByFloat", "HINCRBYFLOAT", FalseIsWarning),
    CommandSpec::new("hKeys", "HKEYS", FalseIsWarning),
    CommandSpec::new("hLen", "HLEN", FalseIsWarning),
    CommandSpec::new("hMGet", "HMGET", FalseIsWarning),
    CommandSpec::new("hMSet", "HMSET", FalseIsWarning),
    CommandSpec::new("hSet", "HSET", FalseIsWarning),
    CommandSpec::new("hSetNx", "HSETNX", FalseIsWarning),
    CommandSpec::new("hVals", "HVALS", FalseIsWarning),
    // Lists
    CommandSpec::new("blPop", "BLPOP", FalseIsWarning),
    CommandSpec::new("brPop", "BRPOP", FalseIsWarning),
    CommandSpec::new("brPoplPush", "BRPOPLPUSH", FalseIsWarning),
    CommandSpec::new("lIndex", "LINDEX", FalseIsWarning),
    CommandSpec::new("lGet", "LINDEX", FalseIsWarning),
    CommandSpec::new("lGetRange", "LRANGE", FalseIsWarning),
    CommandSpec::new("lInsert", "LINSERT", NegativeOneIsWarning),
    CommandSpec::new("lLen", "LLEN", FalseIsWarning),
    CommandSpec::new("lPop", "LPOP", FalseIsWarning),
    CommandSpec::new("lPush", "LPUSH", FalseIsWarning),
    CommandSpec::new("lPushx", "LPUSHX", FalseIsWarning),
    CommandSpec::new("lRange", "LRANGE", FalseIsWarning),
    CommandSpec::new("lRem", "LREM", FalseIsWarning),
    CommandSpec::new("lRemove", "LREM", FalseIsWarning),
    CommandSpec::new("lSet", "LSET", FalseIsWarning),
    CommandSpec::new("lSize", "LLEN", FalseIsWarning),
    CommandSpec::new("lTrim", "LTRIM", FalseIsWarning),
    CommandSpec::new("listTrim", "LTRIM", FalseIsWarning),
    CommandSpec::new("rPop", "RPOP", FalseIsWarning),
    CommandSpec::new("rPopLPush", "RPOPLPUSH", FalseIsWarning),
    CommandSpec::new("rPush", "RPUSH", FalseIsWarning),
    CommandSpec::new("rPushx", "RPUSHX", FalseIsWarning),
    // Server
    CommandSpec::new("bgrewriteaof", "BGREWRITEAOF", FalseIsError),
    CommandSpec::new("bgsave", "BGSAVE", FalseIsError),
    CommandSpec::new("config", "CONFIG", FalseIsError),
    CommandSpec::new("dbSize", "DBSIZE", FalsyIsError),
    CommandSpec::new("flushAll", "FLUSHALL", FalsyIsError),
    CommandSpec::new("flushDB", "FLUSHDB", FalsyIsError),
    CommandSpec::new("info", "INFO", FalsyIsError),
    CommandSpec::new("lastSave", "LASTSAVE", FalsyIsError),
    CommandSpec::new("resetStat", "CONFIG RESETSTAT", FalsyIsError),
    CommandSpec::new("save", "SAVE", FalsyIsError),
    CommandSpec::new("slaveof", "SLAVEOF", FalsyIsError),
    CommandSpec::new("time", "TIME", FalsyIsError),
    CommandSpec::new("slowlog", "SLOWLOG", FalsyIsError),
    // Sets
    CommandSpec::new("sAdd", "SADD", FalsyIsError),
    CommandSpec::new("sCard", "SCARD", FalseIsError),
    CommandSpec::new("sContains", "SISMEMBER", Informational),
    CommandSpec::new("sDiff", "SDIFF", FalsyIsError),
    CommandSpec::new("sDiffStore", "SDIFFSTORE", FalsyIsError),
    CommandSpec::new("sGetMembers", "SMEMBERS", FalseIsError),
    CommandSpec::new("sInter", "SINTER", FalsyIsError),
    CommandSpec::new("sInterStore", "SINTERSTORE", FalsyIsError),
    CommandSpec::new("sIsMember", "SISMEMBER", Informational),
    CommandSpec::new("sMembers", "SMEMBERS", FalseIsError),
    CommandSpec::new("sMove", "SMOVE", FalsyIsError),
    CommandSpec::new("sPop", "SPOP", FalseIsError),
    CommandSpec::new("sRandMember", "SRANDMEMBER", FalseIsError),
    CommandSpec::new("sRem", "SREM", FalseIsError),
    CommandSpec::new("sRemove", "SREM", FalseIsError),
    CommandSpec::new("sSize", "SCARD", FalseIsError),
    CommandSpec::new("sUnion", "SUNION", FalseIsError),
    CommandSpec::new("sUnionStore", "SUNIONSTORE", FalseIsError),
    // Sorted sets
    CommandSpec::new("zAdd", "ZADD", FalseIsError),
    CommandSpec::new("zCard", "ZCARD", FalseIsError),
    CommandSpec::new("zCount", "ZCOUNT", FalseIsError),
    CommandSpec::new("zIncrBy", "ZINCRBY", FalseIsError),
    CommandSpec::new("zInter", "ZINTERSTORE", FalseIsError),
    CommandSpec::new("zRange", "ZRANGE", FalseIsError),
    CommandSpec::new("zRangeByScore", "ZRANGEBYSCORE", FalseIsError),
    CommandSpec::new("zRevRangeByScore", "ZREVRANGEBYSCORE", FalseIsError),
    CommandSpec::new("zRangeByLex", "ZRANGEBYLEX", Informational).shapes(BYLEX_SHAPES),
    CommandSpec::new("zRevRangeByLex", "ZREVRANGEBYLEX", Informational).shapes(BYLEX_SHAPES),
    CommandSpec::new("zRank", "ZRANK", FalseIsError),
    CommandSpec::new("zRevRank", "ZREVRANK", FalseIsError),
    CommandSpec::new("zRem", "ZREM", FalseIsError),
    CommandSpec::new("zDelete", "ZREM", FalseIsError),
    CommandSpec::new("zDeleteRangeByRank", "ZREMRANGEBYRANK", FalseIsError),
    CommandSpec::new("zDeleteRangeByScore", "ZREMRANGEBYSCORE", FalseIsError),
    CommandSpec::new("zRemRangeByRank", "ZREMRANGEBYRANK", FalseIsError),
    CommandSpec::new("zRemRangeByScore", "ZREMRANGEBYSCORE", FalseIsError),
    CommandSpec::new("zScore", "ZSCORE", FalseIsError),
    CommandSpec::new("zSize", "ZCARD", FalseIsError),
    CommandSpec::new("zUnion", "ZUNIONSTORE", FalseIsError),
    // Scans
    CommandSpec::new("scan", "SCAN", FalseIsWarning),
    CommandSpec::new("hScan", "HSCAN", FalseIsWarning),
    CommandSpec::new("sScan", "SSCAN", FalseIsWarning),
    CommandSpec::new("zScan", "ZSCAN", FalseIsWarning),
    // HyperLogLog
    CommandSpec::new("pfAdd", "PFADD", FalseIsWarning),
    CommandSpec::new("pfCount", "PFCOUNT", Informational),
    CommandSpec::new("pfMerge", "PFMERGE", Informational),
];

fn index() -> &'static HashMap<&'static str, &'static CommandSpec> {
    static INDEX: OnceLock<HashMap<&'static str, &'static CommandSpec>> = OnceLock::new();
    INDEX.get_or_init(|| COMMANDS.iter().map(|spec| (spec.name, spec)).collect())
}

/// Look up a registered operation.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    index().get(name).copied()
}

/// The spec for an operation, falling back to a `false`-is-warning pass-through
/// for names the table does not know.
pub fn spec_for(name: &'static str) -> CommandSpec {
    lookup(name)
        .copied()
        .unwrap_or_else(|| CommandSpec::fallback(name))
}
