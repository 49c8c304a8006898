use std::sync::Arc;
use std::thread;

use redtrace::prelude::*;
use redtrace::testing::{StubClient, StubReply};
use redtrace::{
    ClientError, ConnectionMetadata, InstrumentedClient, MemoryCollector, MetricsCollector,
    NullSink, Outcome, OutcomeRecord, ParamValue, Value,
};

fn metadata() -> ConnectionMetadata {
    ConnectionMetadata::new("127.0.0.1", Some(6379), 0)
}

fn instrument(stub: StubClient) -> InstrumentedClient<StubClient> {
    InstrumentedClient::new(stub, metadata()).with_sink(Arc::new(NullSink))
}

fn only_record(client: &InstrumentedClient<StubClient>) -> OutcomeRecord {
    let records = client.commands();
    assert_eq!(records.len(), 1, "expected exactly one record, got {records:?}");
    records.into_iter().next().unwrap()
}

#[test]
fn test_get_hit_is_info() {
    let mut client = instrument(StubClient::new().on("get", StubReply::Value(Value::from("v"))));
    assert_eq!(client.get("k").unwrap(), Value::from("v"));

    let record = only_record(&client);
    assert_eq!(record.command, "get");
    assert_eq!(record.outcome, Outcome::Info);
    assert_eq!(record.params.get("key"), Some(&ParamValue::Text("k".into())));
    assert!(record.duration_ms >= 0.0);
}

#[test]
fn test_get_miss_is_warning() {
    let mut client =
        instrument(StubClient::new().on("get", StubReply::Value(Value::Bool(false))));
    assert_eq!(client.get("missing").unwrap(), Value::Bool(false));
    assert_eq!(only_record(&client).outcome, Outcome::Warning);
}

#[test]
fn test_del_records_all_keys_and_count() {
    let mut client = instrument(StubClient::new().on("del", StubReply::Value(Value::Int(3))));
    assert_eq!(client.del(&["a", "b", "c"]).unwrap(), Value::Int(3));

    let record = only_record(&client);
    assert_eq!(record.outcome, Outcome::Info);
    assert_eq!(
        record.params.get("keys"),
        Some(&ParamValue::List(vec!["a".into(), "b".into(), "c".into()]))
    );
    assert_eq!(record.params.get("result"), Some(&ParamValue::Int(3)));
}

#[test]
fn test_informational_operations_never_warn() {
    for reply in [Value::Bool(true), Value::Bool(false)] {
        let mut client = instrument(
            StubClient::new()
                .on("exists", StubReply::Value(reply.clone()))
                .on("sIsMember", StubReply::Value(reply.clone()))
                .on("hExists", StubReply::Value(reply.clone())),
        );
        assert_eq!(client.exists("k").unwrap(), reply);
        assert_eq!(client.s_is_member("s", "m").unwrap(), reply);
        assert_eq!(client.h_exists("h", "f").unwrap(), reply);
        assert!(client.commands().iter().all(|r| r.outcome == Outcome::Info));
    }
}

#[test]
fn test_sentinel_policies() {
    let stub = StubClient::new()
        .on("sCard", StubReply::Value(Value::Bool(false)))
        .on("strlen", StubReply::Value(Value::Int(0)))
        .on("lInsert", StubReply::Value(Value::Int(-1)))
        .on("dbSize", StubReply::Value(Value::Int(0)));
    let mut client = instrument(stub);

    client.s_card("s").unwrap();
    client.strlen("empty").unwrap();
    client.l_insert("l", InsertPosition::Before, "nope", "x").unwrap();
    client.db_size().unwrap();

    let outcomes: Vec<(&str, Outcome)> = client
        .commands()
        .iter()
        .map(|r| (r.command, r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("sCard", Outcome::Error),
            ("strlen", Outcome::Error),
            ("lInsert", Outcome::Warning),
            ("dbSize", Outcome::Error),
        ]
    );
}

#[test]
fn test_fault_is_reraised_and_recorded() {
    let mut client = instrument(StubClient::new().on("set", StubReply::Fail("broken pipe".into())));
    let err = client.set("k", "v", 0).unwrap_err();
    assert!(matches!(err, ClientError::Driver(ref m) if m == "broken pipe"));

    let record = only_record(&client);
    assert_eq!(record.outcome, Outcome::Error);
    assert_eq!(record.fault.as_deref(), Some("broken pipe"));
}

#[test]
fn test_ping_fault_returns_nil() {
    let mut client =
        instrument(StubClient::new().on("ping", StubReply::Fail("connection refused".into())));
    assert_eq!(client.ping().unwrap(), Value::Nil);
    assert_eq!(only_record(&client).outcome, Outcome::Warning);
}

#[test]
fn test_shape_validation_blocks_forwarding() {
    let mut client = instrument(StubClient::new());

    let err = client.z_range_by_lex("z", "-", "+", Some(0), None).unwrap_err();
    assert!(err.is_invalid_argument());
    let err = client.bitpos("k", true, None, Some(3)).unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(client.inner().received().is_empty());
    assert_eq!(client.command_count(), 0);

    client.z_range_by_lex("z", "-", "+", Some(0), Some(5)).unwrap();
    client.bitpos("k", true, Some(0), Some(3)).unwrap();
    assert_eq!(client.inner().received().len(), 2);
}

#[test]
fn test_transparency() {
    let replies = [
        Value::Nil,
        Value::Bool(false),
        Value::Int(-1),
        Value::Float(1.5),
        Value::status("PONG"),
        Value::from("payload"),
        Value::array(vec![Value::from("a"), Value::Int(2)]),
    ];
    for reply in replies {
        let mut direct = StubClient::new().with_default(StubReply::Value(reply.clone()));
        let mut client =
            instrument(StubClient::new().with_default(StubReply::Value(reply.clone())));
        assert_eq!(client.h_get_all("h").unwrap(), direct.h_get_all("h").unwrap());
        assert_eq!(client.z_rank("z", "m").unwrap(), reply);
    }
}

#[test]
fn test_one_record_per_call() {
    let mut client = instrument(StubClient::new());
    client.set("a", "1", 0).unwrap();
    client.incr_by("a", 5).unwrap();
    client.h_mset("h", &[("f1", "v1"), ("f2", "v2")]).unwrap();
    client.s_add("s", &["x", "y"]).unwrap();
    client.z_add("z", &[(1.0, "m")]).unwrap();
    client.pf_add("hll", &["e1"]).unwrap();
    client.info(None).unwrap();

    let records = client.commands();
    assert_eq!(records.len(), 7);
    assert_eq!(client.inner().received().len(), 7);
    assert!(records.iter().all(|r| r.duration_ms >= 0.0));
    assert!(records.iter().all(|r| r.connection == metadata()));
}

#[test]
fn test_alias_recorded_under_own_name() {
    let mut client = instrument(StubClient::new());
    client.l_size("l").unwrap();
    client.z_delete("z", &["m"]).unwrap();
    client.s_contains("s", "m").unwrap();
    let names: Vec<&str> = client.commands().iter().map(|r| r.command).collect();
    assert_eq!(names, vec!["lSize", "zDelete", "sContains"]);
}

#[test]
fn test_scan_through_proxy() {
    let page = Value::array(vec![
        Value::from("0"),
        Value::array(vec![Value::from("user:1")]),
    ]);
    let mut stub = StubClient::new();
    stub.push_reply("scan", StubReply::Value(page));
    let mut client = instrument(stub);

    let mut cursor = ScanCursor::Start;
    let items = client.scan(&mut cursor, Some("user:*"), None).unwrap();
    assert_eq!(items, Value::array(vec![Value::from("user:1")]));
    assert!(cursor.is_done());
    assert!(client.scan(&mut cursor, Some("user:*"), None).unwrap().is_false());
    assert!(cursor.is_done());

    let records = client.commands();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outcome, Outcome::Info);
    assert_eq!(records[0].params.get("pattern"), Some(&ParamValue::Text("user:*".into())));
    assert_eq!(records[1].command, "scan");
    assert_eq!(records[1].outcome, Outcome::Warning);
}

#[test]
fn test_shared_collector_across_threads() {
    let collector = MemoryCollector::shared();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let collector = collector.clone();
            thread::spawn(move || {
                let mut client = InstrumentedClient::new(StubClient::new(), metadata())
                    .with_sink(Arc::new(NullSink))
                    .with_collector(collector);
                for i in 0..50 {
                    client.incr(&format!("counter:{i}")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(collector.count(), 200);
    assert_eq!(collector.summary().commands, 200);
}

#[test]
fn test_boxed_client_can_be_wrapped() {
    let boxed: Box<dyn KeyValueClient> = Box::new(StubClient::new());
    let mut client = InstrumentedClient::new(boxed, metadata()).with_sink(Arc::new(NullSink));
    client.ping().unwrap();
    assert_eq!(client.command_count(), 1);
}

#[test]
#[ignore] // needs a running server at REDIS_URL
fn test_live_redis() {
    use redtrace::RedisDriverClient;
    use std::time::Duration;

    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".into());
    let driver = RedisDriverClient::connect(&url, Duration::from_secs(2)).unwrap();
    let mut client = InstrumentedClient::new(driver, metadata());

    client.del(&["redtrace:it:k", "redtrace:it:h"]).unwrap();
    assert_eq!(client.set("redtrace:it:k", "v", 60).unwrap(), Value::Bool(true));
    assert_eq!(client.get("redtrace:it:k").unwrap(), Value::from("v"));
    assert!(client.get("redtrace:it:missing").unwrap().is_false());
    assert_eq!(client.h_set("redtrace:it:h", "f", "1").unwrap(), Value::Int(1));
    assert_eq!(client.h_incr_by("redtrace:it:h", "f", 2).unwrap(), Value::Int(3));
    assert_eq!(client.ping().unwrap(), Value::status("PONG"));

    let outcomes: Vec<Outcome> = client.commands().iter().map(|r| r.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Info,
            Outcome::Info,
            Outcome::Info,
            Outcome::Warning,
            Outcome::Info,
            Outcome::Info,
            Outcome::Info,
        ]
    );
}
