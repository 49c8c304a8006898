pub mod connection;
pub mod key;
pub mod string;
pub mod hash;
pub mod list;
pub mod set;
pub mod sorted_set;
pub mod server_cmd;
pub mod scan;
pub mod hyperloglog;
pub mod table;
pub mod wire;

use bytes::Bytes;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::value::Value;

/// A single argument of a command, tagged with its semantic role.
///
/// The role decides both how the argument is flattened onto the wire and how
/// much of it ends up in the parameter snapshot of an outcome record.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Key(String),
    Keys(Vec<String>),
    /// Key list preceded by its length on the wire (`ZINTERSTORE dst 2 a b`).
    CountedKeys(Vec<String>),
    Int(i64),
    Ints(Vec<i64>),
    Float(f64),
    Floats(Vec<f64>),
    Text(String),
    Texts(Vec<String>),
    /// Value payload; never snapshotted.
    Value(Bytes),
    Values(Vec<Bytes>),
    Member(Bytes),
    Members(Vec<Bytes>),
    /// Field/value pairs; only the field names are snapshotted.
    Pairs(Vec<(String, Bytes)>),
    /// Score/member pairs; only the scores are snapshotted.
    Scored(Vec<(f64, Bytes)>),
    Secret(String),
    /// Emits the token when set, nothing otherwise.
    Flag(&'static str, bool),
    /// Emits the token followed by the inner argument.
    Keyword(&'static str, Box<Arg>),
}

impl Arg {
    pub fn keyword(token: &'static str, inner: Arg) -> Self {
        Arg::Keyword(token, Box::new(inner))
    }

    /// Reduced form recorded in outcome records, `None` for payloads.
    pub fn snapshot(&self) -> Option<ParamValue> {
        let value = match self {
            Arg::Key(s) | Arg::Text(s) => ParamValue::Text(s.clone()),
            Arg::Keys(v) | Arg::CountedKeys(v) | Arg::Texts(v) => ParamValue::List(v.clone()),
            Arg::Int(n) => ParamValue::Int(*n),
            Arg::Ints(v) => ParamValue::Ints(v.clone()),
            Arg::Float(f) => ParamValue::Float(*f),
            Arg::Floats(v) => ParamValue::Floats(v.clone()),
            Arg::Value(_) | Arg::Values(_) => return None,
            Arg::Member(m) => ParamValue::Text(lossy(m)),
            Arg::Members(v) => ParamValue::List(v.iter().map(|m| lossy(m)).collect()),
            Arg::Pairs(v) => ParamValue::List(v.iter().map(|(f, _)| f.clone()).collect()),
            Arg::Scored(v) => ParamValue::Floats(v.iter().map(|(s, _)| *s).collect()),
            Arg::Secret(_) => ParamValue::Text("***".to_string()),
            Arg::Flag(_, set) => ParamValue::Bool(*set),
            Arg::Keyword(_, inner) => return inner.snapshot(),
        };
        Some(value)
    }
}

fn lossy(b: &[u8]) -> String {
    String::from_utf8_lossy(b).into_owned()
}

fn to_bytes(v: impl AsRef<[u8]>) -> Bytes {
    Bytes::copy_from_slice(v.as_ref())
}

/// One invocation of a named operation with its labelled arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: &'static str,
    params: Vec<(&'static str, Arg)>,
    settled: Option<Value>,
}

impl Command {
    pub fn new(name: &'static str) -> Self {
        Command {
            name,
            params: Vec::new(),
            settled: None,
        }
    }

    /// Mark the command as already answered with `reply`. Clients hand the
    /// reply back without touching the connection, so wrappers still see
    /// (and record) the call.
    pub fn settled(mut self, reply: Value) -> Self {
        self.settled = Some(reply);
        self
    }

    pub fn settled_reply(&self) -> Option<&Value> {
        self.settled.as_ref()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[(&'static str, Arg)] {
        &self.params
    }

    pub fn param(&self, label: &str) -> Option<&Arg> {
        self.params
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, a)| a)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.params.iter().map(|(l, _)| *l).collect()
    }

    pub fn arg(mut self, label: &'static str, arg: Arg) -> Self {
        self.params.push((label, arg));
        self
    }

    /// Push the argument only when present.
    pub fn opt_arg(self, label: &'static str, arg: Option<Arg>) -> Self {
        match arg {
            Some(arg) => self.arg(label, arg),
            None => self,
        }
    }

    pub fn key(self, label: &'static str, key: &str) -> Self {
        self.arg(label, Arg::Key(key.to_string()))
    }

    pub fn keys(self, label: &'static str, keys: &[&str]) -> Self {
        self.arg(label, Arg::Keys(keys.iter().map(|k| k.to_string()).collect()))
    }

    pub fn int(self, label: &'static str, n: i64) -> Self {
        self.arg(label, Arg::Int(n))
    }

    pub fn float(self, label: &'static str, f: f64) -> Self {
        self.arg(label, Arg::Float(f))
    }

    pub fn text(self, label: &'static str, s: &str) -> Self {
        self.arg(label, Arg::Text(s.to_string()))
    }

    pub fn value(self, label: &'static str, v: impl AsRef<[u8]>) -> Self {
        self.arg(label, Arg::Value(to_bytes(v)))
    }

    pub fn values<T: AsRef<[u8]>>(self, label: &'static str, vs: &[T]) -> Self {
        self.arg(label, Arg::Values(vs.iter().map(to_bytes).collect()))
    }

    pub fn member(self, label: &'static str, m: impl AsRef<[u8]>) -> Self {
        self.arg(label, Arg::Member(to_bytes(m)))
    }

    pub fn members<T: AsRef<[u8]>>(self, label: &'static str, ms: &[T]) -> Self {
        self.arg(label, Arg::Members(ms.iter().map(to_bytes).collect()))
    }

    pub fn pairs<T: AsRef<[u8]>>(self, label: &'static str, pairs: &[(&str, T)]) -> Self {
        self.arg(
            label,
            Arg::Pairs(pairs.iter().map(|(f, v)| (f.to_string(), to_bytes(v))).collect()),
        )
    }

    pub fn scored<T: AsRef<[u8]>>(self, label: &'static str, pairs: &[(f64, T)]) -> Self {
        self.arg(
            label,
            Arg::Scored(pairs.iter().map(|(s, m)| (*s, to_bytes(m))).collect()),
        )
    }

    /// Build the parameter snapshot recorded for this invocation.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();
        for (label, arg) in &self.params {
            if let Some(value) = arg.snapshot() {
                snapshot.push(*label, value);
            }
        }
        snapshot
    }
}

/// A recorded parameter value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

impl ParamValue {
    /// Record a reply as a parameter (used for `del`'s count and friends).
    pub fn from_reply(reply: &Value) -> Self {
        match reply {
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::Int(n) => ParamValue::Int(*n),
            Value::Float(f) => ParamValue::Float(*f),
            other => match other.to_string_lossy() {
                Some(s) => ParamValue::Text(s),
                None => ParamValue::Text(format!("{other:?}")),
            },
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Text(s) => write!(f, "{s}"),
            ParamValue::List(v) => write!(f, "[{}]", v.join(", ")),
            ParamValue::Ints(v) => {
                let parts: Vec<String> = v.iter().map(|n| n.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            ParamValue::Floats(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Ordered label/value pairs describing the arguments of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot(Vec<(&'static str, ParamValue)>);

impl Snapshot {
    pub fn push(&mut self, label: &'static str, value: ParamValue) {
        self.0.push((label, value));
    }

    pub fn get(&self, label: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(l, _)| *l).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{label}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
