use crate::client::KeyValueClient;
use crate::command::{Arg, Command};
use crate::error::ClientResult;
use crate::value::Value;

/// Position of an incremental `SCAN`-family iteration.
///
/// Starts at [`ScanCursor::Start`], advances with every reply and becomes
/// [`ScanCursor::Done`] once the server hands back cursor `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanCursor {
    #[default]
    Start,
    At(u64),
    Done,
}

impl ScanCursor {
    pub fn is_done(&self) -> bool {
        matches!(self, ScanCursor::Done)
    }

    fn position(&self) -> u64 {
        match self {
            ScanCursor::At(n) => *n,
            ScanCursor::Start | ScanCursor::Done => 0,
        }
    }

    /// Take the `[cursor, items]` reply apart, advancing the cursor. Replies
    /// of any other shape are passed back untouched.
    fn advance(&mut self, reply: Value) -> Value {
        let items = match reply {
            Value::Array(items) if items.len() == 2 => items,
            other => return other,
        };
        let Some(next) = cursor_of(&items[0]) else {
            return Value::Array(items);
        };
        *self = if next == 0 {
            ScanCursor::Done
        } else {
            ScanCursor::At(next)
        };
        let mut items = items;
        items.pop().unwrap_or(Value::Nil)
    }
}

/// Cursors are unsigned 64-bit and usually arrive as bulk strings.
fn cursor_of(value: &Value) -> Option<u64> {
    match value {
        Value::Int(n) => u64::try_from(*n).ok(),
        other => other.to_string_lossy()?.parse().ok(),
    }
}

fn scan_command(
    name: &'static str,
    key: Option<&str>,
    cursor: &ScanCursor,
    pattern: Option<&str>,
    count: Option<i64>,
) -> Command {
    let cmd = match key {
        Some(key) => Command::new(name).key("key", key),
        None => Command::new(name),
    };
    let cmd = cmd
        .text("iterator", &cursor.position().to_string())
        .opt_arg(
            "pattern",
            pattern.map(|p| Arg::keyword("MATCH", Arg::Text(p.to_string()))),
        )
        .opt_arg("count", count.map(|c| Arg::keyword("COUNT", Arg::Int(c))));
    // a finished iteration answers `false` locally instead of restarting at 0
    if cursor.is_done() {
        cmd.settled(Value::Bool(false))
    } else {
        cmd
    }
}

/// Cursor-based iteration. Each call returns one batch of items and moves
/// `cursor` along; once the cursor is done, further calls return `false`
/// without reaching the server (but still pass through `execute`).
pub trait ScanCommands: KeyValueClient {
    fn scan(
        &mut self,
        cursor: &mut ScanCursor,
        pattern: Option<&str>,
        count: Option<i64>,
    ) -> ClientResult<Value> {
        let reply = self.execute(scan_command("scan", None, cursor, pattern, count))?;
        Ok(cursor.advance(reply))
    }

    fn h_scan(
        &mut self,
        key: &str,
        cursor: &mut ScanCursor,
        pattern: Option<&str>,
        count: Option<i64>,
    ) -> ClientResult<Value> {
        let reply = self.execute(scan_command("hScan", Some(key), cursor, pattern, count))?;
        Ok(cursor.advance(reply))
    }

    fn s_scan(
        &mut self,
        key: &str,
        cursor: &mut ScanCursor,
        pattern: Option<&str>,
        count: Option<i64>,
    ) -> ClientResult<Value> {
        let reply = self.execute(scan_command("sScan", Some(key), cursor, pattern, count))?;
        Ok(cursor.advance(reply))
    }

    fn z_scan(
        &mut self,
        key: &str,
        cursor: &mut ScanCursor,
        pattern: Option<&str>,
        count: Option<i64>,
    ) -> ClientResult<Value> {
        let reply = self.execute(scan_command("zScan", Some(key), cursor, pattern, count))?;
        Ok(cursor.advance(reply))
    }
}

impl<C: KeyValueClient + ?Sized> ScanCommands for C {}
