//! Flattening of labelled commands into Redis protocol tokens.

use crate::command::table::lookup;
use crate::command::{Arg, Command};
use crate::error::{ClientError, ClientResult};

/// Encode a command as the token list sent to the server.
///
/// Operations without a table entry are sent under their upper-cased name.
/// Client-local operations have no wire form and yield `Unsupported`.
pub fn encode(cmd: &Command) -> ClientResult<Vec<Vec<u8>>> {
    let mut tokens: Vec<Vec<u8>> = Vec::new();
    match lookup(cmd.name()) {
        Some(spec) => match spec.wire {
            Some(wire) => {
                tokens.extend(wire.split_whitespace().map(|w| w.as_bytes().to_vec()))
            }
            None => return Err(ClientError::Unsupported(cmd.name().to_string())),
        },
        None => tokens.push(cmd.name().to_uppercase().into_bytes()),
    }

    for (_, arg) in cmd.params() {
        push_arg(&mut tokens, arg);
    }

    if tokens.is_empty() {
        return Err(ClientError::invalid_argument(cmd.name(), "empty command"));
    }
    Ok(tokens)
}

fn push_arg(out: &mut Vec<Vec<u8>>, arg: &Arg) {
    match arg {
        Arg::Key(s) | Arg::Text(s) | Arg::Secret(s) => out.push(s.as_bytes().to_vec()),
        Arg::Keys(v) | Arg::Texts(v) => out.extend(v.iter().map(|s| s.as_bytes().to_vec())),
        Arg::CountedKeys(v) => {
            out.push(v.len().to_string().into_bytes());
            out.extend(v.iter().map(|s| s.as_bytes().to_vec()));
        }
        Arg::Int(n) => out.push(n.to_string().into_bytes()),
        Arg::Ints(v) => out.extend(v.iter().map(|n| n.to_string().into_bytes())),
        Arg::Float(f) => out.push(format_float(*f)),
        Arg::Floats(v) => out.extend(v.iter().map(|f| format_float(*f))),
        Arg::Value(b) | Arg::Member(b) => out.push(b.to_vec()),
        Arg::Values(v) | Arg::Members(v) => out.extend(v.iter().map(|b| b.to_vec())),
        Arg::Pairs(v) => {
            for (field, value) in v {
                out.push(field.as_bytes().to_vec());
                out.push(value.to_vec());
            }
        }
        Arg::Scored(v) => {
            for (score, member) in v {
                out.push(format_float(*score));
                out.push(member.to_vec());
            }
        }
        Arg::Flag(token, set) => {
            if *set {
                out.push(token.as_bytes().to_vec());
            }
        }
        Arg::Keyword(token, inner) => {
            out.push(token.as_bytes().to_vec());
            push_arg(out, inner);
        }
    }
}

/// Scores go out the way Redis prints them back: `inf`/`-inf` for the
/// infinities, integral values without a fraction.
fn format_float(f: f64) -> Vec<u8> {
    if f.is_infinite() {
        return if f > 0.0 { b"+inf".to_vec() } else { b"-inf".to_vec() };
    }
    f.to_string().into_bytes()
}
