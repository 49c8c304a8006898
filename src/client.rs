use crate::command::Command;
use crate::error::ClientResult;
use crate::value::Value;

/// The common surface of every key-value client.
///
/// Implementors provide [`execute`](KeyValueClient::execute); the named
/// operations (`get`, `hSet`, `zAdd`, ...) come from the family extension
/// traits in [`crate::command`], which build a [`Command`] and hand it here.
/// Wrapping one client in another therefore only needs this one method.
///
/// A command carrying a [settled reply](Command::settled_reply) must be
/// answered with that reply and never reach the server.
pub trait KeyValueClient {
    fn execute(&mut self, command: Command) -> ClientResult<Value>;
}

impl<C: KeyValueClient + ?Sized> KeyValueClient for Box<C> {
    fn execute(&mut self, command: Command) -> ClientResult<Value> {
        (**self).execute(command)
    }
}

impl<C: KeyValueClient + ?Sized> KeyValueClient for &mut C {
    fn execute(&mut self, command: Command) -> ClientResult<Value> {
        (**self).execute(command)
    }
}
