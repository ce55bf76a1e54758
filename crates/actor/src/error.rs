use std::error::Error;
use std::fmt;

/// Returned when a message is sent to an actor whose event loop has
/// already stopped, or when the actor stops before answering a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorDeadError;

impl fmt::Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the actor is no longer running".fmt(f)
    }
}

impl Error for ActorDeadError {}
