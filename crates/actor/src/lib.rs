//! A single-task actor runtime.
//!
//! Every actor owns its state and handles messages one by one on its own
//! tokio task. This gives the owner a cooperative event loop: state is
//! never touched concurrently, so it needs no locking, and long-running
//! work is spawned elsewhere and reports back with a message.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::{Message, Reply};
