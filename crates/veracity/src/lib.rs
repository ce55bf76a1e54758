//! A chat-style client for a text verification service.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to put a verification session into your own front
//! end, see [`Session`].

#![deny(missing_docs)]

mod session;
pub mod terminal;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`veracity_core`] crate.
pub mod core {
    pub use veracity_core::*;
}
