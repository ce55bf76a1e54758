//! Protocol types shared between the verification session and the services
//! that produce verdicts.
//!
//! This crate pins down what a verification call looks like from the
//! client's side: the request carrying the submitted text, the verdict
//! record coming back, and the error contract a service implementation has
//! to follow. It defines no behavior of its own.
//!
//! Implementors (an HTTP client, a scripted fake for tests) live in their
//! own crates and depend on this one.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod verdict;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use verdict::*;
