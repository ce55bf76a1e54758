//! Core logic of a verification session: the transcript, the controller
//! that runs the submit-and-wait cycle, and the presentation loop that
//! keeps a view in step with both.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
mod error;
pub mod presentation;
mod session;
pub mod transcript;
mod verifier_client;

pub use controller::{
    Controller, ControllerBuilder, DEFAULT_FAILURE_MESSAGE, RejectReason,
    Submission,
};
pub use error::ControllerError;
pub use session::{Phase, SessionState};
