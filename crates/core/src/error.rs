use std::error::Error;
use std::fmt::{self, Display};

use veracity_actor::ActorDeadError;

/// Errors returned by [`crate::Controller`] operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerError {
    /// The controller's event loop is gone, the session is over.
    Dead,
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Dead => write!(f, "the session has ended"),
        }
    }
}

impl Error for ControllerError {}

impl From<ActorDeadError> for ControllerError {
    #[inline]
    fn from(_: ActorDeadError) -> Self {
        ControllerError::Dead
    }
}
