mod builder;
mod state;
#[cfg(test)]
mod tests;

use tokio::sync::watch;
use veracity_actor::Actor;

pub use builder::ControllerBuilder;
use state::{ControllerState, SetDraft, Submit, SubmitSource};

use crate::error::ControllerError;
use crate::session::SessionState;

/// The transcript text recorded when a verification fails, unless the
/// builder sets another one.
pub const DEFAULT_FAILURE_MESSAGE: &str =
    "Error connecting to the verification service.";

/// The result of a submission attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Submission {
    /// The text was recorded and a verification call has been issued.
    Accepted,
    /// Nothing happened.
    Rejected(RejectReason),
}

impl Submission {
    /// Returns `true` if the submission was accepted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted)
    }
}

/// Why a submission was turned down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The text is empty or only whitespace.
    Blank,
    /// Another verification is still pending.
    Busy,
}

/// Drives a verification session.
///
/// The controller owns the transcript, the pending flag and the draft. It
/// runs as an actor, so every transition happens on one event loop in the
/// order the triggering events arrived, and the verification call itself
/// runs beside it without blocking it.
///
/// At most one verification is in flight per controller: while one is
/// pending, further submissions are rejected as
/// [`RejectReason::Busy`]. Whatever the outcome of a call, exactly one
/// assistant entry is appended for it and the controller returns to
/// [`crate::Phase::Idle`].
#[derive(Clone)]
pub struct Controller {
    handle: Actor<ControllerState>,
    state_rx: watch::Receiver<SessionState>,
}

impl Controller {
    /// Submits `text` for verification.
    ///
    /// When this returns [`Submission::Accepted`], the user entry is
    /// already in the transcript and the session is pending.
    pub async fn submit<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<Submission, ControllerError> {
        let source = SubmitSource::Text(text.into());
        let submission = self
            .handle
            .request(move |reply| Submit { source, reply })
            .await?;
        Ok(submission)
    }

    /// Submits the current draft, see [`Controller::set_draft`].
    pub async fn submit_draft(&self) -> Result<Submission, ControllerError> {
        let submission = self
            .handle
            .request(|reply| Submit {
                source: SubmitSource::Draft,
                reply,
            })
            .await?;
        Ok(submission)
    }

    /// Replaces the text being composed.
    ///
    /// Editing is allowed while a verification is pending. The draft is
    /// only cleared by an accepted submission.
    #[inline]
    pub fn set_draft<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), ControllerError> {
        self.handle.send(SetDraft(text.into()))?;
        Ok(())
    }

    /// Returns a receiver that always shows the latest session state.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_rx.clone()
    }

    /// Returns a copy of the current session state.
    #[inline]
    pub fn snapshot(&self) -> SessionState {
        self.state_rx.borrow().clone()
    }

    /// Returns `true` while a verification is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state_rx.borrow().is_pending()
    }

    fn spawn(
        state: ControllerState,
        state_rx: watch::Receiver<SessionState>,
    ) -> Self {
        let handle = Actor::spawn(state, Some("controller"));
        Self { handle, state_rx }
    }
}
