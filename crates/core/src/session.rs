//! The observable state of a verification session.

use serde::Serialize;

use crate::transcript::Transcript;

/// Whether a verification call is outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing in flight, submissions are accepted.
    #[default]
    Idle,
    /// Exactly one verification call is outstanding.
    Pending,
}

/// Everything a front end needs to draw a session.
///
/// Published by the controller after every transition. Readers get it
/// through a [`tokio::sync::watch::Receiver`], which always shows the
/// latest version.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub(crate) transcript: Transcript,
    pub(crate) phase: Phase,
    pub(crate) draft: String,
}

impl SessionState {
    /// Returns the transcript.
    #[inline]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Shorthand for `phase() == Phase::Pending`.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    /// Returns the text being composed.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }
}
