use std::fmt::{self, Debug};

use tokio::sync::watch;
use veracity_actor::{Actor, Message, Reply};

use super::{RejectReason, Submission};
use crate::session::{Phase, SessionState};
use crate::transcript::Entry;
use crate::verifier_client::{VerifierClient, VerifyResult};

pub struct ControllerState {
    /// Taken out while a verification is in flight.
    pub(super) verifier_client: Option<VerifierClient>,
    pub(super) state_tx: watch::Sender<SessionState>,
    pub(super) failure_message: String,

    pub(super) on_entry: Option<Box<dyn Fn(&Entry) + Send + Sync>>,
    pub(super) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ControllerState {
    fn submit(
        &mut self,
        source: SubmitSource,
        handle: &Actor<Self>,
    ) -> Submission {
        let text = match source {
            SubmitSource::Text(text) => text,
            SubmitSource::Draft => self.state_tx.borrow().draft.clone(),
        };
        if text.trim().is_empty() {
            trace!("ignore blank submission");
            return Submission::Rejected(RejectReason::Blank);
        }
        if self.state_tx.borrow().is_pending() {
            debug!("a verification is still pending, reject submission");
            return Submission::Rejected(RejectReason::Busy);
        }

        let entry = Entry::user(text.clone());
        self.state_tx.send_modify(|state| {
            state.transcript.append(entry.clone());
            state.phase = Phase::Pending;
            state.draft.clear();
        });
        self.notify_entry(&entry);

        let verifier_client = self
            .verifier_client
            .take()
            .expect("verifier client is already in use");
        let handle = handle.clone();
        tokio::spawn(async move {
            let result = verifier_client.verify_detached(text).await;
            handle
                .send(VerificationFinished {
                    verifier_client,
                    result,
                })
                .ok();
        });
        Submission::Accepted
    }

    fn finish(
        &mut self,
        verifier_client: VerifierClient,
        result: VerifyResult,
    ) {
        let entry = match result {
            Ok(verdict) => Entry::verdict(verdict),
            // The detail has been logged by the client, the transcript
            // only gets the fixed message.
            Err(err) => {
                debug!("record failure of kind {:?}", err.kind());
                Entry::assistant_text(self.failure_message.clone())
            }
        };

        self.verifier_client = Some(verifier_client);
        self.state_tx.send_modify(|state| {
            state.transcript.append(entry.clone());
            state.phase = Phase::Idle;
        });
        self.notify_entry(&entry);

        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn notify_entry(&self, entry: &Entry) {
        if let Some(on_entry) = &self.on_entry {
            on_entry(entry);
        }
    }
}

#[derive(Debug)]
pub enum SubmitSource {
    Text(String),
    Draft,
}

#[derive(Debug)]
pub struct Submit {
    pub source: SubmitSource,
    pub reply: Reply<Submission>,
}

impl Message<ControllerState> for Submit {
    fn handle(
        self,
        state: &mut ControllerState,
        handle: &Actor<ControllerState>,
    ) {
        let submission = state.submit(self.source, handle);
        self.reply.send(submission);
    }
}

#[derive(Debug)]
pub struct SetDraft(pub String);

impl Message<ControllerState> for SetDraft {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        state.state_tx.send_modify(|s| s.draft = self.0);
    }
}

struct VerificationFinished {
    verifier_client: VerifierClient,
    result: VerifyResult,
}

impl Debug for VerificationFinished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationFinished")
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl Message<ControllerState> for VerificationFinished {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        state.finish(self.verifier_client, self.result);
    }
}
