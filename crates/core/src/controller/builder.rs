use tokio::sync::watch;
use veracity_model::Verifier;

use super::{Controller, DEFAULT_FAILURE_MESSAGE};
use crate::controller::state::ControllerState;
use crate::session::SessionState;
use crate::transcript::Entry;
use crate::verifier_client::VerifierClient;

/// [`Controller`] builder.
pub struct ControllerBuilder {
    verifier_client: VerifierClient,
    failure_message: String,
    on_entry: Option<Box<dyn Fn(&Entry) + Send + Sync>>,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified verifier.
    #[inline]
    pub fn with_verifier<V: Verifier + 'static>(verifier: V) -> Self {
        Self {
            verifier_client: VerifierClient::new(verifier),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_owned(),
            on_entry: None,
            on_idle: None,
        }
    }

    /// Sets the text recorded in the transcript when a verification fails.
    #[inline]
    pub fn with_failure_message<S: Into<String>>(
        mut self,
        message: S,
    ) -> Self {
        self.failure_message = message.into();
        self
    }

    /// Attaches a callback to be invoked with every appended entry, in
    /// transcript order.
    #[inline]
    pub fn on_entry(
        mut self,
        on_entry: impl Fn(&Entry) + Send + Sync + 'static,
    ) -> Self {
        self.on_entry = Some(Box::new(on_entry));
        self
    }

    /// Attaches a callback to be invoked each time a verification has been
    /// resolved and the controller is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the controller.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self) -> Controller {
        let Self {
            verifier_client,
            failure_message,
            on_entry,
            on_idle,
        } = self;

        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let state = ControllerState {
            verifier_client: Some(verifier_client),
            state_tx,
            failure_message,
            on_entry,
            on_idle,
        };
        Controller::spawn(state, state_rx)
    }
}
