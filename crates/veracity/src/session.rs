use tokio::sync::watch;
use veracity_core::presentation::{PresentationSync, Viewport};
use veracity_core::transcript::Entry;
use veracity_core::{
    Controller, ControllerBuilder, ControllerError, SessionState, Submission,
};
use veracity_http_verifier::{HttpVerifier, HttpVerifierConfig};
use veracity_model::Verifier;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    controller_builder: ControllerBuilder,
}

impl SessionBuilder {
    /// Creates a session builder with a specified verifier.
    pub fn with_verifier<V: Verifier + 'static>(verifier: V) -> Self {
        let controller_builder = ControllerBuilder::with_verifier(verifier);
        Self { controller_builder }
    }

    /// Creates a session builder that talks to an HTTP verification
    /// service.
    #[inline]
    pub fn with_http_config(config: HttpVerifierConfig) -> Self {
        Self::with_verifier(HttpVerifier::new(config))
    }

    /// Sets the text recorded in the transcript when a verification fails.
    #[inline]
    pub fn with_failure_message<S: Into<String>>(
        mut self,
        message: S,
    ) -> Self {
        self.controller_builder =
            self.controller_builder.with_failure_message(message);
        self
    }

    /// Attaches a callback to be invoked with every new transcript entry.
    #[inline]
    pub fn on_entry(
        mut self,
        on_entry: impl Fn(&Entry) + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_entry(on_entry);
        self
    }

    /// Attaches a callback to be invoked when a verification has been
    /// resolved.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session. Must be called within a tokio runtime.
    pub fn build(self) -> Session {
        let controller = self.controller_builder.build();
        Session { controller }
    }
}

/// A chat session, like a window that displays the exchanges and has an
/// input box.
///
/// The session is a thin wrapper around [`Controller`]. Dropping every
/// clone of it ends the session once no verification is in flight.
#[derive(Clone)]
pub struct Session {
    controller: Controller,
}

impl Session {
    /// Submits a text for verification.
    #[inline]
    pub async fn submit(
        &self,
        text: &str,
    ) -> Result<Submission, ControllerError> {
        self.controller.submit(text).await
    }

    /// Replaces the text in the input box.
    #[inline]
    pub fn set_draft<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), ControllerError> {
        self.controller.set_draft(text)
    }

    /// Submits whatever is in the input box.
    #[inline]
    pub async fn submit_draft(&self) -> Result<Submission, ControllerError> {
        self.controller.submit_draft().await
    }

    /// Returns a copy of the current state.
    #[inline]
    pub fn state(&self) -> SessionState {
        self.controller.snapshot()
    }

    /// Returns a receiver that always shows the latest state.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.controller.subscribe()
    }

    /// Starts keeping `viewport` in sync with this session.
    ///
    /// The view is updated until the returned handle is dropped.
    #[inline]
    pub fn present<V: Viewport>(&self, viewport: V) -> PresentationSync {
        PresentationSync::spawn(self.controller.subscribe(), viewport)
    }
}
