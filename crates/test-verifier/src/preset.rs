use tokio::sync::oneshot;
use veracity_model::{ErrorKind, Verdict};

/// How a scripted call ends.
#[derive(Clone, Debug, PartialEq)]
pub enum PresetOutcome {
    /// The call succeeds with this verdict.
    Verdict(Verdict),
    /// The call fails with an error of this kind.
    Failure(ErrorKind),
    /// The call never completes.
    Hang,
    /// The call panics while being polled.
    Panic,
}

/// Decides the outcome of a call scripted with
/// [`crate::TestVerifier::push_deferred`].
///
/// Until [`Resolver::resolve`] is called the call stays outstanding.
/// Dropping the resolver fails the call.
#[derive(Debug)]
pub struct Resolver(pub(crate) oneshot::Sender<PresetOutcome>);

impl Resolver {
    /// Completes the call with `outcome`.
    #[inline]
    pub fn resolve(self, outcome: PresetOutcome) {
        self.0.send(outcome).ok();
    }

    /// Completes the call with a verdict.
    #[inline]
    pub fn resolve_verdict(self, verdict: Verdict) {
        self.resolve(PresetOutcome::Verdict(verdict));
    }

    /// Fails the call with an error of `kind`.
    #[inline]
    pub fn fail(self, kind: ErrorKind) {
        self.resolve(PresetOutcome::Failure(kind));
    }
}
