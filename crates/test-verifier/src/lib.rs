//! A local fake verifier for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::pending;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::sleep;
use veracity_model::{
    ErrorKind, VerificationRequest, Verdict, Verifier, VerifierError,
};

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl VerifierError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

enum Step {
    Ready(PresetOutcome),
    Deferred(oneshot::Receiver<PresetOutcome>),
}

/// A local fake verifier for testing purpose.
///
/// Outcomes are scripted up front and consumed in order, one per call,
/// whatever text is sent. A call with nothing left in the script fails.
/// Every call is recorded, so tests can check how many requests were
/// actually issued and with what text.
///
/// Clones share the script and the call log.
#[derive(Clone, Default)]
pub struct TestVerifier {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl TestVerifier {
    /// Scripts the next call to end with `outcome`.
    #[inline]
    pub fn push_outcome(&self, outcome: PresetOutcome) {
        self.push_step(Step::Ready(outcome));
    }

    /// Scripts the next call to succeed with `verdict`.
    #[inline]
    pub fn push_verdict(&self, verdict: Verdict) {
        self.push_outcome(PresetOutcome::Verdict(verdict));
    }

    /// Scripts the next call to fail with an error of `kind`.
    #[inline]
    pub fn push_failure(&self, kind: ErrorKind) {
        self.push_outcome(PresetOutcome::Failure(kind));
    }

    /// Scripts the next call to never complete.
    #[inline]
    pub fn push_hang(&self) {
        self.push_outcome(PresetOutcome::Hang);
    }

    /// Scripts the next call to panic.
    #[inline]
    pub fn push_panic(&self) {
        self.push_outcome(PresetOutcome::Panic);
    }

    /// Scripts the next call to wait until the returned [`Resolver`]
    /// decides its outcome.
    #[inline]
    pub fn push_deferred(&self) -> Resolver {
        let (tx, rx) = oneshot::channel();
        self.push_step(Step::Deferred(rx));
        Resolver(tx)
    }

    /// Delays every outcome by `duration`.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the texts of all calls made so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many calls have been made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push_step(&self, step: Step) {
        self.script.lock().unwrap().push_back(step);
    }
}

impl Verifier for TestVerifier {
    type Error = crate::Error;

    fn verify(
        &self,
        req: &VerificationRequest,
    ) -> impl Future<Output = Result<Verdict, Self::Error>> + Send + 'static
    {
        self.calls.lock().unwrap().push(req.text.clone());
        let step = self.script.lock().unwrap().pop_front();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                sleep(delay).await;
            }
            let outcome = match step {
                Some(Step::Ready(outcome)) => outcome,
                Some(Step::Deferred(rx)) => match rx.await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        return Err(Error {
                            message: "resolver dropped",
                            kind: ErrorKind::Other,
                        });
                    }
                },
                None => {
                    return Err(Error {
                        message: "no more scripted outcomes",
                        kind: ErrorKind::Other,
                    });
                }
            };
            match outcome {
                PresetOutcome::Verdict(verdict) => Ok(verdict),
                PresetOutcome::Failure(kind) => Err(Error {
                    message: "scripted failure",
                    kind,
                }),
                PresetOutcome::Hang => pending().await,
                PresetOutcome::Panic => panic!("scripted panic"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{Instant, timeout};

    use super::*;

    fn req(text: &str) -> VerificationRequest {
        VerificationRequest::new(text)
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let verifier = TestVerifier::default();
        verifier.push_verdict(Verdict::new("True", "90%", "Yes."));
        verifier.push_failure(ErrorKind::Timeout);

        let verdict = verifier.verify(&req("one")).await.unwrap();
        assert_eq!(verdict.display_verdict().as_deref(), Some("True"));

        let err = verifier.verify(&req("two")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);

        let err = verifier.verify(&req("three")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);

        assert_eq!(verifier.calls(), ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_deferred() {
        let verifier = TestVerifier::default();
        let resolver = verifier.push_deferred();
        let fut = verifier.verify(&req("later"));
        assert_eq!(verifier.call_count(), 1);

        resolver.resolve_verdict(Verdict::new("False", "10%", "No."));
        let verdict = fut.await.unwrap();
        assert_eq!(verdict.display_explanation().as_deref(), Some("No."));

        let resolver = verifier.push_deferred();
        let fut = verifier.verify(&req("dropped"));
        drop(resolver);
        assert!(fut.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_and_delay() {
        let mut verifier = TestVerifier::default();
        verifier.push_hang();
        let res = timeout(Duration::from_secs(60), verifier.verify(&req("x")))
            .await;
        assert!(res.is_err());

        verifier.set_delay(Duration::from_secs(2));
        verifier.push_failure(ErrorKind::Unreachable);
        let started = Instant::now();
        let err = verifier.verify(&req("y")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreachable);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_panic() {
        let verifier = TestVerifier::default();
        verifier.push_panic();
        let fut = verifier.verify(&req("boom"));
        let err = tokio::spawn(fut).await.unwrap_err();
        assert!(err.is_panic());
        assert_eq!(verifier.calls(), ["boom"]);
    }
}
