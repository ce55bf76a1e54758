use std::error::Error;
use std::fmt::{self, Display};
use std::pin::Pin;
use std::sync::Arc;

use tracing::Instrument;
use veracity_model::{
    ErrorKind, VerificationRequest, Verdict, Verifier, VerifierError,
};

pub(crate) type VerifyResult = Result<Verdict, Box<dyn VerifierError>>;
type BoxedVerifyFuture = Pin<Box<dyn Future<Output = VerifyResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(VerificationRequest) -> BoxedVerifyFuture + Send + Sync>;

/// A wrapper around a verifier that erases its concrete type, so the
/// controller doesn't need a generic parameter for it.
#[derive(Clone)]
pub struct VerifierClient {
    handler_fn: HandlerFn,
}

impl VerifierClient {
    #[inline]
    pub fn new<V: Verifier + 'static>(verifier: V) -> Self {
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = verifier.verify(&req);
            Box::pin(
                async move {
                    trace!("sending a request: {:?}", req);
                    match fut.await {
                        Ok(verdict) => {
                            trace!("got a verdict: {verdict:?}");
                            Ok(verdict)
                        }
                        Err(err) => {
                            error!(
                                "verification failed ({}): {err}",
                                err.kind()
                            );
                            Err(Box::new(err) as Box<dyn VerifierError>)
                        }
                    }
                }
                .instrument(trace_span!("verify req")),
            )
        });
        Self { handler_fn }
    }

    /// Verifies `text` with exactly one call to the underlying verifier.
    #[inline]
    pub async fn verify(&self, text: String) -> VerifyResult {
        (self.handler_fn)(VerificationRequest::new(text)).await
    }

    /// Like [`VerifierClient::verify`], but the call runs on a task of its
    /// own. A verifier that panics yields an error of kind
    /// [`ErrorKind::Other`] here.
    pub async fn verify_detached(&self, text: String) -> VerifyResult {
        let client = self.clone();
        match tokio::spawn(async move { client.verify(text).await }).await {
            Ok(result) => result,
            Err(err) => {
                error!("verification task failed: {err}");
                Err(Box::new(CallAborted) as Box<dyn VerifierError>)
            }
        }
    }
}

/// The verification task panicked or was cancelled before producing a
/// result.
#[derive(Debug)]
pub(crate) struct CallAborted;

impl Display for CallAborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("verification call aborted")
    }
}

impl Error for CallAborted {}

impl VerifierError for CallAborted {
    #[inline]
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}
