use std::error::Error;

use crate::error::ErrorKind;
use crate::request::VerificationRequest;
use crate::verdict::Verdict;

/// The error type for a verifier.
pub trait VerifierError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A service that judges a piece of text and answers with a [`Verdict`].
///
/// Once created, a verifier should behave like a stateless object. Each
/// call to [`Verifier::verify`] is a single attempt: implementations must
/// not retry on their own, the caller decides what a failure means.
pub trait Verifier: Send + Sync {
    /// The error type that may be returned by the verifier.
    type Error: VerifierError;

    /// Sends the text to the service and waits for its verdict.
    ///
    /// The returned future must be fully independent of `self`.
    fn verify(
        &self,
        req: &VerificationRequest,
    ) -> impl Future<Output = Result<Verdict, Self::Error>> + Send + 'static;
}
