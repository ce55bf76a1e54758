use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use veracity_model::{
    ErrorKind, VerificationRequest, Verdict, Verifier, VerifierError,
};

#[derive(Debug)]
struct EchoVerifierError(ErrorKind);

impl Display for EchoVerifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for EchoVerifierError {}

impl VerifierError for EchoVerifierError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Answers "Unverifiable" for everything, and refuses texts that mention
/// the word "offline" as if the service were down.
struct EchoVerifier {
    delay: Duration,
}

impl Verifier for EchoVerifier {
    type Error = EchoVerifierError;

    fn verify(
        &self,
        req: &VerificationRequest,
    ) -> impl Future<Output = Result<Verdict, Self::Error>> + Send + 'static
    {
        let text = req.text.clone();
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            if text.contains("offline") {
                return Err(EchoVerifierError(ErrorKind::Unreachable));
            }
            Ok(Verdict::new(
                "Unverifiable",
                "50%",
                format!("Nothing is known about \"{text}\"."),
            ))
        }
    }
}

#[tokio::test]
async fn test_future_outlives_verifier() {
    let verifier = EchoVerifier {
        delay: Duration::from_millis(1),
    };
    let fut = verifier.verify(&VerificationRequest::new("The sky is green"));
    drop(verifier);

    let verdict = fut.await.unwrap();
    assert_eq!(verdict.display_verdict().as_deref(), Some("Unverifiable"));
    assert_eq!(verdict.display_confidence().as_deref(), Some("50%"));
    assert_eq!(
        verdict.display_explanation().as_deref(),
        Some("Nothing is known about \"The sky is green\".")
    );
}

#[tokio::test]
async fn test_error_kind() {
    let verifier = EchoVerifier {
        delay: Duration::ZERO,
    };
    let err = verifier
        .verify(&VerificationRequest::new("go offline"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unreachable);
    assert_eq!(err.kind().to_string(), "Service unreachable");
}
