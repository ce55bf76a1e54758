use serde::{Deserialize, Serialize};

/// A request to verify a piece of text.
///
/// Serializes to the wire body `{ "text": "..." }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// The text exactly as the user submitted it.
    pub text: String,
}

impl VerificationRequest {
    /// Creates a request for the given text.
    #[inline]
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}
