use std::fmt::{self, Display};

/// The kind of error that occurred while verifying a text.
///
/// The session treats every kind the same way. Kinds exist so that the
/// operator-facing logs can tell the causes apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service could not be reached (connection refused, DNS failure).
    Unreachable,
    /// The service did not answer in time.
    Timeout,
    /// The service answered with a non-success status code.
    Status(u16),
    /// The response body is not a valid verdict payload.
    MalformedResponse,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Unreachable => write!(f, "Service unreachable"),
            ErrorKind::Timeout => write!(f, "Timed out"),
            ErrorKind::Status(code) => write!(f, "Unexpected status {code}"),
            ErrorKind::MalformedResponse => write!(f, "Malformed response"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}
