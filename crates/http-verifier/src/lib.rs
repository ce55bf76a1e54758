//! A verifier that asks a verification service over HTTP.
//!
//! The service takes `POST /api/verify-text` with a JSON body
//! `{"text": "..."}` and answers with a JSON verdict record.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, header};
use veracity_model::{
    ErrorKind, VerificationRequest, Verdict, Verifier, VerifierError,
};

pub use config::{
    DEFAULT_BASE_URL, DEFAULT_PROBE_TIMEOUT, HttpVerifierConfig,
    HttpVerifierConfigBuilder,
};

/// Error type for [`HttpVerifier`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Unreachable
        } else if let Some(status) = err.status() {
            ErrorKind::Status(status.as_u16())
        } else if err.is_decode() {
            ErrorKind::MalformedResponse
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl VerifierError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP verification service client.
#[derive(Clone, Debug)]
pub struct HttpVerifier {
    client: Client,
    config: Arc<HttpVerifierConfig>,
}

impl HttpVerifier {
    /// Creates a new `HttpVerifier` with the given configuration.
    #[inline]
    pub fn new(config: HttpVerifierConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &HttpVerifierConfig {
        &self.config
    }

    /// Checks whether the service is up by fetching its root.
    ///
    /// This is advisory only, verification calls never depend on it. The
    /// probe gives up after [`HttpVerifierConfig::probe_timeout`], or the
    /// request timeout if that is shorter.
    pub async fn probe(&self) -> Result<(), Error> {
        let timeout = match self.config.timeout {
            Some(timeout) => timeout.min(self.config.probe_timeout),
            None => self.config.probe_timeout,
        };
        let resp = self
            .client
            .get(self.config.url(proto::HEALTH_PATH))
            .timeout(timeout)
            .send()
            .await?;
        resp.error_for_status()?;
        debug!("service at {} is up", self.config.base_url);
        Ok(())
    }

    fn with_timeout(&self, req: RequestBuilder) -> RequestBuilder {
        match self.config.timeout {
            Some(timeout) => req.timeout(timeout),
            None => req,
        }
    }
}

impl Verifier for HttpVerifier {
    type Error = Error;

    fn verify(
        &self,
        req: &VerificationRequest,
    ) -> impl Future<Output = Result<Verdict, Self::Error>> + Send + 'static
    {
        let http_req = self
            .client
            .post(self.config.url(proto::VERIFY_TEXT_PATH))
            .header(header::ACCEPT, "application/json")
            .json(req);
        let resp_fut = self.with_timeout(http_req).send();

        async move {
            let resp = match resp_fut.await.and_then(Response::error_for_status)
            {
                Ok(resp) => resp,
                Err(err) => return Err(Error::from(err)),
            };

            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned);
            if !content_type.as_deref().is_some_and(proto::is_json) {
                // Still worth a try, some servers mislabel their JSON.
                warn!("unexpected content type: {content_type:?}");
            }

            let body = match resp.bytes().await {
                Ok(body) => body,
                Err(err) => return Err(Error::from(err)),
            };
            trace!("got a response body of {} bytes", body.len());

            serde_json::from_slice::<Verdict>(&body).map_err(|err| {
                Error::new(
                    format!("invalid verdict payload: {err}"),
                    ErrorKind::MalformedResponse,
                )
            })
        }
    }
}
