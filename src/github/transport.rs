//! Blocking HTTP transport.
//!
//! The API client only needs `GET` returning a text body, so that is all the
//! trait exposes. `UreqTransport` does real requests; `FakeTransport` serves
//! canned bodies in tests.

use std::io::Read;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Non-2xx status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Connection refused, DNS, timeout, TLS
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err.to_string())
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => TransportError::Http {
                status,
                body: response.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(err) => TransportError::Network(err.to_string()),
        }
    }
}

pub trait SyncTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, TransportError>;
}

impl<T: SyncTransport + ?Sized> SyncTransport for &T {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).get(url, headers)
    }
}

#[derive(Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for UreqTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, TransportError> {
        tracing::debug!(url, "GET");
        let mut request = self.agent.get(url);
        for (key, value) in headers {
            request = request.set(key, value);
        }
        let response = request.call()?;
        tracing::trace!(url, status = response.status(), "response");
        // `into_string` caps bodies at 10 MB.
        let mut body = Vec::new();
        response.into_reader().read_to_end(&mut body)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
