//! Fake transport for tests: URL → canned response, with a request log.

use super::transport::{SyncTransport, TransportError};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<String, TransportError>>,
    requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub fn fail(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(
            url.into(),
            Err(TransportError::Http {
                status,
                body: String::new(),
            }),
        );
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|u| u == url)
    }
}

impl SyncTransport for FakeTransport {
    fn get(&self, url: &str, _headers: &[(&str, &str)]) -> Result<String, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        self.responses.get(url).cloned().unwrap_or(Err(TransportError::Http {
            status: 404,
            body: "Not Found".to_string(),
        }))
    }
}
