use async_trait::async_trait;
use parking_lot::Mutex;
use shape_rs_config::{ConfigError, DocumentStore};
use std::collections::HashMap;

/// In-memory document store that records every read.
#[derive(Default)]
pub struct StubStore {
    documents: HashMap<String, Vec<u8>>,
    reads: Mutex<Vec<String>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, locator: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(locator.to_string(), contents.into());
        self
    }

    /// Locators read so far, in call order.
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }
}

#[async_trait]
impl DocumentStore for StubStore {
    async fn read(&self, locator: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        self.reads.lock().push(locator.to_string());
        Ok(self.documents.get(locator).cloned())
    }
}

/// Store whose reads always fail with a fixed message.
#[derive(Clone)]
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn read(&self, _locator: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        Err(ConfigError::StoreFailed(self.message.clone()))
    }
}
