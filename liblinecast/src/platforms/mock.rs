//! In-memory broadcaster for tests
//!
//! Records every batch it is asked to send and can be configured to fail,
//! so posting logic can be exercised without a channel token or network.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{Result, TransportError};
use crate::platforms::Broadcaster;
use crate::types::{BroadcastResponse, Message};

#[derive(Debug, Clone)]
pub struct MockBroadcaster {
    name: String,
    failure: Option<TransportError>,
    sent: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockBroadcaster {
    /// A broadcaster that accepts everything with HTTP 200 and `{}`
    pub fn success() -> Self {
        Self {
            name: "mock".to_string(),
            failure: None,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A broadcaster that fails every call with `error`
    pub fn failing(error: TransportError) -> Self {
        Self {
            failure: Some(error),
            ..Self::success()
        }
    }

    /// Batches received so far, including failed attempts
    pub fn sent(&self) -> Vec<Vec<Message>> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Broadcaster for MockBroadcaster {
    async fn broadcast(&self, messages: &[Message]) -> Result<BroadcastResponse> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(messages.to_vec());
        }

        match &self.failure {
            Some(error) => Err(error.clone().into()),
            None => Ok(BroadcastResponse::from_body(200, "{}")),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
