//! Test doubles for the reasoning client

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::service::llm::{ReasoningClient, ReasoningRequest, TransportError};

type FailureFactory = Box<dyn Fn() -> TransportError + Send + Sync>;

enum StubBehavior {
    Reply(String),
    Fail(FailureFactory),
}

/// Reasoning client returning a canned reply or failure, counting calls
pub struct StubReasoningClient {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<ReasoningRequest>>,
}

impl StubReasoningClient {
    pub fn replying(reply: &str) -> Self {
        Self::with_behavior(StubBehavior::Reply(reply.to_string()))
    }

    pub fn failing<F>(failure: F) -> Self
    where
        F: Fn() -> TransportError + Send + Sync + 'static,
    {
        Self::with_behavior(StubBehavior::Fail(Box::new(failure)))
    }

    fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ReasoningRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReasoningClient for StubReasoningClient {
    async fn complete(&self, request: &ReasoningRequest) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.behavior {
            StubBehavior::Reply(reply) => Ok(reply.clone()),
            StubBehavior::Fail(failure) => Err(failure()),
        }
    }
}
