//! Scripted in-memory gateway.
//!
//! Serves pre-configured envelopes per route and records every request, so the
//! stores can be exercised without a backend.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::GatewayError;
use crate::gateway::traits::RemoteGateway;
use crate::gateway::types::{ApiPath, Envelope, Method, RequestBody};

type RouteKey = (Method, ApiPath);

/// A request as the mock saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: ApiPath,
    pub body: RequestBody,
}

#[derive(Default)]
struct MockState {
    /// Queued replies per route. The last reply of a queue is sticky.
    replies: HashMap<RouteKey, VecDeque<Result<Envelope, GatewayError>>>,
    requests: Vec<RecordedRequest>,
}

/// Test double for [`RemoteGateway`]
#[derive(Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
    gates: Mutex<HashMap<RouteKey, Arc<Notify>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for a route
    pub fn reply(&self, method: Method, path: ApiPath, status: u16, body: Value) {
        self.script(method, path, Ok(Envelope::new(status, body)));
    }

    /// Queue a transport failure for a route
    pub fn fail(&self, method: Method, path: ApiPath, reason: &str) {
        self.script(method, path, Err(GatewayError::Transport(reason.to_string())));
    }

    fn script(&self, method: Method, path: ApiPath, reply: Result<Envelope, GatewayError>) {
        let mut state = self.lock_state();
        state
            .replies
            .entry((method, path))
            .or_default()
            .push_back(reply);
    }

    /// Hold requests on a route until the returned handle is notified.
    /// Each `notify_one` releases one request.
    pub fn gate(&self, method: Method, path: ApiPath) -> Arc<Notify> {
        let mut gates = self.gates.lock().unwrap_or_else(|e| e.into_inner());
        gates
            .entry((method, path))
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_state().requests.clone()
    }

    /// Requests received for one route
    pub fn requests_to(&self, method: Method, path: &ApiPath) -> Vec<RecordedRequest> {
        self.lock_state()
            .requests
            .iter()
            .filter(|r| r.method == method && &r.path == path)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock_state().requests.clear();
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_reply(&self, key: &RouteKey) -> Result<Envelope, GatewayError> {
        let mut state = self.lock_state();
        match state.replies.get_mut(key) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Transport("empty script".to_string()))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(GatewayError::Transport("empty script".to_string()))),
            None => Err(GatewayError::Transport(format!(
                "no reply scripted for {} {}",
                key.0, key.1
            ))),
        }
    }
}

#[async_trait]
impl RemoteGateway for MockGateway {
    async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        body: RequestBody,
    ) -> Result<Envelope, GatewayError> {
        self.lock_state().requests.push(RecordedRequest {
            method,
            path: path.clone(),
            body,
        });

        let key = (method, path.clone());
        let gate = self
            .gates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.next_reply(&key)
    }

    fn backend_name(&self) -> &'static str {
        "mock"
    }
}
