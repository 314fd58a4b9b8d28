#![cfg(test)]
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::ClientError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// In-memory transport that records every request and replays canned answers.
/// When the queue runs dry it answers `200` with an empty body.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn replying_json(body: Value) -> Arc<Self> {
        let t = Self::default();
        t.push_reply(ApiResponse::ok_json(&body));
        Arc::new(t)
    }

    pub fn replying(reply: ApiResponse) -> Arc<Self> {
        let t = Self::default();
        t.push_reply(reply);
        Arc::new(t)
    }

    pub fn push_reply(&self, reply: ApiResponse) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<ApiRequest> { self.sent.lock().unwrap().clone() }

    /// The single request issued so far; panics if there were zero or several.
    pub fn only_request(&self) -> ApiRequest {
        let sent = self.requests();
        assert_eq!(sent.len(), 1, "expected exactly one request, got {:?}", sent);
        sent.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.sent.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| ApiResponse::new(reqwest::StatusCode::OK, "")))
    }
}
