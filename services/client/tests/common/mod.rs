//! Scripted in-memory transport shared by the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tracker_client::store::sync::DataSource;
use tracker_client::TrackerClient;
use tracker_core::ports::{Endpoint, Method, Transport, TransportError, TransportResult};

pub const TOAST_DELAY: Duration = Duration::from_secs(3);

/// One scripted answer: what to return and how long the "network" takes.
pub struct Reply {
    pub delay: Duration,
    pub result: TransportResult<Bytes>,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(Bytes::from(body.to_string())),
        }
    }

    pub fn error(error: TransportError) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(error),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::error(TransportError::Status {
            status,
            body: Bytes::from(body.to_string()),
        })
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub method: Method,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<Endpoint, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues a reply; replies for one endpoint are consumed in order.
    pub fn script(&self, endpoint: Endpoint, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.endpoint == endpoint)
            .collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Option<Bytes>,
    ) -> TransportResult<Bytes> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint,
            method,
            body: body.map(|b| serde_json::from_slice(&b).unwrap()),
        });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front);
        match reply {
            Some(reply) => {
                tokio::time::sleep(reply.delay).await;
                reply.result
            }
            None => Err(TransportError::Network(format!("no scripted reply for {}", endpoint))),
        }
    }
}

pub fn client_with(stub: &Arc<StubTransport>, source: DataSource) -> TrackerClient {
    TrackerClient::new(stub.clone(), source, TOAST_DELAY)
}

pub fn live_client(stub: &Arc<StubTransport>) -> TrackerClient {
    client_with(stub, DataSource::Live)
}

/// Drains every toast message broadcast so far.
pub fn drain(events: &mut broadcast::Receiver<String>) -> Vec<String> {
    let mut seen = Vec::new();
    while let Ok(message) = events.try_recv() {
        seen.push(message);
    }
    seen
}

pub fn user_json(id: i64, name: &str, email: &str, role: &str) -> String {
    format!(
        r#"{{"id":{},"name":"{}","email":"{}","role":"{}","roll":null,"specialization":null}}"#,
        id, name, email, role
    )
}

pub fn auth_ok(user: &str) -> String {
    format!(r#"{{"success":true,"user":{}}}"#, user)
}
