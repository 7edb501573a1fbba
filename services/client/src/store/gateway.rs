//! services/client/src/store/gateway.rs
//!
//! The single path every store operation takes to the backend. Wraps the
//! `Transport` port with the shared cancellation scope.

use crate::error::ClientError;
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracker_core::ports::{Endpoint, Transport};

#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    /// Token for the current cancellation generation. Replaced after each cancel.
    cancel: Arc<Mutex<CancellationToken>>,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cancel: Arc::new(Mutex::new(CancellationToken::new())),
        }
    }

    /// Sends one request using the endpoint's method. Resolves to
    /// `ClientError::Cancelled` if `cancel_in_flight` runs first.
    pub async fn request(
        &self,
        endpoint: Endpoint,
        body: Option<Bytes>,
    ) -> Result<Bytes, ClientError> {
        let token = self.cancel.lock().await.clone();
        tokio::select! {
            _ = token.cancelled() => Err(ClientError::Cancelled),
            result = self.transport.send(endpoint, endpoint.method(), body) => {
                result.map_err(ClientError::from)
            }
        }
    }

    /// Abandons every request started before this call. Later requests are unaffected.
    pub async fn cancel_in_flight(&self) {
        let mut current = self.cancel.lock().await;
        current.cancel();
        *current = CancellationToken::new();
    }
}
