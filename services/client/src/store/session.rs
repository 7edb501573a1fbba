//! services/client/src/store/session.rs
//!
//! The session store: single source of truth for who is signed in.
//!
//! Every mutation is one `send_modify` on the watch channel, so observers see
//! each transition whole. Concurrent calls are not serialized against each
//! other; the last response to land wins.

use crate::error::ClientError;
use crate::store::gateway::Gateway;
use crate::store::state::{AuthPhase, SessionState};
use crate::store::toast::Toaster;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tracker_core::domain::{AuthResponse, LoginRequest, Role, SignupRequest, User};
use tracker_core::ports::{Endpoint, TransportError};

const LOGIN_OK: &str = "Login successful";
const SIGNUP_OK: &str = "Signup successful";
const LOGOUT_OK: &str = "Logged out successfully";
const LOGOUT_FAILED: &str = "Error logging out";

/// Fields of a signup form.
#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Students only.
    pub roll: Option<String>,
    /// Engineers only.
    pub specialization: Option<String>,
}

#[derive(Clone)]
pub struct SessionStore {
    gateway: Gateway,
    state: Arc<watch::Sender<SessionState>>,
    toaster: Toaster,
}

impl SessionStore {
    pub fn new(gateway: Gateway, toaster: Toaster) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            gateway,
            state: Arc::new(state),
            toaster,
        }
    }

    /// Snapshot of the current session.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observes the session; yields on every transition.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    //=========================================================================================
    // Operations
    //=========================================================================================

    /// Asks the backend who the current principal is.
    ///
    /// Never shows a toast: a failed check only means the user lands
    /// unauthenticated.
    pub async fn check_auth(&self) {
        self.state.send_modify(|state| {
            state.phase = AuthPhase::CheckingAuth;
            state.error = None;
        });

        let outcome = self.whoami().await;
        let phase = match outcome {
            Ok(user) => {
                info!("Session restored for user {} ({})", user.id, user.role);
                AuthPhase::Authenticated(user)
            }
            Err(e) => {
                debug!(kind = e.kind(), "No active session: {}", e);
                AuthPhase::Unauthenticated
            }
        };
        self.state.send_modify(|state| state.phase = phase);
    }

    pub async fn login(&self, email: &str, password: &str, role: Role) {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        self.authenticate(Endpoint::Login, &request, LOGIN_OK).await;
    }

    pub async fn signup(&self, form: Signup) {
        let request = SignupRequest {
            name: form.name,
            email: form.email,
            password: form.password,
            role: form.role,
            roll: form.roll,
            specialization: form.specialization,
        };
        self.authenticate(Endpoint::Signup, &request, SIGNUP_OK).await;
    }

    /// Signs out. The local session is cleared whatever the server says.
    pub async fn logout(&self) {
        self.begin_loading();
        let result = self.gateway.request(Endpoint::Logout, None).await;

        let failed = match &result {
            Ok(_) => false,
            Err(ClientError::Cancelled) => {
                debug!("Logout request cancelled; clearing session locally");
                false
            }
            Err(e) => {
                warn!(kind = e.kind(), "Logout request failed: {}", e);
                true
            }
        };
        self.state.send_modify(|state| {
            state.phase = AuthPhase::Unauthenticated;
            state.is_loading = false;
            if failed {
                state.error = Some(LOGOUT_FAILED.to_string());
            }
        });
        info!("Session cleared");

        match result {
            Ok(_) => self.toaster.show(LOGOUT_OK),
            Err(ClientError::Cancelled) => {}
            Err(_) => self.toaster.show(LOGOUT_FAILED),
        }
    }

    //=========================================================================================
    // Helpers
    //=========================================================================================

    fn begin_loading(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });
    }

    async fn authenticate<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
        success_message: &str,
    ) {
        self.begin_loading();

        match self.exchange(endpoint, body).await {
            Ok(user) => {
                info!("Authenticated via {} as user {} ({})", endpoint, user.id, user.role);
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.phase = AuthPhase::Authenticated(user);
                });
                self.toaster.show(success_message);
            }
            Err(ClientError::Cancelled) => {
                debug!("{} cancelled", endpoint);
                self.state.send_modify(|state| state.is_loading = false);
            }
            Err(e) => {
                warn!(kind = e.kind(), "{} failed: {}", endpoint, e);
                let message = e.user_message();
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.error = Some(message.clone());
                });
                self.toaster.show(message);
            }
        }
    }

    async fn exchange<B: Serialize + Sync>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<User, ClientError> {
        let payload = Bytes::from(serde_json::to_vec(body)?);
        let response = self.gateway.request(endpoint, Some(payload)).await;
        decode_auth(response)
    }

    async fn whoami(&self) -> Result<User, ClientError> {
        let response = self.gateway.request(Endpoint::CheckAuth, None).await;
        decode_auth(response)
    }
}

/// Turns a transport outcome into the authenticated user.
///
/// A non-2xx answer that still carries a `success: false` envelope is the
/// server rejecting the request, so its message is what the user sees.
fn decode_auth(response: Result<Bytes, ClientError>) -> Result<User, ClientError> {
    let body = match response {
        Ok(body) => body,
        Err(ClientError::Transport(TransportError::Status { status, body })) => {
            return match serde_json::from_slice::<AuthResponse>(&body) {
                Ok(envelope) if !envelope.success => {
                    Err(ClientError::Rejected(envelope.into_user().err().unwrap_or_default()))
                }
                _ => Err(ClientError::Transport(TransportError::Status { status, body })),
            };
        }
        Err(e) => return Err(e),
    };
    let envelope: AuthResponse = serde_json::from_slice(&body)?;
    envelope.into_user().map_err(ClientError::Rejected)
}
