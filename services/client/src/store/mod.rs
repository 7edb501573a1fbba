//! services/client/src/store/mod.rs
//!
//! The client's shared state: session store, data sync and notification
//! channel, wired over one transport and one cancellation scope.

pub mod gateway;
pub mod session;
pub mod state;
pub mod sync;
pub mod toast;

use crate::adapters::HttpTransport;
use crate::config::Config;
use crate::error::ClientError;
use gateway::Gateway;
use session::SessionStore;
use std::sync::Arc;
use std::time::Duration;
use sync::{DataSource, DataSync};
use toast::Toaster;
use tracing::{debug, info};
use tracker_core::ports::Transport;

pub use session::Signup;
pub use state::{AuthPhase, Route, SessionState};
pub use toast::Toast;

//=========================================================================================
// TrackerClient (Shared Across All UI Surfaces)
//=========================================================================================

/// The one client instance per process. Clones share all state.
#[derive(Clone)]
pub struct TrackerClient {
    gateway: Gateway,
    session: SessionStore,
    sync: DataSync,
    toaster: Toaster,
}

impl TrackerClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        source: DataSource,
        toast_duration: Duration,
    ) -> Self {
        let gateway = Gateway::new(transport);
        let toaster = Toaster::new(toast_duration);
        Self {
            session: SessionStore::new(gateway.clone(), toaster.clone()),
            sync: DataSync::new(gateway.clone(), source, toaster.clone()),
            gateway,
            toaster,
        }
    }

    /// Builds the client against the configured backend.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config.api_base_url, config.request_timeout)?;
        info!(
            "Client ready for {} ({:?} data source)",
            config.api_base_url, config.data_source
        );
        Ok(Self::new(
            Arc::new(transport),
            config.data_source,
            config.toast_duration,
        ))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn sync(&self) -> &DataSync {
        &self.sync
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    /// Where the UI should be right now.
    pub fn route(&self) -> Route {
        self.session.snapshot().route()
    }

    /// Signs out and drops the synced collections with the session.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.sync.clear();
    }

    /// Refreshes the collections of the signed-in user's dashboard.
    pub async fn sync_dashboard(&self) {
        let role = self.session.snapshot().user().map(|user| user.role);
        match role {
            Some(role) => self.sync.sync_for_role(role).await,
            None => debug!("Dashboard sync skipped: nobody is signed in"),
        }
    }

    /// Abandons every outstanding request. Abandoned calls leave collections
    /// untouched and show no toast.
    pub async fn cancel_in_flight(&self) {
        info!("Cancelling in-flight requests");
        self.gateway.cancel_in_flight().await;
    }
}
