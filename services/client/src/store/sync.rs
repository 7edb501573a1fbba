//! services/client/src/store/sync.rs
//!
//! Role-scoped collection sync. Each fetch replaces its collection wholesale
//! on success and leaves it untouched on any failure.

use crate::error::ClientError;
use crate::store::gateway::Gateway;
use crate::store::toast::Toaster;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tracker_core::domain::{
    Complaint, ComplaintsResponse, Engineer, EngineersResponse, Role,
};
use tracker_core::ports::Endpoint;

#[cfg(any(debug_assertions, feature = "preview"))]
use crate::adapters::fixtures;

const ENGINEERS_FAILED: &str = "Failed to fetch engineers";
const COMPLAINTS_FAILED: &str = "Failed to fetch complaints";

//=========================================================================================
// Data Source
//=========================================================================================

/// Where collections come from. Chosen once, at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataSource {
    /// The backend over the configured transport.
    #[default]
    Live,
    /// Fixed sample data; no network. Not compiled into release builds
    /// unless the `preview` feature is on.
    #[cfg(any(debug_assertions, feature = "preview"))]
    Fixture,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(DataSource::Live),
            #[cfg(any(debug_assertions, feature = "preview"))]
            "fixture" => Ok(DataSource::Fixture),
            #[cfg(not(any(debug_assertions, feature = "preview")))]
            "fixture" => Err("fixture data is not available in release builds".to_string()),
            other => Err(format!("'{}' is not a data source (expected live or fixture)", other)),
        }
    }
}

//=========================================================================================
// Data Sync
//=========================================================================================

#[derive(Clone)]
pub struct DataSync {
    gateway: Gateway,
    source: DataSource,
    engineers: Arc<watch::Sender<Vec<Engineer>>>,
    complaints: Arc<watch::Sender<Vec<Complaint>>>,
    toaster: Toaster,
}

impl DataSync {
    pub fn new(gateway: Gateway, source: DataSource, toaster: Toaster) -> Self {
        let (engineers, _) = watch::channel(Vec::new());
        let (complaints, _) = watch::channel(Vec::new());
        Self {
            gateway,
            source,
            engineers: Arc::new(engineers),
            complaints: Arc::new(complaints),
            toaster,
        }
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn engineers(&self) -> Vec<Engineer> {
        self.engineers.borrow().clone()
    }

    pub fn complaints(&self) -> Vec<Complaint> {
        self.complaints.borrow().clone()
    }

    pub fn watch_engineers(&self) -> watch::Receiver<Vec<Engineer>> {
        self.engineers.subscribe()
    }

    pub fn watch_complaints(&self) -> watch::Receiver<Vec<Complaint>> {
        self.complaints.subscribe()
    }

    pub async fn fetch_engineers(&self) {
        let loaded = match self.source {
            DataSource::Live => {
                self.load(Endpoint::AdminEngineers, |r: EngineersResponse| r.engineers)
                    .await
            }
            #[cfg(any(debug_assertions, feature = "preview"))]
            DataSource::Fixture => Ok(fixtures::engineers()),
        };
        self.publish(&self.engineers, loaded, "engineers", ENGINEERS_FAILED);
    }

    pub async fn fetch_complaints(&self) {
        let loaded = match self.source {
            DataSource::Live => {
                self.load(Endpoint::AdminComplaints, |r: ComplaintsResponse| r.complaints)
                    .await
            }
            #[cfg(any(debug_assertions, feature = "preview"))]
            DataSource::Fixture => Ok(fixtures::complaints()),
        };
        self.publish(&self.complaints, loaded, "complaints", COMPLAINTS_FAILED);
    }

    /// Refreshes every collection the role's dashboard shows. Admins get both
    /// collections, fetched concurrently; other roles have none, so anything
    /// left from an earlier admin session is dropped.
    pub async fn sync_for_role(&self, role: Role) {
        match role {
            Role::Admin => {
                tokio::join!(self.fetch_engineers(), self.fetch_complaints());
            }
            Role::Student | Role::Engineer => {
                debug!("No collections to sync for role {}", role);
                self.clear();
            }
        }
    }

    /// Empties both collections. Watchers are only notified if something was held.
    pub fn clear(&self) {
        let engineers = self.engineers.send_if_modified(take_all);
        let complaints = self.complaints.send_if_modified(take_all);
        if engineers || complaints {
            info!("Cleared synced collections");
        }
    }

    async fn load<W, T, F>(&self, endpoint: Endpoint, unwrap: F) -> Result<Vec<T>, ClientError>
    where
        W: DeserializeOwned,
        F: FnOnce(W) -> Vec<T>,
    {
        let body = self.gateway.request(endpoint, None).await?;
        let wrapper: W = serde_json::from_slice(&body)?;
        Ok(unwrap(wrapper))
    }

    fn publish<T>(
        &self,
        collection: &watch::Sender<Vec<T>>,
        loaded: Result<Vec<T>, ClientError>,
        label: &str,
        failure_message: &str,
    ) {
        match loaded {
            Ok(items) => {
                info!("Fetched {} {}", items.len(), label);
                collection.send_replace(items);
            }
            Err(ClientError::Cancelled) => debug!("Fetch of {} cancelled", label),
            Err(e) => {
                warn!(kind = e.kind(), "Fetching {} failed: {}", label, e);
                self.toaster.show(failure_message);
            }
        }
    }
}

fn take_all<T>(items: &mut Vec<T>) -> bool {
    let held = !items.is_empty();
    items.clear();
    held
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_source_names() {
        assert_eq!("live".parse::<DataSource>(), Ok(DataSource::Live));
        assert_eq!(" LIVE ".parse::<DataSource>(), Ok(DataSource::Live));
        assert!("offline".parse::<DataSource>().is_err());
    }
}
