pub mod adapters;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::ClientError;
pub use store::TrackerClient;
