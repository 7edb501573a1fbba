#[cfg(any(debug_assertions, feature = "preview"))]
pub mod fixtures;
pub mod http;

pub use http::HttpTransport;
