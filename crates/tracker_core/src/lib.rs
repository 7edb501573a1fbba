pub mod domain;
pub mod filters;
pub mod ports;

pub use domain::{
    AuthResponse, Complaint, ComplaintStatus, ComplaintsResponse, Engineer, EngineerStatus,
    EngineersResponse, LoginRequest, Priority, Role, SignupRequest, User,
};
pub use filters::{dashboard_preview, ComplaintFilter, DashboardPreview, EngineerFilter};
pub use ports::{Endpoint, Method, Transport, TransportError, TransportResult};
