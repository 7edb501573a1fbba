//! crates/tracker_core/src/domain.rs
//!
//! Defines the core data structures exchanged with the complaint tracker backend.
//! The serde representation of these types IS the wire contract: status and
//! priority strings must not be renamed without a matching server change.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Format the backend uses for `created_at`, e.g. `2025-04-26 14:23:45`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

//=========================================================================================
// Identity
//=========================================================================================

/// The role a principal signs in as. Decides which dashboard is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Engineer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Engineer => "engineer",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "engineer" => Ok(Role::Engineer),
            "admin" => Ok(Role::Admin),
            other => Err(format!("'{}' is not a valid role", other)),
        }
    }
}

/// The signed-in principal.
///
/// `id` is numeric on the wire. `roll` is only sent for students and
/// `specialization` only for engineers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub roll: Option<String>,
    pub specialization: Option<String>,
}

//=========================================================================================
// Engineers
//=========================================================================================

/// Availability of an engineer. Statuses the client does not know about are
/// kept verbatim so they still render and filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EngineerStatus {
    Available,
    Busy,
    Other(String),
}

impl EngineerStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EngineerStatus::Available => "Available",
            EngineerStatus::Busy => "Busy",
            EngineerStatus::Other(status) => status,
        }
    }
}

impl From<String> for EngineerStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Available" => EngineerStatus::Available,
            "Busy" => EngineerStatus::Busy,
            _ => EngineerStatus::Other(value),
        }
    }
}

impl From<EngineerStatus> for String {
    fn from(value: EngineerStatus) -> Self {
        match value {
            EngineerStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

/// Parses user input. Known statuses match case-insensitively, anything else
/// is kept as typed (trimmed).
impl FromStr for EngineerStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "available" => EngineerStatus::Available,
            "busy" => EngineerStatus::Busy,
            _ => EngineerStatus::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for EngineerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Read-only projection of an engineer, as listed for admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engineer {
    pub engineer_id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub status: EngineerStatus,
    pub contact: Option<String>,
}

impl Engineer {
    /// Stable identity of the row.
    pub fn id(&self) -> i64 {
        self.engineer_id
    }
}

//=========================================================================================
// Complaints
//=========================================================================================

/// Workflow status of a complaint. Evolves server-side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Submitted,
    Assigned,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Under Review")]
    UnderReview,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "Submitted",
            ComplaintStatus::Assigned => "Assigned",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::UnderReview => "Under Review",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitted" => Ok(ComplaintStatus::Submitted),
            "Assigned" => Ok(ComplaintStatus::Assigned),
            "In Progress" => Ok(ComplaintStatus::InProgress),
            "Under Review" => Ok(ComplaintStatus::UnderReview),
            "Resolved" => Ok(ComplaintStatus::Resolved),
            "Rejected" => Ok(ComplaintStatus::Rejected),
            other => Err(format!("'{}' is not a valid complaint status", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A facilities complaint raised by a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: i64,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    /// Submitter's email.
    pub email: String,
    pub created_at: String,
    pub priority: Priority,
    pub hostel_no: String,
    pub phone_no: String,
    pub room_no: String,
}

impl Complaint {
    pub fn id(&self) -> i64 {
        self.complaint_id
    }

    /// Parses `created_at`; `None` if the backend sent another format.
    pub fn created_at_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created_at, CREATED_AT_FORMAT).ok()
    }
}

//=========================================================================================
// Request / Response Records
//=========================================================================================

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `POST /signup`. Absent optionals are omitted rather than sent as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Envelope returned by `/login`, `/signup` and `/check-auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthResponse {
    /// Message used when the server rejects without saying why.
    pub const DEFAULT_FAILURE: &'static str = "Authentication failed";

    /// Yields the user on success, otherwise the message to show.
    /// A `success: true` envelope without a user counts as a rejection.
    pub fn into_user(self) -> Result<User, String> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok(user),
            _ => Err(self
                .message
                .unwrap_or_else(|| Self::DEFAULT_FAILURE.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineersResponse {
    pub engineers: Vec<Engineer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintsResponse {
    pub complaints: Vec<Complaint>,
}
