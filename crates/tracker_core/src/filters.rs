//! crates/tracker_core/src/filters.rs
//!
//! Read-side selections over the synced collections, as the admin sections
//! present them. All selections preserve the order the server sent.

use crate::domain::{Complaint, ComplaintStatus, Engineer, EngineerStatus};

/// Number of complaints shown on the admin overview.
pub const PREVIEW_COMPLAINTS: usize = 3;
/// Number of engineers shown on the admin overview.
pub const PREVIEW_ENGINEERS: usize = 1;

/// Selects engineers by status and specialization. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineerFilter {
    pub status: Option<EngineerStatus>,
    pub specialization: Option<String>,
}

impl EngineerFilter {
    pub fn matches(&self, engineer: &Engineer) -> bool {
        let status_ok = self
            .status
            .as_ref()
            .map_or(true, |status| &engineer.status == status);
        let spec_ok = self
            .specialization
            .as_deref()
            .map_or(true, |spec| engineer.specialization == spec);
        status_ok && spec_ok
    }

    pub fn apply<'a>(&self, engineers: &'a [Engineer]) -> Vec<&'a Engineer> {
        engineers.iter().filter(|e| self.matches(e)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.map_or(true, |status| complaint.status == status)
    }

    pub fn apply<'a>(&self, complaints: &'a [Complaint]) -> Vec<&'a Complaint> {
        complaints.iter().filter(|c| self.matches(c)).collect()
    }
}

/// The slice of both collections the admin overview renders.
#[derive(Debug, PartialEq, Eq)]
pub struct DashboardPreview<'a> {
    pub engineers: &'a [Engineer],
    pub complaints: &'a [Complaint],
}

pub fn dashboard_preview<'a>(
    engineers: &'a [Engineer],
    complaints: &'a [Complaint],
) -> DashboardPreview<'a> {
    DashboardPreview {
        engineers: &engineers[..engineers.len().min(PREVIEW_ENGINEERS)],
        complaints: &complaints[..complaints.len().min(PREVIEW_COMPLAINTS)],
    }
}
