//! services/client/src/adapters/fixtures.rs
//!
//! Fixed, deterministic sample collections served by `DataSource::Fixture`.
//! Compiled only into debug builds or builds with the `preview` feature.

use tracker_core::domain::{Complaint, ComplaintStatus, Engineer, EngineerStatus, Priority};

const SAMPLE_CONTACT: &str = "7302611179";

fn engineer(
    id: i64,
    name: &str,
    email: &str,
    specialization: &str,
    status: EngineerStatus,
) -> Engineer {
    Engineer {
        engineer_id: id,
        name: name.to_string(),
        email: email.to_string(),
        specialization: specialization.to_string(),
        status,
        contact: Some(SAMPLE_CONTACT.to_string()),
    }
}

fn complaint(id: i64, status: ComplaintStatus) -> Complaint {
    Complaint {
        complaint_id: id,
        subject: "electrical".to_string(),
        description: "lan not working".to_string(),
        status,
        email: "dev.ruhela120@gmail.com".to_string(),
        created_at: "2025-04-26 14:23:45".to_string(),
        priority: Priority::Medium,
        hostel_no: "BH-3".to_string(),
        phone_no: SAMPLE_CONTACT.to_string(),
        room_no: "747".to_string(),
    }
}

pub fn engineers() -> Vec<Engineer> {
    vec![
        engineer(1, "John Doe", "john@example.com", "Electrical", EngineerStatus::Available),
        engineer(2, "Jane Smith", "jane@example.com", "Plumbing", EngineerStatus::Busy),
        engineer(3, "Mike Johnson", "mike@example.com", "Internet", EngineerStatus::Available),
    ]
}

pub fn complaints() -> Vec<Complaint> {
    vec![
        complaint(1, ComplaintStatus::InProgress),
        complaint(2, ComplaintStatus::Submitted),
    ]
}
