//! Tracker-imposed SLA window.

use chrono::{DateTime, Local};

/// An externally imposed deadline window attached to a ticket.
///
/// `fail_at` is a hard ceiling: it can tighten the computed review deadline
/// but never extend it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sla {
    pub id: String,
    pub started_at: DateTime<Local>,
    pub fail_at: DateTime<Local>,
}
