//! Deserialized tracker snapshot records.
//!
//! The fetch side (whatever talks to the tracker API) hands the core a list
//! of already-retrieved ticket records in this shape. The core does no I/O:
//! it validates and converts these records into [`Homework`] entities.
//!
//! Timestamps arrive as ISO-8601 with a timezone offset (with or without a
//! colon, e.g. `+0000` or `+00:00`) and are converted to local time for all
//! downstream arithmetic.
//!
//! [`Homework`]: crate::model::homework::Homework

use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::error::HomeworkError;
use crate::model::sla::Sla;
use crate::model::status::Status;
use crate::model::transition::StatusTransition;

/// Accepted timestamp shape, e.g. `2020-09-23T22:14:37.658+0000`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a tracker timestamp into local time.
///
/// `field` names the offending field in the error, since a single record
/// carries several timestamps.
///
/// # Errors
///
/// [`HomeworkError::MalformedTimestamp`] when the value doesn't match
/// [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Local>, HomeworkError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|source| HomeworkError::MalformedTimestamp {
            field,
            value: value.to_string(),
            source,
        })
}

/// One ticket as fetched from the tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketSnapshot {
    /// External identifier, fixed queue prefix plus numeric suffix.
    pub issue_key: String,
    pub lesson_name: String,
    /// `"[<problem>] <student>"`, optionally with a back-cohort qualifier.
    pub summary: String,
    pub cohort: String,
    /// Tracker status code; unrecognized codes degrade to `Unknown`.
    pub status: String,
    pub status_updated: String,
    #[serde(default)]
    pub description: String,
    /// Ordinal of this ticket among all of one's tickets, by issue key.
    pub number: u32,
    pub course: String,
    #[serde(default)]
    pub transitions: Option<Vec<TransitionSnapshot>>,
    #[serde(default)]
    pub sla: Option<SlaSnapshot>,
}

/// One changelog entry of a ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionSnapshot {
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    pub timestamp: String,
}

impl TransitionSnapshot {
    /// Convert into the domain record, degrading unknown status codes.
    ///
    /// # Errors
    ///
    /// Fails only on a malformed timestamp.
    pub fn into_transition(self) -> Result<StatusTransition, HomeworkError> {
        Ok(StatusTransition {
            from: self.from.as_deref().map(Status::from_code),
            to: Status::from_code(&self.to),
            timestamp: parse_timestamp("transitions.timestamp", &self.timestamp)?,
        })
    }
}

/// Tracker-side SLA record. The tracker emits camelCase keys here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaSnapshot {
    pub id: String,
    pub started_at: String,
    pub fail_at: String,
}

impl SlaSnapshot {
    /// Convert into the domain record.
    ///
    /// # Errors
    ///
    /// Fails only on a malformed timestamp.
    pub fn into_sla(self) -> Result<Sla, HomeworkError> {
        Ok(Sla {
            id: self.id,
            started_at: parse_timestamp("sla.startedAt", &self.started_at)?,
            fail_at: parse_timestamp("sla.failAt", &self.fail_at)?,
        })
    }
}
