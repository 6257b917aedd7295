//! Typed construction errors.
//!
//! These are input-shape failures: fatal for the single record they occur in,
//! and surfaced to the caller so one bad ticket does not abort the rest of a
//! snapshot. Unknown status codes are deliberately *not* here — they degrade
//! to a sentinel instead (see [`crate::model::status::Status::from_code`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeworkError {
    /// The ticket summary did not match `"[<problem>] <student>"`.
    #[error("couldn't parse summary '{summary}'")]
    MalformedSummary { summary: String },

    /// The issue key did not carry the expected queue prefix.
    #[error("issue key '{key}' doesn't start with '{prefix}'")]
    MalformedIdentifier { key: String, prefix: &'static str },

    /// A timestamp field was not ISO-8601 with an offset.
    #[error("couldn't parse timestamp '{value}' in field {field}")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
