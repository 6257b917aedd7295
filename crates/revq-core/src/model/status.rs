//! Ticket lifecycle status and open/closed classification.
//!
//! The tracker reports status as a camelCase string code. The set is closed:
//! five known codes plus an `Unknown` sentinel for anything the tracker
//! invents later. Unknown codes degrade, they never fail — every downstream
//! derivation (deadline, glyph, ordering) must accept the sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a homework ticket.
///
/// Discriminants match the tracker's ordinal order, so the derived `Ord`
/// gives the display sort order directly: in-review tickets first, closed
/// last. `Unknown` sorts before everything, same as the original ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(i8)]
pub enum Status {
    Unknown = -1,
    InReview = 0,
    Open = 1,
    OnTheSideOfUser = 2,
    Resolved = 3,
    Closed = 4,
}

/// Statuses that carry an active review deadline.
pub const OPEN_STATUSES: [Status; 2] = [Status::Open, Status::InReview];

/// Statuses that mean the ticket needs nothing further.
pub const CLOSED_STATUSES: [Status; 2] = [Status::Closed, Status::Resolved];

/// The five known statuses, in ordinal order. `Unknown` is deliberately
/// absent: it is a degradation sentinel, not a tracker state.
pub const KNOWN_STATUSES: [Status; 5] = [
    Status::InReview,
    Status::Open,
    Status::OnTheSideOfUser,
    Status::Resolved,
    Status::Closed,
];

/// Tracker code table. One entry per known status.
const CODE_TABLE: [(&str, Status); 5] = [
    ("inReview", Status::InReview),
    ("open", Status::Open),
    ("onTheSideOfUser", Status::OnTheSideOfUser),
    ("resolved", Status::Resolved),
    ("closed", Status::Closed),
];

// The code table must cover every known status exactly once.
const _: () = assert!(CODE_TABLE.len() == KNOWN_STATUSES.len());

impl Status {
    /// Map a tracker status code to a status.
    ///
    /// Total: unrecognized codes log a diagnostic and return
    /// [`Status::Unknown`] rather than failing.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        for (known, status) in CODE_TABLE {
            if known == code {
                return status;
            }
        }
        tracing::warn!(code, "unexpected tracker status code");
        Self::Unknown
    }

    /// The tracker code for this status, `None` for [`Status::Unknown`].
    #[must_use]
    pub const fn as_code(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::InReview => Some("inReview"),
            Self::Open => Some("open"),
            Self::OnTheSideOfUser => Some("onTheSideOfUser"),
            Self::Resolved => Some("resolved"),
            Self::Closed => Some("closed"),
        }
    }

    /// Uppercase name for log lines and `Display` output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::InReview => "IN_REVIEW",
            Self::Open => "OPEN",
            Self::OnTheSideOfUser => "ON_THE_SIDE_OF_USER",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Tracker ordinal, used as the primary sort component.
    #[must_use]
    pub const fn ordinal(self) -> i8 {
        self as i8
    }

    /// Whether the ticket is awaiting reviewer attention (open or in review).
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::InReview)
    }

    /// Whether the ticket is finished (closed or resolved).
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Resolved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
