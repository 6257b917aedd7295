//! The homework entity and its deadline engine.
//!
//! A [`Homework`] is one review ticket, constructed whole from a tracker
//! snapshot record. Derived inputs (iteration count, last-reopened time,
//! SLA) are computed once at construction; everything else (`deadline`,
//! `left`, glyphs) is a pure accessor over those fixed inputs. A refresh is
//! a fresh construction, never an in-place update, so derived state can't
//! drift from its inputs.
//!
//! # Deadline policy
//!
//! An open or in-review ticket must get attention within 24 hours of its
//! last (re)opening — or of its last status change, when the changelog is
//! unavailable. A tracker-supplied SLA can only tighten that deadline,
//! never extend it. Tickets in any other status carry no deadline at all.

use chrono::{DateTime, Duration, Local};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::HomeworkError;
use crate::model::sla::Sla;
use crate::model::status::Status;
use crate::model::transition::StatusTransition;
use crate::snapshot::{SlaSnapshot, TicketSnapshot, TransitionSnapshot, parse_timestamp};

/// Queue prefix all issue keys must carry, e.g. `PCR-69105`.
pub const ISSUE_KEY_PREFIX: &str = "PCR-";

const REVIEW_WINDOW_HOURS: i64 = 24;
const DEADLINE_FORMAT: &str = "%A, %H:%M";
const UPDATED_FORMAT: &str = "%m-%d (%A), %H:%M";
const UPDATED_LONG_AGO_FORMAT: &str = "%m-%d";

/// One review ticket with its derived review state.
///
/// Identity is the issue key: equality and hashing ignore every other field.
#[derive(Debug, Clone)]
pub struct Homework {
    pub issue_key: String,
    /// Lesson name with the sprint boilerplate stripped.
    pub lesson_name: String,
    pub lesson_name_raw: String,
    pub problem: u32,
    pub student: String,
    pub cohort: String,
    pub status: Status,
    pub status_updated: DateTime<Local>,
    pub description: String,
    /// Ordinal of this ticket among all of one's tickets, by issue key.
    pub number: u32,
    pub course: String,
    iteration: Option<u32>,
    last_opened: Option<DateTime<Local>>,
    sla: Option<Sla>,
}

impl Homework {
    /// Build a homework from one fetched tracker record.
    ///
    /// # Errors
    ///
    /// Fails on input-shape problems only: a summary that doesn't match
    /// `"[<problem>] <student>"`, or a malformed timestamp. An unknown
    /// status code is not an error — it degrades to [`Status::Unknown`].
    pub fn from_snapshot(snapshot: TicketSnapshot) -> Result<Self, HomeworkError> {
        let (problem, student) = extract_problem_and_student(&snapshot.summary)?;
        let status_updated = parse_timestamp("status_updated", &snapshot.status_updated)?;
        let transitions = snapshot
            .transitions
            .map(|list| {
                list.into_iter()
                    .map(TransitionSnapshot::into_transition)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let iteration = StatusTransition::compute_iteration(transitions.as_deref());
        let last_opened = StatusTransition::compute_last_opened(transitions.as_deref());
        let sla = snapshot.sla.map(SlaSnapshot::into_sla).transpose()?;

        Ok(Self {
            issue_key: snapshot.issue_key,
            lesson_name: extract_lesson_name(&snapshot.lesson_name).to_string(),
            lesson_name_raw: snapshot.lesson_name,
            problem,
            student,
            cohort: snapshot.cohort,
            status: Status::from_code(&snapshot.status),
            status_updated,
            description: snapshot.description,
            number: snapshot.number,
            course: snapshot.course,
            iteration,
            last_opened,
            sla,
        })
    }

    /// How many times this ticket was (re)opened; `None` when the snapshot
    /// carried no changelog. `Some(0)` and `None` are distinct on purpose.
    #[must_use]
    pub const fn iteration(&self) -> Option<u32> {
        self.iteration
    }

    /// When this ticket last moved to `Open`, if the changelog shows it.
    #[must_use]
    pub const fn last_opened(&self) -> Option<DateTime<Local>> {
        self.last_opened
    }

    /// The SLA window attached by the tracker, if any.
    #[must_use]
    pub const fn sla(&self) -> Option<&Sla> {
        self.sla.as_ref()
    }

    /// The authoritative review deadline; `None` for any ticket that is not
    /// open or in review.
    #[must_use]
    pub fn deadline(&self) -> Option<DateTime<Local>> {
        compute_deadline(
            self.status,
            Some(self.status_updated),
            self.last_opened,
            self.sla.as_ref().map(|sla| sla.fail_at),
        )
    }

    /// Deadline formatted for the table, e.g. `"Wednesday, 22:14"`.
    #[must_use]
    pub fn deadline_string(&self) -> Option<String> {
        self.deadline()
            .map(|deadline| deadline.format(DEADLINE_FORMAT).to_string())
    }

    /// Whole seconds to the deadline as of `now`; negative once missed.
    fn left_seconds_at(&self, now: DateTime<Local>) -> Option<i64> {
        self.deadline().map(|deadline| (deadline - now).num_seconds())
    }

    /// Remaining time as `H:MM`, prefixed with `-` once the deadline has
    /// passed. Hours are unbounded, not clamped to a day.
    #[must_use]
    pub fn left_at(&self, now: DateTime<Local>) -> Option<String> {
        let total = self.left_seconds_at(now)?;
        let hours = total.abs() / 3600;
        let minutes = total.abs() % 3600 / 60;
        let sign = if total < 0 { "-" } else { "" };
        Some(format!("{sign}{hours}:{minutes:02}"))
    }

    /// [`Self::left_at`] against the current instant.
    #[must_use]
    pub fn left(&self) -> Option<String> {
        self.left_at(Local::now())
    }

    /// Whether the deadline exists and lies strictly in the past of `now`.
    #[must_use]
    pub fn deadline_missed_at(&self, now: DateTime<Local>) -> bool {
        self.left_seconds_at(now).is_some_and(|seconds| seconds < 0)
    }

    /// [`Self::deadline_missed_at`] against the current instant.
    #[must_use]
    pub fn deadline_missed(&self) -> bool {
        self.deadline_missed_at(Local::now())
    }

    /// Status glyph for the table. Total: every status, the `Unknown`
    /// sentinel included, maps to something printable.
    #[must_use]
    pub fn pretty_status_at(&self, now: DateTime<Local>) -> &'static str {
        if self.status == Status::Open && self.deadline_missed_at(now) {
            return "🙀";
        }
        match self.status {
            Status::InReview => "🔎",
            Status::Open => "🔧",
            Status::OnTheSideOfUser => "🎓",
            Status::Resolved | Status::Closed => "✔️",
            Status::Unknown => "⁉️",
        }
    }

    /// [`Self::pretty_status_at`] against the current instant.
    #[must_use]
    pub fn pretty_status(&self) -> &'static str {
        self.pretty_status_at(Local::now())
    }

    /// Last-update column text. Suppressed whenever a deadline exists — the
    /// deadline subsumes it, missed or not. Switches to the terse long-ago
    /// form past seven days.
    #[must_use]
    pub fn updated_string_at(&self, now: DateTime<Local>) -> Option<String> {
        if self.deadline().is_some() {
            return None;
        }
        let age = now - self.status_updated;
        if age > Duration::days(7) {
            Some(format!(
                "{} ({} days ago)",
                self.status_updated.format(UPDATED_LONG_AGO_FORMAT),
                age.num_days()
            ))
        } else {
            Some(self.status_updated.format(UPDATED_FORMAT).to_string())
        }
    }

    /// [`Self::updated_string_at`] against the current instant.
    #[must_use]
    pub fn updated_string(&self) -> Option<String> {
        self.updated_string_at(Local::now())
    }

    /// Whether the ticket is finished (closed or resolved).
    #[must_use]
    pub const fn resolved(&self) -> bool {
        self.status.is_closed()
    }

    /// Whether the ticket is awaiting reviewer attention.
    #[must_use]
    pub const fn open_or_in_review(&self) -> bool {
        self.status.is_open()
    }

    /// Numeric suffix of an issue key, e.g. `"PCR-69105"` -> `69105`.
    ///
    /// # Errors
    ///
    /// [`HomeworkError::MalformedIdentifier`] when the key doesn't carry the
    /// `PCR-` prefix or the suffix isn't numeric.
    pub fn to_issue_key_number(key: &str) -> Result<u32, HomeworkError> {
        key.strip_prefix(ISSUE_KEY_PREFIX)
            .and_then(|suffix| suffix.parse().ok())
            .ok_or_else(|| HomeworkError::MalformedIdentifier {
                key: key.to_string(),
                prefix: ISSUE_KEY_PREFIX,
            })
    }

    /// [`Self::to_issue_key_number`] for this ticket's own key.
    ///
    /// # Errors
    ///
    /// See [`Self::to_issue_key_number`].
    pub fn issue_key_number(&self) -> Result<u32, HomeworkError> {
        Self::to_issue_key_number(&self.issue_key)
    }

    /// Tracker URL of this ticket under the given base, no trailing slash.
    #[must_use]
    pub fn issue_url(&self, tracker_base_url: &str) -> String {
        format!("{tracker_base_url}/{}", self.issue_key)
    }
}

impl PartialEq for Homework {
    fn eq(&self, other: &Self) -> bool {
        self.issue_key == other.issue_key
    }
}

impl Eq for Homework {}

impl Hash for Homework {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.issue_key.hash(state);
    }
}

impl fmt::Display for Homework {
    /// E.g. `PCR-12345, no 3: 2.1 Jane Doe (OPEN)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, no {}: {}", self.issue_key, self.number, self.problem)?;
        if let Some(iteration) = self.iteration.filter(|&i| i > 0) {
            write!(f, ".{iteration}")?;
        }
        write!(f, " {} ({})", self.student, self.status)
    }
}

/// The deadline rule, separated from the entity for direct testing.
///
/// 1. Tickets outside `{Open, InReview}` have no deadline.
/// 2. The anchor is `last_opened`, falling back to `status_updated`; no
///    anchor, no deadline.
/// 3. The candidate is the anchor plus the 24-hour review window.
/// 4. An SLA fail-at timestamp caps the candidate when it is earlier.
#[must_use]
pub fn compute_deadline(
    status: Status,
    status_updated: Option<DateTime<Local>>,
    last_opened: Option<DateTime<Local>>,
    sla_fail_at: Option<DateTime<Local>>,
) -> Option<DateTime<Local>> {
    if !status.is_open() {
        return None;
    }
    let anchor = last_opened.or(status_updated)?;
    let candidate = anchor + Duration::hours(REVIEW_WINDOW_HOURS);
    Some(sla_fail_at.map_or(candidate, |fail_at| candidate.min(fail_at)))
}

/// Strip the sprint boilerplate from a lesson name: everything up to and
/// including the final `": "` goes. Names without the delimiter pass
/// through unchanged.
fn extract_lesson_name(lesson_name: &str) -> &str {
    lesson_name
        .rsplit_once(": ")
        .map_or(lesson_name, |(_, name)| name)
}

/// Parse `"[<problem>] <student>"`, optionally with a back-cohort
/// qualifier: `"[<problem> (back_cohort_<n>)] <student>"`.
fn extract_problem_and_student(summary: &str) -> Result<(u32, String), HomeworkError> {
    let malformed = || HomeworkError::MalformedSummary {
        summary: summary.to_string(),
    };
    let rest = summary.strip_prefix('[').ok_or_else(malformed)?;
    let (bracketed, student) = rest.split_once("] ").ok_or_else(malformed)?;
    let problem = match bracketed.split_once(' ') {
        Some((digits, qualifier)) => {
            if !is_back_cohort_qualifier(qualifier) {
                return Err(malformed());
            }
            digits
        }
        None => bracketed,
    };
    let problem = problem.parse().map_err(|_| malformed())?;
    Ok((problem, student.to_string()))
}

fn is_back_cohort_qualifier(qualifier: &str) -> bool {
    qualifier
        .strip_prefix("(back_cohort_")
        .and_then(|rest| rest.strip_suffix(')'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
