//! Status transition history and the derivations taken from it.

use chrono::{DateTime, Local};

use crate::model::status::Status;

/// One recorded status change, as reported by the tracker changelog.
///
/// Histories are append-only and chronological; the first entry of a ticket's
/// history has no `from` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub from: Option<Status>,
    pub to: Status,
    pub timestamp: DateTime<Local>,
}

impl StatusTransition {
    /// Count how many times the ticket was (re)opened.
    ///
    /// `None` means no history was supplied, which is distinct from
    /// `Some(0)` — a history in which nothing ever moved to `Open`.
    #[must_use]
    pub fn compute_iteration(transitions: Option<&[Self]>) -> Option<u32> {
        let transitions = transitions?;
        if transitions.is_empty() {
            return None;
        }
        let opened = transitions.iter().filter(|t| t.to == Status::Open).count();
        Some(u32::try_from(opened).unwrap_or(u32::MAX))
    }

    /// Timestamp of the most recent move to `Open`, if any.
    ///
    /// Histories arrive in chronological order, so the last matching entry
    /// wins.
    #[must_use]
    pub fn compute_last_opened(transitions: Option<&[Self]>) -> Option<DateTime<Local>> {
        transitions?
            .iter()
            .rev()
            .find(|t| t.to == Status::Open)
            .map(|t| t.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::StatusTransition;
    use crate::model::status::Status;
    use chrono::{DateTime, Local, TimeZone};

    fn at(hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn transition(from: Option<Status>, to: Status, hour: u32) -> StatusTransition {
        StatusTransition {
            from,
            to,
            timestamp: at(hour),
        }
    }

    #[test]
    fn iteration_is_absent_without_history() {
        assert_eq!(StatusTransition::compute_iteration(None), None);
        assert_eq!(StatusTransition::compute_iteration(Some(&[])), None);
    }

    #[test]
    fn iteration_zero_is_not_absent() {
        let history = [transition(None, Status::InReview, 9)];
        assert_eq!(StatusTransition::compute_iteration(Some(&history)), Some(0));
    }

    #[test]
    fn iteration_counts_moves_to_open() {
        let history = [
            transition(None, Status::Open, 9),
            transition(Some(Status::Open), Status::InReview, 10),
            transition(Some(Status::InReview), Status::Open, 11),
            transition(Some(Status::Open), Status::Resolved, 12),
        ];
        assert_eq!(StatusTransition::compute_iteration(Some(&history)), Some(2));
    }

    #[test]
    fn last_opened_takes_latest_open() {
        let history = [
            transition(None, Status::Open, 9),
            transition(Some(Status::Open), Status::InReview, 10),
            transition(Some(Status::InReview), Status::Open, 11),
        ];
        assert_eq!(
            StatusTransition::compute_last_opened(Some(&history)),
            Some(at(11))
        );
    }

    #[test]
    fn last_opened_is_absent_when_never_opened() {
        let history = [transition(None, Status::InReview, 9)];
        assert_eq!(StatusTransition::compute_last_opened(Some(&history)), None);
        assert_eq!(StatusTransition::compute_last_opened(None), None);
    }
}
