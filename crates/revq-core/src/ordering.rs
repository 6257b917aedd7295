//! Display ordering for homework collections.

use chrono::{DateTime, Local};

use crate::model::homework::Homework;
use crate::model::status::Status;

/// Sort key for the review table: status ordinal first, then deadline
/// ascending. Tickets without a deadline sort after every ticket that has
/// one — the middle `bool` is `deadline.is_none()`, so present deadlines
/// compare first within a status.
#[must_use]
pub fn order_key(homework: &Homework) -> (Status, bool, Option<DateTime<Local>>) {
    let deadline = homework.deadline();
    (homework.status, deadline.is_none(), deadline)
}

/// Sort homeworks in place into display order.
pub fn sort_for_display(homeworks: &mut [Homework]) {
    homeworks.sort_by_key(order_key);
}
