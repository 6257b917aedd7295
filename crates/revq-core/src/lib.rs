//! revq-core: the homework entity and its derived review state.
//!
//! This crate is pure computation over already-fetched tracker data: status
//! classification, reopen-iteration derivation, the 24-hour deadline engine
//! with SLA capping, and display ordering. It does no I/O beyond `tracing`
//! diagnostics; fetching and rendering live with the callers.

pub mod error;
pub mod model;
pub mod ordering;
pub mod snapshot;

pub use error::HomeworkError;
pub use model::homework::{Homework, ISSUE_KEY_PREFIX, compute_deadline};
pub use model::sla::Sla;
pub use model::status::{CLOSED_STATUSES, KNOWN_STATUSES, OPEN_STATUSES, Status};
pub use model::transition::StatusTransition;
pub use ordering::{order_key, sort_for_display};
pub use snapshot::TicketSnapshot;
