//! Domain model: status classification, transitions, SLA, homework.

pub mod homework;
pub mod sla;
pub mod status;
pub mod transition;
