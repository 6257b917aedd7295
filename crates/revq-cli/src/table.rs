//! The review table: row building, styling, and rendering.
//!
//! Row *content* comes from the core entity's derived accessors; this module
//! only decides how it looks. Pretty mode draws an aligned multi-line table
//! (lesson under the ticket URL, email under the student name), text mode
//! emits one plain row per ticket, JSON mode serializes the view records.

use chrono::{DateTime, Local};
use revq_core::{Homework, Status};
use serde::Serialize;
use std::io::{self, Write};

use crate::config::{RowStyle, TableConfig, UserConfig};
use crate::output::OutputMode;

/// Presentation record for one homework, fully derived and serializable.
#[derive(Debug, Serialize)]
pub struct TicketView {
    pub issue_key: String,
    pub issue_url: String,
    pub lesson: String,
    pub problem: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<u32>,
    pub student_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
    pub cohort: String,
    pub status: String,
    pub pretty_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub deadline_missed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip)]
    pub style: RowStyle,
}

impl TicketView {
    /// Derive the view of one homework as of `now`.
    #[must_use]
    pub fn build(
        homework: &Homework,
        config: &UserConfig,
        now: DateTime<Local>,
        last_processed: Option<&str>,
    ) -> Self {
        let (student_name, student_email) = split_student_info(&homework.student);
        Self {
            issue_key: homework.issue_key.clone(),
            issue_url: homework.issue_url(&config.tracker.base_url),
            lesson: homework.lesson_name.clone(),
            problem: homework.problem,
            iteration: homework.iteration(),
            student_name,
            student_email,
            cohort: homework.cohort.clone(),
            status: homework.status.name().to_string(),
            pretty_status: homework.pretty_status_at(now).to_string(),
            deadline: homework.deadline_string(),
            deadline_missed: homework.deadline_missed_at(now),
            left: homework.left_at(now),
            updated: homework.updated_string_at(now),
            style: compute_style(homework, &config.table, now, last_processed),
        }
    }
}

/// Split `"Name Lastname (email)"` into name and email; tickets without the
/// parenthesized email keep the whole string as the name.
#[must_use]
pub fn split_student_info(student: &str) -> (String, Option<String>) {
    student
        .split_once(" (")
        .and_then(|(name, rest)| {
            rest.strip_suffix(')')
                .map(|email| (name.trim().to_string(), Some(email).filter(|e| !e.is_empty()).map(str::to_string)))
        })
        .unwrap_or_else(|| (student.to_string(), None))
}

/// Pick the row style: last-processed and missed-deadline rows win over the
/// due-today and waiting-on-user hints.
#[must_use]
pub fn compute_style(
    homework: &Homework,
    table: &TableConfig,
    now: DateTime<Local>,
    last_processed: Option<&str>,
) -> RowStyle {
    if last_processed == Some(homework.issue_key.as_str()) {
        return table.processed;
    }
    if homework.deadline_missed_at(now) {
        return table.missed;
    }
    if homework
        .deadline()
        .is_some_and(|deadline| deadline.date_naive() == now.date_naive())
    {
        return table.due_today;
    }
    if homework.status == Status::OnTheSideOfUser {
        return table.waiting;
    }
    RowStyle::Plain
}

/// Render views to `w` in the given output mode.
///
/// # Errors
///
/// Propagates write failures.
pub fn render(w: &mut dyn Write, mode: OutputMode, views: &[TicketView]) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => render_pretty(w, views),
        OutputMode::Text => render_text(w, views),
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, views).map_err(io::Error::other)?;
            writeln!(w)
        }
    }
}

const HEADERS: [&str; 10] = [
    "#", "ticket", "pr", "i", "student", "co", "st", "deadline", "left", "updated",
];

/// Right-aligned columns, by index into [`HEADERS`].
const RIGHT_ALIGNED: [bool; 10] = [
    true, false, true, false, false, true, false, true, true, false,
];

fn render_text(w: &mut dyn Write, views: &[TicketView]) -> io::Result<()> {
    if views.is_empty() {
        return Ok(());
    }
    writeln!(
        w,
        "key  pr  i  student  co  status  deadline  left  updated"
    )?;
    for view in views {
        let iteration = view.iteration.map_or_else(String::new, |i| i.to_string());
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}  {}  {}  {}",
            view.issue_key,
            view.problem,
            iteration,
            view.student_name,
            view.cohort,
            view.status,
            view.deadline.as_deref().unwrap_or(""),
            view.left.as_deref().unwrap_or(""),
            view.updated.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

/// One table cell: possibly several stacked lines.
struct Cell {
    lines: Vec<String>,
}

impl Cell {
    fn one(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
        }
    }

    fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    fn line(&self, index: usize) -> &str {
        self.lines.get(index).map_or("", String::as_str)
    }
}

fn cells(table_number: usize, view: &TicketView) -> [Cell; 10] {
    let mut ticket = Cell::one(view.issue_url.clone());
    if !view.lesson.is_empty() {
        ticket.lines.push(view.lesson.clone());
    }
    let mut student = Cell::one(view.student_name.clone());
    if let Some(email) = &view.student_email {
        student.lines.push(email.clone());
    }
    [
        Cell::one(table_number.to_string()),
        ticket,
        Cell::one(view.problem.to_string()),
        Cell::one(view.iteration.map_or_else(String::new, |i| i.to_string())),
        student,
        Cell::one(view.cohort.clone()),
        Cell::one(view.pretty_status.clone()),
        Cell::one(view.deadline.clone().unwrap_or_default()),
        Cell::one(view.left.clone().unwrap_or_default()),
        Cell::one(view.updated.clone().unwrap_or_default()),
    ]
}

fn pad(text: &str, width: usize, right_aligned: bool) -> String {
    let len = text.chars().count();
    let fill = " ".repeat(width.saturating_sub(len));
    if right_aligned {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn render_pretty(w: &mut dyn Write, views: &[TicketView]) -> io::Result<()> {
    if views.is_empty() {
        return Ok(());
    }

    let rows: Vec<[Cell; 10]> = views
        .iter()
        .enumerate()
        .map(|(i, view)| cells(i + 1, view))
        .collect();

    let mut widths: [usize; 10] = [0; 10];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let header_line = HEADERS
        .iter()
        .enumerate()
        .map(|(i, header)| pad(header, widths[i], RIGHT_ALIGNED[i]))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(w, "{}", header_line.trim_end())?;
    writeln!(w, "{}", "-".repeat(header_line.chars().count()))?;

    for (row, view) in rows.iter().zip(views) {
        let height = row.iter().map(|cell| cell.lines.len()).max().unwrap_or(1);
        for line_index in 0..height {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad(cell.line(line_index), widths[i], RIGHT_ALIGNED[i]))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(w, "{}", view.style.paint(line.trim_end()))?;
        }
    }
    Ok(())
}
