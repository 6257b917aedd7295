//! `rq show` — full details of a single ticket.

use anyhow::{Result, bail};
use chrono::Local;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config;
use crate::output::{OutputMode, pretty_kv};
use crate::table::TicketView;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue key or its numeric suffix: "PCR-69105" or "69105".
    pub key: String,

    /// Snapshot file of fetched tracker records; "-" reads stdin.
    #[arg(short, long, default_value = "-")]
    pub file: PathBuf,
}

pub fn run_show(args: &ShowArgs, output: OutputMode) -> Result<()> {
    let config = config::load_user_config()?;
    let snapshots = super::read_snapshots(&args.file)?;
    let homeworks = super::construct_homeworks(snapshots);

    let wanted_number: Option<u32> = args.key.parse().ok();
    let Some(homework) = homeworks.iter().find(|homework| {
        homework.issue_key == args.key
            || wanted_number.is_some_and(|n| homework.issue_key_number().ok() == Some(n))
    }) else {
        bail!("no ticket '{}' in the snapshot", args.key);
    };

    let now = Local::now();
    let view = TicketView::build(homework, &config, now, None);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if output.is_json() {
        serde_json::to_writer_pretty(&mut out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{homework}")?;
    pretty_kv(&mut out, "ticket", &view.issue_url)?;
    pretty_kv(&mut out, "lesson", &view.lesson)?;
    pretty_kv(&mut out, "problem", view.problem.to_string())?;
    if let Some(iteration) = view.iteration {
        pretty_kv(&mut out, "iteration", iteration.to_string())?;
    }
    pretty_kv(&mut out, "student", &view.student_name)?;
    if let Some(email) = &view.student_email {
        pretty_kv(&mut out, "email", email)?;
    }
    pretty_kv(&mut out, "cohort", &view.cohort)?;
    pretty_kv(
        &mut out,
        "status",
        format!("{} {}", view.pretty_status, view.status),
    )?;
    if let Some(deadline) = &view.deadline {
        pretty_kv(&mut out, "deadline", deadline)?;
    }
    if let Some(left) = &view.left {
        pretty_kv(&mut out, "left", left)?;
    }
    if let Some(updated) = &view.updated {
        pretty_kv(&mut out, "updated", updated)?;
    }
    pretty_kv(&mut out, "course", &homework.course)?;
    if !homework.description.is_empty() {
        pretty_kv(&mut out, "description", &homework.description)?;
    }
    Ok(())
}
