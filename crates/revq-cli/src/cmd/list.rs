//! `rq list` — the sorted, styled review table.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::io;
use std::path::PathBuf;
use tracing::warn;

use crate::config;
use crate::output::OutputMode;
use crate::table::{self, TicketView};
use revq_core::sort_for_display;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Snapshot file of fetched tracker records; "-" reads stdin.
    #[arg(short, long, default_value = "-")]
    pub file: PathBuf,

    /// Include every status, resolved and closed too.
    #[arg(long)]
    pub all: bool,

    /// Show only resolved/closed tickets.
    #[arg(long, conflicts_with = "all")]
    pub resolved: bool,

    /// Filter by cohort.
    #[arg(long)]
    pub cohort: Option<String>,

    /// Filter by problem number.
    #[arg(long)]
    pub problem: Option<u32>,

    /// Show only the last N rows of the sorted table.
    #[arg(short = 'n', long)]
    pub last: Option<usize>,

    /// Dim the row of this issue key (the last ticket you processed).
    #[arg(long)]
    pub last_processed: Option<String>,
}

pub fn run_list(args: &ListArgs, output: OutputMode) -> Result<()> {
    let config = config::load_user_config()?;
    let snapshots = super::read_snapshots(&args.file)?;
    let mut homeworks = super::construct_homeworks(snapshots);

    homeworks.retain(|homework| {
        let status_matches = if args.resolved {
            homework.resolved()
        } else if args.all {
            true
        } else {
            homework.open_or_in_review()
        };
        status_matches
            && args.cohort.as_ref().is_none_or(|c| &homework.cohort == c)
            && args.problem.is_none_or(|p| homework.problem == p)
    });
    sort_for_display(&mut homeworks);

    if let Some(last) = args.last {
        let skip = homeworks.len().saturating_sub(last);
        homeworks.drain(..skip);
    }

    if homeworks.is_empty() {
        warn!("no homeworks for the chosen filter combination");
    }

    let now = Local::now();
    let views: Vec<TicketView> = homeworks
        .iter()
        .map(|homework| {
            TicketView::build(homework, &config, now, args.last_processed.as_deref())
        })
        .collect();
    table::render(&mut io::stdout().lock(), output, &views)?;
    Ok(())
}
