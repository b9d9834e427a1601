use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::{ImportOutcome, KeyView};

#[derive(Debug)]
pub enum CommandSummary {
    Import(ImportSummary),
    List(ListSummary),
    Domains(DomainsSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ImportSummary {
    pub roots: Vec<PathBuf>,
    /// `None` for dry runs.
    pub database: Option<PathBuf>,
    pub outcome: ImportOutcome,
}

#[derive(Debug)]
pub struct ListSummary {
    /// Locale columns, in display order.
    pub locales: Vec<String>,
    pub keys: Vec<KeyView>,
}

#[derive(Debug)]
pub struct DomainsSummary {
    pub domains: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a transloader command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Records the store refused, or 1 for a refused `init`.
    pub failure_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let failure_count = match &summary {
            CommandSummary::Import(s) => s.outcome.report.failures.len(),
            CommandSummary::Init(s) if !s.created => 1,
            _ => 0,
        };
        Self {
            summary,
            failure_count,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failure_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
