use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::{
    check::CheckReport,
    error::Error,
    extract::SkippedFile,
    prune::{PrunePlan, PruneResult},
};

#[derive(Debug)]
pub enum CommandSummary {
    Validate(ValidateSummary),
    Clean(CleanSummary),
    Init(InitSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleStats {
    pub locale: String,
    pub total_keys: usize,
    pub file_size: usize,
}

#[derive(Debug)]
pub struct ValidateSummary {
    /// Locales that loaded, in processing order.
    pub locales: Vec<LocaleStats>,
    pub check: CheckReport,
    /// Locales that could not be read or parsed.
    pub load_errors: Vec<Error>,
    pub report_path: Option<PathBuf>,
    /// Set if the JSON report could not be written.
    pub report_error: Option<Error>,
}

/// What happened to one locale during `clean-unused-translations`.
#[derive(Debug)]
pub enum LocaleCleanOutcome {
    /// Analysed only: dry run, or nothing to remove.
    Planned(PrunePlan),
    /// Backed up and rewritten.
    Pruned(PrunePlan, PruneResult),
    /// Load, backup or write failed. Other locales are unaffected.
    Failed { locale: String, error: Error },
}

impl LocaleCleanOutcome {
    pub fn plan(&self) -> Option<&PrunePlan> {
        match self {
            Self::Planned(plan) | Self::Pruned(plan, _) => Some(plan),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug)]
pub struct CleanSummary {
    pub is_apply: bool,
    pub files_scanned: usize,
    pub reference_count: usize,
    /// Corpus paths the directory walk could not access.
    pub inaccessible_paths: usize,
    pub skipped_files: Vec<SkippedFile>,
    pub outcomes: Vec<LocaleCleanOutcome>,
}

impl CleanSummary {
    pub fn unused_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(LocaleCleanOutcome::plan)
            .map(|plan| plan.unused().len())
            .sum()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Result of running a lexicat command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Hard failures: unreadable or malformed catalogs, failed writes.
    pub error_count: usize,
    /// Soft findings: missing keys, empty values, unused keys.
    pub finding_count: usize,
    /// If true, findings alone produce exit code 1.
    /// If false, findings are advisory (dry-run reports).
    pub exit_on_findings: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 {
            ExitStatus::Error
        } else if self.exit_on_findings && self.finding_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
