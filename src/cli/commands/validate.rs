use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use super::super::{args::ValidateCommand, context::ProjectContext};
use super::{CommandResult, CommandSummary, LocaleStats, ValidateSummary};
use crate::{
    catalog::{FlattenedCatalog, KeyPath, load_catalog},
    check::{CheckReport, check_catalogs},
    config::VALIDATION_REPORT_FILE_NAME,
    error::Error,
};

pub fn validate(cmd: ValidateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let report_path = if args.no_report {
        None
    } else {
        Some(match &args.report {
            Some(p) => p.clone(),
            None => default_report_path(&ctx.root_dir),
        })
    };

    validate_project(&ctx, report_path.as_deref())
}

/// Load every locale, cross-check them and optionally write the JSON report.
///
/// A locale that fails to load is reported and left out of the checks.
pub fn validate_project(ctx: &ProjectContext, report_path: Option<&Path>) -> Result<CommandResult> {
    let mut locales = Vec::new();
    let mut flattened = Vec::new();
    let mut load_errors = Vec::new();

    for locale in &ctx.locales {
        match load_catalog(&ctx.catalog_path(locale), locale) {
            Ok(catalog) => {
                let flat = catalog.flatten();
                locales.push(LocaleStats {
                    locale: locale.clone(),
                    total_keys: flat.len(),
                    file_size: catalog.file_size(),
                });
                flattened.push(flat);
            }
            Err(error) => load_errors.push(error),
        }
    }

    let check = check_catalogs(&flattened);
    debug!(
        locales = flattened.len(),
        missing = check.missing_count(),
        empty = check.empty_count(),
        "validated catalogs"
    );

    let mut written_report = None;
    let mut report_error = None;
    if let Some(path) = report_path {
        let report = ValidationReport::new(&locales, &flattened, &check);
        match write_report(&report, path) {
            Ok(()) => written_report = Some(path.to_path_buf()),
            Err(error) => report_error = Some(error),
        }
    }

    Ok(CommandResult {
        error_count: load_errors.len() + usize::from(report_error.is_some()),
        finding_count: check.missing_count() + check.empty_count(),
        exit_on_findings: true,
        summary: CommandSummary::Validate(ValidateSummary {
            locales,
            check,
            load_errors,
            report_path: written_report,
            report_error,
        }),
    })
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocaleReportSummary {
    pub total_keys: usize,
    pub file_size: usize,
}

/// Machine-readable validation output. Lists every finding, unsampled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub timestamp: String,
    pub summary: BTreeMap<String, LocaleReportSummary>,
    /// `locale -> missingFrom_<other> -> keys defined in locale but not in other`
    pub missing_keys: BTreeMap<String, BTreeMap<String, Vec<KeyPath>>>,
    pub empty_values: BTreeMap<String, Vec<KeyPath>>,
}

impl ValidationReport {
    pub fn new(locales: &[LocaleStats], catalogs: &[FlattenedCatalog], check: &CheckReport) -> Self {
        let summary = locales
            .iter()
            .map(|stats| {
                (
                    stats.locale.clone(),
                    LocaleReportSummary {
                        total_keys: stats.total_keys,
                        file_size: stats.file_size,
                    },
                )
            })
            .collect();

        let mut missing_keys: BTreeMap<String, BTreeMap<String, Vec<KeyPath>>> = catalogs
            .iter()
            .map(|c| (c.locale.clone(), BTreeMap::new()))
            .collect();
        for diff in &check.diffs {
            missing_keys
                .entry(diff.from.clone())
                .or_default()
                .insert(format!("missingFrom_{}", diff.to), diff.missing.clone());
        }

        let empty_values = check
            .empty_values
            .iter()
            .map(|e| (e.locale.clone(), e.keys.clone()))
            .collect();

        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            summary,
            missing_keys,
            empty_values,
        }
    }
}

fn write_report(report: &ValidationReport, path: &Path) -> crate::Result<()> {
    let mut content =
        serde_json::to_string_pretty(report).map_err(|e| Error::io_write(path, e.into()))?;
    content.push('\n');
    fs::write(path, content).map_err(|e| Error::io_write(path, e))
}

/// Default report location for a project root.
pub fn default_report_path(root: &Path) -> PathBuf {
    root.join(VALIDATION_REPORT_FILE_NAME)
}
