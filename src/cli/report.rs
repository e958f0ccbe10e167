//! Human-readable output for command results.
//!
//! Kept out of the command handlers so lexicat can be used as a library.
//! Sample lists are truncated for the terminal; the JSON report written by
//! `validate-translations` always carries every finding.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::commands::{
    CleanSummary, CommandResult, CommandSummary, InitSummary, LocaleCleanOutcome, ValidateSummary,
};
use crate::{catalog::KeyPath, error::Error};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Missing keys shown per locale pair.
pub const MAX_MISSING_SAMPLES: usize = 10;

/// Empty values shown per locale.
pub const MAX_EMPTY_SAMPLES: usize = 5;

/// Unused keys shown per locale in a dry run.
pub const MAX_UNUSED_SAMPLES: usize = 10;

/// Print a command result to stdout, hard errors to stderr.
pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// Print a command result to custom writers.
pub fn print_to<W: Write, E: Write>(result: &CommandResult, out: &mut W, err: &mut E) {
    match &result.summary {
        CommandSummary::Validate(summary) => print_validate(summary, out, err),
        CommandSummary::Clean(summary) => print_clean(summary, out, err),
        CommandSummary::Init(summary) => print_init(summary, out, err),
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

fn print_error<E: Write>(error: &Error, err: &mut E) {
    let _ = writeln!(err, "{} {}", "error:".bold().red(), error);
}

fn size_change(percent: f64) -> ColoredString {
    let text = format!("{:+.1}%", percent);
    if percent > 0.0 { text.yellow() } else { text.green() }
}

/// Print up to `limit` keys, then a count of the rest.
pub fn print_samples<W: Write>(keys: &[KeyPath], limit: usize, out: &mut W) {
    for key in keys.iter().take(limit) {
        let _ = writeln!(out, "    {}", key.to_string().cyan());
    }
    if keys.len() > limit {
        let _ = writeln!(out, "    {}", format!("... and {} more", keys.len() - limit).dimmed());
    }
}

fn print_validate<W: Write, E: Write>(summary: &ValidateSummary, out: &mut W, err: &mut E) {
    for error in &summary.load_errors {
        print_error(error, err);
    }

    let _ = writeln!(out, "{}", "Translation catalogs".bold());
    for stats in &summary.locales {
        let _ = writeln!(
            out,
            "  {}: {} {}, {} bytes",
            stats.locale.bold(),
            stats.total_keys,
            plural(stats.total_keys, "key", "keys"),
            stats.file_size
        );
    }

    let check = &summary.check;
    let diffs: Vec<_> = check.diffs.iter().filter(|d| !d.missing.is_empty()).collect();
    let empties: Vec<_> = check
        .empty_values
        .iter()
        .filter(|e| !e.keys.is_empty())
        .collect();

    if !diffs.is_empty() {
        let _ = writeln!(out, "\n{}", "Missing keys".bold());
    }
    for diff in diffs {
        let _ = writeln!(
            out,
            "{} {} {} in {} missing from {}:",
            FAILURE_MARK.red(),
            diff.missing.len(),
            plural(diff.missing.len(), "key", "keys"),
            diff.from.bold(),
            diff.to.bold()
        );
        print_samples(&diff.missing, MAX_MISSING_SAMPLES, out);
    }

    if !empties.is_empty() {
        let _ = writeln!(out, "\n{}", "Empty values".bold());
    }
    for empty in empties {
        let _ = writeln!(
            out,
            "{} {} empty {} in {}:",
            FAILURE_MARK.red(),
            empty.keys.len(),
            plural(empty.keys.len(), "value", "values"),
            empty.locale.bold()
        );
        print_samples(&empty.keys, MAX_EMPTY_SAMPLES, out);
    }

    if let Some(path) = &summary.report_path {
        let _ = writeln!(out, "\nReport written to {}", path.display());
    }
    if let Some(error) = &summary.report_error {
        print_error(error, err);
    }

    let missing = check.missing_count();
    let empty = check.empty_count();
    if missing + empty > 0 {
        let _ = writeln!(
            out,
            "\n{} {} missing {}, {} empty {}",
            FAILURE_MARK.red(),
            missing,
            plural(missing, "key", "keys").red(),
            empty,
            plural(empty, "value", "values").red()
        );
    } else if summary.load_errors.is_empty() && summary.report_error.is_none() {
        let _ = writeln!(
            out,
            "\n{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - no missing keys or empty values",
                summary.locales.len(),
                plural(summary.locales.len(), "locale", "locales")
            )
            .green()
        );
    }
}

fn print_clean<W: Write, E: Write>(summary: &CleanSummary, out: &mut W, err: &mut E) {
    let _ = writeln!(
        out,
        "Scanned {} source {}, found {} referenced key {}",
        summary.files_scanned,
        plural(summary.files_scanned, "file", "files"),
        summary.reference_count,
        plural(summary.reference_count, "path", "paths")
    );

    let skipped = summary.skipped_files.len() + summary.inaccessible_paths;
    if skipped > 0 {
        let _ = writeln!(
            err,
            "{} {} source {} could not be read and {} skipped",
            "warning:".bold().yellow(),
            skipped,
            plural(skipped, "path", "paths"),
            plural(skipped, "was", "were")
        );
    }

    let mut removed_total = 0;
    let mut pruned_locales = 0;

    for outcome in &summary.outcomes {
        match outcome {
            LocaleCleanOutcome::Planned(plan) => {
                let _ = writeln!(
                    out,
                    "  {}: {} total, {} used, {} unused",
                    plan.locale.bold(),
                    plan.total_keys,
                    plan.used_count(),
                    plan.unused().len()
                );
                if !summary.is_apply {
                    print_samples(plan.unused(), MAX_UNUSED_SAMPLES, out);
                }
            }
            LocaleCleanOutcome::Pruned(plan, result) => {
                removed_total += result.removed_keys.len();
                pruned_locales += 1;
                let _ = writeln!(
                    out,
                    "  {}: removed {} of {} {}, {} -> {} bytes ({}), backup {}",
                    plan.locale.bold(),
                    result.removed_keys.len(),
                    plan.total_keys,
                    plural(plan.total_keys, "key", "keys"),
                    result.original_bytes,
                    result.new_bytes,
                    size_change(result.size_change_percent()),
                    result.backup_path.display()
                );
            }
            LocaleCleanOutcome::Failed { locale, error } => {
                let _ = writeln!(out, "  {}: {}", locale.bold(), "failed".red());
                print_error(error, err);
            }
        }
    }

    let unused = summary.unused_count();
    if summary.is_apply {
        if pruned_locales > 0 {
            let _ = writeln!(
                out,
                "\n{} {} {} unused {} from {} {}.",
                SUCCESS_MARK.green(),
                "Removed".green().bold(),
                removed_total,
                plural(removed_total, "key", "keys"),
                pruned_locales,
                plural(pruned_locales, "locale", "locales")
            );
        } else if unused == 0 {
            let _ = writeln!(out, "\n{} {}", SUCCESS_MARK.green(), "No unused keys.".green());
        }
    } else if unused > 0 {
        let _ = writeln!(
            out,
            "\n{} {} unused {}.",
            "Would remove".yellow().bold(),
            unused,
            plural(unused, "key", "keys")
        );
        let _ = writeln!(
            out,
            "Run with {} to remove them (each catalog is backed up first).",
            "--clean".cyan()
        );
    } else {
        let _ = writeln!(out, "\n{} {}", SUCCESS_MARK.green(), "No unused keys.".green());
    }
}

fn print_init<W: Write, E: Write>(summary: &InitSummary, out: &mut W, err: &mut E) {
    match &summary.error {
        None => {
            let _ = writeln!(
                out,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", summary.path.display()).green()
            );
        }
        Some(message) => {
            let _ = writeln!(err, "{} {}", "error:".bold().red(), message);
        }
    }
}
