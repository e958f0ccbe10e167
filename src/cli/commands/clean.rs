use anyhow::Result;
use tracing::debug;

use super::super::{args::CleanCommand, context::ProjectContext};
use super::{CleanSummary, CommandResult, CommandSummary, LocaleCleanOutcome};
use crate::{
    catalog::load_catalog,
    extract::extract_corpus,
    prune::{self, PruneMode, Usage},
};

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ProjectContext::new(&args.common)?;
    let mode = if args.clean {
        PruneMode::BackupAndWrite
    } else {
        PruneMode::ReportOnly
    };
    clean_project(&ctx, mode)
}

/// Scan the corpus once, then prune each locale in turn.
///
/// A locale whose load, backup or write fails is recorded as failed and the
/// remaining locales still run. Locales already written stay written.
pub fn clean_project(ctx: &ProjectContext, mode: PruneMode) -> Result<CommandResult> {
    let config = &ctx.config;
    let (scan, extracted) = extract_corpus(
        &ctx.source_root,
        &config.includes,
        &config.ignores,
        &config.patterns,
    )?;
    debug!(
        files = extracted.files_scanned,
        references = extracted.references.len(),
        "collected references"
    );

    let usage = Usage::new(&extracted.references, &ctx.keep_prefixes);
    let outcomes: Vec<LocaleCleanOutcome> = ctx
        .locales
        .iter()
        .map(|locale| clean_locale(ctx, locale, &usage, mode))
        .collect();

    let error_count = outcomes.iter().filter(|o| o.is_failed()).count();

    let summary = CleanSummary {
        is_apply: mode == PruneMode::BackupAndWrite,
        files_scanned: extracted.files_scanned,
        reference_count: extracted.references.len(),
        inaccessible_paths: scan.skipped_count,
        skipped_files: extracted.skipped,
        outcomes,
    };

    Ok(CommandResult {
        error_count,
        finding_count: summary.unused_count(),
        exit_on_findings: false,
        summary: CommandSummary::Clean(summary),
    })
}

fn clean_locale(
    ctx: &ProjectContext,
    locale: &str,
    usage: &Usage<'_>,
    mode: PruneMode,
) -> LocaleCleanOutcome {
    let catalog = match load_catalog(&ctx.catalog_path(locale), locale) {
        Ok(catalog) => catalog,
        Err(error) => {
            return LocaleCleanOutcome::Failed {
                locale: locale.to_string(),
                error,
            };
        }
    };

    let plan = prune::plan(&catalog, usage);
    if mode == PruneMode::ReportOnly || !plan.changed {
        return LocaleCleanOutcome::Planned(plan);
    }

    match prune::apply(&catalog, &plan, &ctx.backup_path(locale)) {
        Ok(result) => LocaleCleanOutcome::Pruned(plan, result),
        Err(error) => LocaleCleanOutcome::Failed {
            locale: locale.to_string(),
            error,
        },
    }
}
