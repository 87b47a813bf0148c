use std::path::Path;

use anyhow::Context;
use reg_core::entities::{ProfessorRecord, TermDump};
use reg_db::ReconcileReport;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReconcileArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `regsync reconcile`.
pub async fn handle(
    args: &ReconcileArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = TermDump::from_path(&args.dump)
        .with_context(|| format!("failed to read term dump {}", args.dump.display()))?;
    let professors = match &args.professors {
        Some(path) => load_roster(path)?,
        None => Vec::new(),
    };
    tracing::info!(
        classes = snapshot.classes.len(),
        sections = snapshot.sections.len(),
        terms = ?snapshot.term_ids(),
        professors = professors.len(),
        "snapshot loaded"
    );
    warn_foreign_hosts(&snapshot, &ctx.config.scrape.host);

    let destroy = args.destroy || ctx.config.scrape.destroy;
    let report = ctx
        .reconciler
        .reconcile(&snapshot, &professors, destroy)
        .await
        .context("reconciliation failed")?;

    output(&report, &summary_lines(&report), flags.format)
}

fn load_roster(path: &Path) -> anyhow::Result<Vec<ProfessorRecord>> {
    ProfessorRecord::roster_from_path(path)
        .with_context(|| format!("failed to read professor roster {}", path.display()))
}

/// Courses from another host still reconcile; they just will not share keys
/// with the configured one.
fn warn_foreign_hosts(snapshot: &TermDump, host: &str) {
    let foreign = snapshot
        .classes
        .values()
        .filter(|class| class.host != host)
        .count();
    if foreign > 0 {
        tracing::warn!(foreign, expected = host, "snapshot contains courses from another host");
    }
}

fn summary_lines(report: &ReconcileReport) -> Vec<String> {
    let mut lines = vec![
        format!("professors upserted: {}", report.professors),
        format!("courses upserted:    {}", report.courses),
        format!(
            "sections upserted:   {} ({} dropped)",
            report.sections, report.sections_dropped
        ),
        format!("courses stamped:     {}", report.courses_stamped),
        format!("subjects upserted:   {}", report.subjects),
        format!("term infos upserted: {}", report.term_infos),
        format!("courses deleted:     {}", report.courses_deleted),
    ];
    if !report.covered_terms.is_empty() {
        lines.push(format!("covered terms:       {}", report.covered_terms.join(", ")));
    }
    lines
}
