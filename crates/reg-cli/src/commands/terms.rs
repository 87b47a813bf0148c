use reg_core::entities::TermInfo;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TermsArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `regsync terms`.
pub async fn handle(args: &TermsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sub_college = args
        .sub_college
        .as_deref()
        .unwrap_or(&ctx.config.scrape.sub_college);
    let terms = ctx.reconciler.term_infos(sub_college).await?;
    output(&terms, &text_lines(sub_college, &terms), flags.format)
}

fn text_lines(sub_college: &str, terms: &[TermInfo]) -> Vec<String> {
    if terms.is_empty() {
        return vec![format!("no terms stored for {sub_college}")];
    }
    terms
        .iter()
        .map(|term| format!("{}\t{}", term.term_id, term.text))
        .collect()
}
