use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Merge a scraper snapshot into the store.
    Reconcile(ReconcileArgs),
    /// List known terms for a sub-college, newest first.
    Terms(TermsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ReconcileArgs {
    /// Term dump JSON produced by the scraper.
    #[arg(long)]
    pub dump: PathBuf,

    /// Professor roster JSON (array or id-keyed object).
    #[arg(long)]
    pub professors: Option<PathBuf>,

    /// Delete stale courses in the snapshot's terms (overrides `scrape.destroy`).
    #[arg(long)]
    pub destroy: bool,
}

#[derive(Clone, Debug, Args)]
pub struct TermsArgs {
    /// Sub-college to list (defaults to `scrape.sub_college`).
    #[arg(long)]
    pub sub_college: Option<String>,
}
