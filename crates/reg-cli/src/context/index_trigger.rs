use reg_db::IndexTrigger;

/// Reports that fresh data is ready for the search index.
///
/// The binary has no index of its own; downstream tooling watches for this
/// event in the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrigger;

impl IndexTrigger for LogTrigger {
    fn trigger(&self) {
        tracing::info!(target: "regsync::index", "search index rebuild requested");
    }
}
