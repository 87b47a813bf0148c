use anyhow::Context;
use reg_config::RegConfig;
use reg_db::{Reconciler, RegDb};

use super::LogTrigger;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: RegConfig,
    pub reconciler: Reconciler<LogTrigger>,
}

impl AppContext {
    /// Open the configured store and wire up the reconciler.
    pub async fn init(config: RegConfig) -> anyhow::Result<Self> {
        let db = RegDb::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open store at {}", config.database.path))?;
        if config.database.is_in_memory() {
            tracing::warn!("using an in-memory store; nothing will persist after exit");
        }
        tracing::debug!(path = %config.database.path, "store opened");

        Ok(Self {
            config,
            reconciler: Reconciler::with_trigger(db, LogTrigger),
        })
    }
}
