mod app_context;
mod config_warnings;
mod index_trigger;

pub use app_context::AppContext;
pub use config_warnings::warn_unconfigured;
pub use index_trigger::LogTrigger;
