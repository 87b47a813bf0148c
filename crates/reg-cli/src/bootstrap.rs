use anyhow::Context;
use reg_config::RegConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered config, and CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RegConfig> {
    let mut config =
        RegConfig::load_with_dotenv().context("failed to load regsync configuration")?;
    apply_overrides(&mut config, flags);
    Ok(config)
}

fn apply_overrides(config: &mut RegConfig, flags: &GlobalFlags) {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(db: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Text,
            quiet: false,
            verbose: false,
            db: db.map(str::to_string),
        }
    }

    #[test]
    fn db_flag_overrides_config_path() {
        let mut config = RegConfig::default();
        apply_overrides(&mut config, &flags(Some("/data/other.db")));
        assert_eq!(config.database.path, "/data/other.db");
    }

    #[test]
    fn absent_db_flag_keeps_config_path() {
        let mut config = RegConfig::default();
        apply_overrides(&mut config, &flags(None));
        assert_eq!(config.database.path, "regsync.db");
    }
}
