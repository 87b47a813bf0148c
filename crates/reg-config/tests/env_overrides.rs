use figment::Jail;
use reg_config::RegConfig;

#[test]
fn env_sets_destroy_flag() {
    Jail::expect_with(|jail| {
        jail.set_env("REGSYNC_SCRAPE__DESTROY", "true");

        let config = RegConfig::load().map_err(|e| e.to_string())?;
        assert!(config.scrape.destroy);
        Ok(())
    });
}

#[test]
fn env_sets_nested_database_path() {
    Jail::expect_with(|jail| {
        jail.set_env("REGSYNC_DATABASE__PATH", ":memory:");

        let config = RegConfig::load().map_err(|e| e.to_string())?;
        assert!(config.database.is_in_memory());
        Ok(())
    });
}
