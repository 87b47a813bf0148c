//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use reg_config::{ConfigError, RegConfig};

#[test]
fn loads_database_and_scrape_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/regsync/courses.db"

[scrape]
host = "example.edu"
sub_college = "LAW"
destroy = true
"#,
        )?;

        let config: RegConfig = Figment::from(Serialized::defaults(RegConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/regsync/courses.db");
        assert_eq!(config.scrape.host, "example.edu");
        assert_eq!(config.scrape.sub_college, "LAW");
        assert!(config.scrape.destroy);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[scrape]
destroy = true
"#,
        )?;

        let config: RegConfig = Figment::from(Serialized::defaults(RegConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.scrape.destroy);
        assert_eq!(config.scrape.host, "neu.edu");
        assert_eq!(config.database.path, "regsync.db");
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(".regsync").map_err(|e| e.to_string())?;
        jail.create_file(
            ".regsync/config.toml",
            r#"
[database]
path = "project.db"
"#,
        )?;

        let config = RegConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, "project.db");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("REGSYNC_DATABASE__PATH", "from-env.db");

        let config: RegConfig = Figment::from(Serialized::defaults(RegConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("REGSYNC_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn blank_host_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("REGSYNC_SCRAPE__HOST", "");

        let result = RegConfig::from_figment(RegConfig::figment());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}
