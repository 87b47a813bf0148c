use reg_config::RegConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RegConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RegConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let defaults = RegConfig::default();
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if config.database.path == defaults.database.path
        && has_single_underscore_key(&env_keys, "REGSYNC_DATABASE_")
    {
        warnings.push(
            "Database path appears default while REGSYNC_DATABASE_* env vars exist. Use double underscores (example: REGSYNC_DATABASE__PATH)."
                .to_string(),
        );
    }

    if config.scrape.host == defaults.scrape.host
        && config.scrape.sub_college == defaults.scrape.sub_college
        && !config.scrape.destroy
        && has_single_underscore_key(&env_keys, "REGSYNC_SCRAPE_")
    {
        warnings.push(
            "Scrape config appears default while REGSYNC_SCRAPE_* env vars exist. Use double underscores (example: REGSYNC_SCRAPE__SUB_COLLEGE)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key[prefix.len()..].starts_with('_'))
}
