use std::env;
use std::path::PathBuf;

use bundly_core::config::{
    AppConfig, CONFIG_PATH_ENV, CURRENCY_SYMBOL_ENV, LOG_FORMAT_ENV, LOG_LEVEL_ENV,
};

use crate::commands::CommandResult;

/// Prints the effective configuration with per-field source attribution.
pub fn run(config: &AppConfig) -> CommandResult {
    let file_doc = load_config_file_doc();

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.push(render_line(
        "currency_symbol",
        &config.currency_symbol,
        field_source("currency_symbol", CURRENCY_SYMBOL_ENV, file_doc.as_ref()),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source("logging.level", LOG_LEVEL_ENV, file_doc.as_ref()),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format).to_lowercase(),
        field_source("logging.format", LOG_FORMAT_ENV, file_doc.as_ref()),
    ));

    CommandResult::raw(lines.join("\n"))
}

fn render_line(key: &str, value: &str, source: &'static str) -> String {
    format!("  {key} = {value} ({source})")
}

fn field_source(key: &str, env_var: &str, file_doc: Option<&toml::Value>) -> &'static str {
    if env::var(env_var).is_ok() {
        return "env";
    }
    if file_doc.is_some_and(|doc| lookup(doc, key).is_some()) {
        return "file";
    }
    "default"
}

fn lookup<'doc>(doc: &'doc toml::Value, dotted_key: &str) -> Option<&'doc toml::Value> {
    dotted_key.split('.').try_fold(doc, |value, segment| value.get(segment))
}

fn load_config_file_doc() -> Option<toml::Value> {
    let path = env::var(CONFIG_PATH_ENV).map(PathBuf::from).unwrap_or_else(|_| "bundly.toml".into());
    let text = std::fs::read_to_string(path).ok()?;
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use bundly_core::config::AppConfig;

    use super::run;

    #[test]
    fn reports_defaults_with_source_attribution() {
        let result = run(&AppConfig::default());
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("currency_symbol = $"));
        assert!(result.output.contains("logging.level = info"));
    }
}
