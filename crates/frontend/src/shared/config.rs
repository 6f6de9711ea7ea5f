use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub table: TableConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Origin of the REST API. Empty means same origin as the page.
    #[serde(default)]
    pub base: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_per_page: usize,
    pub per_page_options: Vec<usize>,
    pub per_page_storage_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    pub timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig { base: String::new() },
            table: TableConfig {
                default_per_page: 10,
                per_page_options: vec![10, 25, 50, 100],
                per_page_storage_key: "globalPerPage".to_string(),
            },
            notifications: NotificationConfig { timeout_ms: 3000 },
        }
    }
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base = ""

[table]
default_per_page = 10
per_page_options = [10, 25, 50, 100]
per_page_storage_key = "globalPerPage"

[notifications]
timeout_ms = 3000
"#;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parses a TOML document and applies the build-time API override.
///
/// `RECON_API_BASE` (read at compile time) replaces `[api] base` when set.
pub fn parse_config(source: &str, api_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = toml::from_str(source)?;
    if let Some(base) = api_override.map(str::trim).filter(|b| !b.is_empty()) {
        config.api.base = base.trim_end_matches('/').to_string();
    }
    if config.table.default_per_page == 0 {
        return Err(ConfigError::Invalid("default_per_page must be positive".into()));
    }
    if config.table.per_page_options.is_empty() {
        return Err(ConfigError::Invalid("per_page_options must not be empty".into()));
    }
    Ok(config)
}

fn load_config() -> AppConfig {
    match parse_config(DEFAULT_CONFIG, option_env!("RECON_API_BASE")) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; falling back to built-in defaults", e);
            AppConfig::default()
        }
    }
}

static CONFIG: Lazy<AppConfig> = Lazy::new(load_config);

/// Process-wide configuration, loaded once on first use.
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, None).unwrap();
        assert_eq!(config.api.base, "");
        assert_eq!(config.table.default_per_page, 10);
        assert_eq!(config.table.per_page_options, vec![10, 25, 50, 100]);
        assert_eq!(config.table.per_page_storage_key, "globalPerPage");
        assert_eq!(config.notifications.timeout_ms, 3000);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_api_override() {
        let config = parse_config(DEFAULT_CONFIG, Some("http://127.0.0.1:5000/")).unwrap();
        assert_eq!(config.api.base, "http://127.0.0.1:5000");

        let config = parse_config(DEFAULT_CONFIG, Some("  ")).unwrap();
        assert_eq!(config.api.base, "");
    }

    #[test]
    fn test_zero_per_page_rejected() {
        let source = DEFAULT_CONFIG.replace("default_per_page = 10", "default_per_page = 0");
        assert!(matches!(
            parse_config(&source, None),
            Err(ConfigError::Invalid(_))
        ));
    }
}
