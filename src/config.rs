use crate::error::{ConfigError, Result};
use scraper::Selector;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Placeholder replaced by the set identifier in `web_url`.
pub const CATEGORY_PLACEHOLDER: &str = "{category}";

/// Environment variable that overrides `web_url`.
pub const WEB_URL_ENV: &str = "WEB_URL";

/// Dotenv file consulted for `WEB_URL` when the process environment lacks it.
pub const ENV_FILE: &str = ".env";

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_prefix")]
    pub prefix: String,
}

/// CSS selectors describing the card list page.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_results_list")]
    pub results_list: String,
    #[serde(default = "default_results_item")]
    pub results_item: String,
    #[serde(default = "default_set_title")]
    pub set_title: String,
    #[serde(default = "default_head")]
    pub head: String,
    #[serde(default = "default_head_item")]
    pub head_item: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_top_body")]
    pub top_body: String,
    #[serde(default = "default_bottom_body")]
    pub bottom_body: String,
    #[serde(default = "default_body_item")]
    pub body_item: String,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_web_url")]
    pub web_url: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default = "default_file_name")]
    pub default_file_name: String,

    /// Seconds before the page request is abandoned.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            prefix: default_log_prefix(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            results_list: default_results_list(),
            results_item: default_results_item(),
            set_title: default_set_title(),
            head: default_head(),
            head_item: default_head_item(),
            name: default_name(),
            top_body: default_top_body(),
            bottom_body: default_bottom_body(),
            body_item: default_body_item(),
            color: default_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_url: default_web_url(),
            output_dir: default_output_dir(),
            default_file_name: default_file_name(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            selectors: SelectorConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl SelectorConfig {
    fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("results_list", self.results_list.as_str()),
            ("results_item", self.results_item.as_str()),
            ("set_title", self.set_title.as_str()),
            ("head", self.head.as_str()),
            ("head_item", self.head_item.as_str()),
            ("name", self.name.as_str()),
            ("top_body", self.top_body.as_str()),
            ("bottom_body", self.bottom_body.as_str()),
            ("body_item", self.body_item.as_str()),
            ("color", self.color.as_str()),
        ]
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        Self::parse(&content)
    }

    /// Reads `path` (defaults when missing), applies the `WEB_URL` override
    /// from the environment or `./.env`, then validates the result.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_env_file(path, ENV_FILE)
    }

    pub fn load_with_env_file<P, E>(path: P, env_file: E) -> Result<Self>
    where
        P: AsRef<Path>,
        E: AsRef<Path>,
    {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let config = Self::read_file(path)?;
            info!("Configuration loaded from {}", path.display());
            config
        } else {
            info!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            Self::default()
        };

        if let Some(url) = web_url_override(env_file.as_ref())? {
            config.web_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.web_url.is_empty() {
            return Err(ConfigError::MissingField("web_url".to_string()).into());
        }
        if !self.web_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "web_url must start with http(s): {}",
                self.web_url
            ))
            .into());
        }
        if !self.web_url.contains(CATEGORY_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue(format!(
                "web_url must contain the {} placeholder: {}",
                CATEGORY_PLACEHOLDER, self.web_url
            ))
            .into());
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if self.output_dir.is_empty() {
            return Err(ConfigError::InvalidValue("output_dir cannot be empty".to_string()).into());
        }

        if self.default_file_name.is_empty() {
            return Err(
                ConfigError::InvalidValue("default_file_name cannot be empty".to_string()).into(),
            );
        }

        for (key, selector) in self.selectors.entries() {
            Selector::parse(selector).map_err(|e| {
                ConfigError::InvalidValue(format!("selectors.{} `{}`: {}", key, selector, e))
            })?;
        }

        Ok(())
    }

    /// Substitutes the set identifier into the URL template.
    pub fn resolve_url(&self, category: &str) -> Result<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ConfigError::MissingField("category".to_string()).into());
        }
        Ok(self.web_url.replace(CATEGORY_PLACEHOLDER, category))
    }
}

/// `WEB_URL` from the process environment, else from the dotenv file. The
/// process environment wins, as with `dotenvy::dotenv`.
fn web_url_override(env_file: &Path) -> Result<Option<String>> {
    if let Ok(url) = std::env::var(WEB_URL_ENV) {
        return Ok(Some(url));
    }
    if !env_file.exists() {
        return Ok(None);
    }

    for entry in dotenvy::from_path_iter(env_file).map_err(ConfigError::EnvFile)? {
        let (key, value) = entry.map_err(ConfigError::EnvFile)?;
        if key == WEB_URL_ENV {
            info!("Using {} from {}", WEB_URL_ENV, env_file.display());
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn default_web_url() -> String {
    "https://world.digimoncard.com/cardlist/?search=true&category={category}".to_string()
}

fn default_output_dir() -> String {
    "data".to_string()
}

fn default_file_name() -> String {
    "digifile".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".to_string()
}

fn default_results_list() -> String {
    "ul.image_list".to_string()
}

fn default_results_item() -> String {
    "li".to_string()
}

fn default_set_title() -> String {
    "div.cardlist_title h2".to_string()
}

fn default_head() -> String {
    "ul.cardinfo_head".to_string()
}

fn default_head_item() -> String {
    "li".to_string()
}

fn default_name() -> String {
    "div.card_name".to_string()
}

fn default_top_body() -> String {
    "div.cardinfo_top_body".to_string()
}

fn default_bottom_body() -> String {
    "div.cardinfo_bottom".to_string()
}

fn default_body_item() -> String {
    "dd".to_string()
}

fn default_color() -> String {
    "span".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_prefix() -> String {
    "digi_scraper".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.output_dir, "data");
        assert_eq!(config.default_file_name, "digifile");
        assert_eq!(config.selectors.head, "ul.cardinfo_head");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn resolves_category_placeholder() {
        let config = Config::from_toml(
            r#"web_url = "https://cards.example/list?category={category}""#,
        )
        .unwrap();
        assert_eq!(
            config.resolve_url("522001").unwrap(),
            "https://cards.example/list?category=522001"
        );
    }

    #[test]
    fn rejects_blank_category() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_url("  "),
            Err(AppError::Config(ConfigError::MissingField(_)))
        ));
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let err = Config::from_toml(r#"web_url = "https://cards.example/list""#).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_unparsable_selector() {
        let err = Config::from_toml(
            r#"
            [selectors]
            head = "ul..broken"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("selectors.head"));
    }

    #[test]
    fn env_file_supplies_web_url() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(
            &env_file,
            "# card list\nWEB_URL=https://cards.example/list?set={category}\n",
        )
        .unwrap();

        let config =
            Config::load_with_env_file(dir.path().join("missing.toml"), &env_file).unwrap();
        if std::env::var(WEB_URL_ENV).is_err() {
            assert_eq!(config.web_url, "https://cards.example/list?set={category}");
        }
    }

    #[test]
    fn override_is_applied_before_validation() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, "web_url = \"https://cards.example/no-placeholder\"\n")
            .unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "WEB_URL=https://cards.example/list?set={category}\n").unwrap();

        if std::env::var(WEB_URL_ENV).is_err() {
            let config = Config::load_with_env_file(&config_file, &env_file).unwrap();
            assert_eq!(config.web_url, "https://cards.example/list?set={category}");
        }
    }

    #[test]
    fn missing_env_file_keeps_configured_url() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.toml");
        std::fs::write(&config_file, "web_url = \"https://cards.example/{category}\"\n").unwrap();

        if std::env::var(WEB_URL_ENV).is_err() {
            let config = Config::load_with_env_file(&config_file, dir.path().join(".env")).unwrap();
            assert_eq!(config.web_url, "https://cards.example/{category}");
        }
    }

    #[test]
    fn results_item_selector_is_configurable() {
        let config = Config::from_toml(
            r#"
            [selectors]
            results_item = "div.result"
            "#,
        )
        .unwrap();
        assert_eq!(config.selectors.results_item, "div.result");
        assert!(Config::from_toml("[selectors]\nresults_item = \"div..x\"").is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(Config::from_toml("request_timeout = 0").is_err());
    }
}
