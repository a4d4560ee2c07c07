//! Client configuration
//!
//! Settings are read in this order, later sources winning:
//! 1. defaults
//! 2. the `[messenger]` table of `fb-messenger.toml`
//! 3. environment variables (`FB_*`)
//!
//! `${VAR_NAME}` inside the TOML file is expanded from the environment.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use fbm_model::MessagingType;
use serde::{Deserialize, Serialize};

use crate::error::{MessengerError, Result};

/// Graph API host
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";

/// Graph API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "v6.0";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration file looked up by [`MessengerConfig::load`]
pub const CONFIG_FILE: &str = "fb-messenger.toml";

/// Settings shared by every call a [`crate::MessengerClient`] makes
#[derive(Clone, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Page access token. A value starting with `http://` or `https://` is
    /// used verbatim as the send endpoint instead.
    pub access_token: String,

    /// App secret used to check webhook signatures
    #[serde(default)]
    pub app_secret: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_graph_url")]
    pub graph_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Log payloads instead of sending them
    #[serde(default)]
    pub dry_run: bool,

    /// Tag applied to bodies that do not carry one
    #[serde(default)]
    pub messaging_type: MessagingType,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_graph_url() -> String {
    DEFAULT_GRAPH_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for MessengerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessengerConfig")
            .field("access_token", &"***")
            .field("app_secret", &self.app_secret.as_ref().map(|_| "***"))
            .field("api_version", &self.api_version)
            .field("graph_url", &self.graph_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("dry_run", &self.dry_run)
            .field("messaging_type", &self.messaging_type)
            .finish()
    }
}

/// `[messenger]` table as written in the TOML file
#[derive(Debug, Default, Deserialize)]
struct TomlFile {
    messenger: Option<TomlMessenger>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlMessenger {
    access_token: Option<String>,
    app_secret: Option<String>,
    api_version: Option<String>,
    graph_url: Option<String>,
    timeout_secs: Option<u64>,
    dry_run: Option<bool>,
    messaging_type: Option<String>,
}

impl MessengerConfig {
    /// Defaults plus the given page access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            app_secret: None,
            api_version: default_api_version(),
            graph_url: default_graph_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            dry_run: false,
            messaging_type: MessagingType::default(),
        }
    }

    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_graph_url(mut self, graph_url: impl Into<String>) -> Self {
        self.graph_url = graph_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_messaging_type(mut self, messaging_type: MessagingType) -> Self {
        self.messaging_type = messaging_type;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The access token itself when it is a full endpoint URL
    pub fn endpoint_override(&self) -> Option<&str> {
        let token = self.access_token.trim();
        (token.starts_with("http://") || token.starts_with("https://")).then_some(token)
    }

    /// `<graph_url>/<api_version>`
    pub fn api_base(&self) -> String {
        format!(
            "{}/{}",
            self.graph_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Load `.env`, then `fb-messenger.toml` if present, otherwise the
    /// environment alone.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        if Path::new(CONFIG_FILE).exists() {
            return Self::from_toml_file(CONFIG_FILE);
        }

        Self::from_env()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from a variable lookup. `FB_PAGE_ACCESS_TOKEN`
    /// is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("FB_PAGE_ACCESS_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| MessengerError::Config("FB_PAGE_ACCESS_TOKEN not set".to_string()))?;

        let mut config = Self::new(access_token);
        config.apply_overrides(&lookup);
        Ok(config)
    }

    /// Load the `[messenger]` table of a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MessengerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content, |key| std::env::var(key).ok())
    }

    /// Parse TOML text, expanding `${VAR}` and applying overrides through
    /// `lookup`.
    pub fn from_toml_str<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = expand_env_vars(content, &lookup);
        let file: TomlFile = toml::from_str(&expanded)
            .map_err(|e| MessengerError::Config(format!("Failed to parse TOML: {}", e)))?;
        let table = file.messenger.unwrap_or_default();

        let mut config = Self::new(table.access_token.unwrap_or_default());
        config.app_secret = table.app_secret.filter(|s| !s.is_empty());
        if let Some(version) = table.api_version {
            config.api_version = version;
        }
        if let Some(url) = table.graph_url {
            config.graph_url = url;
        }
        if let Some(secs) = table.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(dry_run) = table.dry_run {
            config.dry_run = dry_run;
        }
        if let Some(messaging_type) = table.messaging_type {
            config.messaging_type = messaging_type.parse().unwrap_or_default();
        }

        config.apply_overrides(&lookup);

        if config.access_token.is_empty() {
            return Err(MessengerError::Config(
                "access_token missing from [messenger] and FB_PAGE_ACCESS_TOKEN not set"
                    .to_string(),
            ));
        }
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(token) = get("FB_PAGE_ACCESS_TOKEN") {
            self.access_token = token;
        }
        if let Some(secret) = get("FB_APP_SECRET") {
            self.app_secret = Some(secret);
        }
        if let Some(version) = get("FB_API_VERSION") {
            self.api_version = version;
        }
        if let Some(url) = get("FB_GRAPH_URL") {
            self.graph_url = url;
        }
        if let Some(secs) = get("FB_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }
        if let Some(dry_run) = get("FB_DRY_RUN") {
            let dry_run = dry_run.to_lowercase();
            self.dry_run = dry_run != "false" && dry_run != "0";
        }
        if let Some(messaging_type) = get("FB_MESSAGING_TYPE") {
            self.messaging_type = messaging_type.parse().unwrap_or_default();
        }
    }
}

/// Replace `${VAR_NAME}` with the looked-up value; unknown variables become
/// empty strings.
fn expand_env_vars<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }

            if let Some(env_value) = lookup(&var_name) {
                result.push_str(&env_value);
            }
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MessengerConfig::new("token");
        assert_eq!(config.api_version, "v6.0");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.dry_run);
        assert_eq!(config.messaging_type, MessagingType::Response);
        assert_eq!(config.api_base(), "https://graph.facebook.com/v6.0");
        assert!(config.endpoint_override().is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let config = MessengerConfig::new("http://localhost:9999/send");
        assert_eq!(config.endpoint_override(), Some("http://localhost:9999/send"));
    }

    #[test]
    fn test_api_base_trims_slashes() {
        let config = MessengerConfig::new("t")
            .with_graph_url("http://127.0.0.1:8080/")
            .with_api_version("v3.1");
        assert_eq!(config.api_base(), "http://127.0.0.1:8080/v3.1");
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let result = MessengerConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(MessengerError::Config(_))));
    }

    #[test]
    fn test_from_lookup_reads_everything() {
        let config = MessengerConfig::from_lookup(lookup_from(&[
            ("FB_PAGE_ACCESS_TOKEN", "abc"),
            ("FB_APP_SECRET", "shh"),
            ("FB_API_VERSION", "v2.8"),
            ("FB_TIMEOUT_SECS", "5"),
            ("FB_DRY_RUN", "true"),
            ("FB_MESSAGING_TYPE", "UPDATE"),
        ]))
        .unwrap();

        assert_eq!(config.access_token, "abc");
        assert_eq!(config.app_secret.as_deref(), Some("shh"));
        assert_eq!(config.api_version, "v2.8");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.dry_run);
        assert_eq!(config.messaging_type, MessagingType::Update);
    }

    #[test]
    fn test_dry_run_false_values() {
        for value in ["false", "FALSE", "0"] {
            let config = MessengerConfig::from_lookup(lookup_from(&[
                ("FB_PAGE_ACCESS_TOKEN", "abc"),
                ("FB_DRY_RUN", value),
            ]))
            .unwrap();
            assert!(!config.dry_run, "{} should disable dry run", value);
        }
    }

    #[test]
    fn test_toml_with_expansion_and_override() {
        let content = r#"
            [messenger]
            access_token = "${PAGE_TOKEN}"
            api_version = "v3.0"
            timeout_secs = 10
            messaging_type = "3"
        "#;
        let config = MessengerConfig::from_toml_str(
            content,
            lookup_from(&[("PAGE_TOKEN", "from-env"), ("FB_API_VERSION", "v6.0")]),
        )
        .unwrap();

        assert_eq!(config.access_token, "from-env");
        assert_eq!(config.api_version, "v6.0");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.messaging_type, MessagingType::MessageTag);
    }

    #[test]
    fn test_toml_missing_token() {
        let result = MessengerConfig::from_toml_str("[messenger]\ndry_run = true\n", lookup_from(&[]));
        assert!(matches!(result, Err(MessengerError::Config(_))));
    }

    #[test]
    fn test_toml_parse_error() {
        let result = MessengerConfig::from_toml_str("[messenger\n", lookup_from(&[]));
        assert!(matches!(result, Err(MessengerError::Config(_))));
    }

    #[test]
    fn test_expand_unknown_var_is_empty() {
        let expanded = expand_env_vars("a=${NOPE};b=${B}", &lookup_from(&[("B", "2")]));
        assert_eq!(expanded, "a=;b=2");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = MessengerConfig::new("very-secret-token").with_app_secret("app-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("very-secret-token"));
        assert!(!rendered.contains("app-secret"));
    }
}
