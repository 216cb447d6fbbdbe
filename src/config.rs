//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::table::SortKey;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default `User-Agent`, matching the emulated browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Full OLX search URL, filters included
    #[serde(default)]
    pub url: String,

    /// Mail a notification when the followed listings change
    #[serde(default)]
    pub send_notification: bool,

    /// Recipient of notifications
    #[serde(default)]
    pub notification_mail: String,

    /// Sender account address, also the SMTP login
    #[serde(default)]
    pub sender_mail: String,

    /// Sender account password
    #[serde(default)]
    pub sender_pass: String,

    /// Rows included in a notification
    #[serde(default = "default_num_send")]
    pub num_send: usize,

    /// Top rows compared between passes
    #[serde(default = "default_num_follow")]
    pub num_follow: usize,

    /// Column the listing view is sorted by
    #[serde(default)]
    pub sort_by: SortKey,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Notification subject line
    #[serde(default = "default_subject")]
    pub subject: String,

    /// First line of the notification body
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Watch mode: seconds between passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Watch mode: random extra wait (0 to this value)
    #[serde(default = "default_interval_jitter_secs")]
    pub interval_jitter_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Maximum rows printed
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_num_send() -> usize {
    5
}

fn default_num_follow() -> usize {
    5
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_subject() -> String {
    "OLX scraper".to_string()
}

fn default_header() -> String {
    "Znalazłem nowe oferty!".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_interval_secs() -> u64 {
    600
}

fn default_interval_jitter_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            send_notification: false,
            notification_mail: String::new(),
            sender_mail: String::new(),
            sender_pass: String::new(),
            num_send: default_num_send(),
            num_follow: default_num_follow(),
            sort_by: SortKey::Price,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            subject: default_subject(),
            header: default_header(),
            user_agent: default_user_agent(),
            interval_secs: default_interval_secs(),
            interval_jitter_secs: default_interval_jitter_secs(),
            format: OutputFormat::Table,
            limit: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("olx-watch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("OLX_URL") {
            self.url = url;
        }

        if let Ok(mail) = std::env::var("OLX_NOTIFICATION_MAIL") {
            self.notification_mail = mail;
        }

        if let Ok(mail) = std::env::var("OLX_SENDER_MAIL") {
            self.sender_mail = mail;
        }

        if let Ok(pass) = std::env::var("OLX_SENDER_PASS") {
            self.sender_pass = pass;
        }

        if let Ok(interval) = std::env::var("OLX_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.interval_secs = secs;
            }
        }

        self
    }

    /// Checks that the options needed for a pass are present.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            anyhow::bail!("No search URL configured. Set `url` in config.toml, OLX_URL or --url.");
        }

        if self.send_notification {
            if self.sender_mail.trim().is_empty() {
                anyhow::bail!("Notifications are enabled but `sender_mail` is empty.");
            }
            if self.notification_mail.trim().is_empty() {
                anyhow::bail!("Notifications are enabled but `notification_mail` is empty.");
            }
        }

        Ok(())
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
