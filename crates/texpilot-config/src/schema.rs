//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Port the relay listens on. Not configurable: the page agent and the
/// extension manifest both hard-code it.
pub const RELAY_PORT: u16 = 3000;

/// Level names accepted in `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub popup: PopupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relay server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_relay_host")]
    pub host: String,

    /// Chat-completions endpoint of the upstream API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl RelayConfig {
    /// Read the credential from the environment. Unset and empty are both
    /// treated as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_relay_host(),
            api_url: default_api_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_relay_host() -> String {
    "127.0.0.1".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Page agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Base URL of the relay server.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    #[serde(default = "default_editor_selector")]
    pub editor_selector: String,

    #[serde(default = "default_cursor_selector")]
    pub cursor_selector: String,

    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// How long to wait for the editor to appear.
    #[serde(default = "default_editor_wait_ms")]
    pub editor_wait_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            editor_selector: default_editor_selector(),
            cursor_selector: default_cursor_selector(),
            content_selector: default_content_selector(),
            editor_wait_ms: default_editor_wait_ms(),
        }
    }
}

fn default_relay_url() -> String {
    format!("http://localhost:{}", RELAY_PORT)
}

fn default_editor_selector() -> String {
    ".cm-editor".to_string()
}

fn default_cursor_selector() -> String {
    ".cm-cursor".to_string()
}

fn default_content_selector() -> String {
    ".cm-content".to_string()
}

fn default_editor_wait_ms() -> u64 {
    5000
}

/// Popup controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    /// Domain the active tab must belong to.
    #[serde(default = "default_host_domain")]
    pub host_domain: String,

    /// Pause between injecting the agent and resending.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// How long a status message stays visible.
    #[serde(default = "default_status_display_ms")]
    pub status_display_ms: u64,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            host_domain: default_host_domain(),
            settle_delay_ms: default_settle_delay_ms(),
            status_display_ms: default_status_display_ms(),
        }
    }
}

fn default_host_domain() -> String {
    "overleaf.com".to_string()
}

fn default_settle_delay_ms() -> u64 {
    500
}

fn default_status_display_ms() -> u64 {
    3000
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files. Defaults to `~/.texpilot/logs`.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Write log files in addition to the console.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl LoggingConfig {
    /// The configured level if it is a known level name, otherwise `info`.
    ///
    /// An unknown bare word would otherwise be read as a target filter and
    /// silence every other target.
    pub fn effective_level(&self) -> String {
        let level = self.level.trim().to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            default_log_level()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
            file: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
