//! Logging setup and relay startup.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use texpilot_config::{Config, ConfigLoader, LoggingConfig};
use texpilot_protocols::provider::CompletionProvider;
use texpilot_provider_openai::OpenAIProvider;
use texpilot_relay::{RelayServer, RelayServerConfig, RelayState};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Get the texpilot data directory (~/.texpilot).
pub(crate) fn texpilot_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".texpilot")
}

fn log_dir(config: &LoggingConfig) -> PathBuf {
    match &config.dir {
        Some(dir) => PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy())),
        None => texpilot_dir().join("logs"),
    }
}

/// `RUST_LOG` if set, otherwise the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(config))
}

fn config_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(config.effective_level())
}

/// Initialize tracing with console and, if enabled, file output.
///
/// `RUST_LOG` overrides the configured level. Log files rotate daily.
pub(crate) fn init_tracing(config: &LoggingConfig) -> Result<(), BoxError> {
    let file_layer = if config.file {
        let dir = log_dir(config);
        std::fs::create_dir_all(&dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("texpilot")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes on drop; keep it for the life of the process.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Build the relay state from configuration and the environment.
pub(crate) fn relay_state(config: &Config) -> RelayState {
    let relay = &config.relay;
    let provider = relay.api_key().map(|key| {
        Arc::new(OpenAIProvider::with_url(key, relay.api_url.clone())) as Arc<dyn CompletionProvider>
    });
    if provider.is_none() {
        warn!(
            env = %relay.api_key_env,
            "No OpenAI API key found; generation requests will fail until it is set"
        );
    }
    RelayState::new(provider, relay.model.clone())
}

/// Run the relay server in foreground until interrupted.
pub(crate) async fn run_relay(config: &Config) -> Result<(), BoxError> {
    info!("Starting texpilot v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(relay_state(config));
    let server = RelayServer::new(RelayServerConfig::from(&config.relay), state);
    server.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn logging(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_filter_uses_known_level() {
        assert_eq!(
            config_filter(&logging("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }

    #[test]
    fn test_unknown_level_keeps_info_logging() {
        assert_eq!(
            config_filter(&logging("verbose")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_log_dir_from_config() {
        let config = LoggingConfig {
            dir: Some(PathBuf::from("/var/log/texpilot")),
            ..Default::default()
        };
        assert_eq!(log_dir(&config), PathBuf::from("/var/log/texpilot"));
        assert!(log_dir(&LoggingConfig::default()).ends_with(".texpilot/logs"));
    }
}
