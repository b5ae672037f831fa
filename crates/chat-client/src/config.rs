use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_VOICE_DEMO_TEXT: &str = "Check suspicious domain amazon-security-update.com";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub(crate) base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub(crate) request_timeout_ms: u64,
    #[serde(default)]
    pub(crate) simulation: SimulationConfig,
}

/// Canned delays that make the chat feel like a live assistant.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SimulationConfig {
    #[serde(default = "default_simulation_enabled")]
    pub(crate) enabled: bool,
    #[serde(default = "default_analyzing_delay_ms")]
    pub(crate) analyzing_delay_ms: u64,
    #[serde(default = "default_voice_delay_ms")]
    pub(crate) voice_delay_ms: u64,
    #[serde(default = "default_voice_demo_text")]
    pub(crate) voice_demo_text: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: default_simulation_enabled(),
            analyzing_delay_ms: default_analyzing_delay_ms(),
            voice_delay_ms: default_voice_delay_ms(),
            voice_demo_text: default_voice_demo_text(),
        }
    }
}

impl ClientConfig {
    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }
        if self.request_timeout_ms == 0 {
            anyhow::bail!("request_timeout_ms must be greater than 0");
        }
        Ok(())
    }
}

impl SimulationConfig {
    /// Minimum time a reply is held back, `None` when simulation is off.
    pub(crate) fn analyzing_delay(&self) -> Option<Duration> {
        self.enabled
            .then(|| Duration::from_millis(self.analyzing_delay_ms))
    }

    pub(crate) fn voice_delay(&self) -> Duration {
        Duration::from_millis(self.voice_delay_ms)
    }
}

/// Reads the config file, falling back to defaults when it does not exist.
pub(crate) fn load_client_config(path: &Path) -> anyhow::Result<ClientConfig> {
    if !path.exists() {
        info!(config = %path.display(), "config file not found, using defaults");
        return Ok(ClientConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ClientConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_simulation_enabled() -> bool {
    true
}

fn default_analyzing_delay_ms() -> u64 {
    1_500
}

fn default_voice_delay_ms() -> u64 {
    3_000
}

fn default_voice_demo_text() -> String {
    DEFAULT_VOICE_DEMO_TEXT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.simulation.enabled);
        assert_eq!(
            config.simulation.analyzing_delay(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(config.simulation.voice_delay(), Duration::from_secs(3));
        assert_eq!(
            config.simulation.voice_demo_text,
            "Check suspicious domain amazon-security-update.com"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_full_config() {
        let input = r#"
base_url = "https://guard.example.com/api"
request_timeout_ms = 2500

[simulation]
enabled = false
analyzing_delay_ms = 10
voice_delay_ms = 20
voice_demo_text = "scan example.com"
"#;
        let config: ClientConfig = toml::from_str(input).unwrap();
        assert_eq!(config.base_url, "https://guard.example.com/api");
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.simulation.analyzing_delay(), None);
        assert_eq!(config.simulation.voice_delay_ms, 20);
        assert_eq!(config.simulation.voice_demo_text, "scan example.com");
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let config: ClientConfig = toml::from_str(r#"base_url = "127.0.0.1:5000""#).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http://"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config: ClientConfig = toml::from_str("request_timeout_ms = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_client_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat-client.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        let err = load_client_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }
}
