use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_BACKEND_HOST: &str = "http://localhost:8080";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
}

/// Where the banking backend lives and how long to wait for it.
/// Timeouts left unset keep the HTTP client's defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_host() -> String { DEFAULT_BACKEND_HOST.to_string() }

impl Default for BackendConfig {
    fn default() -> Self {
        Self { host: default_host(), connect_timeout_secs: None, request_timeout_secs: None }
    }
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`), falling back to defaults when the
    /// file is absent, then apply environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            info!(%path, "loading configuration file");
            load_from_file(&path)?
        } else {
            warn!(%path, "configuration file not found, using defaults");
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.backend.normalize_from_env();
        self.backend.normalize();
        self.backend.validate()
    }
}

impl BackendConfig {
    /// `BACKEND_HOST` takes precedence over the file.
    pub fn normalize_from_env(&mut self) {
        self.apply_host_override(std::env::var("BACKEND_HOST").ok());
    }

    pub fn apply_host_override(&mut self, host: Option<String>) {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
    }

    pub fn normalize(&mut self) {
        let trimmed = self.host.trim().trim_end_matches('/');
        self.host = if trimmed.is_empty() { default_host() } else { trimmed.to_string() };
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.host.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("backend.host must start with http:// or https://, got {}", self.host));
        }
        if self.connect_timeout_secs == Some(0) || self.request_timeout_secs == Some(0) {
            return Err(anyhow!("backend timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_localhost_backend() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.backend.host, "http://localhost:8080");
        assert!(cfg.backend.connect_timeout().is_none());
        assert!(cfg.backend.request_timeout().is_none());
    }

    #[test]
    fn parses_backend_section() {
        let cfg = parse(
            r#"
            [backend]
            host = "https://bank.example.com/"
            connect_timeout_secs = 3
            request_timeout_secs = 20
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend.host, "https://bank.example.com/");
        assert_eq!(cfg.backend.connect_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(cfg.backend.request_timeout(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn normalize_strips_trailing_slash_and_fills_blank_host() {
        let mut b = BackendConfig { host: "http://10.0.0.5:9000/".into(), ..Default::default() };
        b.normalize();
        assert_eq!(b.host, "http://10.0.0.5:9000");

        let mut b = BackendConfig { host: "   ".into(), ..Default::default() };
        b.normalize();
        assert_eq!(b.host, DEFAULT_BACKEND_HOST);
    }

    #[test]
    fn host_override_wins_unless_blank() {
        let mut b = BackendConfig::default();
        b.apply_host_override(Some("http://backend:8080".into()));
        assert_eq!(b.host, "http://backend:8080");
        b.apply_host_override(Some("  ".into()));
        assert_eq!(b.host, "http://backend:8080");
        b.apply_host_override(None);
        assert_eq!(b.host, "http://backend:8080");
    }

    #[test]
    fn validate_rejects_bad_scheme_and_zero_timeouts() {
        let b = BackendConfig { host: "localhost:8080".into(), ..Default::default() };
        assert!(b.validate().is_err());

        let b = BackendConfig { request_timeout_secs: Some(0), ..Default::default() };
        assert!(b.validate().is_err());

        assert!(BackendConfig::default().validate().is_ok());
    }
}
