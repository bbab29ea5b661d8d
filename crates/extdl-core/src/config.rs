use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::{ClientOptions, DEFAULT_USER_AGENT};

/// Global configuration loaded from `~/.config/extdl/config.toml`.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtdlConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirections: u32,
    /// Extension token used when none is given on the command line.
    pub extension: String,
    /// Download directory used when none is given on the command line.
    pub download_dir: PathBuf,
}

impl Default for ExtdlConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 15,
            max_redirections: 10,
            extension: ".zip".to_string(),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

impl ExtdlConfig {
    /// HTTP client settings derived from this config.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirections: self.max_redirections,
        }
    }

    /// Rejects values curl would read as something else: a zero timeout
    /// disables the limit instead of applying one.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        if self.connect_timeout_secs == 0 {
            bail!("connect_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Parse and validate the config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: ExtdlConfig =
            toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Write this config to `path` as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("extdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExtdlConfig> {
    let path = config_path()?;
    if path.exists() {
        return ExtdlConfig::load_from(&path);
    }
    let cfg = ExtdlConfig::default();
    cfg.save_to(&path)?;
    tracing::info!("created default config at {}", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ExtdlConfig::default();
        assert_eq!(cfg.user_agent, "Mozilla/5.0 (extdl)");
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.extension, ".zip");
        assert_eq!(cfg.download_dir, PathBuf::from("downloads"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ExtdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ExtdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            extension = ".tar.gz"
            timeout_secs = 5
        "#;
        let cfg: ExtdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.extension, ".tar.gz");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.connect_timeout_secs, 15);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn client_options_follow_config() {
        let toml = r#"
            user_agent = "custom/1.0"
            timeout_secs = 90
            connect_timeout_secs = 3
            max_redirections = 2
        "#;
        let cfg: ExtdlConfig = toml::from_str(toml).unwrap();
        let opts = cfg.client_options();
        assert_eq!(opts.user_agent, "custom/1.0");
        assert_eq!(opts.timeout, Duration::from_secs(90));
        assert_eq!(opts.connect_timeout, Duration::from_secs(3));
        assert_eq!(opts.max_redirections, 2);
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        assert!(ExtdlConfig::default().validate().is_ok());
        let cfg: ExtdlConfig = toml::from_str("timeout_secs = 0").unwrap();
        assert!(cfg.validate().is_err());
        let cfg: ExtdlConfig = toml::from_str("connect_timeout_secs = 0").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = ExtdlConfig {
            extension: ".iso".to_string(),
            timeout_secs: 7,
            ..ExtdlConfig::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(ExtdlConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn load_from_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").unwrap();
        let err = ExtdlConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("timeout_secs"));
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(toml::from_str::<ExtdlConfig>("timeout_secs = \"soon\"").is_err());
    }
}
