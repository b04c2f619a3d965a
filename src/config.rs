use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Environment variable holding the published-CSV export URL.
///
/// Takes precedence over `source.url` from the config file, matching how the
/// CI pipeline injects the (secret) sheet URL.
pub const SHEET_CSV_URL_ENV: &str = "SHEET_CSV_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub source: SourceConfig,

    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Published CSV export URL. Usually supplied via `SHEET_CSV_URL` instead
    /// of being written to disk.
    pub url: Option<String>,

    /// Set from `--url`; wins over both the env var and the file.
    #[serde(skip)]
    pub url_override: Option<String>,

    pub user_agent: String,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_override: None,
            user_agent: "kisetsu/1.0".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory the JSON documents are written under.
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "docs/api/v1".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            source: SourceConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("kisetsu").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".kisetsu").join("config.toml"));
        }

        paths
    }

    /// Resolves the source URL: `--url` override, then the environment, then
    /// the config file. Blank values count as unset.
    #[must_use]
    pub fn source_url(&self) -> Option<String> {
        fn non_blank(v: &str) -> Option<String> {
            let v = v.trim();
            (!v.is_empty()).then(|| v.to_string())
        }

        self.source
            .url_override
            .as_deref()
            .and_then(non_blank)
            .or_else(|| {
                std::env::var(SHEET_CSV_URL_ENV)
                    .ok()
                    .and_then(|v| non_blank(&v))
            })
            .or_else(|| self.source.url.as_deref().and_then(non_blank))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(url) = self.source_url() {
            Url::parse(&url).with_context(|| format!("Invalid source URL: {url}"))?;
        }

        if self.output.root.trim().is_empty() {
            anyhow::bail!("Output root cannot be empty");
        }

        Ok(())
    }

    #[must_use]
    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(&self.output.root)
    }
}
