use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use toolbox::host::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub tools: ToolsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Tool selected when the shell opens
    pub default_tool: Option<String>,
    /// Tools kept out of the registry
    pub disabled: Vec<String>,
}

impl ToolsConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|d| d == name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            tools: ToolsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Fallback files that exist but fail to load are skipped; their errors
    /// come back alongside the config so they can be reported once logging is up.
    pub fn load(config_path: Option<&PathBuf>) -> Result<(Self, Vec<String>)> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let config =
                Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()))?;
            return Ok((config, Vec::new()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    fn load_first(candidates: &[PathBuf]) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        for candidate in candidates.iter().filter(|c| c.exists()) {
            match Self::load_from_file(candidate) {
                Ok(config) => return (config, warnings),
                Err(e) => warnings.push(format!("Failed to load config from {}: {:#}", candidate.display(), e)),
            }
        }

        // No usable config file found, use defaults
        (Self::default(), warnings)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }
}
