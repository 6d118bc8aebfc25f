use crate::checker::suggestions::Metric;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".imlo.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Word list to check against; the embedded Uzbek list when unset.
    #[serde(default)]
    pub word_list: Option<PathBuf>,

    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    #[serde(default)]
    pub metric: Metric,

    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Also append log lines to this file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_max_suggestions() -> usize {
    3
}

fn default_cutoff() -> f64 {
    0.6
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        r"https?://\S+".to_string(),                                  // URLs
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
        r"^@\w+$".to_string(),                                        // Mentions
        r"^/\w+$".to_string(),                                        // Bot commands
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: None,
            max_suggestions: default_max_suggestions(),
            cutoff: default_cutoff(),
            metric: Metric::default(),
            ignore_patterns: default_ignore_patterns(),
            log_file: None,
        }
    }
}

/// One config file's contents. Keys the file leaves out stay `None` so they
/// don't clobber a lower layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub word_list: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    pub cutoff: Option<f64>,
    pub metric: Option<Metric>,
    pub ignore_patterns: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
}

/// Values given on the command line; `None` leaves the file/default value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub word_list: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    pub cutoff: Option<f64>,
    pub metric: Option<Metric>,
    pub ignore_patterns: Vec<String>,
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: CLI args > explicit/local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = overrides
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        } else if overrides.config_file.is_some() {
            anyhow::bail!("Config file not found: {}", local_path.display());
        }

        // Apply CLI overrides
        config.apply(overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply every key the file sets, even one equal to its default.
    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(path) = file.word_list {
            self.word_list = Some(path);
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(cutoff) = file.cutoff {
            self.cutoff = cutoff;
        }
        if let Some(metric) = file.metric {
            self.metric = metric;
        }
        if let Some(patterns) = file.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(path) = file.log_file {
            self.log_file = Some(path);
        }
        self
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(path) = overrides.word_list {
            self.word_list = Some(path);
        }
        if let Some(max) = overrides.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(cutoff) = overrides.cutoff {
            self.cutoff = cutoff;
        }
        if let Some(metric) = overrides.metric {
            self.metric = metric;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            anyhow::bail!("cutoff must be between 0.0 and 1.0, got {}", self.cutoff);
        }
        Ok(())
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "imlo").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
