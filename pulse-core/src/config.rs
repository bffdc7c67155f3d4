//! Tracking and social configuration
//!
//! Both configurations are TOML documents. Every section is optional; a
//! missing section takes the defaults the pipeline has always used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::{SocialScoring, DEFAULT_MAX_AGE_DAYS, DEFAULT_MIN_CITATIONS};

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// What to track: research areas, authors and key papers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub keywords: Vec<KeywordGroup>,
    pub authors: Vec<TrackedAuthor>,
    pub key_papers: Vec<KeyPaper>,
    pub filters: FilterConfig,
}

/// A research area and the search terms that describe it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub terms: Vec<String>,
    /// Sources to search for this area
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
}

fn default_sources() -> Vec<String> {
    vec!["arxiv".to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedAuthor {
    pub name: String,
}

/// A paper whose citing papers are fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPaper {
    #[serde(default)]
    pub title: Option<String>,
    pub arxiv_id: String,
}

/// Inclusion criteria applied after deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_citations: u64,
    pub exclude_keywords: Vec<String>,
    /// Fetch window; older papers are never requested
    pub max_age_days: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_citations: DEFAULT_MIN_CITATIONS,
            exclude_keywords: Vec::new(),
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }
}

impl TrackingConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }

    /// Reject groups without usable terms and blank author names
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, group) in self.keywords.iter().enumerate() {
            if !group.terms.iter().any(|t| !t.trim().is_empty()) {
                let name = group.area.clone().unwrap_or_else(|| format!("#{}", idx + 1));
                return Err(ConfigError::Invalid(format!(
                    "keyword group {} has no search terms",
                    name
                )));
            }
        }

        if self.authors.iter().any(|a| a.name.trim().is_empty()) {
            return Err(ConfigError::Invalid("tracked author with empty name".to_string()));
        }

        if self.filters.max_age_days < 0 {
            return Err(ConfigError::Invalid(format!(
                "max_age_days must not be negative (got {})",
                self.filters.max_age_days
            )));
        }

        Ok(())
    }

    /// Every tracked term across all keyword groups
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .flat_map(|group| group.terms.iter().map(|t| t.as_str()))
    }
}

/// Social tracker settings and scoring weights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub scoring: SocialScoring,
    /// Per-tracker switches, keyed by tracker name
    pub platforms: BTreeMap<String, PlatformConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub enabled: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl SocialConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }

    /// Trackers are enabled unless explicitly switched off
    pub fn is_enabled(&self, platform: &str) -> bool {
        self.platforms.get(platform).map_or(true, |p| p.enabled)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
