//! Optional `dfo.toml` configuration.
//!
//! ```toml
//! [budget]
//! max_nodes = 5000000
//!
//! [output]
//! json = false
//! limit = 20
//! ```
//!
//! Command-line flags override the file; the file overrides the defaults.

use dfo_kernel::SearchBudget;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "dfo.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DfoConfig {
    pub budget: BudgetConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    pub max_nodes: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub json: bool,
    pub limit: Option<usize>,
}

impl DfoConfig {
    /// Read `explicit`, or `dfo.toml` in the working directory when it exists.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Self::read(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    fn read(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_string(),
            source,
        })
    }

    /// The effective search budget, with `--max-nodes` taking precedence.
    pub fn budget(&self, max_nodes: Option<u64>) -> SearchBudget {
        SearchBudget {
            max_nodes: max_nodes.or(self.budget.max_nodes),
        }
    }
}
