//! Driver configuration.
//!
//! Values come from an optional TOML file; command-line flags override them.
//!
//! ```toml
//! [batch]
//! input_dir = "input_folder"
//! output_dir = "output_folder"
//! jobs = 10
//!
//! [render]
//! indent = 4
//!
//! [parser]
//! max_depth = 256
//! ```

use std::path::{Path, PathBuf};

use jtree_core::{ParserConfig, DEFAULT_INDENT, DEFAULT_MAX_DEPTH};
use serde::Deserialize;

use crate::error::DriverError;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "jtree.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub batch: BatchSection,
    pub render: RenderSection,
    pub parser: ParserSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSection {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: usize,
}

impl Default for BatchSection {
    fn default() -> Self {
        BatchSection {
            input_dir: PathBuf::from("input_folder"),
            output_dir: PathBuf::from("output_folder"),
            jobs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub indent: usize,
}

impl Default for RenderSection {
    fn default() -> Self {
        RenderSection {
            indent: DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSection {
    pub max_depth: usize,
}

impl Default for ParserSection {
    fn default() -> Self {
        ParserSection {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Load `path`, or `jtree.toml` if it exists, or fall back to defaults.
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Config, DriverError> {
        match path {
            Some(p) => Config::from_file(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Config::from_file(default)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config, DriverError> {
        let src = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Config::from_toml(&src).map_err(|source| DriverError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(src: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            max_depth: self.parser.max_depth,
        }
    }
}
