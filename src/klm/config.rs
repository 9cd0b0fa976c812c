//! Configuration loading
//!
//! `defaults/klm.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Hosts layer user files on top of those defaults
//! via [`Loader`] before deserializing into [`KlmConfig`].

use crate::klm::costs::CostTable;
use crate::klm::processor::OutputFormat;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/klm.default.toml");

/// Top-level configuration consumed by klm hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct KlmConfig {
    pub evaluation: EvaluationConfig,
    pub output: OutputConfig,
    /// Named cost tables available for evaluation.
    pub tables: BTreeMap<String, CostTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Table names evaluated by default, in order.
    pub tables: Vec<String>,
    /// Whether unrecognized operators fail the run.
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub precision: usize,
}

/// Builds a [`KlmConfig`] from the embedded defaults plus any number of layers.
///
/// Later layers win key by key, so a file that only sets `tables.custom.K`
/// leaves the rest of the `custom` table alone.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a TOML settings file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Add a TOML settings file that may be missing, such as `./klm.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Add TOML settings held in memory.
    pub fn with_toml_str(mut self, source: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(source, FileFormat::Toml));
        self
    }

    /// Force one key, e.g. `output.format` from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer and validate the cost tables.
    pub fn build(self) -> Result<KlmConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let layer = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(layer);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<KlmConfig, ConfigError> {
    Loader::new().build()
}
