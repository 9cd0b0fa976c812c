//! Estimation API for klm documents
//!
//! This module wires the pure core into something a host can call: it picks the
//! cost tables, reads documents, notifies a [`Reporter`] and renders results.
//!
//! ```rust,ignore
//! use klm::klm::processor::{render, Estimator, OutputFormat};
//! use klm::klm::reporting::TracingReporter;
//!
//! let estimator = Estimator::builtin();
//! let estimate = estimator.estimate_file("task.klm", &mut TracingReporter)?;
//! print!("{}", render(&estimate, OutputFormat::Text, 3)?);
//! ```

use crate::klm::config::KlmConfig;
use crate::klm::costs::CostTable;
use crate::klm::evaluator::{evaluate, Evaluation};
use crate::klm::normalizer::normalize;
use crate::klm::reporting::Reporter;
use crate::klm::sequence::OperatorSequence;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Represents the output format of a rendered estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable summary, one line per cost table
    Text,
    /// The whole [`Estimate`] as pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub fn available() -> &'static [&'static str] {
        &["text", "json"]
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Errors that can occur while producing an estimate
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Given setup file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown cost table '{0}'")]
    UnknownTable(String),
    #[error("invalid output format '{0}' (expected one of: text, json)")]
    InvalidFormat(String),
    #[error("failed to serialize estimate: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result of evaluating one document against one named table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEstimate {
    pub table: String,
    #[serde(flatten)]
    pub evaluation: Evaluation,
}

/// Result of evaluating one document against every configured table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub operators: OperatorSequence,
    pub results: Vec<TableEstimate>,
}

impl Estimate {
    /// Whether any table reported an unrecognized operator.
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|r| r.evaluation.has_warnings())
    }

    /// Look up the result for a table by name.
    pub fn result(&self, table: &str) -> Option<&Evaluation> {
        self.results
            .iter()
            .find(|r| r.table == table)
            .map(|r| &r.evaluation)
    }
}

/// Evaluates documents against an ordered list of named cost tables.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    tables: Vec<(String, CostTable)>,
}

impl Estimator {
    /// An estimator with no tables; add them with [`with_table`](Self::with_table).
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in `custom` and `default` tables, in that order.
    pub fn builtin() -> Self {
        Self::new()
            .with_table("custom", CostTable::custom().clone())
            .with_table("default", CostTable::defaults().clone())
    }

    /// Build an estimator from configuration.
    ///
    /// `selection` names the tables to use, in order; `None` falls back to
    /// `evaluation.tables`.
    pub fn from_config(
        config: &KlmConfig,
        selection: Option<&[String]>,
    ) -> Result<Self, ProcessingError> {
        let names = selection.unwrap_or(config.evaluation.tables.as_slice());
        let mut estimator = Self::new();
        for name in names {
            let table = config
                .tables
                .get(name)
                .ok_or_else(|| ProcessingError::UnknownTable(name.clone()))?;
            estimator = estimator.with_table(name.clone(), table.clone());
        }
        Ok(estimator)
    }

    /// Append a table. Results come out in the order tables were added.
    pub fn with_table(mut self, name: impl Into<String>, table: CostTable) -> Self {
        self.tables.push((name.into(), table));
        self
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Normalize `source` once and evaluate it against every table.
    pub fn estimate(&self, source: &str, reporter: &mut dyn Reporter) -> Estimate {
        let operators = normalize(source);
        reporter.normalized(&operators);

        let results = self
            .tables
            .iter()
            .map(|(name, table)| {
                let evaluation = evaluate(&operators, table);
                reporter.evaluated(name, &operators, &evaluation);
                TableEstimate {
                    table: name.clone(),
                    evaluation,
                }
            })
            .collect();

        Estimate { operators, results }
    }

    /// Read a document from disk and estimate it.
    ///
    /// A missing file is reported before anything is evaluated.
    pub fn estimate_file<P: AsRef<Path>>(
        &self,
        path: P,
        reporter: &mut dyn Reporter,
    ) -> Result<Estimate, ProcessingError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ProcessingError::FileNotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path).map_err(|source| ProcessingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.estimate(&source, reporter))
    }
}

/// Render an estimate in the given format.
///
/// `precision` is the number of decimal places used for totals in text output.
pub fn render(
    estimate: &Estimate,
    format: OutputFormat,
    precision: usize,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Text => Ok(render_text(estimate, precision)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(estimate)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn render_text(estimate: &Estimate, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input operators were: {}", estimate.operators);
    for result in &estimate.results {
        let _ = writeln!(
            out,
            "Predicted task completion time for the given operators using {} klm values: {:.*} seconds.",
            result.table, precision, result.evaluation.total
        );
    }
    out
}
