//! Operator cost tables
//!
//! A [`CostTable`] maps operator codes to their time cost in seconds. Tables are
//! validated when they are built and never change afterwards; the evaluator
//! accepts any of them.
//!
//! The default values are taken from Card, S. K., Moran, T. P., & Newell, A. (1980).
//! The keystroke-level model for user performance time with interactive systems.
//! Communications of the ACM, 23(7), 396-410. The value for the M operator is taken
//! from Kieras, D. (2001). Using the keystroke-level model to estimate execution times.
//! University of Michigan, 555.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DEFAULT_TABLE: Lazy<CostTable> = Lazy::new(|| {
    CostTable::from_trusted(&[
        // Average nonsecretarial typist (40 wpm), 0.20 for an average skilled typist (55 wpm)
        ('K', 0.28),
        ('P', 1.1),
        ('H', 0.4),
        ('B', 0.1),
        // 1.35 according to Card et al.
        ('M', 1.2),
    ])
});

static CUSTOM_TABLE: Lazy<CostTable> = Lazy::new(|| {
    CostTable::from_trusted(&[
        ('K', 0.0),
        ('P', 0.0),
        ('H', 0.0),
        ('B', 0.0),
        ('M', 1.2),
    ])
});

/// Errors raised while building or loading a cost table
#[derive(Debug, Error)]
pub enum CostTableError {
    #[error("invalid operator code {0:?}: expected a single letter")]
    InvalidCode(String),
    #[error("operator code '{0}' is defined more than once")]
    DuplicateCode(char),
    #[error("operator '{code}' has a negative cost ({cost})")]
    NegativeCost { code: char, cost: f64 },
    #[error("operator '{code}' has a non-finite cost")]
    NonFiniteCost { code: char },
    #[error("unsupported cost table format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON cost table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML cost table: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Immutable mapping from operator code to duration in seconds.
///
/// Every code is a single uppercase letter and every cost is finite and `>= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct CostTable {
    costs: BTreeMap<char, f64>,
}

impl CostTable {
    /// Build a table from `(code, seconds)` pairs.
    ///
    /// Codes are case-folded, so `'k'` and `'K'` name the same operator (and
    /// giving both is an error).
    pub fn new<I>(entries: I) -> Result<Self, CostTableError>
    where
        I: IntoIterator<Item = (char, f64)>,
    {
        let mut costs = BTreeMap::new();
        for (code, cost) in entries {
            let code = fold_code(code).ok_or_else(|| CostTableError::InvalidCode(code.into()))?;
            if !cost.is_finite() {
                return Err(CostTableError::NonFiniteCost { code });
            }
            if cost < 0.0 {
                return Err(CostTableError::NegativeCost { code, cost });
            }
            if costs.insert(code, cost).is_some() {
                return Err(CostTableError::DuplicateCode(code));
            }
        }
        Ok(CostTable { costs })
    }

    fn from_trusted(entries: &[(char, f64)]) -> Self {
        CostTable {
            costs: entries.iter().copied().collect(),
        }
    }

    /// Literature-derived operator costs.
    pub fn defaults() -> &'static CostTable {
        &DEFAULT_TABLE
    }

    /// Costs measured for our own setup; only `M` is known so far.
    pub fn custom() -> &'static CostTable {
        &CUSTOM_TABLE
    }

    /// Cost of an operator code, if the table defines it.
    pub fn get(&self, code: char) -> Option<f64> {
        self.costs.get(&code).copied()
    }

    pub fn contains(&self, code: char) -> bool {
        self.costs.contains_key(&code)
    }

    /// Iterate over `(code, seconds)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.costs.iter().map(|(code, cost)| (*code, *cost))
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Parse a table from a JSON object such as `{"K": 0.28, "P": 1.1}`.
    pub fn from_json_str(source: &str) -> Result<Self, CostTableError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse a table from a YAML mapping such as `K: 0.28`.
    pub fn from_yaml_str(source: &str) -> Result<Self, CostTableError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a table file, picking the parser from the extension
    /// (`.json`, `.yaml` or `.yml`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CostTableError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, CostTableError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => return Err(CostTableError::UnsupportedFormat(path.to_path_buf())),
        };
        let source = fs::read_to_string(path).map_err(|source| CostTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }
}

fn fold_code(code: char) -> Option<char> {
    if !code.is_alphabetic() {
        return None;
    }
    let mut upper = code.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(folded), None) => Some(folded),
        _ => None,
    }
}

impl TryFrom<BTreeMap<String, f64>> for CostTable {
    type Error = CostTableError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut entries = Vec::with_capacity(map.len());
        for (key, cost) in map {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(code), None) => entries.push((code, cost)),
                _ => return Err(CostTableError::InvalidCode(key)),
            }
        }
        CostTable::new(entries)
    }
}

impl From<CostTable> for BTreeMap<String, f64> {
    fn from(table: CostTable) -> Self {
        table
            .costs
            .into_iter()
            .map(|(code, cost)| (code.to_string(), cost))
            .collect()
    }
}
