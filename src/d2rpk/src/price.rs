//! Rune price table loading and value reduction
//!
//! Prices are quoted as exchange entries: O items of a bucket trade for N
//! Ist. A table is either a flat bucket map or a phased file carrying one
//! table per economy phase plus a `defaultPhase` selector.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Fallback phase when a phased table names no default
const FALLBACK_PHASE: &str = "1";

/// One exchange entry: O items of the bucket trade for N Ist
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PriceEntry {
    #[serde(rename = "N")]
    pub ist: f64,
    #[serde(rename = "O")]
    pub items: f64,
}

impl PriceEntry {
    /// Ist value of a single item
    pub fn rate(&self) -> f64 {
        self.ist / self.items
    }
}

/// On-disk table shapes; the phased form is tried first since it is the
/// more specific of the two
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceFile {
    Phased {
        phases: HashMap<String, HashMap<String, PriceEntry>>,
        #[serde(rename = "defaultPhase")]
        default_phase: Option<String>,
    },
    Flat(HashMap<String, PriceEntry>),
}

/// Bucket to Ist-per-item exchange rates for one phase
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    rates: HashMap<String, f64>,
}

impl PriceTable {
    /// Load a price table file, selecting `phase` when the file is phased.
    /// A flat file ignores the phase request.
    pub fn load<P: AsRef<Path>>(path: P, phase: Option<&str>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text, phase)
    }

    /// Parse price table JSON, selecting `phase` when the file is phased
    pub fn from_json(text: &str, phase: Option<&str>) -> Result<Self> {
        let file: PriceFile = serde_json::from_str(text)?;
        let entries = match file {
            PriceFile::Flat(entries) => entries,
            PriceFile::Phased {
                mut phases,
                default_phase,
            } => {
                let key = phase
                    .map(str::to_string)
                    .or(default_phase)
                    .unwrap_or_else(|| FALLBACK_PHASE.to_string());
                phases
                    .remove(&key)
                    .ok_or_else(|| Error::UnknownPhase(key))?
            }
        };

        let rates = entries
            .into_iter()
            .map(|(bucket, entry)| (bucket, entry.rate()))
            .collect();
        Ok(Self { rates })
    }

    /// Ist value of one item of a bucket, if the bucket is priced
    pub fn rate(&self, bucket: &str) -> Option<f64> {
        self.rates.get(bucket).copied()
    }

    pub fn contains(&self, bucket: &str) -> bool {
        self.rates.contains_key(bucket)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Keep only buckets the table prices, sorted for stable report output
    pub fn priced(&self, counts: &HashMap<String, f64>) -> BTreeMap<String, f64> {
        counts
            .iter()
            .filter(|(bucket, _)| self.rates.contains_key(bucket.as_str()))
            .map(|(bucket, count)| (bucket.clone(), *count))
            .collect()
    }

    /// Total Ist value of a bucket count vector; unpriced buckets are worth
    /// nothing
    pub fn value_of(&self, counts: &BTreeMap<String, f64>) -> f64 {
        counts
            .iter()
            .map(|(bucket, count)| count * self.rate(bucket).unwrap_or(0.0))
            .sum()
    }
}
