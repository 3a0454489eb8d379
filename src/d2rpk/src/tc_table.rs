//! TreasureClassEx.txt parsing
//!
//! Rows are tab-separated with a single header line naming the columns. The
//! loader keeps every listed outcome pair, including zero weights; the roll
//! distribution in [`crate::resolve`] skips weights of zero.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// One treasure class row
#[derive(Debug, Clone)]
pub struct TcRow {
    /// Identifier from the `Treasure Class` column
    pub name: String,
    /// Roll count; positive rows roll independently, negative rows consume
    /// the outcome list as a fixed sequence
    pub picks: i32,
    /// Raw no-drop weight before the player-count adjustment; `None` when
    /// the column is empty
    pub nodrop: Option<u32>,
    /// Outcome and weight pairs in column order; an outcome names another
    /// treasure class or a terminal item code
    pub outcomes: Vec<(String, u32)>,
}

/// Treasure class rows keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct TcTable {
    rows: HashMap<String, TcRow>,
}

impl TcTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a TreasureClassEx.txt file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse TreasureClassEx.txt content
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let Some(header_line) = lines.next() else {
            return Ok(Self::new());
        };
        let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();

        let key_col = find_column(&header, "Treasure Class")?;
        let picks_col = header.iter().position(|h| *h == "Picks");
        let nodrop_col = header.iter().position(|h| *h == "NoDrop");
        let pair_cols = outcome_columns(&header);

        let mut table = Self::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
            let cell = |col: usize| cells.get(col).copied().unwrap_or("");

            let name = cell(key_col);
            if name.is_empty() {
                continue;
            }

            let picks = match picks_col.map_or("", cell) {
                "" => 1,
                value => parse_number(name, "Picks", value)?,
            };
            let nodrop = match nodrop_col.map_or("", cell) {
                "" => None,
                value => Some(parse_number(name, "NoDrop", value)?),
            };

            let mut outcomes = Vec::new();
            for &(item_col, prob_col) in &pair_cols {
                let outcome = cell(item_col);
                if outcome.is_empty() {
                    continue;
                }
                let weight = cell(prob_col);
                if weight.is_empty() {
                    return Err(Error::MissingWeight {
                        row: name.to_string(),
                        column: header[prob_col].to_string(),
                    });
                }
                let weight = parse_number(name, header[prob_col], weight)?;
                outcomes.push((outcome.to_string(), weight));
            }

            table.add(TcRow {
                name: name.to_string(),
                picks,
                nodrop,
                outcomes,
            });
        }

        Ok(table)
    }

    /// Insert a row, replacing any previous row with the same name
    pub fn add(&mut self, row: TcRow) {
        self.rows.insert(row.name.clone(), row);
    }

    /// Look up a row by treasure class name
    pub fn get(&self, name: &str) -> Option<&TcRow> {
        self.rows.get(name)
    }

    /// Whether a name refers to a treasure class row (anything else that
    /// appears as an outcome is a terminal item code)
    pub fn contains(&self, name: &str) -> bool {
        self.rows.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All row names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

pub(crate) fn find_column(header: &[&str], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| *h == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Discover `Item1`/`Prob1` .. `ItemN`/`ProbN` pairs from the header,
/// stopping at the first index where either column is missing
fn outcome_columns(header: &[&str]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for index in 1.. {
        let item_name = format!("Item{index}");
        let prob_name = format!("Prob{index}");
        let item = header.iter().position(|h| *h == item_name.as_str());
        let prob = header.iter().position(|h| *h == prob_name.as_str());
        match (item, prob) {
            (Some(item), Some(prob)) => pairs.push((item, prob)),
            _ => break,
        }
    }
    pairs
}

fn parse_number<T: std::str::FromStr>(row: &str, column: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidNumber {
        row: row.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    })
}
