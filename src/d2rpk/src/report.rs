//! Per-boss drop reports

use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Game difficulty; selects which treasure class root a boss uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "NM")]
    Nightmare,
    #[serde(rename = "H")]
    Hell,
}

impl Difficulty {
    /// Short code used on the command line and in reports
    pub fn code(self) -> &'static str {
        match self {
            Difficulty::Normal => "N",
            Difficulty::Nightmare => "NM",
            Difficulty::Hell => "H",
        }
    }

    /// Suffix appended to a boss's base treasure class name; Normal rows
    /// carry no suffix
    pub fn tc_suffix(self) -> &'static str {
        match self {
            Difficulty::Normal => "",
            Difficulty::Nightmare => " (N)",
            Difficulty::Hell => " (H)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "N" => Ok(Difficulty::Normal),
            "NM" => Ok(Difficulty::Nightmare),
            "H" => Ok(Difficulty::Hell),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

/// One boss's expected economy drops for a difficulty and player count.
///
/// Fields serialize in alphabetical order and `drops` is a sorted map, so
/// report files diff cleanly between runs.
#[derive(Debug, Clone, Serialize)]
pub struct DropReport {
    pub boss: String,
    pub difficulty: Difficulty,
    pub drops: BTreeMap<String, f64>,
    pub players: u8,
}

impl DropReport {
    /// Report file name, `boss.<name>.drops.json`
    pub fn file_name(&self) -> String {
        format!("boss.{}.drops.json", self.boss)
    }

    /// Pretty-printed JSON document for the report file
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
