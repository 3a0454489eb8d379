//! misc.txt display name lookup

use crate::tc_table::find_column;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;

/// Terminal item code to display name map
#[derive(Debug, Clone, Default)]
pub struct ItemNames {
    names: HashMap<String, String>,
}

impl ItemNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse a misc.txt file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse misc.txt content, title-casing names for display.
    /// Rows without a code or a name are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let Some(header_line) = lines.next() else {
            return Ok(Self::new());
        };
        let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();

        let code_col = find_column(&header, "code")?;
        let name_col = find_column(&header, "name")?;

        let mut names = Self::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
            let code = cells.get(code_col).copied().unwrap_or("");
            let name = cells.get(name_col).copied().unwrap_or("");
            if code.is_empty() || name.is_empty() {
                continue;
            }
            names.add(code, &title_case(name));
        }
        Ok(names)
    }

    /// Insert a display name for a code, replacing any previous entry
    pub fn add(&mut self, code: &str, name: &str) {
        self.names.insert(code.to_string(), name.to_string());
    }

    /// Display name for a terminal item code
    pub fn get(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the
/// rest, so "key of terror" becomes "Key Of Terror"
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
