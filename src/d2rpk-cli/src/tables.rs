//! Game table loading shared by commands

use crate::config::Config;
use anyhow::{bail, Context, Result};
use d2rpk::{ItemNames, TcTable};
use std::path::{Path, PathBuf};

/// Treasure class table file name inside the data directory
pub const TC_FILE: &str = "TreasureClassEx.txt";

/// Item table file name inside the data directory
pub const MISC_FILE: &str = "misc.txt";

/// Resolve the data directory: an explicit path wins, otherwise the
/// configured default is used
pub fn resolve_data_dir(data: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = data {
        return Ok(dir.to_path_buf());
    }

    let config = Config::load()?;
    if let Some(dir) = config.get_data_dir() {
        return Ok(dir.to_path_buf());
    }

    bail!("No data directory. Pass --data or set one with 'd2rpk configure --data-dir DIR'.")
}

/// Load TreasureClassEx.txt from the data directory
pub fn load_tc_table(data_dir: &Path) -> Result<TcTable> {
    let path = data_dir.join(TC_FILE);
    TcTable::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load misc.txt from the data directory
pub fn load_item_names(data_dir: &Path) -> Result<ItemNames> {
    let path = data_dir.join(MISC_FILE);
    ItemNames::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_tables_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(TC_FILE),
            "Treasure Class\tPicks\tItem1\tProb1\nRunes 1\t1\tr01\t3\n",
        )
        .unwrap();
        fs::write(dir.path().join(MISC_FILE), "name\tcode\nel rune\tr01\n").unwrap();

        let tcs = load_tc_table(dir.path()).unwrap();
        assert!(tcs.contains("Runes 1"));

        let names = load_item_names(dir.path()).unwrap();
        assert_eq!(names.get("r01"), Some("El Rune"));
    }

    #[test]
    fn test_missing_table_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_tc_table(dir.path()).is_err());
        assert!(load_item_names(dir.path()).is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_data_dir(Some(dir.path())).unwrap();
        assert_eq!(resolved, dir.path());
    }
}
