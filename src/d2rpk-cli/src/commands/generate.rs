//! Report generation command handler

use super::summary::print_rpk_table;
use crate::{bosses, tables};
use anyhow::{Context, Result};
use d2rpk::{Difficulty, PriceTable};
use std::fs;
use std::path::Path;

/// Handle the generate command: write one report file per roster entry,
/// then print the value summary
pub fn handle(
    data: Option<&Path>,
    players: u8,
    difficulty: &str,
    out_dir: &Path,
    price_table: &Path,
    price_phase: Option<&str>,
) -> Result<()> {
    let difficulty: Difficulty = difficulty.parse()?;
    let data_dir = tables::resolve_data_dir(data)?;
    let tcs = tables::load_tc_table(&data_dir)?;
    let names = tables::load_item_names(&data_dir)?;
    let price = PriceTable::load(price_table, price_phase)
        .with_context(|| format!("Failed to load price table from {}", price_table.display()))?;

    let reports = bosses::build_reports(&tcs, &names, &price, difficulty, players)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    for report in &reports {
        let path = out_dir.join(report.file_name());
        fs::write(&path, report.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "Wrote {} drop reports to {}",
        reports.len(),
        out_dir.display()
    );
    println!();
    print_rpk_table(&reports, &price);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_writes_reports() {
        let data = tempfile::tempdir().unwrap();
        let mut tc_lines = String::from("Treasure Class\tPicks\tItem1\tProb1\n");
        for base in [
            "Andariel", "Baal", "Council", "Countess", "Diablo", "Mephisto", "Nihlathak",
            "Summoner",
        ] {
            tc_lines.push_str(&format!("{base} (H)\t1\tr01\t1\n"));
        }
        fs::write(data.path().join(tables::TC_FILE), tc_lines).unwrap();
        fs::write(data.path().join(tables::MISC_FILE), "name\tcode\nel rune\tr01\n").unwrap();

        let price_path = data.path().join("prices.json");
        fs::write(&price_path, r#"{"EL": {"N": 1, "O": 100}}"#).unwrap();

        let out = tempfile::tempdir().unwrap();
        handle(
            Some(data.path()),
            1,
            "H",
            out.path(),
            &price_path,
            None,
        )
        .unwrap();

        let diablo = fs::read_to_string(out.path().join("boss.diablo.drops.json")).unwrap();
        assert!(diablo.contains("\"boss\": \"diablo\""));
        assert!(diablo.contains("\"EL\": 1.0"));

        let council5 = fs::read_to_string(out.path().join("boss.council5.drops.json")).unwrap();
        assert!(council5.contains("\"EL\": 5.0"));
    }

    #[test]
    fn test_generate_rejects_bad_difficulty() {
        let data = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let price = data.path().join("prices.json");
        let result = handle(Some(data.path()), 1, "X", out.path(), &price, None);
        assert!(result.is_err());
    }
}
