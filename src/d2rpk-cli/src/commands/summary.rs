//! Rune-value summary command handler

use crate::{bosses, tables};
use anyhow::{Context, Result};
use d2rpk::{Difficulty, DropReport, PriceTable};
use std::path::Path;

/// Handle the summary command: compute every boss report in memory and
/// print the value table without touching the output directory
pub fn handle(
    data: Option<&Path>,
    players: u8,
    difficulty: &str,
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
    print_rpk_table(&reports, &price);

    Ok(())
}

/// Print expected rune value per kill in Ist, highest first
pub fn print_rpk_table(reports: &[DropReport], price: &PriceTable) {
    let mut rows: Vec<(&str, f64)> = reports
        .iter()
        .map(|report| (report.boss.as_str(), price.value_of(&report.drops)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    if let Some(first) = reports.first() {
        println!(
            "Expected rune value per kill (Ist), difficulty {}, players {}",
            first.difficulty, first.players
        );
    }
    println!("{:<10} {:>16}", "Boss", "RPK");
    println!("{}", "-".repeat(27));
    for (boss, rpk) in rows {
        println!("{:<10} {:>16.10}", boss, rpk);
    }
}
