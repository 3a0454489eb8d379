//! Treasure class inspection command handler

use crate::tables;
use anyhow::{bail, Result};
use d2rpk::{clamp_players, ItemNames, LeafDist, OutcomeDist, Resolver, TcTable};
use std::path::Path;

/// Handle the tc command: show row facts plus either the flattened leaf
/// distribution (default) or the single-roll outcome distribution
pub fn handle(
    name: &str,
    data: Option<&Path>,
    players: u8,
    roll: bool,
    limit: usize,
) -> Result<()> {
    let data_dir = tables::resolve_data_dir(data)?;
    let tcs = tables::load_tc_table(&data_dir)?;
    let names = tables::load_item_names(&data_dir)?;

    let Some(row) = tcs.get(name) else {
        let close = near_matches(&tcs, name);
        if close.is_empty() {
            bail!(
                "Unknown treasure class {:?} (names are case-sensitive, e.g. \"Mephisto (H)\")",
                name
            );
        }
        bail!(
            "Unknown treasure class {:?}. Close matches: {}",
            name,
            close.join(", ")
        );
    };

    let mut resolver = Resolver::new(&tcs);
    let dist = resolver.outcome_dist(name, players)?;

    println!("Treasure class: {}", row.name);
    println!("Picks: {}", row.picks);
    match row.nodrop {
        Some(raw) => println!(
            "NoDrop: raw weight {}, {:.4}% chance at {} players",
            raw,
            dist.no_drop * 100.0,
            clamp_players(players)
        ),
        None => println!("NoDrop: none"),
    }
    println!();

    if roll {
        print_roll(&dist, limit);
    } else {
        let leaves = resolver.leaf_dist(name, players)?;
        print_leaves(&leaves, &names, limit);
    }

    Ok(())
}

/// Row names resembling the requested one, for the unknown-name error
fn near_matches(tcs: &TcTable, name: &str) -> Vec<String> {
    let needle = name.to_lowercase();
    tcs.names()
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .take(5)
        .map(str::to_string)
        .collect()
}

/// Print the single-roll outcome distribution, highest probability first
fn print_roll(dist: &OutcomeDist, limit: usize) {
    let mut rows: Vec<(&str, f64)> = dist
        .outcomes
        .iter()
        .map(|(outcome, p)| (outcome.as_str(), *p))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("{:<28} {:>14}", "Outcome", "Probability");
    println!("{}", "-".repeat(43));
    for (outcome, p) in rows.iter().take(limit) {
        println!("{:<28} {:>14.10}", outcome, p);
    }
    if dist.no_drop > 0.0 {
        println!("{:<28} {:>14.10}", "(no drop)", dist.no_drop);
    }
    if rows.len() > limit {
        println!("... {} more", rows.len() - limit);
    }
}

/// Print the flattened leaf distribution, highest probability first
fn print_leaves(leaves: &LeafDist, names: &ItemNames, limit: usize) {
    let mut rows: Vec<(&str, f64)> = leaves.iter().map(|(code, p)| (code.as_str(), *p)).collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("{:<10} {:<24} {:>14}", "Code", "Name", "Probability");
    println!("{}", "-".repeat(50));
    for (code, p) in rows.iter().take(limit) {
        println!(
            "{:<10} {:<24} {:>14.10}",
            code,
            names.get(code).unwrap_or("-"),
            p
        );
    }
    if rows.len() > limit {
        println!("... {} more", rows.len() - limit);
    }

    let reached: f64 = leaves.values().sum();
    if reached < 1.0 - 1e-9 {
        println!();
        println!("Mass lost to no-drop: {:.10}", 1.0 - reached);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join(tables::TC_FILE),
            "Treasure Class\tPicks\tNoDrop\tItem1\tProb1\tItem2\tProb2\n\
             Runes 1\t1\t1\tr01\t2\tRunes 2\t1\n\
             Runes 2\t1\t\tr02\t1\t\t\n",
        )
        .unwrap();
        fs::write(
            dir.join(tables::MISC_FILE),
            "name\tcode\nel rune\tr01\neld rune\tr02\n",
        )
        .unwrap();
    }

    #[test]
    fn test_handle_leaf_and_roll_views() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        assert!(handle("Runes 1", Some(dir.path()), 1, false, 25).is_ok());
        assert!(handle("Runes 1", Some(dir.path()), 1, true, 25).is_ok());
        assert!(handle("Runes 2", Some(dir.path()), 8, false, 1).is_ok());
    }

    #[test]
    fn test_handle_unknown_name() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        assert!(handle("Runes 3", Some(dir.path()), 1, false, 25).is_err());
    }

    #[test]
    fn test_handle_unknown_name_suggests_close_matches() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());

        let err = handle("runes", Some(dir.path()), 1, false, 25).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Runes 1"), "{}", message);
        assert!(message.contains("Runes 2"), "{}", message);
    }
}
