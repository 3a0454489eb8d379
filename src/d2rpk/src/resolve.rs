//! Treasure class resolution
//!
//! A treasure class row is a weighted single roll over outcomes that are
//! either further treasure classes or terminal item codes. Resolution
//! flattens that graph into per-item probability mass, then accounts for a
//! row's `Picks` value to produce expected item counts for one kill.
//!
//! All of this is exact expectation arithmetic over `f64`; nothing here
//! rolls dice.

use crate::tc_table::{TcRow, TcTable};
use crate::{clamp_players, Error, Result, GOLD_PREFIX, MAX_TC_DEPTH};
use std::collections::HashMap;

/// Probability mass per terminal item code from a single roll chain.
/// Values sum to at most 1; the shortfall is mass lost to no-drop.
pub type LeafDist = HashMap<String, f64>;

/// Expected terminal item counts for one kill
pub type ExpectedCounts = HashMap<String, f64>;

/// Single-roll distribution for one treasure class row
#[derive(Debug, Clone)]
pub struct OutcomeDist {
    /// (outcome, probability) in row order
    pub outcomes: Vec<(String, f64)>,
    /// Probability that the roll produces nothing
    pub no_drop: f64,
}

impl OutcomeDist {
    /// Sum of all outcome probabilities including no-drop; 1 for any row
    /// with nonzero total weight
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|(_, p)| p).sum::<f64>() + self.no_drop
    }
}

/// How a root row spends its `Picks` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickPlan {
    /// Roll the outcome distribution this many times independently
    Independent(u32),
    /// Walk the outcome list deterministically: each outcome repeated its
    /// weight times in row order, truncated to this many entries
    Sequence(u32),
}

impl PickPlan {
    /// Derive the plan for a row. Act boss rows lead with a `gld` outcome
    /// that consumes one positive pick deterministically, so one pick is
    /// subtracted when the first listed outcome is gold.
    pub fn for_row(row: &TcRow) -> PickPlan {
        if row.picks < 0 {
            return PickPlan::Sequence(row.picks.unsigned_abs());
        }
        let mut picks = row.picks as u32;
        let gold_first = row
            .outcomes
            .first()
            .is_some_and(|(outcome, _)| outcome.starts_with(GOLD_PREFIX));
        if picks > 0 && gold_first {
            picks -= 1;
        }
        PickPlan::Independent(picks)
    }
}

/// Resolves treasure classes against a loaded table.
///
/// Leaf distributions are memoized per (node, player count), so shared
/// subtrees are flattened once even across several boss evaluations.
pub struct Resolver<'a> {
    tcs: &'a TcTable,
    memo: HashMap<(String, u8), LeafDist>,
}

impl<'a> Resolver<'a> {
    pub fn new(tcs: &'a TcTable) -> Self {
        Self {
            tcs,
            memo: HashMap::new(),
        }
    }

    /// Single-roll outcome distribution for a row, with the no-drop weight
    /// adjusted for the player count
    pub fn outcome_dist(&self, tc: &str, players: u8) -> Result<OutcomeDist> {
        let row = self
            .tcs
            .get(tc)
            .ok_or_else(|| Error::UnknownTreasureClass(tc.to_string()))?;
        row_dist(row, clamp_players(players))
    }

    /// Flatten a node to probability mass per terminal item code.
    ///
    /// An empty node yields an empty distribution. A node that is not a
    /// treasure class row is a terminal item with all mass on itself.
    pub fn leaf_dist(&mut self, node: &str, players: u8) -> Result<LeafDist> {
        self.leaf_dist_at(node, clamp_players(players), 0)
    }

    fn leaf_dist_at(&mut self, node: &str, players: u8, depth: usize) -> Result<LeafDist> {
        if node.is_empty() {
            return Ok(LeafDist::new());
        }
        let tcs = self.tcs;
        let Some(row) = tcs.get(node) else {
            return Ok(LeafDist::from([(node.to_string(), 1.0)]));
        };
        if let Some(cached) = self.memo.get(&(node.to_string(), players)) {
            return Ok(cached.clone());
        }
        if depth >= MAX_TC_DEPTH {
            return Err(Error::DepthExceeded {
                tc: node.to_string(),
                limit: MAX_TC_DEPTH,
            });
        }

        let dist = row_dist(row, players)?;
        let mut acc = LeafDist::new();
        for (outcome, p) in &dist.outcomes {
            if tcs.contains(outcome) {
                let sub = self.leaf_dist_at(outcome, players, depth + 1)?;
                add_scaled(&mut acc, &sub, *p);
            } else {
                *acc.entry(outcome.clone()).or_default() += p;
            }
        }

        self.memo.insert((node.to_string(), players), acc.clone());
        Ok(acc)
    }

    /// Expected terminal item counts from a single outer roll of `root`.
    /// When an outcome is itself a treasure class, its own `Picks` value
    /// multiplies the mass flowing through it.
    pub fn one_pick_counts(&mut self, root: &str, players: u8) -> Result<ExpectedCounts> {
        let players = clamp_players(players);
        let dist = self.outcome_dist(root, players)?;
        let tcs = self.tcs;

        let mut counts = ExpectedCounts::new();
        for (outcome, p1) in &dist.outcomes {
            match tcs.get(outcome) {
                Some(inner) => {
                    let picks = f64::from(inner.picks);
                    let sub = self.leaf_dist(outcome, players)?;
                    add_scaled(&mut counts, &sub, p1 * picks);
                }
                None => *counts.entry(outcome.clone()).or_default() += p1,
            }
        }
        Ok(counts)
    }

    /// Expected terminal item counts for one kill of `root`, honoring the
    /// row's pick plan
    pub fn expected_counts(&mut self, root: &str, players: u8) -> Result<ExpectedCounts> {
        let players = clamp_players(players);
        let tcs = self.tcs;
        let row = tcs
            .get(root)
            .ok_or_else(|| Error::UnknownTreasureClass(root.to_string()))?;

        match PickPlan::for_row(row) {
            PickPlan::Independent(n) => {
                let mut counts = self.one_pick_counts(root, players)?;
                for count in counts.values_mut() {
                    *count *= f64::from(n);
                }
                Ok(counts)
            }
            PickPlan::Sequence(n) => {
                let mut counts = ExpectedCounts::new();
                for entry in roll_sequence(row, n) {
                    let picks = tcs.get(entry).map_or(1.0, |inner| f64::from(inner.picks));
                    let sub = self.leaf_dist(entry, players)?;
                    add_scaled(&mut counts, &sub, picks);
                }
                Ok(counts)
            }
        }
    }
}

/// Key-wise `acc += scale * dist`
fn add_scaled(acc: &mut HashMap<String, f64>, dist: &HashMap<String, f64>, scale: f64) {
    for (key, mass) in dist {
        *acc.entry(key.clone()).or_default() += scale * mass;
    }
}

fn row_dist(row: &TcRow, players: u8) -> Result<OutcomeDist> {
    // Weights are u32 cells but whole-row sums can exceed u32
    let listed_sum: u64 = row
        .outcomes
        .iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|(_, weight)| u64::from(*weight))
        .sum();
    let nodrop = match row.nodrop {
        Some(raw) => adjusted_nodrop(row, raw, listed_sum, players)?,
        None => 0,
    };

    let total = listed_sum as f64 + nodrop as f64;
    if total == 0.0 {
        return Ok(OutcomeDist {
            outcomes: Vec::new(),
            no_drop: 0.0,
        });
    }

    let outcomes = row
        .outcomes
        .iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|(outcome, weight)| (outcome.clone(), f64::from(*weight) / total))
        .collect();
    Ok(OutcomeDist {
        outcomes,
        no_drop: nodrop as f64 / total,
    })
}

/// Player-adjusted no-drop weight.
///
/// The game halves the effective no-drop odds roughly every second player:
/// with exponent e = ceil(players / 2), the adjusted weight w satisfies
/// w / (w + s) = (raw / (raw + s))^e where s is the listed weight sum.
fn adjusted_nodrop(row: &TcRow, raw: u32, listed_sum: u64, players: u8) -> Result<u64> {
    if raw == 0 {
        return Ok(0);
    }
    let exponent = (u32::from(players) + 1) / 2;
    let pool = (u64::from(raw) + listed_sum) as f64;
    let ratio = (f64::from(raw) / pool).powi(exponent as i32);
    if ratio >= 1.0 {
        return Err(Error::NoDropSaturated {
            tc: row.name.clone(),
            raw,
            sum: listed_sum,
        });
    }
    Ok((ratio / (1.0 - ratio) * listed_sum as f64).round_ties_even() as u64)
}

/// Deterministic roll sequence of a negative-Picks row: each outcome
/// repeated its weight times in row order, truncated to `limit` entries
fn roll_sequence(row: &TcRow, limit: u32) -> Vec<&str> {
    let mut seq: Vec<&str> = Vec::new();
    'rows: for (outcome, weight) in &row.outcomes {
        for _ in 0..*weight {
            if seq.len() as u32 >= limit {
                break 'rows;
            }
            seq.push(outcome.as_str());
        }
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, picks: i32, nodrop: Option<u32>, outcomes: &[(&str, u32)]) -> TcRow {
        TcRow {
            name: name.to_string(),
            picks,
            nodrop,
            outcomes: outcomes
                .iter()
                .map(|(outcome, weight)| (outcome.to_string(), *weight))
                .collect(),
        }
    }

    fn table(rows: Vec<TcRow>) -> TcTable {
        let mut table = TcTable::new();
        for entry in rows {
            table.add(entry);
        }
        table
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_outcome_dist_normalizes() {
        let tcs = table(vec![row("Runes 1", 1, None, &[("r01", 3), ("r02", 1)])]);
        let resolver = Resolver::new(&tcs);

        let dist = resolver.outcome_dist("Runes 1", 1).unwrap();
        assert!(close(dist.outcomes[0].1, 0.75));
        assert!(close(dist.outcomes[1].1, 0.25));
        assert!(close(dist.no_drop, 0.0));
        assert!(close(dist.total(), 1.0));
    }

    #[test]
    fn test_outcome_dist_single_player_nodrop() {
        // raw 1 against listed sum 3: ratio 1/4, adjusted weight
        // (1/4)/(3/4)*3 = 1, so no-drop keeps a quarter of the mass
        let tcs = table(vec![row("Runes 1", 1, Some(1), &[("r01", 3)])]);
        let resolver = Resolver::new(&tcs);

        let dist = resolver.outcome_dist("Runes 1", 1).unwrap();
        assert!(close(dist.outcomes[0].1, 0.75));
        assert!(close(dist.no_drop, 0.25));
        assert!(close(dist.total(), 1.0));
    }

    #[test]
    fn test_nodrop_never_grows_with_players() {
        let tcs = table(vec![row("Loot", 1, Some(60), &[("r01", 40)])]);
        let resolver = Resolver::new(&tcs);

        let chances: Vec<f64> = (1..=8)
            .map(|players| resolver.outcome_dist("Loot", players).unwrap().no_drop)
            .collect();
        for pair in chances.windows(2) {
            assert!(pair[1] <= pair[0] + 1e-12, "no-drop grew: {:?}", chances);
        }
        // The exponent steps every second player, so 1/2, 3/4, .. pair up
        assert!(close(chances[0], chances[1]));
        assert!(close(chances[2], chances[3]));
        assert!(chances[2] < chances[0]);
    }

    #[test]
    fn test_outcome_dist_ignores_zero_weights() {
        let tcs = table(vec![row("Junk", 1, None, &[("misc", 0), ("hp1", 8)])]);
        let resolver = Resolver::new(&tcs);

        let dist = resolver.outcome_dist("Junk", 1).unwrap();
        assert_eq!(dist.outcomes.len(), 1);
        assert_eq!(dist.outcomes[0].0, "hp1");
        assert!(close(dist.outcomes[0].1, 1.0));
    }

    #[test]
    fn test_outcome_dist_empty_row() {
        let tcs = table(vec![row("Empty", 1, None, &[])]);
        let resolver = Resolver::new(&tcs);

        let dist = resolver.outcome_dist("Empty", 1).unwrap();
        assert!(dist.outcomes.is_empty());
        assert!(close(dist.no_drop, 0.0));
    }

    #[test]
    fn test_outcome_dist_saturated_nodrop() {
        let tcs = table(vec![row("Nothing", 1, Some(5), &[])]);
        let resolver = Resolver::new(&tcs);

        let err = resolver.outcome_dist("Nothing", 1).unwrap_err();
        assert!(matches!(err, Error::NoDropSaturated { .. }));
    }

    #[test]
    fn test_outcome_dist_huge_weights_do_not_overflow() {
        // Row-wide weight sums larger than any single u32 cell
        let tcs = table(vec![row(
            "Huge",
            1,
            Some(u32::MAX),
            &[("r01", u32::MAX), ("r02", u32::MAX)],
        )]);
        let resolver = Resolver::new(&tcs);

        let dist = resolver.outcome_dist("Huge", 1).unwrap();
        assert!(close(dist.no_drop, 1.0 / 3.0));
        assert!(close(dist.total(), 1.0));
    }

    #[test]
    fn test_outcome_dist_unknown_tc() {
        let tcs = table(vec![]);
        let resolver = Resolver::new(&tcs);

        let err = resolver.outcome_dist("Mephisto (H)", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownTreasureClass(_)));
    }

    #[test]
    fn test_leaf_dist_terminal_and_empty_nodes() {
        let tcs = table(vec![]);
        let mut resolver = Resolver::new(&tcs);

        let terminal = resolver.leaf_dist("r33", 1).unwrap();
        assert_eq!(terminal.len(), 1);
        assert!(close(terminal["r33"], 1.0));

        assert!(resolver.leaf_dist("", 1).unwrap().is_empty());
    }

    #[test]
    fn test_leaf_dist_flattens_and_conserves_mass() {
        let tcs = table(vec![
            row("Top", 1, None, &[("Mid", 2), ("r01", 2)]),
            row("Mid", 1, Some(1), &[("r02", 3)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        let dist = resolver.leaf_dist("Top", 1).unwrap();
        assert!(close(dist["r01"], 0.5));
        assert!(close(dist["r02"], 0.5 * 0.75));

        // Mass reaching leaves plus mass lost to Mid's no-drop is one roll
        let reached: f64 = dist.values().sum();
        assert!(close(reached, 1.0 - 0.5 * 0.25));
    }

    #[test]
    fn test_leaf_dist_repeat_calls_agree() {
        let tcs = table(vec![
            row("Top", 1, None, &[("Mid", 1)]),
            row("Mid", 1, Some(1), &[("r02", 3)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        let first = resolver.leaf_dist("Top", 3).unwrap();
        let second = resolver.leaf_dist("Top", 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_leaf_dist_players_change_result() {
        let tcs = table(vec![row("Loot", 1, Some(60), &[("r01", 40)])]);
        let mut resolver = Resolver::new(&tcs);

        let solo = resolver.leaf_dist("Loot", 1).unwrap();
        let full = resolver.leaf_dist("Loot", 8).unwrap();
        assert!(full["r01"] > solo["r01"]);
    }

    #[test]
    fn test_leaf_dist_cycle_detected() {
        let tcs = table(vec![
            row("A", 1, None, &[("B", 1)]),
            row("B", 1, None, &[("A", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        let err = resolver.leaf_dist("A", 1).unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { .. }));
    }

    #[test]
    fn test_pick_plan_for_row() {
        let gold = row("Boss", 7, None, &[("gld", 21), ("Sub", 15)]);
        assert_eq!(PickPlan::for_row(&gold), PickPlan::Independent(6));

        let gold_mul = row("Boss", 1, None, &[("gld,mul=1280", 4)]);
        assert_eq!(PickPlan::for_row(&gold_mul), PickPlan::Independent(0));

        let plain = row("Runes", 3, None, &[("r01", 1)]);
        assert_eq!(PickPlan::for_row(&plain), PickPlan::Independent(3));

        let gold_later = row("Odd", 2, None, &[("r01", 1), ("gld", 1)]);
        assert_eq!(PickPlan::for_row(&gold_later), PickPlan::Independent(2));

        let zero = row("None", 0, None, &[("gld", 1)]);
        assert_eq!(PickPlan::for_row(&zero), PickPlan::Independent(0));

        let sequence = row("Countess", -2, None, &[("Runes", 3)]);
        assert_eq!(PickPlan::for_row(&sequence), PickPlan::Sequence(2));
    }

    #[test]
    fn test_one_pick_applies_inner_picks() {
        let tcs = table(vec![
            row("Root", 1, None, &[("Sub", 1)]),
            row("Sub", 3, None, &[("r01", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        let counts = resolver.one_pick_counts("Root", 1).unwrap();
        assert!(close(counts["r01"], 3.0));
    }

    #[test]
    fn test_expected_counts_independent_picks() {
        let tcs = table(vec![row("Root", 2, None, &[("r01", 1), ("r02", 1)])]);
        let mut resolver = Resolver::new(&tcs);

        let counts = resolver.expected_counts("Root", 1).unwrap();
        assert!(close(counts["r01"], 1.0));
        assert!(close(counts["r02"], 1.0));
    }

    #[test]
    fn test_expected_counts_gold_pick_reserved() {
        let tcs = table(vec![
            row("Boss", 7, None, &[("gld", 21), ("Sub", 15)]),
            row("Sub", 1, None, &[("r01", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        // One of the seven picks is the deterministic gold drop, leaving
        // six independent rolls over the full distribution
        let counts = resolver.expected_counts("Boss", 1).unwrap();
        assert!(close(counts["r01"], 6.0 * 15.0 / 36.0));
        assert!(close(counts["gld"], 6.0 * 21.0 / 36.0));
    }

    #[test]
    fn test_expected_counts_sequence() {
        let tcs = table(vec![
            row("Countess", -3, None, &[("RuneA", 2), ("RuneB", 2)]),
            row("RuneA", 1, None, &[("r01", 1)]),
            row("RuneB", 1, None, &[("r02", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        // Sequence expands to [RuneA, RuneA, RuneB] after truncation
        let counts = resolver.expected_counts("Countess", 1).unwrap();
        assert!(close(counts["r01"], 2.0));
        assert!(close(counts["r02"], 1.0));
    }

    #[test]
    fn test_expected_counts_sequence_shorter_than_picks() {
        let tcs = table(vec![
            row("Countess", -5, None, &[("RuneA", 1), ("RuneB", 1)]),
            row("RuneA", 1, None, &[("r01", 1)]),
            row("RuneB", 1, None, &[("r02", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        // Only two sequence entries exist; picks beyond them roll nothing
        let counts = resolver.expected_counts("Countess", 1).unwrap();
        assert!(close(counts["r01"], 1.0));
        assert!(close(counts["r02"], 1.0));
        assert!(close(counts.values().sum::<f64>(), 2.0));
    }

    #[test]
    fn test_expected_counts_sequence_inner_picks() {
        let tcs = table(vec![
            row("Root", -1, None, &[("Sub", 1)]),
            row("Sub", 2, None, &[("r01", 1)]),
        ]);
        let mut resolver = Resolver::new(&tcs);

        let counts = resolver.expected_counts("Root", 1).unwrap();
        assert!(close(counts["r01"], 2.0));
    }

    #[test]
    fn test_expected_counts_unknown_root() {
        let tcs = table(vec![]);
        let mut resolver = Resolver::new(&tcs);

        let err = resolver.expected_counts("Baal (H)", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownTreasureClass(_)));
    }

    #[test]
    fn test_players_clamped() {
        let tcs = table(vec![row("Loot", 1, Some(60), &[("r01", 40)])]);
        let resolver = Resolver::new(&tcs);

        let low = resolver.outcome_dist("Loot", 0).unwrap();
        let one = resolver.outcome_dist("Loot", 1).unwrap();
        assert!(close(low.no_drop, one.no_drop));

        let high = resolver.outcome_dist("Loot", 200).unwrap();
        let eight = resolver.outcome_dist("Loot", 8).unwrap();
        assert!(close(high.no_drop, eight.no_drop));
    }

    #[test]
    fn test_adjusted_nodrop_values() {
        let loot = row("Loot", 1, Some(60), &[("r01", 40)]);
        // e(1) = 1, e(3) = 2, e(7) = 4
        assert_eq!(adjusted_nodrop(&loot, 60, 40, 1).unwrap(), 60);
        assert_eq!(adjusted_nodrop(&loot, 60, 40, 3).unwrap(), 22);
        assert_eq!(adjusted_nodrop(&loot, 60, 40, 7).unwrap(), 6);
        assert_eq!(adjusted_nodrop(&loot, 0, 40, 1).unwrap(), 0);
    }
}
