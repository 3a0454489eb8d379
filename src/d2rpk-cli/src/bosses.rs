//! Boss roster and per-boss report assembly

use anyhow::{Context, Result};
use d2rpk::{bucketize, Difficulty, DropReport, ItemNames, PriceTable, Resolver, TcTable};

/// One boss entry: report identifier and base treasure class name
#[derive(Debug, Clone, Copy)]
pub struct Boss {
    /// Identifier used in report file names and the summary table
    pub id: &'static str,
    /// Treasure class name before the difficulty suffix
    pub tc: &'static str,
}

/// The Travincal council, also reported as a full pack under
/// [`COUNCIL_PACK_ID`]
pub const COUNCIL: Boss = Boss {
    id: "council",
    tc: "Council",
};

/// Bosses the generator reports on, one report per single kill
pub const BOSSES: &[Boss] = &[
    Boss {
        id: "andariel",
        tc: "Andariel",
    },
    Boss {
        id: "baal",
        tc: "Baal",
    },
    COUNCIL,
    Boss {
        id: "countess",
        tc: "Countess",
    },
    Boss {
        id: "diablo",
        tc: "Diablo",
    },
    Boss {
        id: "mephisto",
        tc: "Mephisto",
    },
    Boss {
        id: "nihl",
        tc: "Nihlathak",
    },
    Boss {
        id: "summoner",
        tc: "Summoner",
    },
];

/// Travincal spawns this many council members at once
pub const COUNCIL_PACK: f64 = 5.0;

/// Report id for clearing the whole council pack in one run
pub const COUNCIL_PACK_ID: &str = "council5";

/// Root treasure class for a base name at a difficulty
pub fn root_tc(base: &str, difficulty: Difficulty) -> String {
    format!("{}{}", base, difficulty.tc_suffix())
}

/// Build reports for every roster entry plus the full council pack
pub fn build_reports(
    tcs: &TcTable,
    names: &ItemNames,
    price: &PriceTable,
    difficulty: Difficulty,
    players: u8,
) -> Result<Vec<DropReport>> {
    let mut resolver = Resolver::new(tcs);
    let mut reports = Vec::with_capacity(BOSSES.len() + 1);

    for boss in BOSSES {
        let root = root_tc(boss.tc, difficulty);
        let counts = resolver
            .expected_counts(&root, players)
            .with_context(|| format!("Failed to resolve treasure class {:?}", root))?;
        reports.push(assemble(boss.id, &counts, names, price, difficulty, players));
    }

    let root = root_tc(COUNCIL.tc, difficulty);
    let mut counts = resolver
        .expected_counts(&root, players)
        .with_context(|| format!("Failed to resolve treasure class {:?}", root))?;
    for count in counts.values_mut() {
        *count *= COUNCIL_PACK;
    }
    reports.push(assemble(
        COUNCIL_PACK_ID,
        &counts,
        names,
        price,
        difficulty,
        players,
    ));

    Ok(reports)
}

fn assemble(
    id: &str,
    counts: &d2rpk::ExpectedCounts,
    names: &ItemNames,
    price: &PriceTable,
    difficulty: Difficulty,
    players: u8,
) -> DropReport {
    let drops = price.priced(&bucketize(counts, names));
    DropReport {
        boss: id.to_string(),
        difficulty,
        drops,
        players,
    }
}
