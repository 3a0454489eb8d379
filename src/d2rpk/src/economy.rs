//! Economy bucket classification
//!
//! Expected item counts collapse into the handful of buckets the price
//! table understands: one bucket per rune, a combined uber key bucket, and
//! four gem currency buckets split by amethyst or not. Everything else has
//! no stable trade value and is dropped.

use crate::item_names::ItemNames;
use std::collections::HashMap;

/// Bucket holding the three uber keys
pub const UBER_KEY_BUCKET: &str = "UKEY";

const UBER_KEYS: [&str; 3] = ["Key Of Terror", "Key Of Hate", "Key Of Destruction"];

/// Economy bucket for a display name, or `None` when the item is not
/// economy-tracked. Rules apply in order; the first match wins.
pub fn bucket_for(name: &str) -> Option<String> {
    if let Some(rune) = name.strip_suffix(" Rune") {
        return Some(rune.to_uppercase());
    }
    if UBER_KEYS.contains(&name) {
        return Some(UBER_KEY_BUCKET.to_string());
    }
    if let Some(kind) = name.strip_prefix("Perfect ") {
        return Some(if kind.contains("Amethyst") { "PA" } else { "PG" }.to_string());
    }
    if let Some(kind) = name.strip_prefix("Flawless ") {
        return Some(if kind.contains("Amethyst") { "FA" } else { "FG" }.to_string());
    }
    None
}

/// Fold expected item counts into bucket counts. Codes without a display
/// name are not part of the tracked economy and contribute nothing.
pub fn bucketize(counts: &HashMap<String, f64>, names: &ItemNames) -> HashMap<String, f64> {
    let mut buckets = HashMap::new();
    for (code, count) in counts {
        let Some(name) = names.get(code) else {
            continue;
        };
        if let Some(bucket) = bucket_for(name) {
            *buckets.entry(bucket).or_default() += count;
        }
    }
    buckets
}
