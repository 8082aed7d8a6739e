//! Combine engine for summing per-lane count tables
//!
//! All lanes of a pool must describe the same set of pool members, so the
//! first table fixes the reference key set and every later table is checked
//! against it before its counts are added. The check and the summation are
//! two separate steps so each can be reasoned about (and tested) on its own.

use crate::error::{Error, Result};
use crate::table::{CombinedCounts, CountKey, CountTable};

/// Combine count tables into a single summed table
///
/// The tables are folded in order: the first seeds the accumulator, each
/// subsequent one is key-set checked and then summed in. A single input
/// comes back unchanged (already sorted by key).
pub fn combine_counts(tables: Vec<CountTable>) -> Result<CombinedCounts> {
    let mut tables = tables.into_iter();
    let first = tables.next().ok_or(Error::EmptyCombine("counts"))?;

    let first_path = first.source_path.clone();
    let mut sources = vec![first.source_path];
    let mut combined = first.counts;

    for table in tables {
        let unmatched = count_unmatched(&combined, &table);
        if unmatched > 0 {
            return Err(Error::KeySetMismatch {
                first: first_path,
                other: table.source_path,
                unmatched,
            });
        }

        for (key, count) in table.counts {
            // The key-set check guarantees the entry exists.
            if let Some(total) = combined.get_mut(&key) {
                *total += count;
            }
        }
        sources.push(table.source_path);
    }

    Ok(CombinedCounts {
        counts: combined,
        sources,
    })
}

/// Count the rows present on only one side (the symmetric difference of the
/// two key sets)
fn count_unmatched(
    accumulated: &std::collections::BTreeMap<CountKey, u64>,
    table: &CountTable,
) -> usize {
    let only_in_other = table
        .counts
        .keys()
        .filter(|k| !accumulated.contains_key(*k))
        .count();
    let only_in_first = accumulated
        .keys()
        .filter(|k| !table.counts.contains_key(*k))
        .count();

    only_in_other + only_in_first
}
