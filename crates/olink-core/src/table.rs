//! Core types for representing Olink count tables

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column names of a counts file, in the fixed on-disk order
pub const COUNT_COLUMNS: [&str; 4] = ["sample_index", "forward_barcode", "reverse_barcode", "count"];

/// Field delimiter of counts files
pub const COUNT_DELIMITER: u8 = b';';

/// Composite key identifying one pool member
///
/// The three components are opaque strings. They are never parsed as
/// numbers, so sample indices and barcodes keep their exact formatting
/// (leading zeros included). The derived `Ord` gives the lexicographic
/// tuple order used for output rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountKey {
    pub sample_index: String,
    pub forward_barcode: String,
    pub reverse_barcode: String,
}

impl CountKey {
    /// Create a new key
    pub fn new(
        sample_index: impl Into<String>,
        forward_barcode: impl Into<String>,
        reverse_barcode: impl Into<String>,
    ) -> Self {
        Self {
            sample_index: sample_index.into(),
            forward_barcode: forward_barcode.into(),
            reverse_barcode: reverse_barcode.into(),
        }
    }
}

impl std::fmt::Display for CountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{};{};{}",
            self.sample_index, self.forward_barcode, self.reverse_barcode
        )
    }
}

/// A parsed table from a single counts file
///
/// Counts are keyed by the composite key; the BTreeMap keeps them sorted,
/// so iteration order is already the output order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountTable {
    /// Per-key counts, sorted by key
    pub counts: BTreeMap<CountKey, u64>,
    /// Source file path
    pub source_path: PathBuf,
}

impl CountTable {
    /// Create a new empty table
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            counts: BTreeMap::new(),
            source_path,
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.counts.len()
    }

    /// Look up the count for a key
    pub fn get(&self, key: &CountKey) -> Option<u64> {
        self.counts.get(key).copied()
    }
}

/// The combined table produced by summing per-lane counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedCounts {
    /// Summed per-key counts, sorted by key
    pub counts: BTreeMap<CountKey, u64>,
    /// Files that contributed to this table, in combine order
    pub sources: Vec<PathBuf>,
}

impl CombinedCounts {
    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.counts.len()
    }

    /// Look up the combined count for a key
    pub fn get(&self, key: &CountKey) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Write the table in the counts file format (`;`-delimited, header row,
    /// rows ascending by key)
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(COUNT_DELIMITER)
            .from_writer(writer);

        csv_writer.write_record(COUNT_COLUMNS)?;
        for (key, count) in &self.counts {
            csv_writer.write_record([
                key.sample_index.as_str(),
                key.forward_barcode.as_str(),
                key.reverse_barcode.as_str(),
                count.to_string().as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the table to a file, replacing any previous contents
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write(BufWriter::new(file))
    }
}
