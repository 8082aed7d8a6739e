//! olink-core: Core library for combining per-lane Olink sequencing outputs
//!
//! This library provides functionality to:
//! - Discover per-lane counts and meta files in a pool folder
//! - Parse `;`-delimited counts files into keyed tables
//! - Combine count tables with key-set validation and per-key summation
//! - Combine run-metadata documents, summing read tallies and recomputing
//!   the percent-passing-filter field

pub mod combiner;
pub mod error;
pub mod meta;
pub mod parser;
pub mod scanner;
pub mod table;

pub use combiner::combine_counts;
pub use error::{Error, Result};
pub use meta::{combine_meta, MetaDocument};
pub use parser::{parse_counts, parse_counts_str};
pub use scanner::{discover_inputs, DiscoveredInputs, COUNTS_SUFFIX, META_SUFFIX};
pub use table::{CombinedCounts, CountKey, CountTable};
