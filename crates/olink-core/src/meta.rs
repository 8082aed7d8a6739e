//! Run-metadata documents and their combining
//!
//! A meta file is a JSON document of which only `libraries[0]` and
//! `runUnits[0]` carry fields we sum. Everything else (top-level fields,
//! extra fields inside those objects, further array elements) passes
//! through unchanged from the first input, so the document is kept as raw
//! JSON and only the summed fields are touched.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed and validated meta document
#[derive(Debug, Clone)]
pub struct MetaDocument {
    root: Value,
    /// Source file path
    pub source_path: PathBuf,
    reads: u64,
    reads_pf: u64,
    matched_counts: u64,
}

impl MetaDocument {
    /// Load a meta document from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse_str(&content, path)
    }

    /// Parse a meta document from a string (useful for testing)
    pub fn from_str(content: &str, source_name: &str) -> Result<Self> {
        Self::parse_str(content, Path::new(source_name))
    }

    fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(content).map_err(|e| Error::MetaParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reads = required_u64(&root, path, "/libraries/0/reads")?;
        let reads_pf = required_u64(&root, path, "/libraries/0/readsPf")?;
        let matched_counts = required_u64(&root, path, "/runUnits/0/matchedCounts")?;
        required_str(&root, path, "/runUnits/0/countsFileName")?;

        Ok(Self {
            root,
            source_path: path.to_path_buf(),
            reads,
            reads_pf,
            matched_counts,
        })
    }

    /// Total sequenced reads (`libraries[0].reads`)
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Reads passing the platform quality filter (`libraries[0].readsPf`)
    pub fn reads_pf(&self) -> u64 {
        self.reads_pf
    }

    /// Reads assigned to a known barcode pair (`runUnits[0].matchedCounts`)
    pub fn matched_counts(&self) -> u64 {
        self.matched_counts
    }

    /// The derived percent-passing-filter field, if present
    pub fn percent_reads_pf(&self) -> Option<f64> {
        self.root
            .pointer("/libraries/0/percentReadsPf")
            .and_then(Value::as_f64)
    }

    /// The counts file name recorded in `runUnits[0]`, if present
    pub fn counts_file_name(&self) -> Option<&str> {
        self.root
            .pointer("/runUnits/0/countsFileName")
            .and_then(Value::as_str)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the document to a file as pretty-printed JSON, replacing any
    /// previous contents
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    fn set(&mut self, pointer: &str, value: Value) {
        // The parent objects were validated at parse time, but the field
        // itself may be absent from the input (percentReadsPf is derived),
        // so insert into the parent rather than overwriting in place.
        let Some((parent, key)) = pointer.rsplit_once('/') else {
            return;
        };
        if let Some(Value::Object(object)) = self.root.pointer_mut(parent) {
            object.insert(key.to_string(), value);
        }
    }
}

fn required_u64(root: &Value, path: &Path, pointer: &str) -> Result<u64> {
    root.pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or_else(|| Error::MalformedMeta {
            path: path.to_path_buf(),
            message: format!("missing or non-integer field at '{pointer}'"),
        })
}

fn required_str<'a>(root: &'a Value, path: &Path, pointer: &str) -> Result<&'a str> {
    root.pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedMeta {
            path: path.to_path_buf(),
            message: format!("missing or non-string field at '{pointer}'"),
        })
}

/// Combine meta documents into a single document
///
/// The first document seeds the accumulator; each subsequent one adds its
/// `reads`, `readsPf` and `matchedCounts`. Afterwards `percentReadsPf` is
/// recomputed from the totals (zero total reads is an error) and
/// `countsFileName` is set to the supplied output filename, also for a
/// single input.
pub fn combine_meta(docs: Vec<MetaDocument>, counts_file_name: &str) -> Result<MetaDocument> {
    let mut docs = docs.into_iter();
    let mut combined = docs.next().ok_or(Error::EmptyCombine("meta"))?;

    for doc in docs {
        combined.reads += doc.reads;
        combined.reads_pf += doc.reads_pf;
        combined.matched_counts += doc.matched_counts;
    }

    if combined.reads == 0 {
        return Err(Error::ZeroReads);
    }
    let percent_reads_pf = combined.reads_pf as f64 / combined.reads as f64 * 100.0;

    combined.set("/libraries/0/reads", combined.reads.into());
    combined.set("/libraries/0/readsPf", combined.reads_pf.into());
    combined.set("/libraries/0/percentReadsPf", percent_reads_pf.into());
    combined.set("/runUnits/0/matchedCounts", combined.matched_counts.into());
    combined.set("/runUnits/0/countsFileName", counts_file_name.into());

    Ok(combined)
}
