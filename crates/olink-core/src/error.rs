//! Error types for olink-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in olink-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV error while writing output
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// A counts file does not carry the expected header
    #[error("header mismatch in '{path}': expected '{expected}', found '{found}'")]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// The count column did not parse as a non-negative integer
    #[error("invalid count '{value}' on line {line} of '{path}'")]
    InvalidCount {
        path: PathBuf,
        line: usize,
        value: String,
    },

    /// The composite key appears more than once in one counts file
    #[error("duplicate key ({key}) in '{path}'")]
    DuplicateKey { path: PathBuf, key: String },

    /// A meta file is not valid JSON or lacks a required field
    #[error("failed to parse meta file '{path}': {source}")]
    MetaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A meta file parsed but violates a structural assumption
    #[error("malformed meta file '{path}': {message}")]
    MalformedMeta { path: PathBuf, message: String },

    /// Two counts files being combined disagree on their key set
    #[error(
        "{unmatched} count rows are not present in both '{first}' and '{other}' \
         (are the files from the same pool?)"
    )]
    KeySetMismatch {
        first: PathBuf,
        other: PathBuf,
        unmatched: usize,
    },

    /// Total reads is zero when recomputing percentReadsPf
    #[error("total reads is zero, cannot compute percentReadsPf")]
    ZeroReads,

    /// An output path already exists and overwrite was not forced
    #[error("the file '{0}' already exists (use --force to overwrite)")]
    OutputExists(PathBuf),

    /// No input files matched a required pattern
    #[error("no files matching '*{pattern}' found in '{folder}'")]
    NoInputFiles { pattern: String, folder: PathBuf },

    /// A combiner was handed an empty input sequence
    #[error("no {0} inputs to combine")]
    EmptyCombine(&'static str),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
