//! CSV parser for Olink counts files

use crate::error::{Error, Result};
use crate::table::{CountKey, CountTable, COUNT_COLUMNS, COUNT_DELIMITER};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a counts file into a CountTable
pub fn parse_counts<P: AsRef<Path>>(path: P) -> Result<CountTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_counts_reader(BufReader::new(file), path)
}

/// Parse counts from a string (useful for testing)
pub fn parse_counts_str(content: &str, source_name: &str) -> Result<CountTable> {
    parse_counts_reader(content.as_bytes(), Path::new(source_name))
}

fn parse_counts_reader<R: Read>(reader: R, path: &Path) -> Result<CountTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(COUNT_DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    // The header must match the four expected columns exactly, in order.
    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    let found: Vec<&str> = headers.iter().collect();
    if found != COUNT_COLUMNS {
        return Err(Error::HeaderMismatch {
            path: path.to_path_buf(),
            expected: COUNT_COLUMNS.join(";"),
            found: found.join(";"),
        });
    }

    let mut table = CountTable::new(path.to_path_buf());

    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Line 1 is the header row.
        let line = row_idx + 2;

        // Key columns stay opaque strings; only `count` is numeric.
        let key = CountKey::new(&record[0], &record[1], &record[2]);
        let count: u64 = record[3].trim().parse().map_err(|_| Error::InvalidCount {
            path: path.to_path_buf(),
            line,
            value: record[3].to_string(),
        })?;

        if table.counts.insert(key.clone(), count).is_some() {
            return Err(Error::DuplicateKey {
                path: path.to_path_buf(),
                key: key.to_string(),
            });
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_counts() {
        let csv = "sample_index;forward_barcode;reverse_barcode;count\n\
                   i3001;FB201772;RB201772;25460\n\
                   i3002;FB200009;RB200009;1028\n";
        let table = parse_counts_str(csv, "lane1.olink_counts.csv").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.get(&CountKey::new("i3001", "FB201772", "RB201772")),
            Some(25460)
        );
        assert_eq!(
            table.get(&CountKey::new("i3002", "FB200009", "RB200009")),
            Some(1028)
        );
    }

    #[test]
    fn test_parse_keys_stay_strings() {
        let csv = "sample_index;forward_barcode;reverse_barcode;count\n\
                   007;001;002;5\n";
        let table = parse_counts_str(csv, "test.csv").unwrap();

        assert_eq!(table.get(&CountKey::new("007", "001", "002")), Some(5));
    }

    #[test]
    fn test_parse_rejects_wrong_header() {
        let csv = "sample_index;fwd;rev;count\ni3001;FB1;RB1;10\n";
        let err = parse_counts_str(csv, "bad.csv").unwrap_err();

        assert!(matches!(err, Error::HeaderMismatch { .. }));
    }

    #[test]
    fn test_parse_rejects_reordered_header() {
        let csv = "count;sample_index;forward_barcode;reverse_barcode\n10;i3001;FB1;RB1\n";
        let err = parse_counts_str(csv, "bad.csv").unwrap_err();

        assert!(matches!(err, Error::HeaderMismatch { .. }));
    }

    #[test]
    fn test_parse_rejects_negative_count() {
        let csv = "sample_index;forward_barcode;reverse_barcode;count\ni3001;FB1;RB1;-5\n";
        let err = parse_counts_str(csv, "bad.csv").unwrap_err();

        match err {
            Error::InvalidCount { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "-5");
            }
            other => panic!("expected InvalidCount, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_integer_count() {
        let csv = "sample_index;forward_barcode;reverse_barcode;count\ni3001;FB1;RB1;lots\n";
        let err = parse_counts_str(csv, "bad.csv").unwrap_err();

        assert!(matches!(err, Error::InvalidCount { .. }));
    }

    #[test]
    fn test_parse_rejects_duplicate_key() {
        let csv = "sample_index;forward_barcode;reverse_barcode;count\n\
                   i3001;FB1;RB1;10\n\
                   i3001;FB1;RB1;20\n";
        let err = parse_counts_str(csv, "bad.csv").unwrap_err();

        match err {
            Error::DuplicateKey { key, .. } => assert_eq!(key, "i3001;FB1;RB1"),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_file_roundtrip() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lane1.olink_counts.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            "sample_index;forward_barcode;reverse_barcode;count\ni3001;FB1;RB1;42\n"
        )
        .unwrap();

        let table = parse_counts(&path).unwrap();
        assert_eq!(table.source_path, path);
        assert_eq!(table.get(&CountKey::new("i3001", "FB1", "RB1")), Some(42));
    }
}
