//! CSV decoding for uploaded batches
//!
//! Uploads carry no header row. Decoding only turns bytes into records of
//! text fields; it never checks row widths, so ragged input decodes fine and
//! is rejected later by the ingestion pipeline.

mod csv;

use crate::error::{Error, Result};

/// One decoded CSV line, fields in file order
pub type Record = Vec<String>;

/// Decode raw upload bytes into records.
///
/// Fails with [`Error::Decode`] when the bytes are not UTF-8 or a quoted
/// field is never closed. Blank lines are skipped and a leading byte order
/// mark is ignored.
pub fn decode_csv(content: &[u8]) -> Result<Vec<Record>> {
    let text = std::str::from_utf8(content).map_err(|e| Error::Decode(e.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    csv::split_records(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid() {
        let records = decode_csv(b"1,Engineering\n2,Sales").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["1", "Engineering"]);
        assert_eq!(records[1], vec!["2", "Sales"]);
    }

    #[test]
    fn test_decode_single_row() {
        let records = decode_csv(b"1,Engineering").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_decode_invalid_encoding() {
        let err = decode_csv(b"\x80\x81\x82").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().starts_with("Error parsing CSV file"));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode_csv(b"").unwrap().is_empty());
        assert!(decode_csv(b"\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_strips_bom() {
        let records = decode_csv("\u{feff}1,HR\n".as_bytes()).unwrap();
        assert_eq!(records[0][0], "1");
    }

    #[test]
    fn test_decode_keeps_ragged_rows() {
        let records = decode_csv(b"1,Engineering,Extra\n2\n").unwrap();
        assert_eq!(records[0].len(), 3);
        assert_eq!(records[1].len(), 1);
    }
}
