//! Batch size bounds shared by the CSV and JSON paths

use crate::error::{Error, Result};

/// Smallest accepted batch
pub const MIN_BATCH_ROWS: usize = 1;

/// Largest accepted batch
pub const MAX_BATCH_ROWS: usize = 1000;

/// Check that a batch holds between 1 and 1000 rows
pub fn validate_batch_size(count: usize) -> Result<()> {
    if (MIN_BATCH_ROWS..=MAX_BATCH_ROWS).contains(&count) {
        Ok(())
    } else {
        Err(Error::BatchSize { count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_batch_size_bounds() {
        assert!(validate_batch_size(1).is_ok());
        assert!(validate_batch_size(500).is_ok());
        assert!(validate_batch_size(1000).is_ok());
    }

    #[test]
    fn test_validate_batch_size_empty() {
        let err = validate_batch_size(0).unwrap_err();
        assert!(matches!(err, Error::BatchSize { count: 0 }));
        assert!(err.to_string().contains("between 1 and 1000"));
    }

    #[test]
    fn test_validate_batch_size_too_large() {
        let err = validate_batch_size(1001).unwrap_err();
        assert!(matches!(err, Error::BatchSize { count: 1001 }));
    }
}
