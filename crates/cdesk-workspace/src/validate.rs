//! # Validation Engine
//!
//! Pure, stateless predicates over one uploaded-file record and over the
//! whole batch. Nothing is cached: callers re-evaluate from current state
//! whenever they need the answer, so validity always reflects the latest
//! edits.

use serde::{Deserialize, Serialize};

use crate::record::UploadedFileRecord;

/// The three independent completeness conditions for one file, broken out
/// so a rendering layer can highlight the offending fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCompleteness {
    /// At least one association entry names a requirement slot.
    pub has_association: bool,
    /// The issue date is non-empty.
    pub has_issue_date: bool,
    /// The correctness attestation is checked.
    pub confirmed: bool,
}

impl FileCompleteness {
    /// Evaluate all three conditions for a record.
    pub fn check(record: &UploadedFileRecord) -> Self {
        Self {
            has_association: record.primary_association().is_some(),
            has_issue_date: !record.issue_date.is_empty(),
            confirmed: record.confirmed,
        }
    }

    /// Whether every condition holds. No partial credit.
    pub fn is_complete(&self) -> bool {
        self.has_association && self.has_issue_date && self.confirmed
    }
}

/// Whether a single record is complete enough to commit.
pub fn is_file_valid(record: &UploadedFileRecord) -> bool {
    FileCompleteness::check(record).is_complete()
}

/// Whether the whole batch can be committed.
///
/// An empty batch is vacuously valid; it simply has nothing to save.
pub fn is_batch_valid(files: &[UploadedFileRecord]) -> bool {
    files.iter().all(is_file_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn complete_record() -> UploadedFileRecord {
        let mut rec = UploadedFileRecord::new("scan.pdf", Some("COVID-19"));
        rec.issue_date = "2025-06-02".to_string();
        rec.confirmed = true;
        rec
    }

    #[test]
    fn test_complete_record_is_valid() {
        assert!(is_file_valid(&complete_record()));
    }

    #[test]
    fn test_missing_association_is_invalid() {
        let mut rec = complete_record();
        rec.associations = vec![String::new()];
        let c = FileCompleteness::check(&rec);
        assert!(!c.has_association);
        assert!(!is_file_valid(&rec));
    }

    #[test]
    fn test_missing_issue_date_is_invalid() {
        let mut rec = complete_record();
        rec.issue_date.clear();
        let c = FileCompleteness::check(&rec);
        assert!(!c.has_issue_date);
        assert!(!is_file_valid(&rec));
    }

    #[test]
    fn test_unconfirmed_is_invalid() {
        let mut rec = complete_record();
        rec.confirmed = false;
        assert!(!is_file_valid(&rec));
    }

    #[test]
    fn test_empty_batch_is_vacuously_valid() {
        assert!(is_batch_valid(&[]));
    }

    #[test]
    fn test_batch_fails_on_any_invalid_record() {
        let mut bad = complete_record();
        bad.confirmed = false;
        assert!(!is_batch_valid(&[complete_record(), bad]));
        assert!(is_batch_valid(&[complete_record(), complete_record()]));
    }

    proptest! {
        /// Validity is exactly the conjunction of the three conditions,
        /// regardless of where in the association list the slot name sits.
        #[test]
        fn prop_validity_is_conjunction(
            slot in proptest::option::of("[A-Za-z0-9 -]{1,20}"),
            leading_unset in 0usize..3,
            issue_date in proptest::option::of("[0-9]{4}-[0-9]{2}-[0-9]{2}"),
            confirmed in any::<bool>(),
        ) {
            let mut rec = UploadedFileRecord::new("scan.pdf", None);
            rec.associations = vec![String::new(); leading_unset.max(1)];
            if let Some(ref name) = slot {
                rec.associations.push(name.clone());
            }
            rec.issue_date = issue_date.clone().unwrap_or_default();
            rec.confirmed = confirmed;

            let expected = slot.is_some() && issue_date.is_some() && confirmed;
            prop_assert_eq!(is_file_valid(&rec), expected);
        }
    }
}
