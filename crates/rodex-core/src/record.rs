//! Record model for extracted repair-order data.

use chrono::NaiveDate;

/// Fallback identifier used when the repair-order marker never matched.
///
/// Found identifiers always carry the `Z` prefix, so this sentinel cannot
/// collide with a real extraction. It also carries no trailing space,
/// unlike the other field sentinels.
pub const MISSING_REPAIR_ORDER: &str = "NA";

/// Fallback for the reason and aircraft fields. The trailing space is part
/// of the output convention, matching decorated extracted values.
pub const MISSING_FIELD: &str = "NA ";

/// Rendering of an absent modification date in both exports.
pub const MISSING_DATE: &str = "N.A. ";

/// One extracted record per successfully parsed document.
///
/// A record is built atomically: a document contributes either a complete
/// record (with sentinels filling unmatched fields) or, on open/parse
/// failure, no record at all. There are no partially filled records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairRecord {
    /// Deduplication key: `Z`-prefixed extraction, or
    /// [`MISSING_REPAIR_ORDER`] when the marker was absent.
    pub repair_order: String,
    /// Last-modification date from document metadata; `None` when the
    /// metadata was absent or unparseable.
    pub modified: Option<NaiveDate>,
    /// Customer's reason for return, trailing space appended.
    pub reason: String,
    /// Aircraft serial number, trailing space appended.
    pub aircraft: String,
}

impl RepairRecord {
    /// Date column rendering shared by both exporters.
    #[must_use]
    pub fn modified_display(&self) -> String {
        match self.modified {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => MISSING_DATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_display_with_date() {
        let record = RepairRecord {
            repair_order: "Z12345678".to_string(),
            modified: NaiveDate::from_ymd_opt(2024, 2, 1),
            reason: "Cracked fairing ".to_string(),
            aircraft: "123 ".to_string(),
        };
        assert_eq!(record.modified_display(), "2024-02-01");
    }

    #[test]
    fn test_modified_display_without_date() {
        let record = RepairRecord {
            repair_order: MISSING_REPAIR_ORDER.to_string(),
            modified: None,
            reason: MISSING_FIELD.to_string(),
            aircraft: MISSING_FIELD.to_string(),
        };
        assert_eq!(record.modified_display(), "N.A. ");
    }

    #[test]
    fn test_sentinel_cannot_collide_with_found_identifier() {
        // Every found identifier is "Z"-prefixed; the fallback is not.
        assert!(!MISSING_REPAIR_ORDER.starts_with('Z'));
    }
}
