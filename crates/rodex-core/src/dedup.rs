//! Duplicate resolution across the extracted record set.
//!
//! One repair order can be referenced by several documents; only the most
//! recently modified one is kept. Grouping is an exact string match on the
//! identifier, which means documents that resolved to the fallback
//! identifier coalesce into a single group. That is a known property of the
//! sentinel design and is preserved.

use crate::record::RepairRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Result of deduplicating a record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    /// One record per identifier, in first-occurrence order of the
    /// identifier (not sorted, not original record order).
    pub retained: Vec<RepairRecord>,
    /// Identifiers that appeared more than once, in first-occurrence
    /// order, each listed once.
    pub duplicates: Vec<String>,
}

/// Collapse duplicate identifiers, keeping the most recently modified
/// record per identifier.
///
/// Replacement happens only on a strictly greater modification date:
/// equal dates keep the first-encountered record, and a record with no
/// date never displaces one that has a date (`None` orders below every
/// real date).
#[must_use]
pub fn dedupe(records: Vec<RepairRecord>) -> DedupOutcome {
    let mut retained: Vec<RepairRecord> = Vec::new();
    // identifier -> (slot in retained, occurrences seen so far)
    let mut index: HashMap<String, (usize, usize)> = HashMap::new();
    let mut duplicates: Vec<String> = Vec::new();

    for record in records {
        match index.entry(record.repair_order.clone()) {
            Entry::Occupied(mut entry) => {
                let (slot, count) = entry.get_mut();
                let slot = *slot;
                *count += 1;
                if *count == 2 {
                    duplicates.push(record.repair_order.clone());
                }
                if record.modified > retained[slot].modified {
                    retained[slot] = record;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert((retained.len(), 1));
                retained.push(record);
            }
        }
    }

    DedupOutcome {
        retained,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, date: Option<(i32, u32, u32)>, reason: &str) -> RepairRecord {
        RepairRecord {
            repair_order: id.to_string(),
            modified: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            reason: reason.to_string(),
            aircraft: "NA ".to_string(),
        }
    }

    #[test]
    fn test_no_duplicates() {
        let outcome = dedupe(vec![
            record("Z1", Some((2024, 1, 1)), "a "),
            record("Z2", Some((2024, 1, 2)), "b "),
        ]);
        assert_eq!(outcome.retained.len(), 2);
        assert!(outcome.duplicates.is_empty());
    }

    #[test]
    fn test_latest_date_wins() {
        let outcome = dedupe(vec![
            record("Z12345678", Some((2024, 1, 1)), "old "),
            record("Z12345678", Some((2024, 2, 1)), "new "),
        ]);
        assert_eq!(outcome.retained.len(), 1);
        assert_eq!(
            outcome.retained[0].modified,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(outcome.retained[0].reason, "new ");
        assert_eq!(outcome.duplicates, vec!["Z12345678".to_string()]);
    }

    #[test]
    fn test_earlier_record_kept_when_later_is_older() {
        let outcome = dedupe(vec![
            record("Z1", Some((2024, 2, 1)), "newer "),
            record("Z1", Some((2024, 1, 1)), "older "),
        ]);
        assert_eq!(outcome.retained[0].reason, "newer ");
    }

    #[test]
    fn test_equal_dates_keep_first_encountered() {
        let outcome = dedupe(vec![
            record("Z1", Some((2024, 1, 1)), "first "),
            record("Z1", Some((2024, 1, 1)), "second "),
        ]);
        assert_eq!(outcome.retained[0].reason, "first ");
    }

    #[test]
    fn test_missing_date_never_wins() {
        let outcome = dedupe(vec![
            record("Z1", Some((2020, 1, 1)), "dated "),
            record("Z1", None, "undated "),
        ]);
        assert_eq!(outcome.retained[0].reason, "dated ");

        // In the other direction a dated record does displace an undated one.
        let outcome = dedupe(vec![
            record("Z1", None, "undated "),
            record("Z1", Some((2020, 1, 1)), "dated "),
        ]);
        assert_eq!(outcome.retained[0].reason, "dated ");
    }

    #[test]
    fn test_sentinel_identifiers_coalesce() {
        // Documents with no identifier marker all contribute "NA" and are
        // duplicates of one another.
        let outcome = dedupe(vec![
            record("NA", Some((2024, 1, 1)), "a "),
            record("NA", Some((2024, 1, 2)), "b "),
            record("NA", Some((2024, 1, 3)), "c "),
        ]);
        assert_eq!(outcome.retained.len(), 1);
        assert_eq!(outcome.retained[0].reason, "c ");
        assert_eq!(outcome.duplicates, vec!["NA".to_string()]);
    }

    #[test]
    fn test_retained_order_is_first_occurrence_order() {
        let outcome = dedupe(vec![
            record("Z2", Some((2024, 1, 1)), "a "),
            record("Z1", Some((2024, 1, 1)), "b "),
            record("Z2", Some((2024, 3, 1)), "c "),
            record("Z3", Some((2024, 1, 1)), "d "),
        ]);
        let ids: Vec<&str> = outcome
            .retained
            .iter()
            .map(|r| r.repair_order.as_str())
            .collect();
        assert_eq!(ids, vec!["Z2", "Z1", "Z3"]);
    }

    #[test]
    fn test_duplicate_listed_once_in_first_occurrence_order() {
        let outcome = dedupe(vec![
            record("Z5", None, "a "),
            record("Z4", None, "b "),
            record("Z5", None, "c "),
            record("Z4", None, "d "),
            record("Z5", None, "e "),
        ]);
        assert_eq!(
            outcome.duplicates,
            vec!["Z5".to_string(), "Z4".to_string()]
        );
    }

    #[test]
    fn test_retained_date_is_maximum_of_group() {
        let records = vec![
            record("Z1", Some((2024, 1, 5)), "a "),
            record("Z1", Some((2024, 3, 5)), "b "),
            record("Z1", Some((2024, 2, 5)), "c "),
        ];
        let dates: Vec<_> = records.iter().map(|r| r.modified).collect();
        let outcome = dedupe(records);
        let kept = outcome.retained[0].modified;
        assert!(dates.iter().all(|d| kept >= *d));
    }

    #[test]
    fn test_empty_input() {
        let outcome = dedupe(Vec::new());
        assert!(outcome.retained.is_empty());
        assert!(outcome.duplicates.is_empty());
    }
}
