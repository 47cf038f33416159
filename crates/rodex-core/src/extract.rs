//! Marker-based field extraction.
//!
//! Each field is located by a fixed marker string inside a paragraph; the
//! value is the text between a fixed character offset from the marker start
//! and a per-field terminator. The offsets come from the document template
//! and are the compatibility contract of this tool: they must match what
//! the template actually lays out, character for character.

use crate::record::{RepairRecord, MISSING_FIELD, MISSING_REPAIR_ORDER};
use chrono::NaiveDate;

/// Which record field a rule feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RepairOrder,
    Reason,
    Aircraft,
}

/// Where a field's value ends within the paragraph.
#[derive(Debug, Clone, Copy)]
enum Terminator {
    /// Value runs to the end of the paragraph.
    LineEnd,
    /// Value ends `back` characters before the first occurrence of
    /// `marker`. A paragraph missing the terminator marker discards the
    /// match instead of slicing garbage.
    Before { marker: &'static str, back: usize },
}

/// One extraction rule: where a value starts and ends relative to its
/// marker. `value_offset` is counted in characters from the marker start.
#[derive(Debug, Clone, Copy)]
struct FieldRule {
    field: Field,
    marker: &'static str,
    value_offset: usize,
    terminator: Terminator,
}

/// The template's rule table. Offsets 14, 20, and 13 (and the back-off of
/// 2 before "Received date") are fixed by the document template.
const RULES: [FieldRule; 3] = [
    FieldRule {
        field: Field::RepairOrder,
        marker: "Repair order:",
        value_offset: 14,
        terminator: Terminator::LineEnd,
    },
    FieldRule {
        field: Field::Reason,
        marker: "Reasons for return",
        value_offset: 20,
        terminator: Terminator::LineEnd,
    },
    FieldRule {
        field: Field::Aircraft,
        marker: "MSN Aircraft:",
        value_offset: 13,
        terminator: Terminator::Before {
            marker: "Received date",
            back: 2,
        },
    },
];

impl FieldRule {
    /// Apply this rule to one paragraph.
    ///
    /// Returns `None` when the marker is absent, or when the terminator
    /// marker is required but missing. A matched-but-empty value is still a
    /// match: decoration applies to the empty string.
    fn apply(&self, paragraph: &str) -> Option<String> {
        let marker_byte = paragraph.find(self.marker)?;
        let marker_char = paragraph[..marker_byte].chars().count();
        let start = marker_char + self.value_offset;

        let end = match self.terminator {
            Terminator::LineEnd => paragraph.chars().count(),
            Terminator::Before { marker, back } => {
                let Some(terminator_byte) = paragraph.find(marker) else {
                    log::warn!(
                        "paragraph contains {:?} but no {marker:?} terminator, discarding match",
                        self.marker
                    );
                    return None;
                };
                let terminator_char = paragraph[..terminator_byte].chars().count();
                terminator_char.saturating_sub(back)
            }
        };

        Some(self.decorate(char_slice(paragraph, start, end).trim()))
    }

    /// Per-field decoration: identifiers get the `Z` prefix, the other
    /// fields a trailing space. Both apply even to empty values.
    fn decorate(&self, stripped: &str) -> String {
        match self.field {
            Field::RepairOrder => format!("Z{stripped}"),
            Field::Reason | Field::Aircraft => format!("{stripped} "),
        }
    }
}

/// Character-indexed slice, clamped to the string's character range.
///
/// The rule offsets are character counts, so slicing must not assume
/// single-byte characters; a paragraph shorter than the offset yields the
/// empty string rather than a panic.
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let Some((byte_start, _)) = s.char_indices().nth(start) else {
        return "";
    };
    let byte_end = s.char_indices().nth(end).map_or(s.len(), |(b, _)| b);
    &s[byte_start..byte_end]
}

/// Accumulates marker matches for one document.
///
/// Sentinels are resolved exactly once in [`Extraction::finish`], so a
/// document always produces a complete record; no per-field accumulator can
/// desynchronize from the others.
#[derive(Debug, Default)]
struct Extraction {
    repair_order: Option<String>,
    reason: Option<String>,
    aircraft: Option<String>,
}

impl Extraction {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::RepairOrder => &mut self.repair_order,
            Field::Reason => &mut self.reason,
            Field::Aircraft => &mut self.aircraft,
        };
        if let Some(previous) = slot.replace(value) {
            // Last match wins; earlier matches are dropped silently apart
            // from this diagnostic.
            log::debug!("{field:?} marker matched again, overwriting {previous:?}");
        }
    }

    fn finish(self, modified: Option<NaiveDate>) -> RepairRecord {
        RepairRecord {
            repair_order: self
                .repair_order
                .unwrap_or_else(|| MISSING_REPAIR_ORDER.to_string()),
            modified,
            reason: self.reason.unwrap_or_else(|| MISSING_FIELD.to_string()),
            aircraft: self.aircraft.unwrap_or_else(|| MISSING_FIELD.to_string()),
        }
    }
}

/// Extract one record from a document's paragraphs and metadata date.
///
/// Every paragraph is tested against every rule independently; a paragraph
/// may match zero, one, or several rules, and the last matching paragraph
/// in scan order wins for its field. Fields whose marker never matches
/// resolve to their fallback sentinel.
#[must_use]
pub fn extract_record(paragraphs: &[String], modified: Option<NaiveDate>) -> RepairRecord {
    let mut extraction = Extraction::default();
    for paragraph in paragraphs {
        for rule in &RULES {
            if let Some(value) = rule.apply(paragraph) {
                extraction.set(rule.field, value);
            }
        }
    }
    extraction.finish(modified)
}
