//! # Rodex Core - Repair-Order Extraction Library
//!
//! Core logic for batch-extracting repair-order records from document text:
//! marker-based field extraction, last-write-wins deduplication, and the two
//! export formats (pipe-delimited text and XLSX).
//!
//! Document parsing lives in the `rodex-backend` crate; this crate operates
//! on plain paragraph strings plus an optional modification date, so every
//! piece of it is testable without a real document.
//!
//! ## Pipeline
//!
//! ```rust
//! use rodex_core::{dedupe, extract_record};
//!
//! let paragraphs = vec!["Repair order: 12345678".to_string()];
//! let record = extract_record(&paragraphs, None);
//! assert_eq!(record.repair_order, "Z12345678");
//!
//! let outcome = dedupe(vec![record]);
//! assert_eq!(outcome.retained.len(), 1);
//! assert!(outcome.duplicates.is_empty());
//! ```

pub mod dedup;
pub mod error;
pub mod export;
pub mod extract;
pub mod record;

pub use dedup::{dedupe, DedupOutcome};
pub use error::{Result, RodexError};
pub use extract::extract_record;
pub use record::RepairRecord;
