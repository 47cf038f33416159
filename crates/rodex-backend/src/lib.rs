//! # Rodex Backend - DOCX Reading
//!
//! Reads the two pieces of a `.docx` file the extraction pipeline needs:
//! the paragraph texts from `word/document.xml` and the last-modification
//! date from `docProps/core.xml`.
//!
//! ```rust,ignore
//! use rodex_backend::DocxDocument;
//!
//! let doc = DocxDocument::open("CRE/report.docx")?;
//! for paragraph in &doc.paragraphs {
//!     println!("{paragraph}");
//! }
//! println!("modified: {:?}", doc.modified);
//! # Ok::<(), rodex_core::RodexError>(())
//! ```

mod docx;

pub use docx::DocxDocument;
