//! Error types for the extraction pipeline.

use thiserror::Error;

/// Error types that can occur while processing a batch.
///
/// Missing markers are never errors; they resolve to fallback sentinels in
/// the extractor. Errors here are the per-unit failures the batch policy
/// acts on: a document that cannot be read is skipped and reported, an
/// export that cannot be written is reported without invalidating the
/// in-memory table.
#[derive(Error, Debug)]
pub enum RodexError {
    /// File I/O error.
    ///
    /// Reading an input file or writing an output file failed at the
    /// filesystem level (not found, permission denied, disk full).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document cannot be parsed as a valid DOCX file.
    ///
    /// Covers corrupt ZIP containers, missing `word/document.xml`, and
    /// malformed XML. The batch skips the document and records the message.
    #[error("Document error: {0}")]
    DocumentError(String),

    /// An output file could not be produced.
    ///
    /// Typically the target file is open in another program. The other
    /// export still runs; the deduplicated table stays valid in memory.
    #[error("Export error: {0}")]
    ExportError(String),
}

/// Type alias for [`Result<T, RodexError>`].
pub type Result<T> = std::result::Result<T, RodexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_display() {
        let error = RodexError::DocumentError("Failed to open DOCX as ZIP".to_string());
        assert_eq!(
            format!("{error}"),
            "Document error: Failed to open DOCX as ZIP"
        );
    }

    #[test]
    fn test_export_error_display() {
        let error = RodexError::ExportError("target file is locked".to_string());
        assert_eq!(format!("{error}"), "Export error: target file is locked");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RodexError = io_err.into();

        match err {
            RodexError::IoError(e) => {
                assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(RodexError::DocumentError("unreadable".to_string()))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        match outer() {
            Err(RodexError::DocumentError(msg)) => assert_eq!(msg, "unreadable"),
            _ => panic!("Expected DocumentError to propagate"),
        }
    }
}
