//! DOCX document reader.
//!
//! DOCX files are ZIP archives containing XML files:
//! - `word/document.xml`: the document body (paragraphs, runs, text)
//! - `docProps/core.xml`: metadata (author, created date, modified date)
//!
//! Only paragraph text and the modification date are extracted; formatting,
//! tables, images, and the rest of WordprocessingML are irrelevant to the
//! marker scan and are skipped.

use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use rodex_core::{Result, RodexError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// One parsed document: paragraph texts in document order plus the
/// last-modification date from the core properties.
#[derive(Debug, Clone)]
pub struct DocxDocument {
    /// Paragraph texts, one entry per `w:p` element, in document order.
    pub paragraphs: Vec<String>,
    /// `dcterms:modified` reduced to its calendar date; `None` when the
    /// metadata part is absent or the value does not parse.
    pub modified: Option<NaiveDate>,
}

impl DocxDocument {
    /// Open and parse a `.docx` file.
    ///
    /// Fails with [`RodexError::DocumentError`] when the file is not a
    /// readable ZIP container or `word/document.xml` is missing or
    /// malformed. Missing or unparseable metadata is not an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(RodexError::IoError)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| RodexError::DocumentError(format!("Failed to open DOCX as ZIP: {e}")))?;

        let paragraphs = Self::parse_document_xml(&mut archive)?;
        let modified = Self::extract_modified(&mut archive);

        log::debug!(
            "parsed {} paragraphs from {} (modified: {modified:?})",
            paragraphs.len(),
            path.display()
        );

        Ok(Self {
            paragraphs,
            modified,
        })
    }

    /// Parse `word/document.xml` and collect per-paragraph text.
    ///
    /// Text is the concatenation of `w:t` runs within each `w:p`; tab
    /// elements contribute a literal tab. Nothing is trimmed — Word marks
    /// significant whitespace with `xml:space="preserve"`, and the
    /// extraction offsets depend on seeing the text exactly as written.
    fn parse_document_xml(archive: &mut ZipArchive<File>) -> Result<Vec<String>> {
        let xml_content = {
            let mut document_xml = archive.by_name("word/document.xml").map_err(|e| {
                RodexError::DocumentError(format!("Missing word/document.xml: {e}"))
            })?;

            let mut content = String::new();
            document_xml
                .read_to_string(&mut content)
                .map_err(RodexError::IoError)?;
            content
        }; // document_xml dropped here, releasing the archive borrow

        let mut reader = Reader::from_str(&xml_content);
        reader.trim_text(false);

        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"w:p" => current = Some(String::new()),
                    b"w:t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => {
                    if e.name().as_ref() == b"w:tab" {
                        if let Some(p) = current.as_mut() {
                            p.push('\t');
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_text {
                        if let (Some(p), Ok(text)) = (current.as_mut(), e.unescape()) {
                            p.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:p" => {
                        if let Some(p) = current.take() {
                            paragraphs.push(p);
                        }
                    }
                    b"w:t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(RodexError::DocumentError(format!(
                        "Error parsing word/document.xml: {e}"
                    )))
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    /// Extract the modification date from `docProps/core.xml`.
    ///
    /// Example XML:
    /// ```xml
    /// <dcterms:modified xsi:type="dcterms:W3CDTF">2024-01-20T14:45:00Z</dcterms:modified>
    /// ```
    fn extract_modified(archive: &mut ZipArchive<File>) -> Option<NaiveDate> {
        let xml_content = Self::read_core_xml(archive)?;

        let mut reader = Reader::from_str(&xml_content);
        reader.trim_text(true);

        let mut in_modified = false;
        let mut modified = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if e.name().as_ref() == b"dcterms:modified" {
                        in_modified = true;
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_modified {
                        if let Ok(text) = e.unescape() {
                            modified = Self::parse_datetime(text.trim());
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    if e.name().as_ref() == b"dcterms:modified" {
                        in_modified = false;
                    }
                }
                Ok(Event::Eof) | Err(_) => break, // Eof or parse error
                _ => {}
            }
        }

        modified
    }

    /// Parse a W3CDTF (ISO 8601) timestamp down to its calendar date.
    ///
    /// Office documents write timestamps like `2024-01-15T10:30:00Z`.
    #[inline]
    fn parse_datetime(s: &str) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    }

    /// Read `docProps/core.xml` from the ZIP archive.
    fn read_core_xml(archive: &mut ZipArchive<File>) -> Option<String> {
        let Ok(mut core_xml) = archive.by_name("docProps/core.xml") else {
            return None;
        };

        let mut content = String::new();
        core_xml.read_to_string(&mut content).ok()?;
        Some(content)
    }
}
