//! Document text extraction for uploaded resumes.
//!
//! Plain sequential text in document order — no OCR, no layout awareness.
//! Failure causes are kept distinct (unsupported format, corrupt file, empty
//! text) instead of being collapsed into one generic signal.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Upload ceiling enforced before any parsing happens.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text from file")]
    CorruptFile,

    #[error("Document contains no text")]
    EmptyText,
}

impl ExtractError {
    /// Machine-readable error code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ExtractError::CorruptFile => "CORRUPT_FILE",
            ExtractError::EmptyText => "EMPTY_TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Resolves the declared kind from the uploaded filename.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Txt),
            _ => Err(ExtractError::UnsupportedFormat(ext)),
        }
    }
}

/// Extracts raw text from an uploaded document.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|_| ExtractError::CorruptFile)?
        }
        DocumentKind::Docx => extract_docx_text(bytes)?,
        DocumentKind::Txt => {
            String::from_utf8(bytes.to_vec()).map_err(|_| ExtractError::CorruptFile)?
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyText);
    }
    Ok(text)
}

/// Reads `word/document.xml` out of the DOCX container and concatenates the
/// text runs, one line per paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|_| ExtractError::CorruptFile)?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::CorruptFile)?
        .read_to_string(&mut document_xml)
        .map_err(|_| ExtractError::CorruptFile)?;

    let mut reader = Reader::from_str(&document_xml);
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let chunk = t.unescape().map_err(|_| ExtractError::CorruptFile)?;
                text.push_str(&chunk);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Eof) => break,
            Err(_) => return Err(ExtractError::CorruptFile),
            _ => {}
        }
    }
    Ok(text)
}
