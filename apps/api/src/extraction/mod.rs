//! Document extraction: resume file on disk → plain text.
//!
//! `extract_text` never fails: unsupported formats and parse errors are logged and
//! become an empty string, which the scorer treats as a valid (zero-overlap) resume.

use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format: {0:?}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Format from a file name or path, by lower-cased extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

/// Extracts plain text from `path`, returning "" on any failure.
pub fn extract_text(path: &Path) -> String {
    match try_extract_text(path) {
        Ok(text) => {
            debug!("Extracted {} chars from {}", text.len(), path.display());
            text
        }
        Err(e) => {
            warn!("Text extraction failed for {}: {e}", path.display());
            String::new()
        }
    }
}

pub fn try_extract_text(path: &Path) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| ExtractionError::Unsupported(path.display().to_string()))?;

    match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Docx => extract_docx(path),
        DocumentFormat::Txt => {
            let bytes = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

fn extract_pdf(path: &Path) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed documents.
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("parser panicked".to_string())),
    }
}

fn extract_docx(path: &Path) -> Result<String, ExtractionError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

/// Visible text of a `word/document.xml` body.
///
/// Only `w:t` runs contribute text. Paragraph ends, `w:br` and `w:cr` become newlines
/// and `w:tab` becomes a tab; tab stops declared in paragraph properties are ignored.
/// Entity and character references are unescaped by the XML reader.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;
    let mut in_properties = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:pPr" => in_properties = true,
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:tab" if !in_properties => out.push('\t'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                b"w:tab" if !in_properties => out.push('\t'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:pPr" => in_properties = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text => out.push_str(&e.unescape()?),
            Event::CData(e) if in_text => out.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim().to_string())
}
