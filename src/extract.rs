//! Resume text extraction for PDF, DOCX and plain-text uploads.
//!
//! Callers hand over bytes plus whatever type information they have; the kind
//! is decided from the content type first and the file extension second.

use std::io::Read;
use std::path::Path;

use crate::error::{AnalyzerError, Result};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";

/// Upper bound on the decompressed size of `word/document.xml`.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Picks a kind from the declared content type, falling back to the extension.
    pub fn detect(content_type: Option<&str>, file_name: &str) -> Option<Self> {
        match content_type {
            Some(MIME_PDF) => return Some(Self::Pdf),
            Some(MIME_DOCX) => return Some(Self::Docx),
            Some(MIME_TEXT) => return Some(Self::PlainText),
            _ => {}
        }
        let name = file_name.to_lowercase();
        if name.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if name.ends_with(".docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

/// An uploaded resume: a display name, an optional content type and the raw bytes.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Reads a file from disk, guessing its content type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|source| AnalyzerError::Read {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            content_type: guess_content_type(path).map(str::to_string),
            name,
            bytes,
        })
    }
}

/// Content type for the extensions the analyzer understands.
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        "txt" | "text" | "md" => Some(MIME_TEXT),
        _ => None,
    }
}

pub fn extract_text(document: &Document) -> Result<String> {
    let kind = DocumentKind::detect(document.content_type.as_deref(), &document.name).ok_or_else(
        || AnalyzerError::UnsupportedFormat {
            name: document.name.clone(),
        },
    )?;

    tracing::debug!(name = %document.name, ?kind, bytes = document.bytes.len(), "extracting resume text");

    match kind {
        DocumentKind::Pdf => extract_pdf(document),
        DocumentKind::Docx => extract_docx(document),
        DocumentKind::PlainText => String::from_utf8(document.bytes.clone())
            .map_err(|e| AnalyzerError::extraction(&document.name, e)),
    }
}

fn extract_pdf(document: &Document) -> Result<String> {
    pdf_extract::extract_text_from_mem(&document.bytes)
        .map_err(|e| AnalyzerError::extraction(&document.name, e))
}

fn extract_docx(document: &Document) -> Result<String> {
    let fail = |e: &dyn std::fmt::Display| AnalyzerError::extraction(&document.name, e);

    let mut archive =
        zip::ZipArchive::new(std::io::Cursor::new(document.bytes.as_slice())).map_err(|e| fail(&e))?;
    let entry = archive.by_name("word/document.xml").map_err(|e| fail(&e))?;

    let mut xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| fail(&e))?;
    if xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(fail(&"word/document.xml exceeds size limit"));
    }

    docx_body_text(&xml).map_err(|e| fail(&e))
}

/// Concatenates `w:t` runs, one line per `w:p` paragraph.
fn docx_body_text(xml: &[u8]) -> std::result::Result<String, quick_xml::Error> {
    use quick_xml::events::Event;

    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"tab" => out.push('\t'),
            Event::Text(t) if in_text => out.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
