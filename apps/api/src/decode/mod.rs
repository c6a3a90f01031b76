//! Document decoding — uploaded bytes to raw text.
//!
//! Decoding never fails from the caller's point of view: a corrupt or
//! unsupported document is logged and treated as empty text, which the
//! analyzer handles like any other input.

use std::path::Path;

use tracing::warn;

/// Upload formats accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Legacy Word binary format. Accepted, but no text is extracted.
    Doc,
    Text,
}

impl DocumentKind {
    /// Resolves the kind from the file extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "doc" => Some(DocumentKind::Doc),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// Extracts text from `data` according to the extension of `filename`.
///
/// CPU-bound for PDF and DOCX; call it from `spawn_blocking`.
pub fn decode_document(filename: &str, data: &[u8]) -> String {
    let Some(kind) = DocumentKind::from_filename(filename) else {
        warn!(filename, "unsupported document type, treating as empty");
        return String::new();
    };

    let result = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(data).map_err(|e| e.to_string()),
        DocumentKind::Docx => extract_docx(data),
        DocumentKind::Doc => Ok(String::new()),
        DocumentKind::Text => Ok(String::from_utf8_lossy(data).into_owned()),
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(filename, error = %e, "document decoding failed, treating as empty");
            String::new()
        }
    }
}

/// Paragraph text from a DOCX body, one paragraph per line.
fn extract_docx(data: &[u8]) -> Result<String, String> {
    let docx = docx_rs::read_docx(data).map_err(|e| e.to_string())?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(p) = child {
            for run in p.children {
                if let docx_rs::ParagraphChild::Run(run) = run {
                    for piece in run.children {
                        if let docx_rs::RunChild::Text(t) = piece {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
