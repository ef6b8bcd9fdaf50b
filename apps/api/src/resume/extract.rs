use tracing::{debug, warn};

use crate::errors::AppError;

/// Extractions with fewer meaningful characters than this are treated as unreadable.
pub const MIN_EXTRACTED_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

/// Classifies an upload by its declared content type, falling back to the file extension
/// when the client sent a generic type.
pub fn classify(content_type: Option<&str>, filename: &str) -> Result<DocumentKind, AppError> {
    let content_type = content_type
        .map(|c| c.split(';').next().unwrap_or(c).trim().to_ascii_lowercase())
        .unwrap_or_default();
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type == "application/pdf" {
        return Ok(DocumentKind::Pdf);
    }
    if content_type.starts_with("text/") {
        return Ok(DocumentKind::PlainText);
    }
    if content_type.is_empty() || content_type == "application/octet-stream" {
        match extension.as_str() {
            "pdf" => return Ok(DocumentKind::Pdf),
            "txt" | "md" => return Ok(DocumentKind::PlainText),
            _ => {}
        }
    }

    let shown = if content_type.is_empty() {
        format!(".{extension}")
    } else {
        content_type
    };
    Err(AppError::UnsupportedMedia(format!(
        "Unsupported resume format '{shown}'; upload a PDF or plain-text file"
    )))
}

/// Extracts plain text from an uploaded résumé.
/// CPU-bound for PDFs; callers on the async runtime should wrap it in `spawn_blocking`.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, AppError> {
    let text = match kind {
        // pdf-extract panics on some malformed font tables instead of returning an error.
        DocumentKind::Pdf => std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| AppError::Extraction("Could not read PDF".into()))?
            .map_err(|e| {
                warn!("PDF extraction failed: {e}");
                AppError::Extraction(format!("Could not read PDF: {e}"))
            })?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
    debug!("Extracted {meaningful} non-whitespace chars ({kind:?})");
    if meaningful < MIN_EXTRACTED_CHARS {
        return Err(AppError::Extraction(format!(
            "Extracted text is too short ({meaningful} chars); the file may be scanned or empty"
        )));
    }

    Ok(text)
}
