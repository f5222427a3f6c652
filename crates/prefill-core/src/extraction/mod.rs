pub mod pdftotext;
pub mod plain;

use crate::error::PrefillError;
use std::path::Path;

/// Text of a single page as produced by a PDF converter.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    pub lines: Vec<String>,
}

/// A text fragment from a page/text-run converter.
///
/// `has_eol` marks an explicit hard line break after the fragment.
#[derive(Debug, Clone, Default)]
pub struct TextRun {
    pub text: String,
    pub has_eol: bool,
}

impl TextRun {
    pub fn new(text: impl Into<String>, has_eol: bool) -> Self {
        TextRun {
            text: text.into(),
            has_eol,
        }
    }
}

/// Content handed over by a document converter, before normalization.
#[derive(Debug, Clone)]
pub enum DecodedContent {
    /// A single decoded text string with newline breaks.
    Text(String),
    /// HTML-like markup where block elements mark line boundaries.
    Html(String),
    /// Page-split lines.
    Pages(Vec<PageContent>),
    /// Text runs annotated with hard-break hints.
    Runs(Vec<TextRun>),
}

/// Trait for document decoding backends.
pub trait DocumentDecoder: Send + Sync {
    /// Decode document bytes into converter content.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, PrefillError>;

    /// Name of this decoding backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Pick a decoder by file extension.
pub fn decoder_for_path(path: &Path) -> Result<Box<dyn DocumentDecoder>, PrefillError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => Ok(Box::new(pdftotext::PdftotextDecoder::new())),
        "txt" | "text" | "md" => Ok(Box::new(plain::PlainTextDecoder)),
        "html" | "htm" | "xhtml" => Ok(Box::new(plain::HtmlDecoder)),
        "docx" | "doc" => Err(PrefillError::UnsupportedFormat(format!(
            "'{}' (convert Word documents to HTML or PDF first)",
            path.display()
        ))),
        _ => Err(PrefillError::UnsupportedFormat(format!(
            "'{}' (expected .pdf, .txt, .md or .html)",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_for_known_extensions() {
        assert_eq!(
            decoder_for_path(Path::new("cv.PDF")).unwrap().backend_name(),
            "pdftotext"
        );
        assert_eq!(
            decoder_for_path(Path::new("cv.txt")).unwrap().backend_name(),
            "plain-text"
        );
        assert_eq!(
            decoder_for_path(Path::new("cv.html")).unwrap().backend_name(),
            "html"
        );
    }

    #[test]
    fn test_docx_is_unsupported() {
        let err = decoder_for_path(Path::new("cv.docx")).err().unwrap();
        assert!(matches!(err, PrefillError::UnsupportedFormat(_)));
    }
}
