use crate::error::PrefillError;
use crate::extraction::{DecodedContent, DocumentDecoder, PageContent};
use std::io::Write;
use std::process::Command;

/// PDF decoding backend using pdftotext (from poppler-utils).
///
/// Runs in reading-order mode (no `-layout`) so multi-column résumés come
/// out one column at a time instead of interleaved.
pub struct PdftotextDecoder;

impl PdftotextDecoder {
    pub fn new() -> Self {
        PdftotextDecoder
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentDecoder for PdftotextDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, PrefillError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(PrefillError::Extraction(
                "input does not look like a PDF (missing %PDF header)".into(),
            ));
        }

        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| PrefillError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(bytes)
            .map_err(|e| PrefillError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let output = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg(&tmp_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PrefillError::PdftotextNotFound
                } else {
                    PrefillError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(PrefillError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&text);
        log::debug!("pdftotext produced {} page(s)", pages.len());

        if pages.iter().all(|p| p.lines.iter().all(|l| l.trim().is_empty())) {
            return Err(PrefillError::Extraction(
                "PDF contains no extractable text (scanned image?)".into(),
            ));
        }

        Ok(DecodedContent::Pages(pages))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed `\x0c` separates pages).
fn split_pages(text: &str) -> Vec<PageContent> {
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            lines: page_text.lines().map(|l| l.to_string()).collect(),
        })
        .filter(|p| !p.lines.is_empty() || p.page_number == 1)
        .collect()
}
