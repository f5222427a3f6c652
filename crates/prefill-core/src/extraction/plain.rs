use crate::error::PrefillError;
use crate::extraction::{DecodedContent, DocumentDecoder};

/// Decoder for already-textual uploads (.txt, .md).
pub struct PlainTextDecoder;

impl DocumentDecoder for PlainTextDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, PrefillError> {
        Ok(DecodedContent::Text(decode_utf8(bytes)?))
    }

    fn backend_name(&self) -> &str {
        "plain-text"
    }
}

/// Decoder for HTML produced by an external DOCX→HTML converter.
pub struct HtmlDecoder;

impl DocumentDecoder for HtmlDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedContent, PrefillError> {
        Ok(DecodedContent::Html(decode_utf8(bytes)?))
    }

    fn backend_name(&self) -> &str {
        "html"
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, PrefillError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if bytes.contains(&0) {
        return Err(PrefillError::Extraction(
            "input contains NUL bytes; it is not a text document".into(),
        ));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
