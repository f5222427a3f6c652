use prefill_core::error::PrefillError;
use prefill_core::Extraction;

pub fn format(extraction: &Extraction) -> Result<String, PrefillError> {
    Ok(serde_json::to_string_pretty(extraction)?)
}
