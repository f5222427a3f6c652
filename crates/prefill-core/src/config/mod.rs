pub mod schema;

use crate::error::PrefillError;
use std::path::Path;

pub use schema::{ExtractConfig, ExtractOptions};

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractConfig, PrefillError> {
    let content = std::fs::read_to_string(path).map_err(|e| PrefillError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string read from `source`.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractConfig, PrefillError> {
    let config: ExtractConfig =
        serde_json::from_str(json).map_err(|e| PrefillError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractConfig, PrefillError> {
    let config: ExtractConfig = serde_json::from_str(json).map_err(PrefillError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &ExtractConfig) -> Result<(), PrefillError> {
    if config.skill_keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(PrefillError::ConfigInvalid(
            "skill_keywords must not contain empty terms".into(),
        ));
    }

    if config.website_denylist.iter().any(|d| d.trim().is_empty()) {
        return Err(PrefillError::ConfigInvalid(
            "website_denylist must not contain empty hosts".into(),
        ));
    }

    for (name, value) in [
        ("max_list_items", config.max_list_items),
        ("summary_max_chars", config.summary_max_chars),
        ("objective_max_chars", config.objective_max_chars),
    ] {
        if value == 0 {
            return Err(PrefillError::ConfigInvalid(format!(
                "{name} must be greater than zero"
            )));
        }
    }

    if config.objective_max_chars > config.summary_max_chars {
        return Err(PrefillError::ConfigInvalid(format!(
            "objective_max_chars ({}) must not exceed summary_max_chars ({})",
            config.objective_max_chars, config.summary_max_chars
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExtractConfig::default();
        validate_config(&config).unwrap();
        assert_eq!(config.skill_keywords.len(), 38);
        assert_eq!(config.max_list_items, 100);
        assert!(config.keyword_scan);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = parse_config_str(r#"{ "skill_keywords": ["Fortran", "COBOL"] }"#).unwrap();
        assert_eq!(config.skill_keywords, vec!["Fortran", "COBOL"]);
        assert_eq!(config.summary_max_chars, 2000);
        assert_eq!(config.website_denylist.len(), 7);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        assert!(parse_config_str(r#"{ "skill_keywords": ["Rust", " "] }"#).is_err());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = parse_config_str(r#"{ "max_list_items": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("max_list_items"));
    }

    #[test]
    fn test_objective_above_summary_rejected() {
        assert!(
            parse_config_str(r#"{ "summary_max_chars": 100, "objective_max_chars": 500 }"#)
                .is_err()
        );
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        assert!(matches!(
            parse_config_str(r#"{ "keyword_scan": "yes" }"#),
            Err(PrefillError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "keyword_scan": false }}"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert!(!config.keyword_scan);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/prefill.json")).unwrap_err();
        assert!(matches!(err, PrefillError::ConfigLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/prefill.json"));
    }
}
