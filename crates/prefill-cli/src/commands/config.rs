use prefill_core::config::{load_config, ExtractConfig};
use prefill_core::error::PrefillError;
use std::path::Path;

pub fn show() -> Result<(), PrefillError> {
    let json = serde_json::to_string_pretty(&ExtractConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PrefillError> {
    let config = load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!("  Skill keywords: {}", config.skill_keywords.len());
    println!("  Denied website hosts: {}", config.website_denylist.join(", "));
    println!(
        "  Caps: {} list item(s), summary {} char(s), objective {} char(s)",
        config.max_list_items, config.summary_max_chars, config.objective_max_chars
    );

    // Not errors, but likely mistakes
    let mut warnings = Vec::new();
    if !config.keyword_scan {
        warnings.push(
            "keyword_scan is off; skills are only taken from a skills section".to_string(),
        );
    } else if config.skill_keywords.is_empty() {
        warnings.push("keyword_scan is on but the vocabulary is empty".to_string());
    }
    let mut seen = std::collections::HashSet::new();
    for kw in &config.skill_keywords {
        if !seen.insert(kw.to_lowercase()) {
            warnings.push(format!("skill keyword '{kw}' is listed more than once"));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}
