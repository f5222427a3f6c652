use regex::{Regex, RegexBuilder};

/// Vocabulary terms found anywhere in `text`, in vocabulary order.
///
/// Boundaries are "not a word character" rather than `\b`, so terms that
/// end in punctuation (`C++`, `C#`, `CI/CD`) still match.
pub fn scan_keywords(text: &str, vocabulary: &[String], max_items: usize) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for term in vocabulary {
        let term = term.trim();
        if term.is_empty() || found.iter().any(|f| f.eq_ignore_ascii_case(term)) {
            continue;
        }
        let Some(re) = keyword_regex(term) else {
            continue;
        };
        if re.is_match(text) {
            found.push(term.to_string());
            if found.len() >= max_items {
                break;
            }
        }
    }

    log::debug!("keyword scan matched {} term(s)", found.len());
    found
}

fn keyword_regex(term: &str) -> Option<Regex> {
    let pattern = format!(
        r"(?:^|[^A-Za-z0-9_]){}(?:$|[^A-Za-z0-9_])",
        regex::escape(term)
    );
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("skipping keyword '{term}': {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;

    fn vocab(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_vocabulary_order_and_case() {
        let found = scan_keywords(
            "Wrote python services and some rust.",
            &vocab(&["Rust", "Python", "Go"]),
            100,
        );
        assert_eq!(found, vec!["Rust", "Python"]);
    }

    #[test]
    fn test_punctuated_terms() {
        let text = "Built C++ engines, C# tools and CI/CD with Node.js";
        let found = scan_keywords(text, &ExtractConfig::default().skill_keywords, 100);
        assert!(found.contains(&"C++".to_string()));
        assert!(found.contains(&"C#".to_string()));
        assert!(found.contains(&"CI/CD".to_string()));
        assert!(found.contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_no_partial_word_matches() {
        let found = scan_keywords("Gopher and Javascripting", &vocab(&["Go", "JavaScript"]), 100);
        assert!(found.is_empty());
    }

    #[test]
    fn test_dedupes_vocabulary() {
        let found = scan_keywords("git", &vocab(&["Git", "git"]), 100);
        assert_eq!(found, vec!["Git"]);
    }
}
