use super::limits::{char_len, LIST_CATEGORY_MAX_CHARS};
use super::lines::without_bullet;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static ITEM_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,;|•]|\s+and\s+").unwrap());

/// Parse a skills or languages section into a flat, de-duplicated list.
///
/// Order is first-seen and duplicates must match exactly. At most
/// `max_items` are kept.
pub fn parse_list<S: AsRef<str>>(lines: &[S], max_items: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for line in lines {
        let line = strip_category(without_bullet(line.as_ref()));
        for item in ITEM_SPLIT_RE.split(line) {
            let item = item.trim().trim_end_matches('.').trim();
            if item.is_empty() {
                continue;
            }
            if seen.insert(item) {
                items.push(item.to_string());
                if items.len() >= max_items {
                    return items;
                }
            }
        }
    }
    items
}

/// Drop a short "Category:" prefix ("Languages: Rust, Go" → "Rust, Go").
fn strip_category(line: &str) -> &str {
    match line.split_once(':') {
        Some((prefix, rest))
            if !prefix.contains(',') && char_len(prefix) <= LIST_CATEGORY_MAX_CHARS =>
        {
            rest.trim()
        }
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_dedupe() {
        let lines = [
            "• Rust, Go; Python | TypeScript",
            "Frontend: React and Vue",
            "Go • Docker",
        ];
        assert_eq!(
            parse_list(&lines, 100),
            vec!["Rust", "Go", "Python", "TypeScript", "React", "Vue", "Docker"]
        );
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        assert_eq!(
            parse_list(&["Rust, rust, RUST, Rust"], 100),
            vec!["Rust", "rust", "RUST"]
        );
    }

    #[test]
    fn test_cap_applies() {
        let line = (0..150).map(|i| format!("skill{i}")).collect::<Vec<_>>().join(", ");
        let items = parse_list(&[line], 100);
        assert_eq!(items.len(), 100);
        assert_eq!(items[99], "skill99");
    }

    #[test]
    fn test_long_prefix_kept() {
        let lines = ["Fluent in the following spoken languages here: Spanish"];
        assert_eq!(
            parse_list(&lines, 100),
            vec!["Fluent in the following spoken languages here: Spanish"]
        );
    }

    #[test]
    fn test_languages_with_levels() {
        assert_eq!(
            parse_list(&["English (native), Spanish (fluent)"], 100),
            vec!["English (native)", "Spanish (fluent)"]
        );
    }
}
