//! Empirical length cutoffs. These values define behavior; change them only
//! together with the tests that pin them.

/// First line longer than this is not taken as the full name.
pub const NAME_MAX_CHARS: usize = 80;
/// Address line without a city/state/zip decomposition must be shorter than this.
pub const ADDRESS_MAX_CHARS: usize = 120;

/// Longest line still considered as a section header.
pub const SECTION_HEADER_MAX_CHARS: usize = 60;

/// Lines longer than this are never split into title/employer.
pub const HEADER_CANDIDATE_MAX_CHARS: usize = 200;
/// A ", " separator only splits title/employer before this offset.
pub const COMMA_SPLIT_MAX_OFFSET: usize = 80;
/// An unsplit line shorter than this becomes a whole-line title or degree.
pub const WHOLE_LINE_HEADER_MAX_CHARS: usize = 120;

/// Free-text summary lines inside an entry: inclusive lower, exclusive upper bound.
pub const FREE_TEXT_MIN_CHARS: usize = 20;
pub const FREE_TEXT_MAX_CHARS: usize = 300;

/// Education lines shorter than this may become the major.
pub const MAJOR_MAX_CHARS: usize = 150;
/// Project lines shorter than this start a new project.
pub const PROJECT_NAME_MAX_CHARS: usize = 100;
/// KSA lines shorter than this are titles.
pub const KSA_TITLE_MAX_CHARS: usize = 80;
/// "Category:" prefixes on skill lines are dropped when at most this long.
pub const LIST_CATEGORY_MAX_CHARS: usize = 30;

pub const MAX_LIST_ITEMS: usize = 100;
pub const SUMMARY_MAX_CHARS: usize = 2000;
pub const OBJECTIVE_MAX_CHARS: usize = 500;

/// Number of characters, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Prefix of at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_chars("résumé", 3), "rés");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(char_len("résumé"), 6);
    }
}
