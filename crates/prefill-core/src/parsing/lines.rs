//! Per-line classification primitives shared by the section parsers.

use super::contact::PHONE_RE;
use super::limits::{
    char_len, COMMA_SPLIT_MAX_OFFSET, FREE_TEXT_MAX_CHARS, FREE_TEXT_MIN_CHARS,
    HEADER_CANDIDATE_MAX_CHARS, WHOLE_LINE_HEADER_MAX_CHARS,
};
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for an employer or institution the line did not name.
pub const UNKNOWN: &str = "Unknown";

/// One date point: optional month/season, optional numeric month, a year.
const DATE_POINT: &str = r"(?:(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?|spring|summer|fall|autumn|winter)\.?,?\s*)?(?:\d{1,2}/)?(?:19|20)\d{2}";

static DATE_POINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b{DATE_POINT}\b")).unwrap());
static DATE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b{DATE_POINT}\b(?:\s*(?:-|–|—|to|until|through|thru)\s*(?:{DATE_POINT}\b|present\b|current\b|now\b|ongoing\b))?"
    ))
    .unwrap()
});
static PRESENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:present|current|now|ongoing)\b").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static TRAILING_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[(\[]?\b((?:19|20)\d{2})\b[)\]]?[\s.]*$").unwrap()
});
static DATE_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:since|from|to|until|through|thru|dates?|employed|expected|graduated|graduation|present|current|now|ongoing)\b").unwrap()
});
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\+?\s*(?:years?|yrs?|months?|mos?)\b(?:,?\s*(?:and\s+)?\d+\s*(?:months?|mos?)\b)?")
        .unwrap()
});
static EMPTY_BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)|\[\s*\]").unwrap());
static HYPHEN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+[-–—]\s+(.+)$").unwrap());
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Z][A-Za-z.' -]*[A-Za-z.],\s*([A-Z]{2})(?:\s+\d{5}(?:-\d{4})?)?|[Rr]emote|[Hh]ybrid)$")
        .unwrap()
});

/// USPS codes for states, DC and territories.
const US_STATE_CODES: [&str; 56] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "GU", "VI", "AS", "MP",
];
static FIELD_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hours\s*(?:per|/)\s*week|salary|series|(?:pay\s+)?grade|supervisor(?:'s)?\s+(?:phone|telephone)|supervisor(?:'s)?(?:\s+name)?|(?:may|ok(?:ay)?\s+to)\s+contact(?:\s+supervisor)?)\s*:\s*").unwrap()
});

/// Dates pulled from a line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
    pub present: bool,
}

/// Labelled detail lines seen in federal-style résumés.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryField {
    HoursPerWeek(String),
    Salary(String),
    Series(String),
    Grade(String),
    Supervisor { name: String, phone: Option<String> },
    SupervisorPhone(String),
    MayContact(bool),
}

/// Classification of one line inside an experience-like section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Header {
        title: String,
        employer: String,
        dates: Option<DateRange>,
    },
    Bullet(String),
    DateRange(DateRange),
    Fields(Vec<EntryField>),
    Location(String),
    FreeText(String),
    Unrecognized,
}

/// State of a repeating-entry section parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState<T> {
    NoActiveEntry,
    InEntry(T),
}

impl<T> EntryState<T> {
    /// End of section: hand back the open entry, if any.
    pub fn finish(self) -> Option<T> {
        match self {
            EntryState::NoActiveEntry => None,
            EntryState::InEntry(entry) => Some(entry),
        }
    }
}

/// A line that carries a date, split into what the date leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatedLine {
    /// Nothing meaningful besides the dates.
    DateOnly(DateRange),
    /// Text remains once the date span is removed.
    WithText(String, DateRange),
}

pub fn is_bullet(line: &str) -> bool {
    line.starts_with(['-', '•', '*'])
}

/// Text after a leading `-`, `•` or `*` marker.
pub fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(['-', '•', '*']).map(str::trim_start)
}

/// Text with any leading bullet marker removed.
pub fn without_bullet(line: &str) -> &str {
    strip_bullet(line).unwrap_or(line).trim()
}

pub fn has_year(line: &str) -> bool {
    YEAR_RE.is_match(line)
}

/// First four-digit year anywhere in the text.
pub fn first_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| m.as_str().to_string())
}

/// Split off a trailing year, bare or bracketed: "Dean's Award (2019)".
pub fn split_trailing_year(text: &str) -> (String, Option<String>) {
    match TRAILING_YEAR_RE.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.start()).unwrap_or(text.len());
            let rest = trim_separators(&text[..whole]).to_string();
            (rest, caps.get(1).map(|m| m.as_str().to_string()))
        }
        None => (text.trim().to_string(), None),
    }
}

/// Remove every year (bare or bracketed) from the text.
pub fn strip_years(text: &str) -> String {
    static BRACKETED_YEAR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[(\[]?\b(?:19|20)\d{2}\b[)\]]?").unwrap());
    let stripped = BRACKETED_YEAR_RE.replace_all(text, "");
    trim_separators(&stripped).to_string()
}

/// Trim whitespace and the punctuation that separates fields on one line.
pub fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | '|' | '-' | '–' | '—' | ':' | '(' | ')')
    })
}

/// A date-range cue: a dash, the word "to", or a bare year.
pub fn has_date_cue(line: &str) -> bool {
    line.contains(['-', '–', '—']) || line.to_lowercase().contains(" to ") || has_year(line)
}

/// Start/end/present from a line holding one or two date points.
///
/// `present` is set on present/current/now/ongoing, in which case the end
/// stays unset. A single date point is both start and end.
pub fn parse_date_range(line: &str) -> Option<DateRange> {
    let points: Vec<String> = DATE_POINT_RE
        .find_iter(line)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    let first = points.first()?;
    let present = PRESENT_RE.is_match(line);
    let end = if present {
        None
    } else {
        Some(points.get(1).unwrap_or(first).clone())
    };

    Some(DateRange {
        start: Some(first.clone()),
        end,
        present,
    })
}

/// Classify a line that carries a date range cue and a parseable date.
pub fn classify_dated(line: &str) -> Option<DatedLine> {
    if !has_date_cue(line) {
        return None;
    }
    let range = parse_date_range(line)?;

    let without_dates = DATE_SPAN_RE.replace_all(line, " ");
    let without_dates = DURATION_RE.replace_all(&without_dates, " ");
    let without_dates = EMPTY_BRACKETS_RE.replace_all(&without_dates, " ");
    let filler_free = DATE_FILLER_RE.replace_all(&without_dates, " ");
    let letters = filler_free.chars().filter(|c| c.is_alphabetic()).count();

    if letters < 3 {
        Some(DatedLine::DateOnly(range))
    } else {
        let rest = without_dates.split_whitespace().collect::<Vec<_>>().join(" ");
        Some(DatedLine::WithText(trim_separators(&rest).to_string(), range))
    }
}

/// "City, ST", "City, ST 12345", "Remote" or "Hybrid". `ST` must be a
/// US state code, so "Analyst, GE" stays a header.
pub fn is_location(line: &str) -> bool {
    match LOCATION_RE.captures(line) {
        Some(caps) => caps
            .get(1)
            .map_or(true, |code| US_STATE_CODES.contains(&code.as_str())),
        None => false,
    }
}

/// Title/employer header cascade, first rule wins:
/// rightmost " at ", " – ", " | ", ", " before offset 80, "X - Y",
/// otherwise a short line that does not start with a digit or bullet is a
/// title with an unknown employer.
pub fn split_title_employer(line: &str) -> Option<(String, String)> {
    let len = char_len(line);
    if len == 0 || len > HEADER_CANDIDATE_MAX_CHARS {
        return None;
    }

    if let Some(idx) = line.rfind(" at ") {
        if let Some(pair) = split_pair(&line[..idx], &line[idx + 4..]) {
            return Some(pair);
        }
    }
    for sep in [" – ", " | "] {
        if let Some(idx) = line.find(sep) {
            if let Some(pair) = split_pair(&line[..idx], &line[idx + sep.len()..]) {
                return Some(pair);
            }
        }
    }
    if let Some(idx) = line.find(", ") {
        if char_len(&line[..idx]) < COMMA_SPLIT_MAX_OFFSET {
            if let Some(pair) = split_pair(&line[..idx], &line[idx + 2..]) {
                return Some(pair);
            }
        }
    }
    if let Some(caps) = HYPHEN_SPLIT_RE.captures(line) {
        if let Some(pair) = split_pair(&caps[1], &caps[2]) {
            return Some(pair);
        }
    }

    let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
    if len < WHOLE_LINE_HEADER_MAX_CHARS && !starts_with_digit && !is_bullet(line) {
        return Some((line.to_string(), UNKNOWN.to_string()));
    }
    None
}

fn split_pair(left: &str, right: &str) -> Option<(String, String)> {
    let left = left.trim();
    if left.is_empty() {
        return None;
    }
    let right = right.trim();
    let right = if right.is_empty() { UNKNOWN } else { right };
    Some((left.to_string(), right.to_string()))
}

/// Labelled detail fields on one line. The first label must open the line;
/// several labels may share it ("Series: 2210 | Grade: GS-12").
pub fn parse_entry_fields(line: &str) -> Vec<EntryField> {
    let labels: Vec<_> = FIELD_LABEL_RE.captures_iter(line).collect();
    match labels.first().and_then(|c| c.get(0)) {
        Some(m) if m.start() == 0 => {}
        _ => return Vec::new(),
    }

    let mut fields = Vec::new();
    for (i, caps) in labels.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value_end = labels
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(line.len());
        let value = trim_separators(&line[whole.end()..value_end]);
        if value.is_empty() {
            continue;
        }
        if let Some(field) = entry_field(&label.as_str().to_lowercase(), value) {
            fields.push(field);
        }
    }
    fields
}

fn entry_field(label: &str, value: &str) -> Option<EntryField> {
    if label.starts_with("hours") {
        Some(EntryField::HoursPerWeek(value.to_string()))
    } else if label == "salary" {
        Some(EntryField::Salary(value.to_string()))
    } else if label == "series" {
        Some(EntryField::Series(value.to_string()))
    } else if label.ends_with("grade") {
        Some(EntryField::Grade(value.to_string()))
    } else if label.contains("contact") {
        let answer = value.to_lowercase();
        if answer.starts_with('y') || answer == "true" {
            Some(EntryField::MayContact(true))
        } else if answer.starts_with('n') || answer == "false" {
            Some(EntryField::MayContact(false))
        } else {
            None
        }
    } else if label.contains("phone") {
        Some(EntryField::SupervisorPhone(value.to_string()))
    } else {
        let phone = PHONE_RE.find(value).map(|m| m.as_str().to_string());
        let name = match PHONE_RE.find(value) {
            Some(m) => format!("{} {}", &value[..m.start()], &value[m.end()..]),
            None => value.to_string(),
        };
        let name = trim_separators(name.trim()).to_string();
        if name.is_empty() {
            phone.map(EntryField::SupervisorPhone)
        } else {
            Some(EntryField::Supervisor { name, phone })
        }
    }
}

/// Value after a leading label such as "Major:" (case-insensitive, colon
/// required).
pub fn extract_after_label(line: &str, labels: &[&str]) -> Option<String> {
    for label in labels {
        let Some(head) = line.get(..label.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(label) {
            continue;
        }
        let after = line[label.len()..].trim_start();
        let Some(value) = after.strip_prefix(':') else {
            continue;
        };
        let value = value.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

/// Classify one line of an experience or volunteer section.
///
/// Order: bullet, labelled fields, date line (or a header carrying dates),
/// location, header cascade, free text.
pub fn classify_experience_line(line: &str) -> LineKind {
    if let Some(text) = strip_bullet(line) {
        return if text.is_empty() {
            LineKind::Unrecognized
        } else {
            LineKind::Bullet(text.to_string())
        };
    }

    let fields = parse_entry_fields(line);
    if !fields.is_empty() {
        return LineKind::Fields(fields);
    }

    match classify_dated(line) {
        Some(DatedLine::DateOnly(range)) => return LineKind::DateRange(range),
        Some(DatedLine::WithText(rest, range)) => {
            if let Some((title, employer)) = split_title_employer(&rest) {
                return LineKind::Header {
                    title,
                    employer,
                    dates: Some(range),
                };
            }
            if char_len(&rest) < FREE_TEXT_MIN_CHARS {
                return LineKind::DateRange(range);
            }
        }
        None => {}
    }

    if is_location(line) {
        return LineKind::Location(line.to_string());
    }

    if let Some((title, employer)) = split_title_employer(line) {
        return LineKind::Header {
            title,
            employer,
            dates: None,
        };
    }

    let len = char_len(line);
    if (FREE_TEXT_MIN_CHARS..FREE_TEXT_MAX_CHARS).contains(&len) {
        return LineKind::FreeText(line.to_string());
    }
    LineKind::Unrecognized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(title: &str, employer: &str) -> LineKind {
        LineKind::Header {
            title: title.into(),
            employer: employer.into(),
            dates: None,
        }
    }

    #[test]
    fn test_cascade_rightmost_at() {
        assert_eq!(
            split_title_employer("Head of Data at Scale at Acme Inc."),
            Some(("Head of Data at Scale".into(), "Acme Inc.".into()))
        );
    }

    #[test]
    fn test_cascade_separator_priority() {
        assert_eq!(
            split_title_employer("Engineer – Acme | Remote"),
            Some(("Engineer".into(), "Acme | Remote".into()))
        );
        assert_eq!(
            split_title_employer("Engineer | Acme, Boston"),
            Some(("Engineer".into(), "Acme, Boston".into()))
        );
        assert_eq!(
            split_title_employer("Engineer, Acme Corp"),
            Some(("Engineer".into(), "Acme Corp".into()))
        );
        assert_eq!(
            split_title_employer("Engineer - Acme Corp"),
            Some(("Engineer".into(), "Acme Corp".into()))
        );
    }

    #[test]
    fn test_cascade_comma_offset_limit() {
        let long_prefix = "x".repeat(85);
        let line = format!("{long_prefix}, Acme");
        assert_eq!(split_title_employer(&line), Some((line.clone(), UNKNOWN.into())));
    }

    #[test]
    fn test_cascade_whole_line_title() {
        assert_eq!(
            split_title_employer("Senior Developer"),
            Some(("Senior Developer".into(), UNKNOWN.into()))
        );
        assert_eq!(split_title_employer("2019 was a good year"), None);
        assert_eq!(split_title_employer(&"word ".repeat(30)), None);
    }

    #[test]
    fn test_parse_date_range_months_and_present() {
        let range = parse_date_range("Jan 2020 – Present").unwrap();
        assert_eq!(range.start.as_deref(), Some("Jan 2020"));
        assert_eq!(range.end, None);
        assert!(range.present);
    }

    #[test]
    fn test_parse_date_range_years() {
        let range = parse_date_range("2022 – 2023").unwrap();
        assert_eq!(range.start.as_deref(), Some("2022"));
        assert_eq!(range.end.as_deref(), Some("2023"));
        assert!(!range.present);
    }

    #[test]
    fn test_parse_date_range_mixed_points() {
        let range = parse_date_range("Sept. 2018 to 03/2021").unwrap();
        assert_eq!(range.start.as_deref(), Some("Sept. 2018"));
        assert_eq!(range.end.as_deref(), Some("03/2021"));
    }

    #[test]
    fn test_single_year_is_start_and_end() {
        let range = parse_date_range("Graduated 2016").unwrap();
        assert_eq!(range.start.as_deref(), Some("2016"));
        assert_eq!(range.end.as_deref(), Some("2016"));
    }

    #[test]
    fn test_no_date_no_range() {
        assert!(parse_date_range("Led migration").is_none());
        assert!(classify_dated("Led migration - twice").is_none());
    }

    #[test]
    fn test_classify_dated_separates_header_text() {
        assert_eq!(
            classify_dated("Since 2019 – Present"),
            Some(DatedLine::DateOnly(DateRange {
                start: Some("2019".into()),
                end: None,
                present: true,
            }))
        );
        match classify_dated("Engineer at Acme (2019 – 2021)") {
            Some(DatedLine::WithText(rest, range)) => {
                assert_eq!(rest, "Engineer at Acme");
                assert_eq!(range.end.as_deref(), Some("2021"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_classify_experience_line_variants() {
        assert_eq!(
            classify_experience_line("- Led migration"),
            LineKind::Bullet("Led migration".into())
        );
        assert_eq!(
            classify_experience_line("Staff Engineer at Globex"),
            header("Staff Engineer", "Globex")
        );
        assert!(matches!(
            classify_experience_line("2022 – 2023"),
            LineKind::DateRange(_)
        ));
        assert_eq!(
            classify_experience_line("Boston, MA"),
            LineKind::Location("Boston, MA".into())
        );
        assert_eq!(classify_experience_line("42"), LineKind::Unrecognized);
    }

    #[test]
    fn test_date_line_with_duration_suffix() {
        let kind = classify_experience_line("January 2019 – Present (2 years 3 months)");
        assert_eq!(
            kind,
            LineKind::DateRange(DateRange {
                start: Some("January 2019".into()),
                end: None,
                present: true,
            })
        );
        assert!(matches!(
            classify_experience_line("2016 – 2018 · 2 yrs, 4 mos"),
            LineKind::DateRange(_)
        ));
    }

    #[test]
    fn test_location_needs_state_code() {
        assert!(is_location("Boston, MA"));
        assert!(is_location("Austin, TX 78701"));
        assert!(is_location("Remote"));
        assert!(!is_location("Analyst, GE"));
        assert_eq!(
            classify_experience_line("Engineer, HP"),
            header("Engineer", "HP")
        );
    }

    #[test]
    fn test_long_line_is_free_text() {
        let line = format!("Owned the billing platform end to end {}", "and more ".repeat(12));
        let line = line.trim().to_string();
        assert!(matches!(classify_experience_line(&line), LineKind::FreeText(_)));
    }

    #[test]
    fn test_entry_fields_on_one_line() {
        assert_eq!(
            parse_entry_fields("Series: 2210 | Grade: GS-12"),
            vec![
                EntryField::Series("2210".into()),
                EntryField::Grade("GS-12".into())
            ]
        );
        assert_eq!(
            parse_entry_fields("Hours per week: 40"),
            vec![EntryField::HoursPerWeek("40".into())]
        );
        assert_eq!(
            parse_entry_fields("May contact: Yes"),
            vec![EntryField::MayContact(true)]
        );
        assert!(parse_entry_fields("Negotiated salary: bands for staff").is_empty());
    }

    #[test]
    fn test_supervisor_phone_split_out() {
        assert_eq!(
            parse_entry_fields("Supervisor: Jane Smith, (555) 123-4567"),
            vec![EntryField::Supervisor {
                name: "Jane Smith".into(),
                phone: Some("(555) 123-4567".into()),
            }]
        );
        assert_eq!(
            parse_entry_fields("Supervisor Phone: 555-987-6543"),
            vec![EntryField::SupervisorPhone("555-987-6543".into())]
        );
    }

    #[test]
    fn test_extract_after_label() {
        assert_eq!(
            extract_after_label("Major: Computer Science", &["major"]).as_deref(),
            Some("Computer Science")
        );
        assert_eq!(extract_after_label("Majority vote", &["major"]), None);
        assert_eq!(extract_after_label("Major:", &["major"]), None);
    }

    #[test]
    fn test_split_trailing_year() {
        assert_eq!(
            split_trailing_year("Employee of the Year (2019)"),
            ("Employee of the Year".to_string(), Some("2019".to_string()))
        );
        assert_eq!(
            split_trailing_year("Hackathon winner, 2020"),
            ("Hackathon winner".to_string(), Some("2020".to_string()))
        );
        assert_eq!(
            split_trailing_year("Top 2019 performer award"),
            ("Top 2019 performer award".to_string(), None)
        );
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("• Rust"), Some("Rust"));
        assert_eq!(strip_bullet("*Go"), Some("Go"));
        assert_eq!(strip_bullet("Rust"), None);
        assert_eq!(without_bullet("- Rust "), "Rust");
    }
}
