use super::limits::{
    char_len, FREE_TEXT_MIN_CHARS, HEADER_CANDIDATE_MAX_CHARS, MAJOR_MAX_CHARS,
    WHOLE_LINE_HEADER_MAX_CHARS,
};
use super::lines::{
    classify_dated, extract_after_label, has_year, is_bullet, is_location, strip_bullet,
    without_bullet, DateRange, DatedLine, EntryState, UNKNOWN,
};
use crate::model::EducationEntry;
use regex::Regex;
use std::sync::LazyLock;

static GPA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bGPA\b").unwrap());
static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
static HONORS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:summa|magna)\s+)?cum\s+laude\b|\bdean'?s\s+list\b|\bwith\s+(?:high(?:est)?\s+)?(?:honou?rs|distinction)\b|\bhonou?rs\s+(?:program|college|society)\b|\bphi\s+beta\s+kappa\b|\bvaledictorian\b|\bsalutatorian\b",
    )
    .unwrap()
});

const HONORS_LABELS: &[&str] = &["honors", "honours", "awards"];
const MAJOR_LABELS: &[&str] = &["major", "concentration", "field of study"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EducationLine {
    Header {
        degree: String,
        institution: String,
        /// Split on an explicit separator rather than taken whole.
        separated: bool,
        dates: Option<DateRange>,
    },
    Gpa(String),
    Dates(DateRange),
    Honors(Vec<String>),
    Major(String),
    Location(String),
    Bullet(String),
    Other(String),
}

/// Degree/institution cascade: rightmost " at ", first ", ", " – ",
/// otherwise a short line is a degree at an unknown institution.
pub fn split_degree_institution(line: &str) -> Option<(String, String, bool)> {
    let len = char_len(line);
    if len == 0 || len > HEADER_CANDIDATE_MAX_CHARS {
        return None;
    }

    let split = line
        .rfind(" at ")
        .map(|idx| (&line[..idx], &line[idx + 4..]))
        .or_else(|| line.find(", ").map(|idx| (&line[..idx], &line[idx + 2..])))
        .or_else(|| {
            line.find(" – ")
                .map(|idx| (&line[..idx], &line[idx + " – ".len()..]))
        });
    if let Some((degree, institution)) = split {
        let degree = degree.trim();
        let institution = institution.trim();
        if !degree.is_empty() {
            let institution = if institution.is_empty() { UNKNOWN } else { institution };
            return Some((degree.to_string(), institution.to_string(), true));
        }
    }

    let starts_with_digit = line.chars().next().is_some_and(|c| c.is_ascii_digit());
    if len < WHOLE_LINE_HEADER_MAX_CHARS && !starts_with_digit && !is_bullet(line) {
        return Some((line.to_string(), UNKNOWN.to_string(), false));
    }
    None
}

pub fn classify_education_line(line: &str) -> EducationLine {
    if GPA_RE.is_match(line) {
        if let Some(m) = DECIMAL_RE.find(line) {
            return EducationLine::Gpa(m.as_str().to_string());
        }
    }

    let bare = without_bullet(line);
    if let Some(list) = extract_after_label(bare, HONORS_LABELS) {
        let honors = list
            .split([',', ';'])
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect();
        return EducationLine::Honors(honors);
    }
    if HONORS_RE.is_match(line) {
        return EducationLine::Honors(vec![bare.to_string()]);
    }
    if let Some(major) = extract_after_label(bare, MAJOR_LABELS) {
        return EducationLine::Major(major);
    }
    if let Some(text) = strip_bullet(line) {
        return EducationLine::Bullet(text.to_string());
    }

    match classify_dated(line) {
        Some(DatedLine::DateOnly(range)) => return EducationLine::Dates(range),
        Some(DatedLine::WithText(rest, range)) => {
            if let Some((degree, institution, separated)) = split_degree_institution(&rest) {
                return EducationLine::Header {
                    degree,
                    institution,
                    separated,
                    dates: Some(range),
                };
            }
            if char_len(&rest) < FREE_TEXT_MIN_CHARS {
                return EducationLine::Dates(range);
            }
        }
        None => {}
    }

    if is_location(line) {
        return EducationLine::Location(line.to_string());
    }

    match split_degree_institution(line) {
        Some((degree, institution, separated)) => EducationLine::Header {
            degree,
            institution,
            separated,
            dates: None,
        },
        None => EducationLine::Other(line.to_string()),
    }
}

pub fn parse_education<S: AsRef<str>>(lines: &[S]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut state = EntryState::NoActiveEntry;

    for line in lines {
        let line = line.as_ref();
        let (next, finished) = step(state, line, classify_education_line(line));
        state = next;
        entries.extend(finished);
    }
    entries.extend(state.finish());

    log::debug!("education parser produced {} entr(ies)", entries.len());
    entries
}

/// One transition. While an entry is open, only a separator-split header
/// starts the next one; a short plain line fills in the major.
pub fn step(
    state: EntryState<EducationEntry>,
    line: &str,
    kind: EducationLine,
) -> (EntryState<EducationEntry>, Option<EducationEntry>) {
    match (state, kind) {
        (
            EntryState::NoActiveEntry,
            EducationLine::Header {
                degree,
                institution,
                dates,
                ..
            },
        ) => (EntryState::InEntry(open_entry(degree, institution, dates)), None),
        (EntryState::NoActiveEntry, _) => (EntryState::NoActiveEntry, None),
        (
            EntryState::InEntry(done),
            EducationLine::Header {
                degree,
                institution,
                separated: true,
                dates,
            },
        ) => (
            EntryState::InEntry(open_entry(degree, institution, dates)),
            Some(done),
        ),
        (EntryState::InEntry(mut entry), kind) => {
            match kind {
                EducationLine::Gpa(gpa) => entry.gpa = Some(gpa),
                EducationLine::Dates(range) => apply_dates(&mut entry, range),
                EducationLine::Honors(honors) => entry.honors.extend(honors),
                EducationLine::Major(major) => entry.major = Some(major),
                EducationLine::Location(location) => {
                    if entry.location.is_none() {
                        entry.location = Some(location);
                    }
                }
                EducationLine::Header {
                    dates: Some(range), ..
                } => {
                    if entry.start.is_none() {
                        apply_dates(&mut entry, range);
                    }
                }
                EducationLine::Header { .. } | EducationLine::Other(_) => {
                    if entry.major.is_none()
                        && char_len(line) < MAJOR_MAX_CHARS
                        && !is_bullet(line)
                        && !has_year(line)
                    {
                        entry.major = Some(line.to_string());
                    }
                }
                EducationLine::Bullet(_) => {}
            }
            (EntryState::InEntry(entry), None)
        }
    }
}

pub(crate) fn open_entry(
    degree: String,
    institution: String,
    dates: Option<DateRange>,
) -> EducationEntry {
    let mut entry = EducationEntry::new(degree, institution);
    if let Some(range) = dates {
        apply_dates(&mut entry, range);
    }
    entry
}

fn apply_dates(entry: &mut EducationEntry, range: DateRange) {
    if let Some(start) = range.start {
        entry.start = Some(start);
    }
    if range.present {
        entry.present = true;
    } else if let Some(end) = range.end {
        entry.end = Some(end);
    }
}
