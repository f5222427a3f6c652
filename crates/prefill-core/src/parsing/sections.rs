//! Section segmentation: split the line sequence at recognised headers.

use super::limits::{char_len, SECTION_HEADER_MAX_CHARS};
use super::lines::is_bullet;
use crate::model::{SectionKey, SectionMap};
use regex::Regex;
use std::sync::LazyLock;

/// Header phrases per section, in precedence order. The first key whose
/// pattern matches a header candidate wins.
const SECTION_PHRASES: [(SectionKey, &str); 10] = [
    (
        SectionKey::Experience,
        r"(?:professional\s+|relevant\s+|work\s+)?experience|work\s+history|employment(?:\s+history)?|career(?:\s+history)?|positions?(?:\s+held)?",
    ),
    (
        SectionKey::Education,
        r"education(?:al\s+background)?|academic\s+(?:background|history)|qualifications?|degrees?|training",
    ),
    (
        SectionKey::Skills,
        r"(?:technical\s+|key\s+|core\s+)?skills|core\s+competencies|technolog(?:y|ies)|expertise",
    ),
    (
        SectionKey::Summary,
        r"(?:professional\s+|executive\s+|career\s+)?summary|profile|(?:career\s+)?objective|about\s+me|summary\s+of\s+qualifications",
    ),
    (
        SectionKey::Certifications,
        r"certifications?|licen[cs]es?|credentials?|certificates?",
    ),
    (
        SectionKey::Projects,
        r"(?:key\s+|selected\s+|notable\s+|personal\s+)?projects?",
    ),
    (
        SectionKey::Ksas,
        r"ksas?|knowledge,?\s*skills,?\s*(?:and|&)\s*abilities|(?:key\s+|core\s+)?competenc(?:y|ies)",
    ),
    (
        SectionKey::Languages,
        r"languages?|language\s+skills?|language\s+proficienc(?:y|ies)",
    ),
    (
        SectionKey::Awards,
        r"awards?|honou?rs?|recognitions?|achievements?",
    ),
    (
        SectionKey::Volunteer,
        r"volunteer(?:ing)?(?:\s+(?:experience|work))?|community\s+(?:service|involvement)",
    ),
];

/// Separator between components of a compound header ("Skills & Tools").
const COMPONENT_SEP: &str = r"(?:\s*[&/,|]\s*|\s+and\s+)";

static SECTION_PATTERNS: LazyLock<Vec<(SectionKey, Regex)>> = LazyLock::new(|| {
    SECTION_PHRASES
        .iter()
        .map(|(key, phrases)| {
            let pattern = format!(
                r"(?i)^(?:{phrases})(?:{COMPONENT_SEP}.+)?$|^.+{COMPONENT_SEP}(?:{phrases})$"
            );
            (*key, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// The line that opened a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedHeader {
    pub key: SectionKey,
    pub line: String,
    pub line_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub sections: SectionMap,
    pub headers: Vec<DetectedHeader>,
}

/// Section key for a header candidate, if the line is one.
pub fn match_header(line: &str) -> Option<SectionKey> {
    let candidate = header_candidate(line)?;
    SECTION_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(candidate))
        .map(|(key, _)| *key)
}

fn header_candidate(line: &str) -> Option<&str> {
    let candidate = line.trim().trim_end_matches(':').trim_end();
    if candidate.is_empty()
        || char_len(candidate) > SECTION_HEADER_MAX_CHARS
        || is_bullet(candidate)
        || candidate.starts_with(|c: char| c.is_ascii_digit())
    {
        return None;
    }
    Some(candidate)
}

/// "Skills: Python, Go" → (Skills, "Python, Go").
fn match_inline_header(line: &str) -> Option<(SectionKey, &str)> {
    let (prefix, rest) = line.split_once(':')?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    match_header(prefix).map(|key| (key, rest))
}

/// Split lines into sections. Lines before the first header are dropped;
/// a section that appears twice keeps accumulating into the same key.
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Segmentation {
    let mut segmentation = Segmentation::default();
    let mut active: Option<SectionKey> = None;
    let mut buffer: Vec<String> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        let (key, first_line) = match match_header(line) {
            Some(key) => (key, None),
            None => match match_inline_header(line) {
                Some((key, rest)) => (key, Some(rest)),
                None => {
                    if active.is_some() {
                        buffer.push(line.to_string());
                    }
                    continue;
                }
            },
        };

        flush(&mut segmentation.sections, active, &mut buffer);
        active = Some(key);
        segmentation.headers.push(DetectedHeader {
            key,
            line: line.to_string(),
            line_index: index,
        });
        if let Some(rest) = first_line {
            buffer.push(rest.to_string());
        }
    }
    flush(&mut segmentation.sections, active, &mut buffer);

    log::debug!(
        "segmented {} header(s) into {} section(s)",
        segmentation.headers.len(),
        segmentation.sections.len()
    );
    segmentation
}

fn flush(sections: &mut SectionMap, key: Option<SectionKey>, buffer: &mut Vec<String>) {
    let Some(key) = key else {
        buffer.clear();
        return;
    };
    if buffer.is_empty() {
        return;
    }
    sections.entry(key).or_default().append(buffer);
}
