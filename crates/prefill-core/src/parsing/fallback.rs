//! Coarse recovery of experience/education when section parsing found none.

use super::education::{open_entry, parse_education, split_degree_institution};
use super::experience::{apply_dates, parse_experience};
use super::lines::{classify_dated, is_bullet, split_title_employer, DateRange, DatedLine};
use crate::model::{EducationEntry, ExperienceEntry};
use regex::Regex;
use std::sync::LazyLock;

static FALLBACK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(experience|work|employment|education|academic|skills|summary|objective|certifications|projects)\s*:?$").unwrap()
});
static SCHOOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:bachelor|master|associate|diploma|university|college|school|institute|mba|ph\.?\s?d)|\b[BM]\.\s?[SA]\.").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Experience,
    Education,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackResult {
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

/// Rescan every line with a reduced header vocabulary.
///
/// Lines under an experience/education header go through the regular
/// parsers. With `loose` set (no section headers were detected), a header
/// line elsewhere that carries its own dates, or is directly followed by a
/// date line, is recovered as a single entry.
pub fn fallback_extract<S: AsRef<str>>(lines: &[S], loose: bool) -> FallbackResult {
    let mut result = FallbackResult::default();
    let mut block: Option<Block> = None;
    let mut buffer: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].as_ref();
        i += 1;

        if let Some(caps) = FALLBACK_HEADER_RE.captures(line) {
            flush(&mut result, block, &mut buffer);
            block = Some(match caps[1].to_lowercase().as_str() {
                "experience" | "work" | "employment" => Block::Experience,
                "education" | "academic" => Block::Education,
                _ => Block::Other,
            });
            continue;
        }

        match block {
            Some(Block::Experience) | Some(Block::Education) => buffer.push(line),
            Some(Block::Other) | None if loose => {
                let next = lines.get(i).map(AsRef::as_ref);
                if let Some((header, dates, consumed_next)) = loose_entry(line, next) {
                    recover(&mut result, &header, dates);
                    if consumed_next {
                        i += 1;
                    }
                }
            }
            Some(Block::Other) | None => {}
        }
    }
    flush(&mut result, block, &mut buffer);

    log::debug!(
        "fallback recovered {} experience and {} education entr(ies)",
        result.experience.len(),
        result.education.len()
    );
    result
}

fn flush(result: &mut FallbackResult, block: Option<Block>, buffer: &mut Vec<&str>) {
    match block {
        Some(Block::Experience) => result
            .experience
            .extend(parse_experience(buffer.as_slice())),
        Some(Block::Education) => result
            .education
            .extend(parse_education(buffer.as_slice())),
        _ => {}
    }
    buffer.clear();
}

/// A header line carrying dates, or a header line followed by a pure date
/// line. Returns the header text, its dates and whether `next` was used.
fn loose_entry(line: &str, next: Option<&str>) -> Option<(String, DateRange, bool)> {
    if is_bullet(line) {
        return None;
    }
    match classify_dated(line) {
        Some(DatedLine::WithText(rest, dates)) => {
            split_title_employer(&rest)?;
            Some((rest, dates, false))
        }
        Some(DatedLine::DateOnly(_)) => None,
        None => {
            split_title_employer(line)?;
            match next.and_then(classify_dated) {
                Some(DatedLine::DateOnly(dates)) => Some((line.to_string(), dates, true)),
                _ => None,
            }
        }
    }
}

fn recover(result: &mut FallbackResult, header: &str, dates: DateRange) {
    if SCHOOL_RE.is_match(header) {
        if let Some((degree, institution, _)) = split_degree_institution(header) {
            result
                .education
                .push(open_entry(degree, institution, Some(dates)));
        }
    } else if let Some((title, employer)) = split_title_employer(header) {
        let mut entry = ExperienceEntry::new(title, employer);
        apply_dates(&mut entry, dates);
        result.experience.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_blocks_use_section_parsers() {
        let lines = [
            "Jane Doe",
            "Work:",
            "Engineer at Acme",
            "2019 – 2021",
            "- Shipped things",
            "Academic",
            "B.S. Physics, State University",
        ];
        let result = fallback_extract(&lines, true);
        assert_eq!(result.experience.len(), 1);
        assert_eq!(result.experience[0].accomplishments, vec!["Shipped things"]);
        assert_eq!(result.education.len(), 1);
        assert_eq!(result.education[0].institution, "State University");
    }

    #[test]
    fn test_loose_header_followed_by_dates() {
        let lines = [
            "Jane Doe",
            "jane@example.com",
            "Data Analyst at Initech",
            "2016 – 2018",
            "Bachelor of Arts, Reed College",
            "2012 – 2016",
        ];
        let result = fallback_extract(&lines, true);
        assert_eq!(result.experience.len(), 1);
        assert_eq!(result.experience[0].title, "Data Analyst");
        assert_eq!(result.experience[0].end.as_deref(), Some("2018"));
        assert_eq!(result.education.len(), 1);
        assert_eq!(result.education[0].degree, "Bachelor of Arts");
        assert_eq!(result.education[0].start.as_deref(), Some("2012"));
    }

    #[test]
    fn test_loose_header_with_inline_dates() {
        let result = fallback_extract(&["Support Lead | Hooli (2020 – Present)"], true);
        assert_eq!(result.experience.len(), 1);
        assert_eq!(result.experience[0].employer, "Hooli");
        assert!(result.experience[0].present);
    }

    #[test]
    fn test_loose_recovery_off_when_sections_found() {
        let lines = [
            "Jane Doe",
            "Summary",
            "Builder of schedulers.",
            "Projects",
            "Conveyor | Open source scheduler",
            "2021 – 2022",
        ];
        assert_eq!(fallback_extract(&lines, false), FallbackResult::default());

        let loose = fallback_extract(&lines, true);
        assert_eq!(loose.experience.len(), 1);
    }

    #[test]
    fn test_vocabulary_blocks_parsed_without_loose() {
        let result = fallback_extract(&["Employment", "Engineer at Acme", "2019 – 2021"], false);
        assert_eq!(result.experience.len(), 1);
        assert_eq!(result.experience[0].employer, "Acme");
    }

    #[test]
    fn test_nothing_to_recover() {
        let result = fallback_extract(&["Jane Doe", "Likes hiking and chess"], true);
        assert_eq!(result, FallbackResult::default());
    }
}
