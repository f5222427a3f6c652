use crate::config::ExtractConfig;
use crate::model::ResumeDraft;
use crate::parsing::contact::ContactInfo;
use crate::parsing::limits::truncate_chars;
use crate::parsing::ParsedSections;

/// Merge contact details and parsed sections into a complete record.
///
/// Every field starts at its default and is only replaced by a non-empty
/// value.
pub fn assemble(
    contact: ContactInfo,
    parsed: ParsedSections,
    config: &ExtractConfig,
) -> ResumeDraft {
    let mut resume = ResumeDraft::default();

    set_if_present(&mut resume.full_name, contact.full_name);
    set_if_present(&mut resume.email, contact.email);
    set_if_present(&mut resume.phone, contact.phone);
    set_if_present(&mut resume.address, contact.address);
    set_if_present(&mut resume.city, contact.city);
    set_if_present(&mut resume.state, contact.state);
    set_if_present(&mut resume.zip, contact.zip);
    set_if_present(&mut resume.linkedin, contact.linkedin);
    set_if_present(&mut resume.website, contact.website);

    let summary = parsed.summary_lines.join(" ");
    let summary = summary.trim();
    if !summary.is_empty() {
        resume.summary = truncate_chars(summary, config.summary_max_chars).to_string();
        if resume.objective.is_empty() {
            resume.objective = truncate_chars(summary, config.objective_max_chars).to_string();
        }
    }

    resume.experience = parsed.experience;
    resume.education = parsed.education;
    resume.skills = parsed.skills;
    resume.certifications = parsed.certifications;
    resume.projects = parsed.projects;
    resume.ksas = parsed.ksas;
    resume.languages = parsed.languages;
    resume.volunteer = parsed.volunteer;
    resume.awards = parsed.awards;

    resume
}

fn set_if_present(field: &mut String, value: String) {
    if !value.is_empty() {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_objective_caps() {
        let parsed = ParsedSections {
            summary_lines: vec!["x".repeat(1500), "y".repeat(1500)],
            ..ParsedSections::default()
        };
        let resume = assemble(ContactInfo::default(), parsed, &ExtractConfig::default());
        assert_eq!(resume.summary.chars().count(), 2000);
        assert_eq!(resume.objective.chars().count(), 500);
        assert!(resume.objective.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_empty_inputs_keep_defaults() {
        let resume = assemble(
            ContactInfo::default(),
            ParsedSections::default(),
            &ExtractConfig::default(),
        );
        assert_eq!(resume, ResumeDraft::default());
    }

    #[test]
    fn test_contact_fields_copied() {
        let contact = ContactInfo {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            ..ContactInfo::default()
        };
        let resume = assemble(contact, ParsedSections::default(), &ExtractConfig::default());
        assert_eq!(resume.full_name, "Jane Doe");
        assert_eq!(resume.email, "jane@example.com");
        assert_eq!(resume.country, "");
    }
}
