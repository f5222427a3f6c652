pub mod awards;
pub mod certifications;
pub mod contact;
pub mod education;
pub mod experience;
pub mod fallback;
pub mod keywords;
pub mod ksas;
pub mod limits;
pub mod lines;
pub mod lists;
pub mod normalize;
pub mod projects;
pub mod sections;

use crate::config::ExtractConfig;
use crate::model::{
    AwardEntry, CertificationEntry, EducationEntry, ExperienceEntry, KsaEntry, ProjectEntry,
    SectionKey, SectionMap,
};
use crate::trace::{ExtractionTrace, TraceStepType};

/// Output of the section parsers, before fallback and assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSections {
    pub summary_lines: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub ksas: Vec<KsaEntry>,
    pub languages: Vec<String>,
    pub volunteer: Vec<ExperienceEntry>,
    pub awards: Vec<AwardEntry>,
}

/// Run the parser for every section present in the map.
pub fn parse_sections(
    sections: &SectionMap,
    config: &ExtractConfig,
    trace: &mut ExtractionTrace,
) -> ParsedSections {
    let mut parsed = ParsedSections::default();

    for (key, lines) in sections {
        let produced = match key {
            SectionKey::Experience => {
                parsed.experience = experience::parse_experience(lines);
                parsed.experience.len()
            }
            SectionKey::Education => {
                parsed.education = education::parse_education(lines);
                parsed.education.len()
            }
            SectionKey::Skills => {
                parsed.skills = lists::parse_list(lines, config.max_list_items);
                parsed.skills.len()
            }
            SectionKey::Summary => {
                parsed.summary_lines = lines.clone();
                lines.len()
            }
            SectionKey::Certifications => {
                parsed.certifications = certifications::parse_certifications(lines);
                parsed.certifications.len()
            }
            SectionKey::Projects => {
                parsed.projects = projects::parse_projects(lines);
                parsed.projects.len()
            }
            SectionKey::Ksas => {
                parsed.ksas = ksas::parse_ksas(lines);
                parsed.ksas.len()
            }
            SectionKey::Languages => {
                parsed.languages = lists::parse_list(lines, config.max_list_items);
                parsed.languages.len()
            }
            SectionKey::Awards => {
                parsed.awards = awards::parse_awards(lines);
                parsed.awards.len()
            }
            SectionKey::Volunteer => {
                parsed.volunteer = experience::parse_experience(lines);
                parsed.volunteer.len()
            }
        };

        let unit = if *key == SectionKey::Summary {
            "line(s)"
        } else {
            "item(s)"
        };
        trace.step(
            TraceStepType::ParseSection,
            format!(
                "{key}: {} line(s) parsed into {produced} {unit}",
                lines.len()
            ),
        );
    }

    parsed
}
