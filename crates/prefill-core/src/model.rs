use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Résumé category a section header maps to.
///
/// The derived `Ord` follows declaration order, which is also the
/// precedence used when a header line could belong to several categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Experience,
    Education,
    Skills,
    Summary,
    Certifications,
    Projects,
    Ksas,
    Languages,
    Awards,
    Volunteer,
}

impl SectionKey {
    pub const ALL: [SectionKey; 10] = [
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Summary,
        SectionKey::Certifications,
        SectionKey::Projects,
        SectionKey::Ksas,
        SectionKey::Languages,
        SectionKey::Awards,
        SectionKey::Volunteer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Summary => "summary",
            SectionKey::Certifications => "certifications",
            SectionKey::Projects => "projects",
            SectionKey::Ksas => "ksas",
            SectionKey::Languages => "languages",
            SectionKey::Awards => "awards",
            SectionKey::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lines bucketed by section. A key is present only when it received lines.
pub type SectionMap = BTreeMap<SectionKey, Vec<String>>;

/// One position held (also used for volunteer roles).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub employer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub may_contact: Option<bool>,
    #[serde(default)]
    pub accomplishments: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ExperienceEntry {
    pub fn new(title: impl Into<String>, employer: impl Into<String>) -> Self {
        ExperienceEntry {
            title: title.into(),
            employer: employer.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default)]
    pub present: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default)]
    pub honors: Vec<String>,
}

impl EducationEntry {
    pub fn new(degree: impl Into<String>, institution: impl Into<String>) -> Self {
        EducationEntry {
            degree: degree.into(),
            institution: institution.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Knowledge, skills and abilities statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KsaEntry {
    pub title: String,
    pub narrative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// The full pre-filled record. Every field is always present; scalars
/// default to the empty string and lists to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
    pub objective: String,
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
