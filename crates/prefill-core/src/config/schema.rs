use crate::parsing::limits::{MAX_LIST_ITEMS, OBJECTIVE_MAX_CHARS, SUMMARY_MAX_CHARS};
use serde::{Deserialize, Serialize};

/// Terms the keyword scan looks for when no skills section was found.
pub const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "Java",
    "SQL",
    "C++",
    "C#",
    "Go",
    "Rust",
    "HTML",
    "CSS",
    "SASS",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "REST",
    "API",
    "GraphQL",
    "Docker",
    "Kubernetes",
    "Agile",
    "Scrum",
    "JIRA",
    "Leadership",
    "Communication",
    "Project Management",
    "Excel",
    "Microsoft Office",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Linux",
    "CI/CD",
    "TDD",
];

/// Hosts never taken as the personal website. A bare name ("x") means
/// "name.com".
pub const DEFAULT_WEBSITE_DENYLIST: &[&str] = &[
    "linkedin.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "youtube.com",
    "instagram.com",
    "tiktok.com",
];

/// Tunable extraction settings, loadable from JSON. Missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub skill_keywords: Vec<String>,
    pub website_denylist: Vec<String>,
    /// Cap on skills and languages.
    pub max_list_items: usize,
    pub summary_max_chars: usize,
    pub objective_max_chars: usize,
    /// Infer skills from the vocabulary when no skills section was parsed.
    pub keyword_scan: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            skill_keywords: DEFAULT_SKILL_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            website_denylist: DEFAULT_WEBSITE_DENYLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_list_items: MAX_LIST_ITEMS,
            summary_max_chars: SUMMARY_MAX_CHARS,
            objective_max_chars: OBJECTIVE_MAX_CHARS,
            keyword_scan: true,
        }
    }
}

/// Per-call switches that do not change what is extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Record an explainability trace.
    pub trace: bool,
    /// Return the normalized text alongside the record.
    pub keep_raw_text: bool,
}
