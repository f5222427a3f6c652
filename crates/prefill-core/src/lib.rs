pub mod assemble;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod trace;

pub use parsing::normalize;

use config::{ExtractConfig, ExtractOptions};
use extraction::{DecodedContent, DocumentDecoder};
use model::ResumeDraft;
use parsing::contact::extract_contact;
use parsing::fallback::fallback_extract;
use parsing::keywords::scan_keywords;
use parsing::sections::segment;
use serde::{Deserialize, Serialize};
use trace::{build_section_traces, ExtractionTrace, TraceSeverity, TraceStepType};

pub const WARN_NO_TEXT: &str = "no text content found in document";
pub const WARN_NO_SECTIONS: &str = "no section headers detected";
pub const WARN_EXPERIENCE_FALLBACK: &str = "experience recovered by fallback extraction";
pub const WARN_EDUCATION_FALLBACK: &str = "education recovered by fallback extraction";
pub const WARN_SKILLS_KEYWORDS: &str = "skills inferred from keyword scan";
pub const WARN_NO_EMAIL: &str = "no email address detected";

/// Result of one extraction. `success` is false only when the document
/// could not be decoded; in that case the record is the default one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub success: bool,
    pub resume: ResumeDraft,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<ExtractionTrace>,
}

impl Extraction {
    /// A decode failure: one message, no partial data.
    pub fn failed(error: impl Into<String>) -> Self {
        Extraction {
            success: false,
            resume: ResumeDraft::default(),
            warnings: Vec::new(),
            error: Some(error.into()),
            raw_text: None,
            trace: None,
        }
    }
}

/// Main API entry point: extract a résumé draft with default settings.
pub fn extract(content: &DecodedContent) -> Extraction {
    extract_with_config(content, &ExtractConfig::default(), &ExtractOptions::default())
}

/// Decode a document with `decoder`, then extract. A decode error is
/// reported as `success = false`, never as a partial record.
pub fn extract_document(
    bytes: &[u8],
    decoder: &dyn DocumentDecoder,
    config: &ExtractConfig,
    options: &ExtractOptions,
) -> Extraction {
    match decoder.decode(bytes) {
        Ok(content) => extract_with_config(&content, config, options),
        Err(e) => {
            log::warn!("{} decoder failed: {e}", decoder.backend_name());
            Extraction::failed(e.to_string())
        }
    }
}

/// Run the full pipeline: normalize, contact, segment, section parsers,
/// fallback, keyword scan, assemble. Never fails.
pub fn extract_with_config(
    content: &DecodedContent,
    config: &ExtractConfig,
    options: &ExtractOptions,
) -> Extraction {
    let mut trace = ExtractionTrace::default();
    let mut warnings = Vec::new();

    let lines = normalize::normalize(content);
    trace.step(
        TraceStepType::Normalize,
        format!("{} non-empty line(s)", lines.len()),
    );

    if lines.is_empty() {
        warn(&mut warnings, &mut trace, WARN_NO_TEXT, TraceSeverity::Important);
        return finish(ResumeDraft::default(), warnings, &lines, trace, options);
    }

    let contact = extract_contact(&lines, &config.website_denylist);
    trace.step(TraceStepType::Contact, describe_contact(&contact));

    let segmentation = segment(&lines);
    trace.sections = build_section_traces(&segmentation);
    trace.step(
        TraceStepType::Segment,
        format!(
            "{} header(s), sections: {}",
            segmentation.headers.len(),
            segmentation
                .sections
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    );
    if segmentation.headers.is_empty() {
        warn(&mut warnings, &mut trace, WARN_NO_SECTIONS, TraceSeverity::Important);
    }

    let mut parsed = parsing::parse_sections(&segmentation.sections, config, &mut trace);

    if parsed.experience.is_empty() || parsed.education.is_empty() {
        let recovered = fallback_extract(&lines, segmentation.headers.is_empty());
        trace.step(
            TraceStepType::Fallback,
            format!(
                "rescan found {} experience and {} education entr(ies)",
                recovered.experience.len(),
                recovered.education.len()
            ),
        );
        if parsed.experience.is_empty() && !recovered.experience.is_empty() {
            parsed.experience = recovered.experience;
            warn(&mut warnings, &mut trace, WARN_EXPERIENCE_FALLBACK, TraceSeverity::Info);
        }
        if parsed.education.is_empty() && !recovered.education.is_empty() {
            parsed.education = recovered.education;
            warn(&mut warnings, &mut trace, WARN_EDUCATION_FALLBACK, TraceSeverity::Info);
        }
    }

    if parsed.skills.is_empty() && config.keyword_scan {
        let found = scan_keywords(
            &lines.join("\n"),
            &config.skill_keywords,
            config.max_list_items,
        );
        trace.step(
            TraceStepType::KeywordScan,
            format!("{} vocabulary term(s) found", found.len()),
        );
        if !found.is_empty() {
            parsed.skills = found;
            warn(&mut warnings, &mut trace, WARN_SKILLS_KEYWORDS, TraceSeverity::Info);
        }
    }

    if contact.email.is_empty() {
        warn(&mut warnings, &mut trace, WARN_NO_EMAIL, TraceSeverity::Info);
    }

    let resume = assemble::assemble(contact, parsed, config);
    trace.step(
        TraceStepType::Assemble,
        format!(
            "{} experience, {} education, {} skill(s)",
            resume.experience.len(),
            resume.education.len(),
            resume.skills.len()
        ),
    );

    finish(resume, warnings, &lines, trace, options)
}

fn warn(
    warnings: &mut Vec<String>,
    trace: &mut ExtractionTrace,
    message: &str,
    severity: TraceSeverity,
) {
    log::debug!("{message}");
    warnings.push(message.to_string());
    trace.warn(message, severity);
}

fn describe_contact(contact: &parsing::contact::ContactInfo) -> String {
    let found: Vec<&str> = [
        ("name", &contact.full_name),
        ("email", &contact.email),
        ("phone", &contact.phone),
        ("address", &contact.address),
        ("city", &contact.city),
        ("linkedin", &contact.linkedin),
        ("website", &contact.website),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if found.is_empty() {
        "no contact fields found".to_string()
    } else {
        format!("found {}", found.join(", "))
    }
}

fn finish(
    resume: ResumeDraft,
    warnings: Vec<String>,
    lines: &[String],
    trace: ExtractionTrace,
    options: &ExtractOptions,
) -> Extraction {
    Extraction {
        success: true,
        resume,
        warnings,
        error: None,
        raw_text: options.keep_raw_text.then(|| lines.join("\n")),
        trace: options.trace.then_some(trace),
    }
}
