use crate::model::SectionKey;
use crate::parsing::sections::Segmentation;
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    Normalize,
    Contact,
    Segment,
    ParseSection,
    Fallback,
    KeywordScan,
    Assemble,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

/// A detected section header and how many lines the section received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTrace {
    pub key: SectionKey,
    pub header: String,
    pub line_index: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceWarning {
    pub message: String,
    pub severity: TraceSeverity,
}

/// Which rule produced which part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionTrace {
    pub trace_schema_version: String,
    pub sections: Vec<SectionTrace>,
    pub steps: Vec<TraceStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for ExtractionTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            sections: Vec::new(),
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ExtractionTrace {
    pub fn step(&mut self, step_type: TraceStepType, message: impl Into<String>) {
        self.steps.push(TraceStep {
            step_type,
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>, severity: TraceSeverity) {
        self.warnings.push(TraceWarning {
            message: message.into(),
            severity,
        });
    }

    /// Steps of one type, in order.
    pub fn steps_of(&self, step_type: TraceStepType) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(move |s| s.step_type == step_type)
    }
}

/// One entry per detected header. Line counts are per section key, so a
/// section that appears twice reports its combined count on both headers.
pub fn build_section_traces(segmentation: &Segmentation) -> Vec<SectionTrace> {
    segmentation
        .headers
        .iter()
        .map(|h| SectionTrace {
            key: h.key,
            header: h.line.clone(),
            line_index: h.line_index,
            line_count: segmentation
                .sections
                .get(&h.key)
                .map(Vec::len)
                .unwrap_or(0),
        })
        .collect()
}
