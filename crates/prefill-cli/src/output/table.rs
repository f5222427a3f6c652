use prefill_core::model::{EducationEntry, ExperienceEntry, ResumeDraft};
use prefill_core::trace::{ExtractionTrace, TraceSeverity};
use prefill_core::Extraction;
use std::fmt::Write;

const LABEL_WIDTH: usize = 10;

/// Human-readable rendering of an extraction, with the trace appended
/// when one was recorded.
pub fn format_extraction(extraction: &Extraction) -> String {
    let mut out = format_resume(&extraction.resume);

    if !extraction.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &extraction.warnings {
            let _ = writeln!(out, "  - {w}");
        }
    }

    if let Some(ref trace) = extraction.trace {
        out.push('\n');
        out.push_str(&format_trace(trace));
    }

    out
}

pub fn format_resume(resume: &ResumeDraft) -> String {
    let mut out = String::new();

    let contact = [
        ("Name", &resume.full_name),
        ("Email", &resume.email),
        ("Phone", &resume.phone),
        ("Address", &resume.address),
        ("City", &resume.city),
        ("State", &resume.state),
        ("Zip", &resume.zip),
        ("LinkedIn", &resume.linkedin),
        ("Website", &resume.website),
    ];
    let mut any_contact = false;
    for (label, value) in contact {
        if !value.is_empty() {
            let _ = writeln!(out, "{label:<width$}{value}", width = LABEL_WIDTH);
            any_contact = true;
        }
    }
    if !any_contact {
        out.push_str("(no contact details found)\n");
    }

    if !resume.summary.is_empty() {
        let _ = writeln!(out, "\n=== Summary ===\n\n  {}", resume.summary);
    }

    if !resume.experience.is_empty() {
        out.push_str("\n=== Experience ===\n");
        for e in &resume.experience {
            write_experience(&mut out, e);
        }
    }

    if !resume.education.is_empty() {
        out.push_str("\n=== Education ===\n");
        for e in &resume.education {
            write_education(&mut out, e);
        }
    }

    write_list(&mut out, "Skills", &resume.skills);

    if !resume.certifications.is_empty() {
        out.push_str("\n=== Certifications ===\n\n");
        for c in &resume.certifications {
            let mut line = c.name.clone();
            if let Some(ref issuer) = c.issuer {
                let _ = write!(line, " ({issuer})");
            }
            if let Some(ref date) = c.date {
                let _ = write!(line, ", {date}");
            }
            let _ = writeln!(out, "  {line}");
        }
    }

    if !resume.projects.is_empty() {
        out.push_str("\n=== Projects ===\n");
        for p in &resume.projects {
            let _ = writeln!(out, "\n  {}", p.name);
            if !p.description.is_empty() {
                let _ = writeln!(out, "    {}", p.description);
            }
            if !p.technologies.is_empty() {
                let _ = writeln!(out, "    Technologies: {}", p.technologies.join(", "));
            }
            for h in &p.highlights {
                let _ = writeln!(out, "    - {h}");
            }
        }
    }

    if !resume.ksas.is_empty() {
        out.push_str("\n=== KSAs ===\n");
        for k in &resume.ksas {
            let _ = writeln!(out, "\n  {}", k.title);
            if !k.narrative.is_empty() {
                let _ = writeln!(out, "    {}", k.narrative);
            }
        }
    }

    write_list(&mut out, "Languages", &resume.languages);

    if !resume.volunteer.is_empty() {
        out.push_str("\n=== Volunteer ===\n");
        for e in &resume.volunteer {
            write_experience(&mut out, e);
        }
    }

    if !resume.awards.is_empty() {
        out.push_str("\n=== Awards ===\n\n");
        for a in &resume.awards {
            match a.date {
                Some(ref date) => {
                    let _ = writeln!(out, "  {} ({date})", a.title);
                }
                None => {
                    let _ = writeln!(out, "  {}", a.title);
                }
            }
        }
    }

    out
}

pub fn format_trace(trace: &ExtractionTrace) -> String {
    let mut out = String::from("=== Explain ===\n\n");

    if trace.sections.is_empty() {
        out.push_str("  No section headers detected.\n");
    } else {
        for s in &trace.sections {
            let _ = writeln!(
                out,
                "  line {:>4}  {:<14} \"{}\" ({} line(s))",
                s.line_index + 1,
                s.key.as_str(),
                s.header,
                s.line_count
            );
        }
    }

    out.push('\n');
    for (i, step) in trace.steps.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. [{:?}] {}", i + 1, step.step_type, step.message);
    }

    for w in &trace.warnings {
        let marker = match w.severity {
            TraceSeverity::Important => "!",
            TraceSeverity::Info => "i",
        };
        let _ = writeln!(out, "  ({marker}) {}", w.message);
    }

    out
}

fn write_experience(out: &mut String, e: &ExperienceEntry) {
    let _ = write!(out, "\n  {}", e.title);
    if !e.employer.is_empty() {
        let _ = write!(out, " at {}", e.employer);
    }
    out.push('\n');

    let dates = format_dates(e.start.as_deref(), e.end.as_deref(), e.present);
    if !dates.is_empty() {
        let _ = writeln!(out, "    {dates}");
    }
    if let Some(ref location) = e.location {
        let _ = writeln!(out, "    {location}");
    }
    for a in &e.accomplishments {
        let _ = writeln!(out, "    - {a}");
    }
}

fn write_education(out: &mut String, e: &EducationEntry) {
    let _ = write!(out, "\n  {}", e.degree);
    if !e.institution.is_empty() {
        let _ = write!(out, ", {}", e.institution);
    }
    out.push('\n');

    let dates = format_dates(e.start.as_deref(), e.end.as_deref(), e.present);
    if !dates.is_empty() {
        let _ = writeln!(out, "    {dates}");
    }
    if let Some(ref gpa) = e.gpa {
        let _ = writeln!(out, "    GPA {gpa}");
    }
    if !e.honors.is_empty() {
        let _ = writeln!(out, "    Honors: {}", e.honors.join(", "));
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "\n=== {title} ===\n\n  {}", items.join(", "));
    }
}

fn format_dates(start: Option<&str>, end: Option<&str>, present: bool) -> String {
    let end = if present { Some("Present") } else { end };
    match (start, end) {
        (Some(s), Some(e)) => format!("{s} – {e}"),
        (Some(s), None) => s.to_string(),
        (None, Some(e)) => e.to_string(),
        (None, None) => String::new(),
    }
}
