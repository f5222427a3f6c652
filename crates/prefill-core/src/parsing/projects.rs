use super::contact::{trim_url, URL_RE};
use super::limits::{char_len, PROJECT_NAME_MAX_CHARS};
use super::lines::{extract_after_label, strip_bullet, EntryState};
use crate::model::ProjectEntry;

const TECHNOLOGY_LABELS: &[&str] = &["technologies", "tech stack", "built with", "stack", "tools"];

/// Parse a projects section.
///
/// Boundary heuristic: any non-bulleted line shorter than 100 characters
/// that is not a URL starts a new project, so short description lines do
/// too.
pub fn parse_projects<S: AsRef<str>>(lines: &[S]) -> Vec<ProjectEntry> {
    let mut projects = Vec::new();
    let mut state = EntryState::NoActiveEntry;

    for line in lines {
        let line = line.as_ref();
        let (next, finished) = step(state, line);
        state = next;
        projects.extend(finished);
    }
    projects.extend(state.finish());
    projects
}

fn step(
    state: EntryState<ProjectEntry>,
    line: &str,
) -> (EntryState<ProjectEntry>, Option<ProjectEntry>) {
    let bullet = strip_bullet(line);
    let text = bullet.unwrap_or(line).trim();

    if let Some(list) = extract_after_label(text, TECHNOLOGY_LABELS) {
        if let EntryState::InEntry(mut project) = state {
            project.technologies.extend(
                list.split([',', ';', '|'])
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
            return (EntryState::InEntry(project), None);
        }
        return (state, None);
    }

    let is_url = text.starts_with("http://") || text.starts_with("https://");
    if bullet.is_none() && !is_url && char_len(text) < PROJECT_NAME_MAX_CHARS {
        let project = ProjectEntry {
            name: text.to_string(),
            ..ProjectEntry::default()
        };
        return (EntryState::InEntry(project), state.finish());
    }

    let EntryState::InEntry(mut project) = state else {
        return (EntryState::NoActiveEntry, None);
    };

    if let Some(url) = URL_RE.find(text).filter(|_| is_url) {
        if project.url.is_none() {
            project.url = Some(trim_url(url.as_str()).to_string());
        }
    } else if bullet.is_some() {
        if !text.is_empty() {
            project.highlights.push(text.to_string());
        }
    } else {
        if !project.description.is_empty() {
            project.description.push(' ');
        }
        project.description.push_str(text);
    }
    (EntryState::InEntry(project), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parts() {
        let description = "A distributed job scheduler with exactly-once delivery semantics \
                           and a web dashboard for operators to inspect runs.";
        let lines = [
            "Conveyor",
            description,
            "https://github.com/jane/conveyor",
            "Tech Stack: Rust, Postgres, React",
            "- 2k GitHub stars",
            "- Adopted by three teams",
        ];
        let projects = parse_projects(&lines);
        assert_eq!(projects.len(), 1);

        let p = &projects[0];
        assert_eq!(p.name, "Conveyor");
        assert_eq!(p.description, description);
        assert_eq!(p.url.as_deref(), Some("https://github.com/jane/conveyor"));
        assert_eq!(p.technologies, vec!["Rust", "Postgres", "React"]);
        assert_eq!(p.highlights, vec!["2k GitHub stars", "Adopted by three teams"]);
    }

    #[test]
    fn test_short_line_starts_new_project() {
        let projects = parse_projects(&["Alpha", "Small CLI tool", "Beta"]);
        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Small CLI tool", "Beta"]);
    }

    #[test]
    fn test_leading_bullets_dropped() {
        assert!(parse_projects(&["- highlight without project"]).is_empty());
    }
}
