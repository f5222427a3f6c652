use super::lines::{classify_experience_line, DateRange, EntryField, EntryState, LineKind};
use crate::model::ExperienceEntry;

/// Parse an experience (or volunteer) section into entries.
pub fn parse_experience<S: AsRef<str>>(lines: &[S]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut state = EntryState::NoActiveEntry;

    for line in lines {
        let (next, finished) = step(state, classify_experience_line(line.as_ref()));
        state = next;
        entries.extend(finished);
    }
    entries.extend(state.finish());

    log::debug!("experience parser produced {} entr(ies)", entries.len());
    entries
}

/// One transition. Returns the next state and an entry closed by this line.
pub fn step(
    state: EntryState<ExperienceEntry>,
    kind: LineKind,
) -> (EntryState<ExperienceEntry>, Option<ExperienceEntry>) {
    match (state, kind) {
        (state, LineKind::Header { title, employer, dates }) => {
            let mut entry = ExperienceEntry::new(title, employer);
            if let Some(range) = dates {
                apply_dates(&mut entry, range);
            }
            (EntryState::InEntry(entry), state.finish())
        }
        (EntryState::NoActiveEntry, _) => (EntryState::NoActiveEntry, None),
        (EntryState::InEntry(mut entry), kind) => {
            match kind {
                LineKind::Bullet(text) => entry.accomplishments.push(text),
                LineKind::DateRange(range) => apply_dates(&mut entry, range),
                LineKind::Fields(fields) => {
                    for field in fields {
                        apply_field(&mut entry, field);
                    }
                }
                LineKind::Location(location) => {
                    if entry.location.is_none() {
                        entry.location = Some(location);
                    }
                }
                LineKind::FreeText(text) => append_summary(&mut entry, &text),
                LineKind::Header { .. } | LineKind::Unrecognized => {}
            }
            (EntryState::InEntry(entry), None)
        }
    }
}

pub(crate) fn apply_dates(entry: &mut ExperienceEntry, range: DateRange) {
    if let Some(start) = range.start {
        entry.start = Some(start);
    }
    if range.present {
        entry.present = true;
    } else if let Some(end) = range.end {
        entry.end = Some(end);
    }
}

fn apply_field(entry: &mut ExperienceEntry, field: EntryField) {
    match field {
        EntryField::HoursPerWeek(v) => entry.hours_per_week = Some(v),
        EntryField::Salary(v) => entry.salary = Some(v),
        EntryField::Series(v) => entry.series = Some(v),
        EntryField::Grade(v) => entry.grade = Some(v),
        EntryField::Supervisor { name, phone } => {
            entry.supervisor = Some(name);
            if let Some(phone) = phone {
                entry.supervisor_phone = Some(phone);
            }
        }
        EntryField::SupervisorPhone(v) => entry.supervisor_phone = Some(v),
        EntryField::MayContact(v) => entry.may_contact = Some(v),
    }
}

fn append_summary(entry: &mut ExperienceEntry, text: &str) {
    match entry.summary.as_mut() {
        Some(summary) => {
            summary.push(' ');
            summary.push_str(text);
        }
        None => entry.summary = Some(text.to_string()),
    }
}
