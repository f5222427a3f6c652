use super::limits::{char_len, KSA_TITLE_MAX_CHARS};
use super::lines::{without_bullet, EntryState};
use crate::model::KsaEntry;

/// Parse KSA statements: a short title line followed by narrative lines.
///
/// A short line right after a title (no narrative yet) is narrative, not a
/// new title. Narrative lines before the first title are dropped.
pub fn parse_ksas<S: AsRef<str>>(lines: &[S]) -> Vec<KsaEntry> {
    let mut entries = Vec::new();
    let mut state = EntryState::NoActiveEntry;

    for line in lines {
        let text = without_bullet(line.as_ref());
        if text.is_empty() {
            continue;
        }
        let is_title = char_len(text) < KSA_TITLE_MAX_CHARS;

        state = match state {
            EntryState::NoActiveEntry if is_title => EntryState::InEntry(titled(text)),
            EntryState::NoActiveEntry => EntryState::NoActiveEntry,
            EntryState::InEntry(open) if is_title && !open.narrative.is_empty() => {
                entries.push(open);
                EntryState::InEntry(titled(text))
            }
            EntryState::InEntry(mut open) => {
                if !open.narrative.is_empty() {
                    open.narrative.push(' ');
                }
                open.narrative.push_str(text);
                EntryState::InEntry(open)
            }
        };
    }
    entries.extend(state.finish());
    entries
}

fn titled(title: &str) -> KsaEntry {
    KsaEntry {
        title: title.trim_end_matches(':').trim().to_string(),
        narrative: String::new(),
    }
}
