use crate::extraction::{DecodedContent, PageContent, TextRun};
use scraper::{ElementRef, Html};

/// Glyphs converters emit for list bullets. All are rewritten to "•".
const BULLET_GLYPHS: &[char] = &[
    '•', '●', '○', '◦', '▪', '▫', '‣', '·', '■', '□', '➢', '►', '▸', '◆', '❖', '✓',
];

/// Elements whose boundaries end a line.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "td", "th", "br", "ul", "ol",
    "table", "section", "article", "header", "footer", "blockquote", "pre", "dt", "dd", "hr",
];

/// Elements whose text is never résumé content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "head", "noscript", "template"];

/// Turn converter output into ordered, trimmed, non-empty lines.
///
/// Never fails: empty input gives no lines.
pub fn normalize(content: &DecodedContent) -> Vec<String> {
    let lines = match content {
        DecodedContent::Text(text) => lines_from_text(text),
        DecodedContent::Html(html) => lines_from_html(html),
        DecodedContent::Pages(pages) => lines_from_pages(pages),
        DecodedContent::Runs(runs) => lines_from_runs(runs),
    };
    log::debug!("normalized content into {} line(s)", lines.len());
    lines
}

pub fn lines_from_text(text: &str) -> Vec<String> {
    collect_lines([text])
}

pub fn lines_from_pages(pages: &[PageContent]) -> Vec<String> {
    collect_lines(pages.iter().flat_map(|p| p.lines.iter()))
}

/// Join text runs with single spaces, breaking only on `has_eol`.
pub fn lines_from_runs(runs: &[TextRun]) -> Vec<String> {
    let mut raw = Vec::new();
    let mut current = String::new();

    for run in runs {
        if !current.is_empty() && !run.text.is_empty() {
            current.push(' ');
        }
        current.push_str(&run.text);
        if run.has_eol {
            raw.push(std::mem::take(&mut current));
        }
    }
    raw.push(current);

    collect_lines(raw)
}

/// Lines from HTML markup. Block elements end a line and list items keep
/// a leading bullet. The parser recovers from malformed markup the way a
/// browser does.
pub fn lines_from_html(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut blocks = Vec::new();
    let mut current = String::new();
    walk_element(document.root_element(), &mut current, &mut blocks);
    flush_block(&mut current, &mut blocks);
    collect_lines(blocks)
}

fn walk_element(element: ElementRef<'_>, current: &mut String, blocks: &mut Vec<String>) {
    let name = element.value().name();
    if SKIPPED_TAGS.contains(&name) {
        return;
    }
    let is_block = BLOCK_TAGS.contains(&name);
    if is_block {
        flush_block(current, blocks);
    }
    if name == "li" {
        current.push_str("• ");
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            current.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            walk_element(child, current, blocks);
        }
    }

    if is_block {
        flush_block(current, blocks);
    }
}

fn flush_block(current: &mut String, blocks: &mut Vec<String>) {
    if !current.trim().is_empty() {
        blocks.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Clean raw line candidates. A bullet glyph left alone on its line is
/// merged into the line that follows it.
fn collect_lines<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = Vec::new();
    let mut pending_bullet = false;

    for chunk in raw {
        for piece in chunk.as_ref().split(|c| matches!(c, '\n' | '\r' | '\x0c')) {
            let Some(line) = clean_line(piece) else {
                continue;
            };
            if is_bare_bullet(&line) {
                pending_bullet = true;
                continue;
            }
            if pending_bullet && !line.starts_with('•') {
                lines.push(format!("• {line}"));
            } else {
                lines.push(line);
            }
            pending_bullet = false;
        }
    }

    lines
}

/// Collapse internal whitespace, trim, and standardize a leading bullet.
pub fn clean_line(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    let mut chars = collapsed.chars();
    match chars.next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => {
            let rest = chars.as_str().trim_start();
            if rest.is_empty() {
                Some("•".to_string())
            } else {
                Some(format!("• {rest}"))
            }
        }
        _ => Some(collapsed),
    }
}

fn is_bare_bullet(line: &str) -> bool {
    matches!(line, "•" | "-" | "*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lines_trimmed_and_collapsed() {
        let lines = lines_from_text("  Jane   Doe \r\n\n\n\tSoftware  Engineer\n   \n");
        assert_eq!(lines, vec!["Jane Doe", "Software Engineer"]);
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(lines_from_text("").is_empty());
        assert!(normalize(&DecodedContent::Runs(vec![])).is_empty());
        assert!(lines_from_html("<p> </p>").is_empty());
    }

    #[test]
    fn test_bullet_glyphs_standardized() {
        assert_eq!(clean_line("●  Led migration").as_deref(), Some("• Led migration"));
        assert_eq!(clean_line("▪Reduced costs").as_deref(), Some("• Reduced costs"));
        assert_eq!(clean_line("- dash stays").as_deref(), Some("- dash stays"));
    }

    #[test]
    fn test_bare_bullet_merged_with_next_line() {
        let lines = lines_from_text("Experience\n•\nLed migration\n");
        assert_eq!(lines, vec!["Experience", "• Led migration"]);
    }

    #[test]
    fn test_html_blocks_become_lines() {
        let html = "<h1>Jane Doe</h1><p>Engineer at <strong>Acme</strong></p>\
                    <ul><li>Led migration</li><li>Cut costs&nbsp;by 20%</li></ul>\
                    <p>R&amp;D<br/>Team</p>";
        let lines = lines_from_html(html);
        assert_eq!(
            lines,
            vec![
                "Jane Doe",
                "Engineer at Acme",
                "• Led migration",
                "• Cut costs by 20%",
                "R&D",
                "Team",
            ]
        );
    }

    #[test]
    fn test_html_skips_style_blocks() {
        let lines = lines_from_html("<style>p { color: red }</style><p>Jane</p>");
        assert_eq!(lines, vec!["Jane"]);
    }

    #[test]
    fn test_malformed_html_recovered() {
        let lines = lines_from_html("<p>Skills<p>Rust &amp; Go</div><li>Kotlin");
        assert_eq!(lines, vec!["Skills", "Rust & Go", "• Kotlin"]);
    }

    #[test]
    fn test_html_named_and_numeric_entities() {
        let lines =
            lines_from_html("<p>Ren&eacute; Dupont</p><p>A&#8211;B &#x2022; C&hellip;</p>");
        assert_eq!(lines, vec!["René Dupont", "A–B • C…"]);
    }

    #[test]
    fn test_runs_break_only_on_eol() {
        let runs = vec![
            TextRun::new("Software", false),
            TextRun::new("Engineer", true),
            TextRun::new("Acme", false),
            TextRun::new("Inc.", true),
            TextRun::new("", true),
        ];
        assert_eq!(lines_from_runs(&runs), vec!["Software Engineer", "Acme Inc."]);
    }

    #[test]
    fn test_pages_flattened_in_order() {
        let pages = vec![
            PageContent {
                page_number: 1,
                lines: vec!["Jane Doe".into(), "".into()],
            },
            PageContent {
                page_number: 2,
                lines: vec!["  Education ".into()],
            },
        ];
        assert_eq!(lines_from_pages(&pages), vec!["Jane Doe", "Education"]);
    }
}
