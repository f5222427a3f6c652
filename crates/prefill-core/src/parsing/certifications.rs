use super::contact::{trim_url, URL_RE};
use super::lines::{first_year, split_trailing_year, strip_years, trim_separators, without_bullet};
use crate::model::CertificationEntry;

/// Separators between a certification name and its details, by priority.
const SEPARATORS: [&str; 3] = [" – ", " | ", " ("];

/// One certification per line: "Name – Issuer (2021)".
pub fn parse_certifications<S: AsRef<str>>(lines: &[S]) -> Vec<CertificationEntry> {
    lines
        .iter()
        .filter_map(|line| parse_certification(without_bullet(line.as_ref())))
        .collect()
}

fn parse_certification(line: &str) -> Option<CertificationEntry> {
    if line.is_empty() {
        return None;
    }

    let split = SEPARATORS
        .iter()
        .find_map(|sep| line.find(sep).map(|idx| (&line[..idx], &line[idx + sep.len()..])));

    let Some((name, remainder)) = split else {
        let (name, date) = split_trailing_year(line);
        return named(name, None, date, None);
    };

    let url = URL_RE
        .find(remainder)
        .map(|m| trim_url(m.as_str()).to_string());
    let without_url = URL_RE.replace_all(remainder, "");
    let date = first_year(&without_url);
    let issuer = strip_years(&without_url);
    let issuer = trim_separators(issuer.trim_matches(|c: char| c == '[' || c == ']'));
    let issuer = (!issuer.is_empty()).then(|| issuer.to_string());

    named(name.trim().to_string(), issuer, date, url)
}

fn named(
    name: String,
    issuer: Option<String>,
    date: Option<String>,
    url: Option<String>,
) -> Option<CertificationEntry> {
    let name = trim_separators(&name).to_string();
    if name.is_empty() {
        return None;
    }
    Some(CertificationEntry {
        name,
        issuer,
        date,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_issuer_year() {
        let certs = parse_certifications(&["AWS Certified Solutions Architect – Amazon (2021)"]);
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].name, "AWS Certified Solutions Architect");
        assert_eq!(certs[0].issuer.as_deref(), Some("Amazon"));
        assert_eq!(certs[0].date.as_deref(), Some("2021"));
        assert_eq!(certs[0].url, None);
    }

    #[test]
    fn test_pipe_with_url() {
        let certs = parse_certifications(&[
            "• CKA | CNCF, 2022, https://cncf.io/certs/123.",
        ]);
        assert_eq!(certs[0].name, "CKA");
        assert_eq!(certs[0].issuer.as_deref(), Some("CNCF"));
        assert_eq!(certs[0].date.as_deref(), Some("2022"));
        assert_eq!(certs[0].url.as_deref(), Some("https://cncf.io/certs/123"));
    }

    #[test]
    fn test_paren_separator() {
        let certs = parse_certifications(&["PMP (Project Management Institute)"]);
        assert_eq!(certs[0].name, "PMP");
        assert_eq!(certs[0].issuer.as_deref(), Some("Project Management Institute"));
        assert_eq!(certs[0].date, None);
    }

    #[test]
    fn test_no_separator_trailing_year() {
        let certs = parse_certifications(&["CompTIA Security+ 2019", "Scrum Master"]);
        assert_eq!(certs[0].name, "CompTIA Security+");
        assert_eq!(certs[0].date.as_deref(), Some("2019"));
        assert_eq!(certs[1].name, "Scrum Master");
        assert_eq!(certs[1].date, None);
    }
}
