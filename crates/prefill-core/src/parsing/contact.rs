//! Contact details from the whole joined text.

use super::limits::{char_len, ADDRESS_MAX_CHARS, NAME_MAX_CHARS};
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w.-]+\.\w+").unwrap());
pub(crate) static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/\S+").unwrap()
});
pub(crate) static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").unwrap());
static ADDRESS_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2}\s+\d{5}(?:-\d{4})?\b|\d{5}\s+[A-Za-z\s]+").unwrap()
});
static ADDRESS_PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z\s]+),\s*([A-Z]{2})\s+(\d{5}(?:-\d{4})?)").unwrap()
});

/// Contact fields found in the text. Missing values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub linkedin: String,
    pub website: String,
}

/// Extract contact details. `denylist` holds hosts that are never taken as
/// the personal website (social profiles).
pub fn extract_contact<S: AsRef<str>>(lines: &[S], denylist: &[String]) -> ContactInfo {
    let text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");

    let mut info = ContactInfo {
        email: first_match(&EMAIL_RE, &text),
        phone: first_match(&PHONE_RE, &text),
        linkedin: LINKEDIN_RE
            .find(&text)
            .map(|m| trim_url(m.as_str()).to_string())
            .unwrap_or_default(),
        website: URL_RE
            .find_iter(&text)
            .map(|m| trim_url(m.as_str()))
            .find(|url| !is_denied(url, denylist))
            .unwrap_or_default()
            .to_string(),
        ..ContactInfo::default()
    };

    if let Some(line) = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|l| ADDRESS_LINE_RE.is_match(l))
    {
        fill_address(&mut info, line);
    }

    if let Some(first) = lines.first().map(AsRef::as_ref) {
        if is_name_line(first) {
            info.full_name = first.to_string();
        }
    }

    log::debug!(
        "contact: name={} email={} phone={} address={}",
        !info.full_name.is_empty(),
        !info.email.is_empty(),
        !info.phone.is_empty(),
        !info.address.is_empty() || !info.city.is_empty()
    );
    info
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text).map(|m| m.as_str().to_string()).unwrap_or_default()
}

fn fill_address(info: &mut ContactInfo, line: &str) {
    match ADDRESS_PARTS_RE.captures(line) {
        Some(caps) => {
            info.city = caps[1].trim().to_string();
            info.state = caps[2].to_string();
            info.zip = caps[3].to_string();

            let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let street = line[..start]
                .trim()
                .trim_end_matches([',', ';', '|'])
                .trim();
            if street.starts_with(|c: char| c.is_ascii_digit()) {
                info.address = street.to_string();
            }
        }
        None => {
            if char_len(line) < ADDRESS_MAX_CHARS {
                info.address = line.to_string();
            }
        }
    }
}

fn is_name_line(line: &str) -> bool {
    char_len(line) < NAME_MAX_CHARS
        && !line.contains('@')
        && !EMAIL_RE.is_match(line)
        && !PHONE_RE.is_match(line)
}

/// Drop punctuation that trails a URL in running text.
pub(crate) fn trim_url(url: &str) -> &str {
    url.trim_end_matches(['.', ',', ';', ')', ']', '>'])
}

fn url_host(url: &str) -> String {
    let without_scheme = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url);
    let host = without_scheme
        .split(['/', '?', '#', ':'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// True when the URL's host is a listed domain or one of its subdomains.
/// Entries without a dot ("x") match "x.com".
pub fn is_denied(url: &str, denylist: &[String]) -> bool {
    let host = url_host(url);
    denylist.iter().any(|entry| {
        let entry = entry.trim().to_lowercase();
        let entry = entry.strip_prefix("www.").unwrap_or(&entry);
        let domain = if entry.contains('.') {
            entry.to_string()
        } else {
            format!("{entry}.com")
        };
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;

    fn contact(text: &str) -> ContactInfo {
        let lines: Vec<&str> = text.lines().collect();
        extract_contact(&lines, &ExtractConfig::default().website_denylist)
    }

    #[test]
    fn test_email_and_phone_on_one_line() {
        let info = contact("Jane Doe\nEmail: jane@example.com — Phone: (555) 123-4567");
        assert_eq!(info.full_name, "Jane Doe");
        assert_eq!(info.email, "jane@example.com");
        assert_eq!(info.phone, "(555) 123-4567");
    }

    #[test]
    fn test_phone_variants() {
        assert_eq!(contact("call +1 555.123.4567").phone, "+1 555.123.4567");
        assert_eq!(contact("555-123-4567").phone, "555-123-4567");
    }

    #[test]
    fn test_linkedin_and_website() {
        let info = contact(
            "Jane Doe\nlinkedin.com/in/janedoe, https://twitter.com/jd, https://janedoe.dev.",
        );
        assert_eq!(info.linkedin, "linkedin.com/in/janedoe");
        assert_eq!(info.website, "https://janedoe.dev");
    }

    #[test]
    fn test_linkedin_url_not_taken_as_website() {
        let info = contact("https://www.linkedin.com/in/jane https://github.com/jane");
        assert_eq!(info.linkedin, "https://www.linkedin.com/in/jane");
        assert_eq!(info.website, "https://github.com/jane");
    }

    #[test]
    fn test_denylist_matches_hosts_not_substrings() {
        let deny = vec!["x".to_string(), "facebook.com".to_string()];
        assert!(is_denied("https://x.com/jane", &deny));
        assert!(is_denied("https://m.facebook.com/jane", &deny));
        assert!(!is_denied("https://xkcd.com", &deny));
        assert!(!is_denied("https://notfacebook.com", &deny));
    }

    #[test]
    fn test_address_decomposed() {
        let info = contact("Jane Doe\n123 Main St, Springfield, IL 62704");
        assert_eq!(info.address, "123 Main St");
        assert_eq!(info.city, "Springfield");
        assert_eq!(info.state, "IL");
        assert_eq!(info.zip, "62704");
    }

    #[test]
    fn test_address_without_street() {
        let info = contact("Jane Doe\nAustin, TX 73301-0001");
        assert_eq!(info.address, "");
        assert_eq!(info.city, "Austin");
        assert_eq!(info.zip, "73301-0001");
    }

    #[test]
    fn test_address_free_text_when_not_decomposable() {
        let info = contact("Jane Doe\nPO Box 12, TX 75001");
        assert_eq!(info.address, "PO Box 12, TX 75001");
        assert_eq!(info.city, "");
    }

    #[test]
    fn test_name_rejected_when_contact_line_first() {
        assert_eq!(contact("jane@example.com\nJane Doe").full_name, "");
        assert_eq!(contact("(555) 123-4567").full_name, "");
        assert_eq!(contact(&"N".repeat(80)).full_name, "");
    }

    #[test]
    fn test_no_matches_default_to_empty() {
        assert_eq!(
            extract_contact::<&str>(&[], &[]),
            ContactInfo::default()
        );
    }
}
