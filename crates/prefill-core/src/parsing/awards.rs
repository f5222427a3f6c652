use super::lines::{split_trailing_year, without_bullet};
use crate::model::AwardEntry;

/// One award per line: "Title – Issuer (2020)".
pub fn parse_awards<S: AsRef<str>>(lines: &[S]) -> Vec<AwardEntry> {
    lines
        .iter()
        .filter_map(|line| {
            let (rest, date) = split_trailing_year(without_bullet(line.as_ref()));
            let (title, issuer) = [" – ", " | "]
                .iter()
                .find_map(|sep| rest.split_once(sep))
                .map(|(t, i)| (t.trim().to_string(), Some(i.trim().to_string())))
                .unwrap_or((rest.clone(), None));
            if title.is_empty() {
                return None;
            }
            Some(AwardEntry {
                title,
                date,
                issuer: issuer.filter(|i| !i.is_empty()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awards_variants() {
        let awards = parse_awards(&[
            "• Employee of the Year – Acme Corp (2019)",
            "Hackathon Winner | Globex [2021]",
            "Dean's Award",
        ]);
        assert_eq!(awards.len(), 3);
        assert_eq!(awards[0].title, "Employee of the Year");
        assert_eq!(awards[0].issuer.as_deref(), Some("Acme Corp"));
        assert_eq!(awards[0].date.as_deref(), Some("2019"));
        assert_eq!(awards[1].issuer.as_deref(), Some("Globex"));
        assert_eq!(awards[1].date.as_deref(), Some("2021"));
        assert_eq!(awards[2].title, "Dean's Award");
        assert_eq!(awards[2].date, None);
        assert_eq!(awards[2].issuer, None);
    }
}
