//! Input validation helpers shared by the managers

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check; the backend runs the authoritative one.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Whether a single address looks like an email
pub fn is_email(addr: &str) -> bool {
    EMAIL_RE.is_match(addr.trim())
}

/// Split a raw address list, dropping malformed entries.
///
/// Returns `(valid, dropped)` so callers can report what was filtered.
pub fn filter_emails<'a, I>(raw: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut valid = Vec::new();
    let mut dropped = Vec::new();
    for addr in raw {
        let addr = addr.trim();
        if addr.is_empty() {
            continue;
        }
        if is_email(addr) {
            valid.push(addr.to_string());
        } else {
            dropped.push(addr.to_string());
        }
    }
    (valid, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("dev@example.com"));
        assert!(is_email("  a.b+tag@sub.domain.io "));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("missing@tld"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn test_filter_emails_partitions() {
        let (valid, dropped) =
            filter_emails(["one@example.com", "bogus", "", "two@example.com"]);
        assert_eq!(valid, vec!["one@example.com", "two@example.com"]);
        assert_eq!(dropped, vec!["bogus"]);
    }
}
