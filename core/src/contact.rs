use crate::normalize::is_unreadable;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex");
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").expect("valid regex");
}

/// Best-effort contact details pulled from resume text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CandidateDetails {
    /// Missing fields are reported as "Unknown" / "N/A", never as errors.
    pub fn extract(text: &str) -> Self {
        if is_unreadable(text) {
            return Self { name: UNKNOWN_NAME.into(), email: NOT_AVAILABLE.into(), phone: NOT_AVAILABLE.into() };
        }
        let name = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or(UNKNOWN_NAME)
            .to_string();
        let email = EMAIL.find(text).map(|m| m.as_str().to_string()).unwrap_or_else(|| NOT_AVAILABLE.into());
        // Exactly ten digits: longer runs are ids or dates, not phone numbers.
        let phone = DIGITS
            .find_iter(text)
            .find(|m| m.as_str().len() == 10)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.into());
        Self { name, email, phone }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fields() {
        let text = "\n  Jane Doe  \nSenior Engineer\njane.doe@example.com | 5551234567\n";
        let d = CandidateDetails::extract(text);
        assert_eq!(d.name, "Jane Doe");
        assert_eq!(d.email, "jane.doe@example.com");
        assert_eq!(d.phone, "5551234567");
    }

    #[test]
    fn phone_requires_exactly_ten_digits() {
        let d = CandidateDetails::extract("John\nid 123456789012 call 555-123-4567 or 0123456789");
        assert_eq!(d.phone, "0123456789");
        assert_eq!(d.email, NOT_AVAILABLE);
    }

    #[test]
    fn unreadable_text_reports_placeholders() {
        let d = CandidateDetails::extract(crate::normalize::NO_READABLE_TEXT);
        assert_eq!(d.name, UNKNOWN_NAME);
        assert_eq!(d.email, NOT_AVAILABLE);
        assert_eq!(d.phone, NOT_AVAILABLE);
    }
}
