/// Utility functions
use chrono::{DateTime, Utc};

/// Case-insensitive substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Calendar date of a UTC timestamp
pub fn display_date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Use the value unless it is missing or blank
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Trimmed, non-empty identifier or nothing
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Falcon 9 Test Flight", "falcon"));
        assert!(contains_ignore_case("Starlink-12", "LINK"));
        assert!(!contains_ignore_case("CRS-20", "falcon"));
    }

    #[test]
    fn test_contains_ignore_case_empty_needle() {
        assert!(contains_ignore_case("anything", ""));
    }

    #[test]
    fn test_display_date() {
        let at = Utc.with_ymd_and_hms(2020, 5, 30, 19, 22, 0).unwrap();
        assert_eq!(display_date(&at), "2020-05-30");
    }

    #[test]
    fn test_or_placeholder_blank() {
        assert_eq!(or_placeholder(Some("  "), "n/a"), "n/a");
        assert_eq!(or_placeholder(None, "n/a"), "n/a");
        assert_eq!(or_placeholder(Some("Engine failure"), "n/a"), "Engine failure");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(" abc ")), Some("abc"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
