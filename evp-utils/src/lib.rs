//! Shared formatting and date helpers for EVP crates.

/// Placeholder shown wherever a value is unknown or not reported.
pub const PLACEHOLDER: &str = "—";

/// Model year utility functions
pub mod dates {
    use chrono::{Datelike, Local};

    /// Earliest model year accepted from the registration data.
    pub const EARLIEST_MODEL_YEAR: i32 = 1900;

    /// Manufacturers release model years ahead of the calendar, so the
    /// latest plausible model year is the current year plus this margin.
    pub const MODEL_YEAR_LEAD: i32 = 2;

    /// Latest model year accepted, relative to today's local date.
    pub fn latest_model_year() -> i32 {
        Local::now().year() + MODEL_YEAR_LEAD
    }

    /// Returns true if `year` is a plausible vehicle model year.
    pub fn is_plausible_model_year(year: i32) -> bool {
        (EARLIEST_MODEL_YEAR..=latest_model_year()).contains(&year)
    }

}

/// Text helpers
pub mod text {
    /// Take the first `max_chars` characters of `s`.
    ///
    /// Counts Unicode scalar values, so a label is never cut in the middle
    /// of a multi-byte character.
    pub fn truncate_chars(s: &str, max_chars: usize) -> String {
        s.chars().take(max_chars).collect()
    }

    /// Case-insensitive substring test. `needle_lower` must already be lowercase.
    pub fn contains_lowercase(haystack: &str, needle_lower: &str) -> bool {
        haystack.to_lowercase().contains(needle_lower)
    }

}

/// Number formatting
pub mod numbers {
    use super::PLACEHOLDER;

    /// Format a count with comma thousands separators, e.g. `12,345`.
    pub fn format_count(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Format an optional whole-mile value, falling back to the placeholder.
    pub fn format_optional(value: Option<u32>) -> String {
        match value {
            Some(v) => v.to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_count() {
            assert_eq!(format_count(0), "0");
            assert_eq!(format_count(999), "999");
            assert_eq!(format_count(1000), "1,000");
            assert_eq!(format_count(123456), "123,456");
            assert_eq!(format_count(1234567), "1,234,567");
        }

        #[test]
        fn test_format_optional() {
            assert_eq!(format_optional(Some(250)), "250");
            assert_eq!(format_optional(None), "—");
        }
    }
}
