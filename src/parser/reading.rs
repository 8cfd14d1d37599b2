//! Lenient parsing of free-text vital readings.
//!
//! Readings come from form fields, so unparseable input degrades to `None`
//! instead of failing the save.

use regex::Regex;
use std::sync::OnceLock;

/// Parse blood-pressure text as `SYS/DIA` (e.g. `120/80`) or a bare systolic
/// value (e.g. `120`). Anything else yields `(None, None)`.
#[must_use]
pub fn parse_pressure(value: &str) -> (Option<i32>, Option<i32>) {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\d{1,3})(?:\s*/\s*(\d{1,3}))?$").expect("Invalid regex")
    });

    let Some(caps) = re.captures(value.trim()) else {
        return (None, None);
    };

    let systolic = caps.get(1).and_then(|m| m.as_str().parse().ok());
    let diastolic = caps.get(2).and_then(|m| m.as_str().parse().ok());

    (systolic, diastolic)
}

/// Parse a glucose reading in mg/dL. Unparseable input yields `None`.
#[must_use]
pub fn parse_glucose(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pressure_full_reading() {
        assert_eq!(parse_pressure("120/80"), (Some(120), Some(80)));
        assert_eq!(parse_pressure("120 / 80"), (Some(120), Some(80)));
        assert_eq!(parse_pressure(" 95/60 "), (Some(95), Some(60)));
    }

    #[test]
    fn test_parse_pressure_systolic_only() {
        assert_eq!(parse_pressure("120"), (Some(120), None));
    }

    #[test]
    fn test_parse_pressure_garbage() {
        assert_eq!(parse_pressure("abc"), (None, None));
        assert_eq!(parse_pressure("120/80/60"), (None, None));
        assert_eq!(parse_pressure("120/"), (None, None));
        assert_eq!(parse_pressure(""), (None, None));
    }

    #[test]
    fn test_parse_glucose() {
        assert_eq!(parse_glucose("98.5"), Some(98.5));
        assert_eq!(parse_glucose("110"), Some(110.0));
        assert_eq!(parse_glucose("high"), None);
        assert_eq!(parse_glucose(""), None);
    }
}
