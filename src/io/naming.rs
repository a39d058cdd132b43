use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Philippine Standard Time, UTC+08:00
pub fn pst() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap_or_else(|| Utc.fix())
}

/// Suggested download name, without extension
///
/// Format: `VIBER BLAST OCT 18 2026 02:05 PM PST`
pub fn suggested_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("VIBER BLAST %b %d %Y %I:%M %p PST")
        .to_string()
        .to_uppercase()
}

/// Suggested download name for the current wall-clock time in PST
pub fn suggested_file_name_now() -> String {
    suggested_file_name(&Utc::now().with_timezone(&pst()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afternoon_name() {
        let at = pst().with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
        assert_eq!(suggested_file_name(&at), "VIBER BLAST OCT 18 2026 02:05 PM PST");
    }

    #[test]
    fn test_midnight_uses_twelve() {
        let at = pst().with_ymd_and_hms(2025, 1, 3, 0, 30, 0).unwrap();
        assert_eq!(suggested_file_name(&at), "VIBER BLAST JAN 03 2025 12:30 AM PST");
    }

    #[test]
    fn test_utc_is_shifted_to_pst() {
        let utc = Utc.with_ymd_and_hms(2026, 12, 31, 20, 0, 0).unwrap();
        let name = suggested_file_name(&utc.with_timezone(&pst()));
        assert_eq!(name, "VIBER BLAST JAN 01 2027 04:00 AM PST");
    }

    #[test]
    fn test_now_has_prefix() {
        assert!(suggested_file_name_now().starts_with("VIBER BLAST "));
    }
}
