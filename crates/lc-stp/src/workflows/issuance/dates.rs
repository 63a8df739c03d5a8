use chrono::NaiveDate;

/// Formats attempted, in order, when parsing free-form intake dates.
const FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%Y/%m/%d",
];

/// Parse a date string in any of the formats intake forms are known to
/// produce. Returns `None` rather than erroring; callers degrade per their own
/// rules (tenor default, NOT SPECIFIED placeholders).
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// SWIFT-facing date rendering: YYYYMMDD when parseable, otherwise the raw
/// value uppercased so the operator can see what was captured, or NOT
/// SPECIFIED when blank.
pub fn swift_date(raw: &str) -> String {
    match parse_flexible(raw) {
        Some(date) => date.format("%Y%m%d").to_string(),
        None if raw.trim().is_empty() => "NOT SPECIFIED".to_string(),
        None => raw.trim().to_ascii_uppercase(),
    }
}

/// Draft-facing date rendering: `DD Month YYYY` when parseable, with the same
/// degradation as [`swift_date`].
pub fn display_date(raw: &str) -> String {
    match parse_flexible(raw) {
        Some(date) => date.format("%d %B %Y").to_string(),
        None if raw.trim().is_empty() => "NOT SPECIFIED".to_string(),
        None => raw.trim().to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_intake_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid date");
        for raw in [
            "2026-03-15",
            "15-03-2026",
            "15/03/2026",
            "20260315",
            "15 Mar 2026",
            "15 March 2026",
            "March 15, 2026",
            "2026/03/15",
        ] {
            assert_eq!(parse_flexible(raw), Some(expected), "failed for {raw}");
        }
    }

    #[test]
    fn unparseable_input_degrades() {
        assert_eq!(parse_flexible("not a date"), None);
        assert_eq!(swift_date(""), "NOT SPECIFIED");
        assert_eq!(swift_date("sometime soon"), "SOMETIME SOON");
        assert_eq!(swift_date("2026-03-15"), "20260315");
        assert_eq!(display_date("2026-03-15"), "15 March 2026");
    }
}
