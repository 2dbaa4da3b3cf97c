use chrono::NaiveDate;

pub mod menu_render;
pub mod openmensa_parser;

const EMOJIS: [&str; 7] = ["☀️", "🦀", "🍝", "☕️", "🥗", "🌤️", "🥦"];

/// OpenMensa dates are plain `YYYY-MM-DD`.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn api_date_fmt(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// e.g. "Monday, 14 Apr 2025"
pub fn english_date_fmt(date: NaiveDate) -> String {
    date.format("%A, %d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_dates() {
        assert_eq!(
            parse_api_date("2025-04-14"),
            NaiveDate::from_ymd_opt(2025, 4, 14)
        );
        assert_eq!(
            parse_api_date(" 2025-04-14\n"),
            NaiveDate::from_ymd_opt(2025, 4, 14)
        );
        assert_eq!(parse_api_date("14.04.2025"), None);
        assert_eq!(parse_api_date("2025-02-30"), None);
    }

    #[test]
    fn formats_long_english_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 14).unwrap();
        assert_eq!(english_date_fmt(date), "Monday, 14 Apr 2025");
        assert_eq!(api_date_fmt(date), "2025-04-14");

        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(english_date_fmt(date), "Sunday, 01 Dec 2024");
    }
}
