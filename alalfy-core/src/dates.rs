use chrono::{DateTime, Datelike, NaiveDateTime};

const FEED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ARABIC_MONTHS: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

/// Parses the feed bridge's `pubDate` (`YYYY-MM-DD HH:MM:SS`, or RFC 3339).
pub fn parse_feed_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, FEED_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}

/// Long Arabic date, e.g. `١٥ يناير ٢٠٢٤`.
pub fn format_date_ar(date: &NaiveDateTime) -> String {
    let month = ARABIC_MONTHS[date.month0() as usize];
    format!(
        "{} {} {}",
        arabic_digits(&date.day().to_string()),
        month,
        arabic_digits(&date.year().to_string())
    )
}

/// Arabic rendering of a feed date; unparseable input is returned as-is.
pub fn display_feed_date(raw: &str) -> String {
    match parse_feed_date(raw) {
        Some(date) => format_date_ar(&date),
        None => raw.to_string(),
    }
}

fn arabic_digits(ascii: &str) -> String {
    ascii
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}
