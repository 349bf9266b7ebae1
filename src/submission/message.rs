use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::fields::SubmissionRequest;

pub const INVALID_DATE: &str = "Invalid Date";

/// ISO layouts carrying an offset that RFC 3339 parsing rejects, such as a missing seconds field.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Offset-less layouts, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The text relayed for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage(String);

impl NotificationMessage {
    pub fn render(submission: &SubmissionRequest) -> Self {
        let submitted_at = format_timestamp(submission.timestamp());

        let mut text = format!(
            "📩 New Mason Ledger Application\n\
             \n\
             🕒 Submitted: {submitted_at}\n\
             \n\
             🧠 Experience: {}\n\
             💼 Portfolio: {}\n\
             📊 Trading Platform: {}\n\
             📞 Contact Platform: {}\n\
             👤 Contact Handle: {}\n",
            submission.experience(),
            submission.portfolio(),
            submission.trading_platform(),
            submission.contact_platform(),
            submission.contact_handle(),
        );

        if let Some(other) = submission.other_platform() {
            text.push_str(&format!("🔧 Other Platform: {other}\n"));
        }

        NotificationMessage(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a timestamp as en-US medium date + short time in UTC, e.g. `Jan 1, 2024, 12:00 AM`.
///
/// Unparseable input yields [`INVALID_DATE`] instead of an error.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %-I:%M %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // `Z` spelled as an explicit offset so `%#z` can read it.
    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => raw.to_string(),
    };
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_calendar_date(raw)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` (first of the month) or `YYYY` (January 1st).
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);

    match bytes.len() {
        10 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        7 if bytes[4] == b'-' && digits(0..4) && digits(5..7) => {
            NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
        }
        4 if digits(0..4) => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1),
        _ => None,
    }
}
