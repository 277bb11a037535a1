use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use tracing::debug;

// Checked in this order; the first keyword found anywhere in the text wins.
const WEEKDAY_KEYWORDS: [(&str, &str, Weekday); 5] = [
    ("monday", "mon", Weekday::Mon),
    ("tuesday", "tue", Weekday::Tue),
    ("wednesday", "wed", Weekday::Wed),
    ("thursday", "thu", Weekday::Thu),
    ("friday", "fri", Weekday::Fri),
];

/// Picks a due date out of free text such as a task title.
///
/// Matching is a case-insensitive substring search with a fixed priority:
/// `today`, then `tomorrow`, then the weekday names Monday through Friday
/// (full or three-letter). A weekday resolves to its next occurrence strictly
/// after today, so naming the current weekday means a week from now.
/// Weekend names are not recognised.
///
/// The calendar date is taken in `now`'s own time zone.
pub fn parse_due_phrase<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Option<NaiveDate> {
    let lowered = text.trim().to_lowercase();
    let today = now.date_naive();

    let parsed = if lowered.contains("today") {
        Some(today)
    } else if lowered.contains("tomorrow") {
        Some(today + Duration::days(1))
    } else {
        WEEKDAY_KEYWORDS
            .iter()
            .find(|(full, short, _)| lowered.contains(full) || lowered.contains(short))
            .map(|(_, _, weekday)| next_weekday(today, *weekday))
    };

    debug!(input = text, ?parsed, "parsed due phrase");
    parsed
}

/// Parses an explicitly typed due date: `YYYY-MM-DD` first, then the phrase vocabulary.
pub fn parse_due_input<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_due_phrase(input, now))
}

fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let mut days_needed =
        target.num_days_from_sunday() as i64 - today.weekday().num_days_from_sunday() as i64;
    if days_needed <= 0 {
        days_needed += 7;
    }
    today + Duration::days(days_needed)
}
