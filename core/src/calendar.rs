//! Temporal classification of due dates and the day/week windows used by stats.
//!
//! Every function takes `now` explicitly and interprets calendar days in
//! `now`'s time zone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// First day of the week containing `date`.
    pub fn week_of(self, date: NaiveDate) -> NaiveDate {
        let back = (date.weekday().num_days_from_monday() + 7
            - self.weekday().num_days_from_monday())
            % 7;
        date - Duration::days(back as i64)
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(EngineError::invalid("week start", s, "sunday, monday")),
        }
    }
}

pub fn is_overdue<Tz: TimeZone>(date: Option<NaiveDate>, now: &DateTime<Tz>) -> bool {
    date.is_some_and(|d| d < now.date_naive())
}

pub fn is_due_today<Tz: TimeZone>(date: Option<NaiveDate>, now: &DateTime<Tz>) -> bool {
    date.is_some_and(|d| d == now.date_naive())
}

/// "Due soon": later this week, excluding today and anything overdue.
pub fn is_due_this_week<Tz: TimeZone>(
    date: Option<NaiveDate>,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> bool {
    date.is_some_and(|d| in_current_week(d, now, week_start))
        && !is_overdue(date, now)
        && !is_due_today(date, now)
}

fn in_current_week<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>, week_start: WeekStart) -> bool {
    week_start.week_of(date) == week_start.week_of(now.date_naive())
}

/// Human label for a due date: `Today`, `Tomorrow`, the weekday name within
/// the current week, otherwise e.g. `Jun 03`.
pub fn format_due_date<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>, week_start: WeekStart) -> String {
    let today = now.date_naive();
    if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else if in_current_week(date, now, week_start) {
        date.format("%A").to_string()
    } else {
        date.format("%b %d").to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DueStatus {
    None,
    Overdue,
    DueToday,
    DueSoon,
    Upcoming,
}

impl DueStatus {
    pub fn of<Tz: TimeZone>(date: Option<NaiveDate>, now: &DateTime<Tz>, week_start: WeekStart) -> Self {
        if date.is_none() {
            DueStatus::None
        } else if is_overdue(date, now) {
            DueStatus::Overdue
        } else if is_due_today(date, now) {
            DueStatus::DueToday
        } else if is_due_this_week(date, now, week_start) {
            DueStatus::DueSoon
        } else {
            DueStatus::Upcoming
        }
    }

    /// Badge text shown next to a task; `None` when there is no due date.
    pub fn label<Tz: TimeZone>(
        self,
        date: Option<NaiveDate>,
        now: &DateTime<Tz>,
        week_start: WeekStart,
    ) -> Option<String> {
        match (self, date) {
            (DueStatus::Overdue, _) => Some("Overdue".to_string()),
            (DueStatus::DueToday, _) => Some("Due today".to_string()),
            (_, Some(date)) => Some(format_due_date(date, now, week_start)),
            (_, None) => None,
        }
    }
}

/// A span of local wall-clock time in `now`'s zone. Both ends are exclusive;
/// `end` is the last millisecond of the period.
#[derive(Debug, Clone)]
pub struct TimeWindow<Tz: TimeZone> {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    tz: Tz,
}

impl<Tz: TimeZone> TimeWindow<Tz> {
    pub fn day(now: &DateTime<Tz>) -> Self {
        Self::spanning(now.date_naive(), 1, now.timezone())
    }

    pub fn week(now: &DateTime<Tz>, week_start: WeekStart) -> Self {
        Self::spanning(week_start.week_of(now.date_naive()), 7, now.timezone())
    }

    fn spanning(first_day: NaiveDate, days: i64, tz: Tz) -> Self {
        let start = first_day.and_time(NaiveTime::MIN);
        let end = start + Duration::days(days) - Duration::milliseconds(1);
        Self { start, end, tz }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.tz).naive_local();
        local > self.start && local < self.end
    }
}
