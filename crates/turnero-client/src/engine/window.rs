use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Deserialize;

use crate::engine::types::ShiftDate;

/// Records before this hour belong to the previous day's shift.
pub const MORNING_CUTOFF_HOUR: u32 = 9;
/// Records from this hour on belong to the same day's shift.
pub const EVENING_START_HOUR: u32 = 18;

/// Start and end hour of a shift; the end always falls on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ShiftWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl ShiftWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub const fn duration_hours(&self) -> u32 {
        24_u32.saturating_sub(self.start_hour) + self.end_hour
    }

    pub fn start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.start_hour, 0, 0).unwrap_or_default()
    }

    pub fn end(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.end_hour, 0, 0).unwrap_or_default()
    }

    pub const fn is_valid(&self) -> bool {
        self.start_hour < 24 && self.end_hour < 24
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftProfile {
    Weekday,
    Friday,
    Saturday,
    Sunday,
}

impl ShiftProfile {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Holiday Mon-Thu shifts run like a Sunday, holiday Fridays like a
    /// Saturday. Weekend holidays keep their own profile.
    pub const fn for_day(weekday: Weekday, is_holiday: bool) -> Self {
        match (weekday, is_holiday) {
            (Weekday::Sat, _) => Self::Saturday,
            (Weekday::Sun, _) => Self::Sunday,
            (Weekday::Fri, false) => Self::Friday,
            (Weekday::Fri, true) => Self::Saturday,
            (_, false) => Self::Weekday,
            (_, true) => Self::Sunday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShiftTable {
    pub weekday: ShiftWindow,
    pub friday: ShiftWindow,
    pub saturday: ShiftWindow,
    pub sunday: ShiftWindow,
}

impl Default for ShiftTable {
    fn default() -> Self {
        Self {
            weekday: ShiftWindow::new(18, 8),
            friday: ShiftWindow::new(18, 9),
            saturday: ShiftWindow::new(9, 9),
            sunday: ShiftWindow::new(9, 8),
        }
    }
}

impl ShiftTable {
    pub const fn window(&self, profile: ShiftProfile) -> ShiftWindow {
        match profile {
            ShiftProfile::Weekday => self.weekday,
            ShiftProfile::Friday => self.friday,
            ShiftProfile::Saturday => self.saturday,
            ShiftProfile::Sunday => self.sunday,
        }
    }

    /// Returns the first profile whose hours fall outside `0..24`.
    pub fn first_invalid(&self) -> Option<ShiftProfile> {
        [
            ShiftProfile::Weekday,
            ShiftProfile::Friday,
            ShiftProfile::Saturday,
            ShiftProfile::Sunday,
        ]
        .into_iter()
        .find(|profile| !self.window(*profile).is_valid())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftWindowCalculator {
    table: ShiftTable,
    holidays: BTreeSet<NaiveDate>,
}

impl ShiftWindowCalculator {
    pub fn new(table: ShiftTable, holidays: BTreeSet<NaiveDate>) -> Self {
        Self { table, holidays }
    }

    pub const fn table(&self) -> &ShiftTable {
        &self.table
    }

    pub fn window_for(&self, weekday: Weekday, is_holiday: bool) -> ShiftWindow {
        let profile = ShiftProfile::for_day(weekday, is_holiday);
        self.table.window(profile)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Builds a shift date, treating configured holidays as marked.
    pub fn shift_date(&self, date: NaiveDate, marked_holiday: bool) -> ShiftDate {
        ShiftDate::new(date, marked_holiday || self.is_holiday(date))
    }

    pub fn assign_to_shift(&self, timestamp: NaiveDateTime) -> Option<ShiftDate> {
        let hour = timestamp.hour();
        let date = timestamp.date();
        if hour < MORNING_CUTOFF_HOUR {
            let previous = date.pred_opt()?;
            return Some(self.shift_date(previous, false));
        }
        if hour >= EVENING_START_HOUR {
            return Some(self.shift_date(date, false));
        }
        None
    }

    /// Start and end of the shift, or `None` when the end falls past the
    /// last representable date.
    pub fn bounds(&self, shift: &ShiftDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let window = self.window_for(shift.weekday(), shift.is_holiday);
        let start = shift.date.and_time(window.start());
        let length = Duration::hours(i64::from(window.duration_hours()));
        let end = start.checked_add_signed(length)?;
        Some((start, end))
    }

    pub fn total_hours(&self, shifts: &[ShiftDate]) -> u32 {
        shifts
            .iter()
            .map(|shift| {
                self.window_for(shift.weekday(), shift.is_holiday)
                    .duration_hours()
            })
            .sum()
    }
}
