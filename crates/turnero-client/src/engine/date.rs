use chrono::{NaiveDate, NaiveTime};

use crate::engine::types::DateRange;
use crate::{ClientError, ClientResult};

const HOLIDAY_SUFFIX: &str = ",F";

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_hour_minute(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Time text that followed the date in a scheduled-date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedTime<'a> {
    Absent,
    Parsed(NaiveTime),
    Unreadable(&'a str),
}

impl EmbeddedTime<'_> {
    pub const fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Parsed(time) => Some(*time),
            Self::Absent | Self::Unreadable(_) => None,
        }
    }
}

/// Parses a scheduled-date cell, which may carry a trailing time.
///
/// Accepts `dd-mmm-yyyy` (Spanish or English month abbreviation),
/// `yyyy-mm-dd`, `dd/mm/yyyy` and `dd-mm-yyyy`. Only the date decides
/// whether the cell is readable.
pub fn parse_record_date(value: &str) -> Option<(NaiveDate, EmbeddedTime<'_>)> {
    let trimmed = value.trim();
    let (date_part, time_part) = match trimmed.split_once(char::is_whitespace) {
        Some((date_part, rest)) => (date_part, rest.trim()),
        None => (trimmed, ""),
    };

    let date = parse_calendar_date(date_part)?;
    let time = if time_part.is_empty() {
        EmbeddedTime::Absent
    } else {
        match parse_time(time_part) {
            Some(time) => EmbeddedTime::Parsed(time),
            None => EmbeddedTime::Unreadable(time_part),
        }
    };
    Some((date, time))
}

pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }

    let mut parts = trimmed.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let day = day.parse::<u32>().ok()?;
    let year = year.parse::<i32>().ok()?;
    let month = match month.parse::<u32>() {
        Ok(number) => number,
        Err(_) => month_from_abbreviation(month)?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

fn month_from_abbreviation(value: &str) -> Option<u32> {
    let lowered = value.trim().to_lowercase();
    let prefix = lowered.get(..3)?;
    let month = match prefix {
        "ene" | "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "abr" | "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "ago" | "aug" => 8,
        "sep" | "set" => 9,
        "oct" => 10,
        "nov" => 11,
        "dic" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parses a shift-date argument such as `08-abr-2025` or `2025-04-18,F`.
pub fn parse_shift_date_arg(value: &str) -> Option<(NaiveDate, bool)> {
    let trimmed = value.trim();
    let holiday_part = trimmed
        .strip_suffix(HOLIDAY_SUFFIX)
        .or_else(|| trimmed.strip_suffix(",f"));
    match holiday_part {
        Some(date_part) => parse_calendar_date(date_part).map(|date| (date, true)),
        None => parse_calendar_date(trimmed).map(|date| (date, false)),
    }
}

pub fn build_range(from: Option<&str>, to: Option<&str>, command: &str) -> ClientResult<DateRange> {
    let parsed_from = match from {
        Some(value) => Some(parse_range_bound(value, "from", command)?),
        None => None,
    };
    let parsed_to = match to {
        Some(value) => Some(parse_range_bound(value, "to", command)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok(DateRange {
        from: parsed_from,
        to: parsed_to,
    })
}

fn parse_range_bound(value: &str, field: &str, command: &str) -> ClientResult<NaiveDate> {
    parse_calendar_date(value).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("Invalid `{field}` date `{value}`. Use `YYYY-MM-DD` or `dd-mmm-yyyy`."),
            Some(command),
        )
    })
}
