use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::engine::normalize::normalize_room;
use crate::engine::types::{DateRange, ShiftDate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttributionMode {
    /// Every kept record is billed.
    #[default]
    AllRecords,
    /// A record is billed only when its timestamp falls inside a chosen shift.
    ChosenShiftsOnly,
}

impl AttributionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllRecords => "all_records",
            Self::ChosenShiftsOnly => "chosen_shifts_only",
        }
    }
}

/// Which acquisition rooms belong to the practice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomFilter {
    pub include_prefixes: Vec<String>,
    pub exclude_prefixes: Vec<String>,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self {
            include_prefixes: vec!["SCA".to_string(), "SJ".to_string()],
            exclude_prefixes: vec!["HOS".to_string()],
        }
    }
}

impl RoomFilter {
    pub fn allow_all() -> Self {
        Self {
            include_prefixes: Vec::new(),
            exclude_prefixes: Vec::new(),
        }
    }

    pub fn accepts(&self, room: &str) -> bool {
        let room = normalize_room(room);
        let included = self.include_prefixes.is_empty()
            || self
                .include_prefixes
                .iter()
                .any(|prefix| room.starts_with(&normalize_room(prefix)));
        let excluded = self
            .exclude_prefixes
            .iter()
            .any(|prefix| room.starts_with(&normalize_room(prefix)));
        included && !excluded
    }
}

/// One billing run: which shifts were worked and which records count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPlan {
    shift_dates: Vec<ShiftDate>,
    force_include: BTreeSet<String>,
    range: DateRange,
    attribution: AttributionMode,
}

impl RunPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts shifts chronologically; a date listed twice is kept once and is a
    /// holiday if either entry was.
    pub fn with_shift_dates(mut self, shift_dates: Vec<ShiftDate>) -> Self {
        let mut merged = BTreeMap::<NaiveDate, bool>::new();
        for shift in shift_dates {
            let entry = merged.entry(shift.date).or_insert(false);
            *entry = *entry || shift.is_holiday;
        }
        self.shift_dates = merged
            .into_iter()
            .map(|(date, is_holiday)| ShiftDate::new(date, is_holiday))
            .collect();
        self
    }

    pub fn with_force_include<I>(mut self, appointment_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.force_include = appointment_ids
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn with_attribution(mut self, attribution: AttributionMode) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn shift_dates(&self) -> &[ShiftDate] {
        &self.shift_dates
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn attribution(&self) -> AttributionMode {
        self.attribution
    }

    pub fn force_include(&self) -> &BTreeSet<String> {
        &self.force_include
    }

    pub fn is_forced(&self, appointment_id: Option<&str>) -> bool {
        appointment_id.is_some_and(|value| self.force_include.contains(value.trim()))
    }

    pub fn is_chosen_shift(&self, date: NaiveDate) -> bool {
        self.shift_dates
            .binary_search_by(|shift| shift.date.cmp(&date))
            .is_ok()
    }
}
