use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::engine::classify::Classification;

/// A calendar day chosen (or suggested) as an on-call shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShiftDate {
    pub date: NaiveDate,
    pub is_holiday: bool,
}

impl ShiftDate {
    pub const fn new(date: NaiveDate, is_holiday: bool) -> Self {
        Self { date, is_holiday }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub exam_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Pair,
    Single,
}

impl CandidateKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Single => "single",
        }
    }
}

/// Advisory shift suggestion; a pair is keyed by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftCandidate {
    pub date: NaiveDate,
    pub total_volume: u32,
    pub kind: CandidateKind,
}

/// One classified imaging procedure. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureRecord {
    scheduled_date: NaiveDate,
    scheduled_time: Option<NaiveTime>,
    procedure_name: String,
    acquisition_room: String,
    appointment_id: Option<String>,
    classification: Classification,
}

impl ProcedureRecord {
    pub fn new(
        scheduled_date: NaiveDate,
        procedure_name: &str,
        acquisition_room: &str,
        classification: Classification,
    ) -> Self {
        Self {
            scheduled_date,
            scheduled_time: None,
            procedure_name: procedure_name.to_string(),
            acquisition_room: acquisition_room.to_string(),
            appointment_id: None,
            classification,
        }
    }

    pub fn with_time(mut self, scheduled_time: Option<NaiveTime>) -> Self {
        self.scheduled_time = scheduled_time;
        self
    }

    pub fn with_appointment_id(mut self, appointment_id: Option<String>) -> Self {
        self.appointment_id = appointment_id;
        self
    }

    pub const fn scheduled_date(&self) -> NaiveDate {
        self.scheduled_date
    }

    pub const fn scheduled_time(&self) -> Option<NaiveTime> {
        self.scheduled_time
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.scheduled_time
            .map(|time| self.scheduled_date.and_time(time))
    }

    pub fn procedure_name(&self) -> &str {
        &self.procedure_name
    }

    pub fn acquisition_room(&self) -> &str {
        &self.acquisition_room
    }

    pub fn appointment_id(&self) -> Option<&str> {
        self.appointment_id.as_deref()
    }

    pub const fn classification(&self) -> &Classification {
        &self.classification
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|start| date >= start) && self.to.is_none_or(|end| date <= end)
    }

    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}
