use chrono::{NaiveDateTime, Weekday};
use tracing::debug;

use crate::engine::classify::{BillingCategory, ExamType};
use crate::engine::types::{ProcedureRecord, ShiftDate};
use crate::engine::window::ShiftWindowCalculator;

/// Per-unit and per-hour rates, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariffs {
    pub hourly: i64,
    pub rx: i64,
    pub tac: i64,
    pub tac_double: i64,
    pub tac_triple: i64,
}

impl Tariffs {
    /// Builds tariffs where double and triple TAC cost 2x and 3x a simple TAC.
    pub const fn from_base(hourly: i64, rx: i64, tac: i64) -> Self {
        Self {
            hourly,
            rx,
            tac,
            tac_double: tac * 2,
            tac_triple: tac * 3,
        }
    }

    pub const fn rate(&self, category: BillingCategory) -> i64 {
        match category {
            BillingCategory::Rx => self.rx,
            BillingCategory::TacSimple => self.tac,
            BillingCategory::TacDouble => self.tac_double,
            BillingCategory::TacTriple => self.tac_triple,
            BillingCategory::Unbilled => 0,
        }
    }
}

impl Default for Tariffs {
    fn default() -> Self {
        Self::from_base(55_000, 5_300, 42_400)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub rx: i64,
    pub tac_simple: i64,
    pub tac_double: i64,
    pub tac_triple: i64,
    pub unbilled: i64,
}

impl CategoryCounts {
    pub fn tally(records: &[ProcedureRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            let classification = record.classification();
            match classification.exam_type() {
                ExamType::Rx => counts.rx += 1,
                ExamType::Other => counts.unbilled += 1,
                ExamType::Tac if classification.is_triple() => counts.tac_triple += 1,
                ExamType::Tac if classification.is_double() => counts.tac_double += 1,
                ExamType::Tac => counts.tac_simple += 1,
            }
        }
        counts
    }

    pub const fn get(&self, category: BillingCategory) -> i64 {
        match category {
            BillingCategory::Rx => self.rx,
            BillingCategory::TacSimple => self.tac_simple,
            BillingCategory::TacDouble => self.tac_double,
            BillingCategory::TacTriple => self.tac_triple,
            BillingCategory::Unbilled => self.unbilled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftLine {
    pub shift: ShiftDate,
    pub weekday: Weekday,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub hours: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingResult {
    pub rx_count: i64,
    pub rx_total: i64,
    pub tac_simple_count: i64,
    pub tac_simple_total: i64,
    pub tac_double_count: i64,
    pub tac_double_total: i64,
    pub tac_triple_count: i64,
    pub tac_triple_total: i64,
    pub unbilled_count: i64,
    pub hours_worked: u32,
    pub hourly_total: i64,
    pub grand_total: i64,
    /// Physical TAC acquisitions. Each acquisition bills as exactly one
    /// unit, so this always equals `tac_billing_count`; it is reported
    /// separately because the reporting count differs from both.
    pub tac_study_count: i64,
    /// TAC billable units: simple + double + triple.
    pub tac_billing_count: i64,
    /// Regulatory convention, never used for money.
    pub reporting_count: i64,
    pub shifts: Vec<ShiftLine>,
}

/// Combines classified records and chosen shifts into a billing result.
#[derive(Debug, Clone, Copy)]
pub struct BillingAggregator<'a> {
    tariffs: &'a Tariffs,
    calculator: &'a ShiftWindowCalculator,
}

impl<'a> BillingAggregator<'a> {
    pub const fn new(tariffs: &'a Tariffs, calculator: &'a ShiftWindowCalculator) -> Self {
        Self {
            tariffs,
            calculator,
        }
    }

    pub fn aggregate(&self, records: &[ProcedureRecord], shifts: &[ShiftDate]) -> BillingResult {
        aggregate(records, shifts, self.tariffs, self.calculator)
    }
}

/// Shifts that would end past the last representable date get no line and
/// add no hours.
pub fn aggregate(
    records: &[ProcedureRecord],
    shifts: &[ShiftDate],
    tariffs: &Tariffs,
    calculator: &ShiftWindowCalculator,
) -> BillingResult {
    let shift_lines = shifts
        .iter()
        .filter_map(|shift| {
            let window = calculator.window_for(shift.weekday(), shift.is_holiday);
            let (start, end) = calculator.bounds(shift)?;
            Some(ShiftLine {
                shift: *shift,
                weekday: shift.weekday(),
                start,
                end,
                hours: window.duration_hours(),
            })
        })
        .collect::<Vec<ShiftLine>>();
    let hours_worked = shift_lines.iter().map(|line| line.hours).sum::<u32>();

    let counts = CategoryCounts::tally(records);
    let subtotal = |category: BillingCategory| counts.get(category) * tariffs.rate(category);

    let rx_total = subtotal(BillingCategory::Rx);
    let tac_simple_total = subtotal(BillingCategory::TacSimple);
    let tac_double_total = subtotal(BillingCategory::TacDouble);
    let tac_triple_total = subtotal(BillingCategory::TacTriple);
    let hourly_total = i64::from(hours_worked) * tariffs.hourly;
    let grand_total =
        rx_total + tac_simple_total + tac_double_total + tac_triple_total + hourly_total;

    let tac_billing_count = counts.tac_simple + counts.tac_double + counts.tac_triple;
    let reporting_count = counts.tac_simple + counts.tac_double * 2 + counts.tac_triple * 3;

    debug!(
        records = records.len(),
        shifts = shifts.len(),
        hours_worked,
        grand_total,
        "aggregated billing"
    );

    BillingResult {
        rx_count: counts.rx,
        rx_total,
        tac_simple_count: counts.tac_simple,
        tac_simple_total,
        tac_double_count: counts.tac_double,
        tac_double_total,
        tac_triple_count: counts.tac_triple,
        tac_triple_total,
        unbilled_count: counts.unbilled,
        hours_worked,
        hourly_total,
        grand_total,
        tac_study_count: tac_billing_count,
        tac_billing_count,
        reporting_count,
        shifts: shift_lines,
    }
}
