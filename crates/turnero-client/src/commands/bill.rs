use std::path::Path;

use crate::ClientResult;
use crate::commands::common::{
    ensure_usable, input_summary, load_rows, parse_shift_dates, shift_row,
};
use crate::config::load_config;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AttributionSummary, BillData, CategoryLine, ShiftRow, TariffsRow};
use crate::engine::billing::{BillingAggregator, BillingResult, Tariffs};
use crate::engine::classify::{BillingCategory, ExamClassifier};
use crate::engine::date::{build_range, format_iso_date};
use crate::engine::plan::{AttributionMode, RunPlan};
use crate::engine::records::{attribute, build_records};

#[derive(Debug, Default)]
pub struct BillRunOptions<'a> {
    pub path: String,
    pub shift_dates: Vec<String>,
    pub force_include: Vec<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Bill only records whose timestamp falls inside a chosen shift.
    pub by_time: bool,
    pub config_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run_with_options(options: BillRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let range = build_range(options.from.as_deref(), options.to.as_deref(), "bill")?;
    let loaded = load_config(options.config_path, options.home_override)?;
    let config = &loaded.config;
    let shift_dates = parse_shift_dates(&options.shift_dates, &config.calculator, "bill")?;
    let input = load_rows(&options.path, options.stdin_override)?;

    let attribution_mode = if options.by_time {
        AttributionMode::ChosenShiftsOnly
    } else {
        AttributionMode::AllRecords
    };
    let plan = RunPlan::new()
        .with_shift_dates(shift_dates)
        .with_force_include(options.force_include)
        .with_range(range)
        .with_attribution(attribution_mode);

    let classifier = ExamClassifier::new();
    let batch = build_records(&input.rows, &plan, &config.room_filter, &classifier);
    ensure_usable(&batch)?;

    let attribution = attribute(&batch.records, &plan, &config.calculator);
    let aggregator = BillingAggregator::new(&config.tariffs, &config.calculator);
    let result = aggregator.aggregate(&attribution.billed, plan.shift_dates());

    let shifts = plan
        .shift_dates()
        .iter()
        .filter_map(|shift| shift_row(&config.calculator, shift))
        .collect::<Vec<ShiftRow>>();

    let data = BillData {
        config_path: loaded.source_display(),
        from: range.from.as_ref().map(format_iso_date),
        to: range.to.as_ref().map(format_iso_date),
        tariffs: tariffs_row(&config.tariffs),
        input: input_summary(input.source_kind, &batch),
        attribution: AttributionSummary {
            mode: attribution_mode.as_str().to_string(),
            billed_records: attribution.billed.len() as i64,
            outside_shifts: attribution.outside_shifts,
            untimed: attribution.untimed,
        },
        lines: category_lines(&result, &config.tariffs),
        unbilled_count: result.unbilled_count,
        hours_worked: result.hours_worked,
        hourly_total: result.hourly_total,
        grand_total: result.grand_total,
        tac_study_count: result.tac_study_count,
        tac_billing_count: result.tac_billing_count,
        reporting_count: result.reporting_count,
        shifts,
        issues: batch.skipped,
        time_issues: batch.time_issues,
        unmatched_force_ids: batch.unmatched_force_ids,
    };

    success("bill", data)
}

fn category_lines(result: &BillingResult, tariffs: &Tariffs) -> Vec<CategoryLine> {
    [
        (BillingCategory::Rx, result.rx_count, result.rx_total),
        (
            BillingCategory::TacSimple,
            result.tac_simple_count,
            result.tac_simple_total,
        ),
        (
            BillingCategory::TacDouble,
            result.tac_double_count,
            result.tac_double_total,
        ),
        (
            BillingCategory::TacTriple,
            result.tac_triple_count,
            result.tac_triple_total,
        ),
    ]
    .into_iter()
    .map(|(category, count, total)| CategoryLine {
        category: category.as_str().to_string(),
        count,
        rate: tariffs.rate(category),
        total,
    })
    .collect()
}

fn tariffs_row(tariffs: &Tariffs) -> TariffsRow {
    TariffsRow {
        hourly: tariffs.hourly,
        rx: tariffs.rx,
        tac: tariffs.tac,
        tac_double: tariffs.tac_double,
        tac_triple: tariffs.tac_triple,
    }
}
