use std::path::Path;

use crate::commands::common::{parse_shift_dates, shift_row};
use crate::config::load_config;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ShiftRow, ShiftsData};
use crate::engine::plan::RunPlan;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ShiftsRunOptions<'a> {
    pub dates: Vec<String>,
    pub config_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
}

pub fn run(dates: &[String], config_path: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ShiftsRunOptions {
        dates: dates.to_vec(),
        config_path,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ShiftsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if options.dates.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "Pass at least one shift date.",
            Some("shifts"),
        ));
    }

    let loaded = load_config(options.config_path, options.home_override)?;
    let calculator = &loaded.config.calculator;
    let parsed = parse_shift_dates(&options.dates, calculator, "shifts")?;
    let plan = RunPlan::new().with_shift_dates(parsed);
    let shifts = plan.shift_dates();

    let rows = shifts
        .iter()
        .filter_map(|shift| shift_row(calculator, shift))
        .collect::<Vec<ShiftRow>>();

    let data = ShiftsData {
        config_path: loaded.source_display(),
        total_hours: calculator.total_hours(shifts),
        shifts: rows,
    };
    success("shifts", data)
}
