use std::path::Path;

use chrono::Datelike;

use crate::ClientResult;
use crate::commands::common::{ensure_usable, input_summary, load_rows, weekday_name};
use crate::config::load_config;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CandidateRow, DailyVolumeRow, EstimateData};
use crate::engine::classify::ExamClassifier;
use crate::engine::date::{build_range, format_iso_date};
use crate::engine::estimate::{daily_volumes, estimate, volume_threshold};
use crate::engine::plan::RunPlan;
use crate::engine::policy::ESTIMATOR_POLICY_VERSION;
use crate::engine::records::build_records;

#[derive(Debug, Default)]
pub struct EstimateRunOptions<'a> {
    pub path: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub config_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run_with_options(options: EstimateRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let range = build_range(options.from.as_deref(), options.to.as_deref(), "estimate")?;
    let loaded = load_config(options.config_path, options.home_override)?;
    let config = &loaded.config;
    let input = load_rows(&options.path, options.stdin_override)?;

    let plan = RunPlan::new().with_range(range);
    let classifier = ExamClassifier::new();
    let batch = build_records(&input.rows, &plan, &config.room_filter, &classifier);
    ensure_usable(&batch)?;

    let volumes = daily_volumes(&batch.records);
    let threshold = volume_threshold(&volumes, config.estimator);
    let candidates = estimate(&volumes, config.estimator)
        .iter()
        .enumerate()
        .map(|(index, candidate)| CandidateRow {
            rank: index + 1,
            date: format_iso_date(&candidate.date),
            weekday: weekday_name(candidate.date.weekday()).to_string(),
            kind: candidate.kind.as_str().to_string(),
            total_volume: candidate.total_volume,
        })
        .collect::<Vec<CandidateRow>>();

    let data = EstimateData {
        policy_version: ESTIMATOR_POLICY_VERSION.to_string(),
        config_path: loaded.source_display(),
        from: range.from.as_ref().map(format_iso_date),
        to: range.to.as_ref().map(format_iso_date),
        input: input_summary(input.source_kind, &batch),
        mean: threshold.map(|value| value.mean),
        threshold: threshold.map(|value| value.threshold),
        daily_volumes: volumes
            .iter()
            .map(|volume| DailyVolumeRow {
                date: format_iso_date(&volume.date),
                exam_count: volume.exam_count,
            })
            .collect(),
        insufficient_evidence: candidates.is_empty(),
        candidates,
        issues: batch.skipped,
    };

    success("estimate", data)
}
