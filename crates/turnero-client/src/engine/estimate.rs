use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::engine::policy::EstimatorPolicy;
use crate::engine::types::{CandidateKind, DailyVolume, ProcedureRecord, ShiftCandidate};

/// Groups records by scheduled date, in chronological order.
pub fn daily_volumes(records: &[ProcedureRecord]) -> Vec<DailyVolume> {
    let mut counts = BTreeMap::<NaiveDate, u32>::new();
    for record in records {
        *counts.entry(record.scheduled_date()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(date, exam_count)| DailyVolume { date, exam_count })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeThreshold {
    pub mean: f64,
    pub threshold: f64,
}

/// Mean daily volume and the qualifying threshold, after summing duplicate
/// dates. `None` when there are no days at all.
pub fn volume_threshold(
    volumes: &[DailyVolume],
    policy: EstimatorPolicy,
) -> Option<VolumeThreshold> {
    threshold_of(&merge_duplicate_days(volumes), policy)
}

/// Suggests likely shift days from per-day volumes.
///
/// The result is advisory. It is empty when fewer than
/// `policy.min_candidates` candidates survive.
pub fn estimate(volumes: &[DailyVolume], policy: EstimatorPolicy) -> Vec<ShiftCandidate> {
    let merged = merge_duplicate_days(volumes);
    let Some(VolumeThreshold { mean, threshold }) = threshold_of(&merged, policy) else {
        return Vec::new();
    };

    let qualifying = merged
        .into_iter()
        .filter(|(_, count)| policy.qualifies(*count, threshold))
        .collect::<Vec<(NaiveDate, u32)>>();

    let mut candidates = pair_consecutive_days(&qualifying);
    candidates.sort_by_key(|candidate| Reverse(candidate.total_volume));
    candidates.truncate(policy.max_candidates);

    debug!(
        mean,
        threshold,
        qualifying_days = qualifying.len(),
        candidates = candidates.len(),
        "estimated shift candidates"
    );

    if candidates.len() < policy.min_candidates {
        return Vec::new();
    }
    candidates
}

fn threshold_of(
    merged: &BTreeMap<NaiveDate, u32>,
    policy: EstimatorPolicy,
) -> Option<VolumeThreshold> {
    if merged.is_empty() {
        return None;
    }
    let total = merged.values().map(|count| f64::from(*count)).sum::<f64>();
    let mean = total / merged.len() as f64;
    Some(VolumeThreshold {
        mean,
        threshold: policy.threshold(mean),
    })
}

fn merge_duplicate_days(volumes: &[DailyVolume]) -> BTreeMap<NaiveDate, u32> {
    let mut merged = BTreeMap::<NaiveDate, u32>::new();
    for volume in volumes {
        let entry = merged.entry(volume.date).or_default();
        *entry = entry.saturating_add(volume.exam_count);
    }
    merged
}

fn pair_consecutive_days(days: &[(NaiveDate, u32)]) -> Vec<ShiftCandidate> {
    let mut candidates = Vec::with_capacity(days.len());
    let mut index = 0;
    while index < days.len() {
        let (date, count) = days[index];
        if let Some((next_date, next_count)) = days.get(index + 1)
            && date.succ_opt() == Some(*next_date)
        {
            candidates.push(ShiftCandidate {
                date,
                total_volume: count.saturating_add(*next_count),
                kind: CandidateKind::Pair,
            });
            index += 2;
            continue;
        }

        candidates.push(ShiftCandidate {
            date,
            total_volume: count,
            kind: CandidateKind::Single,
        });
        index += 1;
    }
    candidates
}
