use serde::Deserialize;

/// Shift-date estimator policy identifier, emitted with every suggestion list.
pub const ESTIMATOR_POLICY_VERSION: &str = "estimator/v1";

/// v1 "dupla" estimator policy.
///
/// Notes:
/// - A day qualifies at `max(mean * threshold_ratio, threshold_floor)`.
/// - The `mean * 0.8` ratio seen in some older runs is not used.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimatorPolicy {
    pub threshold_ratio: f64,
    pub threshold_floor: f64,
    pub min_candidates: usize,
    pub max_candidates: usize,
}

impl EstimatorPolicy {
    pub fn threshold(self, mean: f64) -> f64 {
        (mean * self.threshold_ratio).max(self.threshold_floor)
    }

    pub fn qualifies(self, exam_count: u32, threshold: f64) -> bool {
        f64::from(exam_count) >= threshold
    }
}

impl Default for EstimatorPolicy {
    fn default() -> Self {
        ESTIMATOR_POLICY_V1
    }
}

pub const ESTIMATOR_POLICY_V1: EstimatorPolicy = EstimatorPolicy {
    threshold_ratio: 1.2,
    threshold_floor: 4.0,
    min_candidates: 2,
    max_candidates: 6,
};
