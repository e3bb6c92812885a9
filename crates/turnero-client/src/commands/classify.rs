use crate::ClientResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ClassificationRow, ClassifyData};
use crate::engine::classify::ExamClassifier;
use crate::engine::normalize::normalize_procedure_name;

pub fn run(names: &[String]) -> ClientResult<SuccessEnvelope> {
    let classifier = ExamClassifier::new();
    let rows = names
        .iter()
        .map(|name| {
            let classification = classifier.classify(name);
            ClassificationRow {
                procedure_name: name.clone(),
                normalized_name: normalize_procedure_name(name),
                exam_type: classification.exam_type().as_str().to_string(),
                regions: classification
                    .regions()
                    .iter()
                    .map(|region| region.as_str().to_string())
                    .collect(),
                region_count: classification.region_count(),
                is_double: classification.is_double(),
                is_triple: classification.is_triple(),
                billing_category: classification.billing_category().as_str().to_string(),
            }
        })
        .collect::<Vec<ClassificationRow>>();

    success("classify", ClassifyData { rows })
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn classify_reports_regions_and_category() {
        let names = vec![
            "TAC TORAX ABDOMEN Y PELVIS".to_string(),
            "RX DE TORAX".to_string(),
        ];
        let response = run(&names);
        assert!(response.is_ok());
        if let Ok(envelope) = response {
            assert_eq!(envelope.command, "classify");
            let rows = &envelope.data["rows"];
            assert_eq!(rows[0]["region_count"], 2);
            assert_eq!(rows[0]["billing_category"], "tac_double");
            assert_eq!(rows[0]["regions"][1], "abdomen_pelvis");
            assert_eq!(rows[1]["exam_type"], "RX");
            assert_eq!(rows[1]["regions"].as_array().map(Vec::len), Some(0));
        }
    }
}
