use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_estimate(data: &Value) -> io::Result<String> {
    let candidates = data
        .get("candidates")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("estimate output requires candidates"))?;

    let mut lines = Vec::new();
    if candidates.is_empty() {
        lines.push("No shift dates suggested.".to_string());
        lines.push(String::new());
        lines.push(
            "Too few days stood out from the daily average to guess your shifts.".to_string(),
        );
        lines.push(
            "Pass the dates you worked to `turnero bill --shift <date>` directly.".to_string(),
        );
    } else {
        lines.push(format!("Suggested shift dates ({}):", candidates.len()));
        let columns = [
            Column {
                name: "Rank",
                align: Align::Right,
            },
            Column {
                name: "Date",
                align: Align::Left,
            },
            Column {
                name: "Day",
                align: Align::Left,
            },
            Column {
                name: "Kind",
                align: Align::Left,
            },
            Column {
                name: "Exams",
                align: Align::Right,
            },
        ];
        let rows = candidates
            .iter()
            .map(|candidate| {
                vec![
                    format::int_field(candidate, "rank").to_string(),
                    format::text_field(candidate, "date").to_string(),
                    format::text_field(candidate, "weekday").to_string(),
                    format::text_field(candidate, "kind").to_string(),
                    format::int_field(candidate, "total_volume").to_string(),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(&columns, &rows));
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    let day_count = format::array_field(data, "daily_volumes").len();
    let mut summary = vec![
        ("Days with exams:", day_count.to_string()),
        ("Daily mean:", decimal_field(data, "mean")),
        ("Threshold:", decimal_field(data, "threshold")),
    ];
    if let Some(range) = format::range_label(data) {
        summary.push(("Range:", range));
    }
    summary.push(("Config:", format::config_label(data)));
    lines.extend(format::key_value_rows(&summary, 2));

    if let Some(input) = data.get("input") {
        lines.push(String::new());
        lines.extend(super::input_summary_lines(input));
    }

    Ok(lines.join("\n"))
}

fn decimal_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_f64)
        .map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}
