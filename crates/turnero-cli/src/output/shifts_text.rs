use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_shifts(data: &Value) -> io::Result<String> {
    let shifts = data
        .get("shifts")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("shifts output requires shifts"))?;

    let mut lines = vec![
        format!(
            "{} shift(s), {} hours",
            shifts.len(),
            format::int_field(data, "total_hours")
        ),
        format!("Config: {}", format::config_label(data)),
        String::new(),
    ];
    lines.extend(shift_table(shifts));
    Ok(lines.join("\n"))
}

/// Shared with the bill report.
pub fn shift_table(shifts: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Day",
            align: Align::Left,
        },
        Column {
            name: "Profile",
            align: Align::Left,
        },
        Column {
            name: "Start",
            align: Align::Left,
        },
        Column {
            name: "End",
            align: Align::Left,
        },
        Column {
            name: "Hours",
            align: Align::Right,
        },
    ];

    let rows = shifts
        .iter()
        .map(|shift| {
            let is_holiday = shift
                .get("is_holiday")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let date = format::text_field(shift, "date");
            vec![
                if is_holiday {
                    format!("{date} (F)")
                } else {
                    date.to_string()
                },
                format::text_field(shift, "weekday").to_string(),
                format::text_field(shift, "profile").to_string(),
                format::text_field(shift, "start").to_string(),
                format::text_field(shift, "end").to_string(),
                format::int_field(shift, "hours").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    format::render_table(&columns, &rows)
}
