use std::io;

use serde_json::Value;

use super::format::{self, Align, Column};

pub fn render_classify(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("classify output requires rows"))?;

    let columns = [
        Column {
            name: "Procedure",
            align: Align::Left,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Regions",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
    ];

    let table_rows = rows
        .iter()
        .map(|row| {
            let regions = format::array_field(row, "regions")
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>();
            vec![
                format::text_field(row, "procedure_name").to_string(),
                format::text_field(row, "exam_type").to_string(),
                if regions.is_empty() {
                    "-".to_string()
                } else {
                    regions.join(", ")
                },
                format::text_field(row, "billing_category").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    Ok(format::render_table(&columns, &table_rows).join("\n"))
}
