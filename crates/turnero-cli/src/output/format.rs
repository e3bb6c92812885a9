use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header line plus one line per row, each column padded to its
/// widest cell. Cells are never truncated.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!(
        "{}{}",
        " ".repeat(INDENT),
        pieces.join(&" ".repeat(COLUMN_GAP))
    );
    line.trim_end().to_string()
}

/// Formats whole pesos with `.` thousands separators, e.g. `$1.331.800`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn text_field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn int_field(data: &Value, key: &str) -> i64 {
    data.get(key).and_then(Value::as_i64).unwrap_or(0)
}

pub fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn range_label(data: &Value) -> Option<String> {
    let from = data.get("from").and_then(Value::as_str);
    let to = data.get("to").and_then(Value::as_str);
    match (from, to) {
        (None, None) => None,
        (from, to) => Some(format!(
            "{} to {}",
            from.unwrap_or("start"),
            to.unwrap_or("end")
        )),
    }
}

pub fn config_label(data: &Value) -> String {
    data.get("config_path")
        .and_then(Value::as_str)
        .map_or_else(|| "built-in defaults".to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Align, Column, format_money, key_value_rows, range_label, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Rows read:", "100".to_string()),
                ("Rows skipped:", "0".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Rows read:     100");
        assert_eq!(rows[1], "  Rows skipped:  0");
    }

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Count",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["tac_double".to_string(), "3".to_string()],
            vec!["rx".to_string(), "120".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0], "  Category    Count");
        assert_eq!(rendered[1], "  tac_double      3");
        assert_eq!(rendered[2], "  rx            120");
    }

    #[test]
    fn money_uses_dot_grouping() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(5_300), "$5.300");
        assert_eq!(format_money(1_331_800), "$1.331.800");
        assert_eq!(format_money(-42_400), "-$42.400");
    }

    #[test]
    fn range_label_fills_open_ends() {
        assert_eq!(range_label(&json!({})), None);
        assert_eq!(
            range_label(&json!({"from": "2025-04-01", "to": null})),
            Some("2025-04-01 to end".to_string())
        );
    }
}
