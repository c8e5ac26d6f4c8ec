use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Arrays become one row per element; objects become key/value rows, with
/// nested arrays of objects rendered as their own tables below.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(array_table(&items)),
        Value::Object(map) => {
            let mut rows = Vec::new();
            let mut sections = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                        sections.push(format!("{key}:\n{}", array_table(&items)));
                    }
                    other => rows.push(vec![key, cell(&other)]),
                }
            }
            let mut out = Vec::with_capacity(sections.len() + 1);
            if !rows.is_empty() {
                out.push(table::render_table(&["key", "value"], &rows, options()));
            }
            out.extend(sections);
            Ok(out.join("\n\n"))
        }
        scalar => Ok(cell(&scalar)),
    }
}

fn array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, options());
    }

    // Columns in first-seen order, so entity fields keep their declared order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_table(&header_refs, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        hazard: &'static str,
        risk: &'static str,
        target: Option<f64>,
    }

    #[derive(Serialize)]
    struct Report {
        applied: usize,
        failures: Vec<Row>,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                hazard: "Hurricane",
                risk: "critical",
                target: Some(10.0),
            },
            Row {
                hazard: "Flood",
                risk: "low",
                target: None,
            },
        ]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&rows(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["hazard"], "Hurricane");
        assert!(parsed[1]["target"].is_null());
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&rows(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn array_table_keeps_field_order() {
        let out = render(&rows(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let hazard = header.find("hazard").expect("hazard column");
        let risk = header.find("risk").expect("risk column");
        assert!(hazard < risk);
        assert!(out.contains("Flood"));
    }

    #[test]
    fn object_with_rows_renders_section() {
        let report = Report {
            applied: 1,
            failures: rows(),
        };
        let out = render(&report, OutputFormat::Table).expect("table render should work");
        assert!(out.contains("applied"));
        assert!(out.contains("failures:"));
        assert!(out.contains("Hurricane"));
    }

    #[test]
    fn empty_array_is_marked() {
        let out = render(&Vec::<Row>::new(), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
