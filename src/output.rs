//! Output formatting for the inspection commands.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn print<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            OutputFormat::Table => match serde_json::to_value(data) {
                Ok(Value::Array(rows)) => print_table(&rows),
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default()),
                Err(_) => {}
            },
        }
    }
}

/// Render an array of flat objects as aligned columns, keyed by the first
/// row's fields. Non-object rows fall back to their JSON form.
fn print_table(rows: &[Value]) {
    let Some(first) = rows.first().and_then(Value::as_object) else {
        for row in rows {
            println!("{}", row);
        }
        return;
    };

    let columns: Vec<&String> = first.keys().collect();
    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    let mut cells: Vec<Vec<String>> = Vec::with_capacity(rows.len());

    for row in rows {
        let rendered: Vec<String> = columns
            .iter()
            .map(|col| match row.get(col.as_str()) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            })
            .collect();
        for (i, cell) in rendered.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
        cells.push(rendered);
    }

    let header: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:<width$}", c.to_uppercase(), width = widths[i]))
        .collect();
    println!("{}", header.join("  "));

    for row in cells {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}
