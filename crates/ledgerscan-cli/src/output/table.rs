use ledgerscan_core::model::UploadReport;
use serde_json::Value;

pub fn print(report: &UploadReport) {
    print!("{}", format_report(report));
}

pub fn format_report(report: &UploadReport) -> String {
    let mut out = String::new();

    for file in &report.files {
        out.push_str(&format!("  {}  {}\n", file.filename, file.status));
    }
    out.push('\n');

    if report.table.is_empty() {
        out.push_str("  (no table extracted)\n");
    } else {
        out.push_str(&format_rows(report));
    }
    out.push('\n');

    out.push_str(&format!(
        "  Max balance: {}\n  Min balance: {}\n",
        display_value(&report.max_balance),
        display_value(&report.min_balance)
    ));

    out
}

fn format_rows(report: &UploadReport) -> String {
    // Every row carries the same columns.
    let columns: Vec<&String> = report.table[0].keys().collect();
    let cells: Vec<Vec<String>> = report
        .table
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(*c).map(display_value).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ").trim_end()));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("  ")));

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect();
        out.push_str(&format!("  {}\n", line.join("  ").trim_end()));
    }

    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
