use crate::driver::Report;

const HEADERS: [&str; 7] = ["Benchmark", "(capacity)", "Mode", "Cnt", "Score", "Error", "Units"];

/// Render reports as a results table, one row per target and capacity.
pub fn render_table(reports: &[Report]) -> String {
    let rows: Vec<[String; 7]> = reports
        .iter()
        .map(|r| {
            let error = match r.error() {
                Some(error) => format!("± {:.3}", error),
                None => "".to_string(),
            };
            [
                r.target.name().to_string(),
                r.capacity.to_string(),
                r.mode().to_string(),
                r.count().to_string(),
                format!("{:.3}", r.score()),
                error,
                r.units(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    out.push_str(&render_row(&headers, &widths));
    for row in rows.iter() {
        out.push_str(&render_row(row, &widths));
    }
    out
}

// Benchmark name and units are left aligned, everything else right.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len() - 1;
    let cols: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, &w))| {
            let pad = w - cell.chars().count();
            match i {
                0 => format!("{}{}", cell, " ".repeat(pad)),
                i if i == last => cell.to_string(),
                _ => format!("{}{}", " ".repeat(pad), cell),
            }
        })
        .collect();
    cols.join("  ") + "\n"
}

/// Convert a report to JSON format, one object per line.
pub fn render_json(report: &Report) -> String {
    let error = match report.error() {
        Some(error) => format!("{}", error),
        None => "null".to_string(),
    };
    let strs = [
        format!("\"benchmark\": \"{}\"", report.target.name()),
        format!("\"capacity\": {}", report.capacity),
        format!("\"mode\": \"{}\"", report.mode()),
        format!("\"count\": {}", report.count()),
        format!("\"score\": {}", report.score()),
        format!("\"error\": {}", error),
        format!("\"units\": \"{}\"", report.units()),
        format!("\"raw_ns\": {}", report.samples.json()),
    ];
    "{ ".to_string() + strs.join(", ").as_str() + " }"
}
