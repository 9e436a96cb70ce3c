//! Terminal and JSON-lines rendering of site reports

use crate::output::SiteReport;
use std::io::Write;

const HEADERS: [&str; 5] = ["Site", "Clicks", "Renders", "Nodes", "Time (ms)"];

/// Formats reports as an aligned table, one row per site
///
/// Sites where no target was reached still get a row, with -1 clicks.
pub fn format_table(reports: &[SiteReport]) -> String {
    let rows: Vec<[String; 5]> = reports
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.clicks.to_string(),
                r.renders.to_string(),
                r.nodes_built.to_string(),
                r.elapsed_ms.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let mut line = format!("{:<width$}", cells[0], width = widths[0]);
    for (cell, width) in cells.iter().zip(widths).skip(1) {
        line.push_str(&format!("  {:>width$}", cell, width = *width));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Prints the report table followed by the path of every found target
pub fn print_table(reports: &[SiteReport]) {
    print!("{}", format_table(reports));

    let found: Vec<_> = reports.iter().filter(|r| r.is_found()).collect();
    if !found.is_empty() {
        println!();
        println!("Paths:");
        for report in found {
            println!("  {}: {}", report.name, report.trace.join(" -> "));
        }
    }
}

/// Writes one JSON object per report, one per line
pub fn write_json_lines<W: Write>(mut writer: W, reports: &[SiteReport]) -> crate::Result<()> {
    for report in reports {
        serde_json::to_writer(&mut writer, report)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
