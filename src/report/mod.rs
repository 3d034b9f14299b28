/*
    This module renders the analysis for people to read
*/

use crate::analysis::conflicts::{show_terminals, ConflictWarning};
use crate::analysis::Analysis;

const HEADERS: [&str; 4] = ["Symbol", "Nullable", "FIRST", "FOLLOW"];

// One row per nonterminal
fn rows(analysis: &Analysis) -> Vec<[String; 4]> {
    let grammar = analysis.grammar();
    grammar.nonterminals()
        .map(|name| {
            let symbol = if grammar.is_defined(name) {
                name.to_string()
            } else {
                format!("{} (undefined)", name)
            };
            let nullable = if analysis.is_nullable(name) { "yes" } else { "no" };

            [
                symbol,
                nullable.to_string(),
                show_terminals(analysis.first(name)),
                show_terminals(analysis.follow(name))
            ]
        })
        .collect()
}

fn push_row(report: &mut String, cells: &[String], widths: &[usize; 4]) {
    let line = cells.iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    report.push_str(line.trim_end());
    report.push('\n');
}

// Nothing at all for an empty grammar. `color` adds ANSI escapes to the
// warnings.
pub fn render(analysis: &Analysis, warnings: &[ConflictWarning], color: bool) -> String {
    let mut report = String::new();
    if analysis.grammar().is_empty() {
        return report;
    }

    let rows = rows(analysis);
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    push_row(&mut report, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut report, row, &widths);
    }

    report.push('\n');
    let summary = match warnings.len() {
        0 => "No conflicts found".to_string(),
        1 => "1 conflict found".to_string(),
        n => format!("{} conflicts found", n)
    };
    report.push_str(&summary);
    report.push('\n');

    for warning in warnings {
        let line = if color { format!("{}", warning) } else { format!("{:#}", warning) };
        report.push_str(&line);
        report.push('\n');
    }

    return report;
}
