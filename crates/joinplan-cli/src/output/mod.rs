//! Output formatting for the CLI.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table};
use joinplan_adapters::{PlanOutput, format_plan_line};
use joinplan_core::{Catalog, JoinResult, PlanNotation};
use joinplan_engine::MemoStats;

use crate::OutputFormat;

/// Print the optimizer result in the selected format.
pub fn print_result(
    result: &JoinResult,
    format: OutputFormat,
    notation: PlanNotation,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", format_plan_line(result, notation)),
        OutputFormat::Json => println!("{}", PlanOutput::new(result, notation).to_json()?),
    }
    Ok(())
}

/// Print a key-value table of search statistics to stderr.
pub fn print_stats(catalog: &Catalog, memo: MemoStats, elapsed: Duration) {
    let items = [
        ("Tables", catalog.table_count().to_string()),
        ("Scan predicates", catalog.predicates().scans().len().to_string()),
        ("Join predicates", catalog.predicates().joins().len().to_string()),
        ("Memo entries", memo.entries.to_string()),
        ("Memo hits", memo.hits.to_string()),
        ("Memo misses", memo.misses.to_string()),
        ("Search time", format!("{:.3} ms", elapsed.as_secs_f64() * 1000.0)),
    ];

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Statistic").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    for (key, value) in items {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    eprintln!("{table}");
}
