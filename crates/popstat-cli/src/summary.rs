use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use popstat_analytics::{ProjectionOutcome, SnapshotReport, WideTable};
use popstat_cli::pipeline::AnalysisRun;
use popstat_model::{
    ChangeRecord, ColumnSummary, Projection, YearValue, format_count, format_signed,
    format_thousands,
};

pub fn print_report(run: &AnalysisRun) {
    let normalization = &run.normalization;
    println!("Source: {}", run.source.display());
    println!(
        "Rows: {} read, {} kept, {} malformed, {} sentinel cells repaired, {} uncoercible cells",
        normalization.rows_read,
        run.report.records,
        normalization.malformed_rows,
        normalization.sentinel_rewrites,
        normalization.coercion_misses.total(),
    );
    println!("Duplicate rows: {}", run.report.duplicate_rows);

    print_section("Basic statistics", statistics_table(&run.report.summary));
    print_section(
        "National population",
        national_table(&run.report.national_series),
    );
    print_section(
        "Largest year-over-year changes",
        changes_table(&run.report.ranked_changes),
    );
    match &run.report.snapshot {
        Some(snapshot) => print_section(
            &format!(
                "Population change {} to {}",
                snapshot.year_a, snapshot.year_b
            ),
            snapshot_table(snapshot),
        ),
        None => {
            println!();
            println!("Population change: Unavailable (no years in the data)");
        }
    }
    print_section("National projection", projection_table(&run.report.projection));
    print_section(
        "Population by region",
        stacked_table(&run.report.stacked_population),
    );
}

fn print_section(title: &str, table: Table) {
    println!();
    println!("{title}:");
    println!("{table}");
}

fn statistics_table(summaries: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Missing"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..10 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.column).add_attribute(Attribute::Bold),
            Cell::new(summary.count),
            missing_cell(summary.missing),
            stat_cell(summary.mean),
            stat_cell(summary.std),
            stat_cell(summary.min),
            stat_cell(summary.q25),
            stat_cell(summary.median),
            stat_cell(summary.q75),
            stat_cell(summary.max),
        ]);
    }
    table
}

fn national_table(series: &[YearValue]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Year"), header_cell("Population")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if series.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("Unavailable")]);
    }
    for point in series {
        table.add_row(vec![
            Cell::new(point.year),
            Cell::new(format_thousands(point.value)),
        ]);
    }
    table
}

fn changes_table(changes: &[ChangeRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Year"),
        header_cell("Region"),
        header_cell("Population"),
        header_cell("Change"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (rank, change) in changes.iter().enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            Cell::new(change.year),
            Cell::new(change.display_region()),
            Cell::new(format_thousands(change.population)),
            change_cell(change.delta),
        ]);
    }
    table
}

fn snapshot_table(snapshot: &SnapshotReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Code"),
        header_cell(&snapshot.year_a.to_string()),
        header_cell(&snapshot.year_b.to_string()),
        header_cell("Change"),
        header_cell("Change %"),
    ]);
    apply_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    if snapshot.rows.is_empty() {
        table.add_row(vec![
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("Unavailable"),
        ]);
    }
    for row in &snapshot.rows {
        table.add_row(vec![
            Cell::new(row.region.as_str()),
            Cell::new(&row.code),
            Cell::new(format_thousands(row.population_past)),
            Cell::new(format_thousands(row.population_latest)),
            change_cell(row.absolute_change),
            percent_cell(row.percent_change),
        ]);
    }
    table
}

fn projection_table(outcome: &ProjectionOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    match outcome {
        ProjectionOutcome::Projected(projection) => {
            for (label, value) in projection_rows(projection) {
                table.add_row(vec![Cell::new(label), Cell::new(value)]);
            }
        }
        ProjectionOutcome::Unavailable {
            target_year,
            reason,
        } => {
            table.add_row(vec![Cell::new("Target year"), Cell::new(target_year)]);
            table.add_row(vec![
                Cell::new("Projected population"),
                Cell::new("Unavailable")
                    .fg(Color::Yellow)
                    .add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![Cell::new("Reason"), dim_cell(reason)]);
        }
    }
    table
}

fn projection_rows(projection: &Projection) -> Vec<(&'static str, String)> {
    vec![
        ("Target year", projection.target_year.to_string()),
        (
            "Projected population",
            format_thousands(projection.projected_population),
        ),
        ("Last observed year", projection.last_year.to_string()),
        (
            "Last observed population",
            format_thousands(projection.last_population),
        ),
        ("Average births", format_thousands(projection.avg_births)),
        ("Average deaths", format_thousands(projection.avg_deaths)),
        (
            "Natural change per year",
            format_signed(projection.natural_change()),
        ),
        ("Years averaged", projection.window_years.to_string()),
    ]
}

fn stacked_table(wide: &WideTable) -> Table {
    let mut header = vec![header_cell("Year")];
    header.extend(wide.regions.iter().map(|code| header_cell(code)));
    header.push(header_cell("Total"));

    let mut table = Table::new();
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..=wide.regions.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for year in wide.years() {
        let mut row = vec![Cell::new(year).add_attribute(Attribute::Bold)];
        row.extend(
            wide.regions
                .iter()
                .map(|code| Cell::new(format_count(wide.value(year, code)))),
        );
        row.push(Cell::new(format_count(wide.year_total(year))).add_attribute(Attribute::Bold));
        table.add_row(row);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn change_cell(delta: f64) -> Cell {
    let cell = Cell::new(format_signed(delta));
    if delta > 0.0 {
        cell.fg(Color::Green)
    } else if delta < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn percent_cell(percent: Option<f64>) -> Cell {
    match percent {
        Some(value) => Cell::new(format_percent(value)),
        None => dim_cell("-"),
    }
}

fn missing_cell(missing: usize) -> Cell {
    if missing > 0 {
        Cell::new(missing).fg(Color::Yellow)
    } else {
        dim_cell(missing)
    }
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_stat(value)),
        None => dim_cell("-"),
    }
}

fn format_percent(value: f64) -> String {
    format!("{value:+.2}%")
}

fn format_stat(value: f64) -> String {
    format!("{value:.2}")
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
