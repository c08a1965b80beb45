use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sdr_model::ProcessingResult;

pub fn print_summary(results: &[ProcessingResult]) {
    if results.is_empty() {
        println!("No files to convert.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Records"),
        header_cell("Output"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    let mut total_records = 0usize;
    let mut succeeded = 0usize;
    for result in results {
        if result.success {
            total_records += result.record_count;
            succeeded += 1;
        }
        table.add_row(vec![
            Cell::new(result.file_name()),
            format_cell(result),
            Cell::new(result.record_count),
            output_cell(result),
            status_cell(result.success),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!("{succeeded}/{}", results.len())).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let errors: Vec<_> = results
        .iter()
        .filter_map(|result| Some((result.file_name(), result.error.as_deref()?)))
        .collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for (file, error) in errors {
            eprintln!("- {file}: {error}");
        }
    }

    let warnings: Vec<_> = results
        .iter()
        .flat_map(|result| result.warnings.iter().map(move |w| (result.file_name(), w)))
        .collect();
    if !warnings.is_empty() {
        println!("Warnings:");
        for (file, warning) in warnings {
            println!("- {file}: {warning}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn format_cell(result: &ProcessingResult) -> Cell {
    match result.format {
        Some(format) => Cell::new(format.code())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("?"),
    }
}

fn output_cell(result: &ProcessingResult) -> Cell {
    match &result.output_path {
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
}

fn status_cell(success: bool) -> Cell {
    if success {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
