use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{CellAlignment, Table};
use tracing::{info, info_span, warn};

use sdr_cli::report::write_report;
use sdr_core::{ProcessOptions, Processor};
use sdr_ingest::list_data_files;
use sdr_model::{FormatId, ProcessingResult, RecordLayout};
use sdr_standards::LayoutRegistry;

use crate::cli::{ConvertArgs, OutputArgs, ScanArgs};
use crate::summary::{align_column, apply_table_style, header_cell};

/// Built-in layouts, or the ones in `dir` when given.
pub fn load_registry(dir: Option<&Path>) -> Result<LayoutRegistry> {
    match dir {
        Some(dir) => LayoutRegistry::from_dir(dir)
            .with_context(|| format!("load layouts from {}", dir.display())),
        None => LayoutRegistry::embedded().context("load built-in layouts"),
    }
}

pub fn run_formats(registry: &LayoutRegistry) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Format"),
        header_cell("Variant"),
        header_cell("Description"),
        header_cell("Columns"),
        header_cell("Fields"),
        header_cell("Policy"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let canonical = registry.layouts().map(|layout| ("-", layout));
    for (variant, layout) in canonical.chain(registry.variants()) {
        table.add_row(layout_row(variant, layout));
    }
    println!("{table}");
    Ok(())
}

fn layout_row(variant: &str, layout: &RecordLayout) -> Vec<String> {
    vec![
        layout.format().code().to_string(),
        variant.to_string(),
        layout.description().to_string(),
        layout.line_length().to_string(),
        layout.fields().len().to_string(),
        layout.options().label(),
    ]
}

pub fn run_convert(registry: &LayoutRegistry, args: &ConvertArgs) -> Result<Vec<ProcessingResult>> {
    run_batch(registry, &args.files, &args.output)
}

pub fn run_scan(registry: &LayoutRegistry, args: &ScanArgs) -> Result<Vec<ProcessingResult>> {
    let span = info_span!("scan", dir = %args.dir.display());
    let _guard = span.enter();

    let files = list_data_files(&args.dir, args.format)
        .with_context(|| format!("scan {}", args.dir.display()))?;
    if files.is_empty() {
        warn!(
            format = args.format.map(FormatId::code),
            "no matching data files found"
        );
    } else {
        info!(file_count = files.len(), "data files found");
    }
    run_batch(registry, &files, &args.output)
}

fn run_batch(
    registry: &LayoutRegistry,
    files: &[PathBuf],
    output: &OutputArgs,
) -> Result<Vec<ProcessingResult>> {
    let options = ProcessOptions {
        output_dir: output.output_dir.clone(),
        with_completion: output.with_completion,
        dry_run: output.dry_run,
    };
    let results = Processor::new(registry, options).process_batch(files);
    if let Some(path) = &output.report {
        write_report(path, &results)?;
        info!(path = %path.display(), "report written");
    }
    Ok(results)
}
