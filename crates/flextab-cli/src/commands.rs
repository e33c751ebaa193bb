use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, ensure};
use tracing::{info, info_span, warn};

use flextab_model::Table;
use flextab_report::{LatexOptions, ReportFormat, TableReader, TableReports, writer_for};
use flextab_sweep::{Dimension, DiscreteDimension, FixedSizeDimension, JoinedLabel, ParameterSpace};

use crate::cli::{InspectArgs, RenderArgs, SweepArgs};
use crate::config::ReportConfig;
use crate::types::{ColumnReport, InspectReport, RenderOutcome};

pub fn run_render(args: &RenderArgs, config: &ReportConfig) -> Result<RenderOutcome> {
    let span = info_span!("render", input = %args.input.display());
    let _guard = span.enter();
    let config = config
        .clone()
        .with_table_args(&args.table)
        .with_latex_args(&args.latex)?;

    let mut table = read_table(&args.input)?;
    config.apply(&mut table)?;
    let format = ReportFormat::from(args.output.format);
    write_report(
        &table,
        format,
        &config.latex_options(),
        args.output.output.as_deref(),
    )?;
    Ok(outcome(
        args.input.display().to_string(),
        &table,
        format,
        args.output.output.as_deref(),
    ))
}

pub fn run_inspect(args: &InspectArgs, config: &ReportConfig) -> Result<InspectReport> {
    let config = config.clone().with_table_args(&args.table);
    let mut table = read_table(&args.input)?;
    config.apply(&mut table)?;
    Ok(InspectReport {
        input: args.input.clone(),
        rows: table.row_count(),
        columns: inspect_columns(&table),
    })
}

pub fn run_sweep(args: &SweepArgs, config: &ReportConfig) -> Result<RenderOutcome> {
    let config = config
        .clone()
        .with_table_args(&args.table)
        .with_latex_args(&args.latex)?;

    let mut space = ParameterSpace::new();
    for arg in &args.dimensions {
        let dimension = parse_dimension(arg)?;
        if dimension.size() == 0 {
            warn!(dimension = dimension.name(), "empty dimension, the sweep has no configurations");
        }
        space = space
            .with_dimension(&dimension)
            .with_context(|| format!("add dimension {arg:?}"))?;
    }

    let mut label = JoinedLabel::new().with_separator(args.label_separator.as_str());
    if !args.label_keys.is_empty() {
        label = label.with_keys(args.label_keys.iter().cloned());
    }

    let mut table = Table::new();
    config.apply(&mut table)?;
    let configurations = space.populate(&mut table, &label);
    info!(configurations, rows = table.row_count(), "enumerated parameter space");

    let format = ReportFormat::from(args.output.format);
    write_report(
        &table,
        format,
        &config.latex_options(),
        args.output.output.as_deref(),
    )?;
    Ok(outcome(
        format!("sweep of {} configurations", space.size()),
        &table,
        format,
        args.output.output.as_deref(),
    ))
}

/// Read a CSV table with string cells.
pub fn read_table(path: &Path) -> Result<Table<String>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut table = Table::new();
    let rows = table
        .csv_reader()
        .read(&mut reader)
        .with_context(|| format!("read table {}", path.display()))?;
    info!(
        path = %path.display(),
        rows,
        columns = table.column_count(),
        "read table"
    );
    Ok(table)
}

/// Render `table` to `output`, or to stdout when no path is given.
pub fn write_report(
    table: &Table<String>,
    format: ReportFormat,
    latex: &LatexOptions,
    output: Option<&Path>,
) -> Result<()> {
    let writer = writer_for(format, table, latex);
    match output {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            writer
                .write(&mut sink)
                .with_context(|| format!("write {format} to {}", path.display()))?;
            sink.flush()
                .with_context(|| format!("flush {}", path.display()))?;
            info!(path = %path.display(), %format, "wrote report");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = stdout.lock();
            writer
                .write(&mut sink)
                .with_context(|| format!("write {format} to stdout"))?;
            sink.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

/// Parse `NAME=V1,V2,...` into a dimension.
pub fn parse_dimension(spec: &str) -> Result<DiscreteDimension<String>> {
    let (name, values) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("dimension {spec:?} is not NAME=V1,V2,..."))?;
    let name = name.trim();
    ensure!(!name.is_empty(), "dimension {spec:?} has no name");
    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    Ok(DiscreteDimension::new(name, values))
}

fn inspect_columns(table: &Table<String>) -> Vec<ColumnReport> {
    let partition = table.partition_columns();
    let row_ids = table.row_ids();
    table
        .column_ids()
        .iter()
        .map(|column| {
            let values: BTreeSet<String> = row_ids
                .iter()
                .map(|row_id| table.value_as_text(row_id, column))
                .collect();
            let invariant = partition.is_invariant(column);
            ColumnReport {
                name: column.clone(),
                invariant,
                distinct: values.len(),
                value: if invariant {
                    values.into_iter().next()
                } else {
                    None
                },
            }
        })
        .collect()
}

fn outcome(
    source: String,
    table: &Table<String>,
    format: ReportFormat,
    output: Option<&Path>,
) -> RenderOutcome {
    let compacted = matches!(format, ReportFormat::Wiki | ReportFormat::Spreadsheet);
    let invariant_columns = if compacted && table.is_compact() {
        table.partition_columns().invariant.len()
    } else {
        0
    };
    RenderOutcome {
        source,
        format,
        output: output.map(Path::to_path_buf),
        rows: table.row_count(),
        columns: table.column_count(),
        invariant_columns,
    }
}

/// Ensure a parent directory exists for a file path.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}
