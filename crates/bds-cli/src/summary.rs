use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use bds_cli::config::OutputFormat;
use bds_core::RecordScreening;
use bds_model::{Assay, ReportSummary, ScreeningResult};
use bds_report::{PositiveRecord, ReportOutput, summary_to_csv, to_json};

use crate::commands::Interpretation;

pub fn print_interpretations(interpretations: &[Interpretation]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Result")]);
    apply_table_style(&mut table);
    for interpretation in interpretations {
        table.add_row(vec![
            Cell::new(&interpretation.raw),
            result_cell(interpretation.result),
        ]);
    }
    println!("{table}");
}

pub fn print_report(output: &ReportOutput, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(output).context("render JSON")?),
        OutputFormat::Csv => {
            print!("{}", summary_to_csv(output.summary()).context("render CSV")?);
        }
        OutputFormat::Table => {
            println!("{}", summary_table(output.summary()));
            if let ReportOutput::PositiveTests(report) = output
                && !report.records.is_empty()
            {
                println!();
                println!("{}", positive_records_table(&report.records));
            }
        }
    }
    Ok(())
}

pub fn print_screening(screenings: &[RecordScreening], format: OutputFormat) -> Result<()> {
    let rows: Vec<ScreeningRow> = screenings.iter().map(ScreeningRow::from).collect();
    match format {
        OutputFormat::Json => {
            println!("{}", to_json(&rows).context("render JSON")?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
            for row in &rows {
                writer.serialize(row).context("render CSV")?;
            }
            writer.flush().context("write CSV")?;
        }
        OutputFormat::Table => {
            println!("{}", screening_table(screenings));
            let reactive = screenings.iter().filter(|s| s.any_reactive()).count();
            println!("{} records, {reactive} with a reactive marker", screenings.len());
        }
    }
    Ok(())
}

/// Two-column table of a summary with a bold total row.
pub fn summary_table(summary: &ReportSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(&summary.title), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    if summary.is_empty() {
        table.add_row(vec![dim_cell("No records"), dim_cell("-")]);
    }
    for row in &summary.rows {
        table.add_row(vec![Cell::new(&row.label), Cell::new(row.count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
    ]);
    table
}

fn positive_records_table(records: &[PositiveRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Bag No"),
        header_cell("Donor"),
        header_cell("Bleeding Date"),
        header_cell("Positive"),
    ]);
    apply_table_style(&mut table);
    for record in records {
        let assays: Vec<&str> = record.assays.iter().copied().map(Assay::display_name).collect();
        table.add_row(vec![
            optional_cell(record.bag_no.as_deref()),
            optional_cell(record.donor_id.as_deref()),
            Cell::new(record.bleeding_date),
            Cell::new(assays.join(", "))
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table
}

fn screening_table(screenings: &[RecordScreening]) -> Table {
    let mut table = Table::new();
    let mut header = vec![
        header_cell("Bag No"),
        header_cell("Donor"),
        header_cell("Bleeding Date"),
    ];
    header.extend(Assay::ALL.iter().map(|assay| header_cell(assay.display_name())));
    table.set_header(header);
    apply_table_style(&mut table);
    for screening in screenings {
        let mut row = vec![
            optional_cell(screening.bag_no.as_deref()),
            optional_cell(screening.donor_id.as_deref()),
            Cell::new(screening.bleeding_date),
        ];
        row.extend(
            Assay::ALL
                .iter()
                .map(|assay| result_cell(screening.result(*assay))),
        );
        table.add_row(row);
    }
    table
}

/// Flat form of a screening register row for JSON and CSV output.
#[derive(Debug, Serialize)]
struct ScreeningRow {
    bag_no: Option<String>,
    donor_id: Option<String>,
    bleeding_date: String,
    hbsag: &'static str,
    hcv: &'static str,
    hiv: &'static str,
    vdrl: &'static str,
}

impl From<&RecordScreening> for ScreeningRow {
    fn from(screening: &RecordScreening) -> Self {
        let result = |assay| screening.result(assay).map_or("", ScreeningResult::as_str);
        Self {
            bag_no: screening.bag_no.clone(),
            donor_id: screening.donor_id.clone(),
            bleeding_date: screening.bleeding_date.to_string(),
            hbsag: result(Assay::HBsAg),
            hcv: result(Assay::Hcv),
            hiv: result(Assay::Hiv),
            vdrl: result(Assay::Vdrl),
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn result_cell(result: Option<ScreeningResult>) -> Cell {
    match result {
        Some(ScreeningResult::Reactive) => Cell::new("REACTIVE")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Some(ScreeningResult::BorderlineReactive) => {
            Cell::new("BORDERLINE REACTIVE").fg(Color::Yellow)
        }
        Some(ScreeningResult::NonReactive) => Cell::new("NON-REACTIVE").fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
