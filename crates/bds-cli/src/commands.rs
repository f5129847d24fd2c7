use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use bds_cli::logging::redact_value;
use bds_core::{RecordScreening, fetch_bleeding_records, interpret_for_assay, screen_record};
use bds_model::{Assay, DateRange, ScreeningResult};
use bds_report::{ReportKind, ReportOutput, run_report as build_report};
use bds_store::{JsonStore, import_csv};

use crate::cli::{AssayArg, ImportArgs, InterpretArgs, RangeArgs, ReportArgs, ReportKindArg};

/// One reading and how it interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub raw: String,
    pub result: Option<ScreeningResult>,
}

pub fn open_store(data_dir: &Path) -> Result<JsonStore> {
    JsonStore::open(data_dir)
        .with_context(|| format!("open row store at {}", data_dir.display()))
}

pub fn run_interpret(args: &InterpretArgs) -> Vec<Interpretation> {
    let assay = assay_from_arg(args.assay);
    args.values
        .iter()
        .map(|raw| {
            let result = interpret_for_assay(assay, raw);
            debug!(
                %assay,
                value = redact_value(raw),
                result = result.map_or("-", ScreeningResult::as_str),
                "interpreted reading"
            );
            Interpretation {
                raw: raw.clone(),
                result,
            }
        })
        .collect()
}

pub fn run_report(store: &JsonStore, args: &ReportArgs) -> Result<ReportOutput> {
    let kind = report_kind_from_arg(args.kind);
    let range = date_range(&args.range)?;
    build_report(store, kind, range).with_context(|| format!("build {kind} report"))
}

pub fn run_screen(store: &JsonStore, args: &RangeArgs) -> Result<Vec<RecordScreening>> {
    let range = date_range(args)?;
    let span = info_span!("screen", from = %range.start(), to = %range.end());
    let _guard = span.enter();
    let records = fetch_bleeding_records(store, range).context("fetch bleeding records")?;
    let screenings: Vec<RecordScreening> = records.iter().map(screen_record).collect();
    let reactive = screenings.iter().filter(|s| s.any_reactive()).count();
    info!(records = screenings.len(), reactive, "screening register ready");
    Ok(screenings)
}

pub fn run_import(store: &JsonStore, args: &ImportArgs) -> Result<usize> {
    import_csv(store, &args.table, &args.csv)
        .with_context(|| format!("import {} into table {}", args.csv.display(), args.table))
}

fn date_range(args: &RangeArgs) -> Result<DateRange> {
    let to = args.to.unwrap_or(args.from);
    DateRange::new(args.from, to).context("invalid date range")
}

fn assay_from_arg(arg: AssayArg) -> Assay {
    match arg {
        AssayArg::HBsAg => Assay::HBsAg,
        AssayArg::Hcv => Assay::Hcv,
        AssayArg::Hiv => Assay::Hiv,
        AssayArg::Vdrl => Assay::Vdrl,
    }
}

fn report_kind_from_arg(arg: ReportKindArg) -> ReportKind {
    match arg {
        ReportKindArg::BagType => ReportKind::BagType,
        ReportKindArg::DonorCategory => ReportKind::DonorCategory,
        ReportKindArg::BloodGroup => ReportKind::BloodGroup,
        ReportKindArg::PositiveTests => ReportKind::PositiveTests,
        ReportKindArg::Crossmatch => ReportKind::Crossmatch,
    }
}
