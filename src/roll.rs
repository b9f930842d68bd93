use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};

use text_diff::print_diff;

use voter_roll::builder::RollBuilder;
use voter_roll::{RecordSet, SearchOptions};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod session;

use crate::args::Args;
use crate::roll::config_reader::*;
use crate::roll::session::Session;

#[derive(Debug, Snafu)]
pub enum RollError {
    #[snafu(display("Error opening roll file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No readable worksheet in the workbook"))]
    EmptyExcel {},
    #[snafu(display("Cell at line {lineno} has an unexpected type: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening delimited file"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error reading line {lineno} of delimited file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening config file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing config"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The voter roll is unavailable: {source}"))]
    RollUnavailable { source: voter_roll::RollErrors },
    #[snafu(display("Error writing export file {path}"))]
    WritingExport {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    MissingParentDir {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RollResult<T> = Result<T, RollError>;
pub type BRollResult<T> = Result<T, Box<RollError>>;

/// A raw table as produced by the readers, before any normalization.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn read_roll_data(root_path: String, source: &FileSource) -> BRollResult<ParsedTable> {
    let p: PathBuf = [root_path, source.file_path.clone()].iter().collect();
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read roll file {:?}", p2);
    match source.provider_kind()? {
        Provider::Excel => io_xlsx::read_excel_roll(p2, source),
        Provider::Delimited => io_csv::read_csv_roll(p2, source),
    }
}

/// Assembles the tables of all the sources into one record set.
///
/// Multiple sources are concatenated. Their headers must agree after
/// trimming, otherwise the whole load fails and no partial roll is returned.
fn build_record_set(tables: &[ParsedTable]) -> RollResult<RecordSet> {
    let first = match tables.first() {
        Some(x) => x,
        None => whatever!("no roll file sources detected"),
    };
    let reference_header = io_common::trimmed_header(&first.header);
    for table in tables.iter().skip(1) {
        let header = io_common::trimmed_header(&table.header);
        if header != reference_header {
            whatever!(
                "Roll files disagree on their columns: {:?} vs {:?}",
                reference_header,
                header
            );
        }
    }
    let mut builder = RollBuilder::new(&first.header).context(RollUnavailableSnafu {})?;
    for table in tables.iter() {
        for row in table.rows.iter() {
            builder.add_row(row).context(RollUnavailableSnafu {})?;
        }
    }
    Ok(builder.build())
}

pub fn run_lookup(args: &Args) -> RollResult<()> {
    // Every file path in a config document is relative to the config
    // location; paths given on the command line are relative to the current
    // directory.
    let (config, config_root) = match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            let config_p = Path::new(config_path.as_str());
            let root = config_p.parent().context(MissingParentDirSnafu {})?;
            (config, root.display().to_string())
        }
        None => (config_from_args(args)?, "".to_string()),
    };
    info!("config: {:?}", config);

    let sources: Vec<(String, FileSource)> = if args.input.is_some() && args.config.is_some() {
        let overriding = config_from_args(args)?;
        overriding
            .roll_file_sources
            .into_iter()
            .map(|s| ("".to_string(), s))
            .collect()
    } else {
        config
            .roll_file_sources
            .iter()
            .cloned()
            .map(|s| (config_root.clone(), s))
            .collect()
    };

    if sources.is_empty() {
        whatever!("no roll file sources detected");
    }

    let mut tables: Vec<ParsedTable> = Vec::new();
    for (root, source) in sources.iter() {
        let table = read_roll_data(root.clone(), source).map_err(|e| *e)?;
        debug!(
            "run_lookup: {:?}: {} columns, {} rows",
            source.file_path,
            table.header.len(),
            table.rows.len()
        );
        tables.push(table);
    }
    let roll = build_record_set(&tables)?;

    let restrict = if args.all_fields {
        false
    } else {
        config
            .search
            .as_ref()
            .and_then(|s| s.restrict_to_identity_fields)
            .unwrap_or(SearchOptions::DEFAULT.restrict_to_identity_fields)
    };
    let preview_rows = config
        .search
        .as_ref()
        .and_then(|s| s.preview_rows)
        .unwrap_or(50);

    let session = Session {
        ward_name: config.ward_name.clone(),
        roll,
        options: SearchOptions {
            restrict_to_identity_fields: restrict,
        },
        preview_rows,
    };
    info!(
        "Loaded {} voter records for {}",
        session.roll.len(),
        session.ward_name
    );

    match args.query.clone() {
        Some(query) => run_single_query(&session, &query, args),
        None => session::run_interactive(&session),
    }
}

/// One-shot mode: a single search, an optional export and an optional check
/// against a reference export.
fn run_single_query(session: &Session, query: &str, args: &Args) -> RollResult<()> {
    session.print_summary();
    let results = session.run_query(query);
    session.print_results(query, &results);

    if let Some(out) = args.out.clone() {
        session::export_view(&results, &out)?;
    }

    if let Some(reference_path) = args.reference.clone() {
        let produced = results.to_delimited(',');
        let reference = fs::read_to_string(reference_path.clone()).context(
            OpeningReferenceSnafu {
                path: reference_path,
            },
        )?;
        if reference != produced {
            warn!("Found differences with the reference export");
            print_diff(reference.as_str(), produced.as_ref(), "\n");
            whatever!("Difference detected between the export and the reference file")
        }
    }
    Ok(())
}
