//! Reading saved cast records

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use crate::view::{HexagramView, LineRow};
use qyq_core::{load_hexagram, read_record, CastRecord};
use serde::Serialize;
use std::path::Path;

/// Execute `qyq draw`: both hexagrams of a saved cast, top line first
pub fn draw(path: &Path, format: OutputFormat) -> CliResult<()> {
    let hexagram = load_hexagram(path)?;
    match format {
        OutputFormat::Table => {
            print!("{}", hexagram.render(true));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            output::print_single(&HexagramView::from(&hexagram), format)
        }
    }
}

#[derive(Serialize)]
struct Inspection {
    record: CastRecord,
    #[serde(flatten)]
    hexagram: HexagramView,
}

/// Execute `qyq inspect`: per-line counts and classification of a saved cast
pub fn inspect(path: &Path, format: OutputFormat) -> CliResult<()> {
    let record = read_record(path)?;
    let hexagram = record.clone().into_hexagram()?;

    let mut rows: Vec<LineRow> = record
        .rows
        .iter()
        .zip(hexagram.lines())
        .enumerate()
        .map(|(i, (row, line))| LineRow::new(i + 1, &row.timestamp, line, row.counts))
        .collect();
    rows.reverse();

    if matches!(format, OutputFormat::Table) {
        println!("{}", record.context_label);
    }
    let data = Inspection {
        hexagram: HexagramView::from(&hexagram),
        record,
    };
    output::print_output(rows, &data, format)
}
