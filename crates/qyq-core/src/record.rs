//! Cast records: the flat `;`-delimited text a cast is saved as.
//!
//! ```text
//! <context-label>;000;001;010;011;100;101;110;111;
//! <timestamp>;<count000>;<count001>;...;<count111>;
//! ```
//!
//! Every row, the header included, ends in a delimiter before the newline.
//! Older records depend on that, so it is kept.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{HexagramError, Result};
use crate::hexagram::{Hexagram, HEXAGRAM_LINES};
use crate::outcome::{Counts, OutcomeKey};

/// Field delimiter and row terminator.
pub const DELIMITER: char = ';';

/// Timestamp plus eight counts.
const DATA_FIELDS: usize = 9;

/// One data row as written: the recorded capture time and the counts in
/// canonical key order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub timestamp: String,
    pub counts: [u64; 8],
}

/// A parsed or to-be-written cast record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CastRecord {
    pub context_label: String,
    pub rows: Vec<RecordRow>,
}

impl CastRecord {
    pub fn from_hexagram(hexagram: &Hexagram) -> Self {
        Self {
            context_label: hexagram.context_label().to_string(),
            rows: hexagram
                .observations()
                .iter()
                .map(|obs| RecordRow {
                    timestamp: obs.timestamp(),
                    counts: obs.row(),
                })
                .collect(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.context_label);
        out.push(DELIMITER);
        for key in OutcomeKey::ALL {
            out.push_str(&key.to_string());
            out.push(DELIMITER);
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&row.timestamp);
            out.push(DELIMITER);
            for count in row.counts {
                out.push_str(&count.to_string());
                out.push(DELIMITER);
            }
            out.push('\n');
        }
        out
    }

    /// Parse record text.
    ///
    /// The first non-blank line is the header; its first field is the
    /// context label and the rest is not checked. The next six non-blank
    /// lines are the data rows; anything after them is ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| HexagramError::malformed(0, "record is empty"))?;
        let context_label = header
            .split(DELIMITER)
            .next()
            .unwrap_or_default()
            .to_string();

        let mut rows = Vec::with_capacity(HEXAGRAM_LINES);
        for (number, line) in lines.by_ref().take(HEXAGRAM_LINES) {
            rows.push(parse_row(number, line)?);
        }
        if rows.len() < HEXAGRAM_LINES {
            return Err(HexagramError::malformed(
                text.lines().count(),
                format!(
                    "expected {HEXAGRAM_LINES} data rows, found {}",
                    rows.len()
                ),
            ));
        }

        let ignored = lines.count();
        if ignored > 0 {
            debug!(ignored, "rows past the sixth ignored");
        }

        Ok(Self {
            context_label,
            rows,
        })
    }

    /// Replay the rows into a fresh hexagram.
    pub fn into_hexagram(self) -> Result<Hexagram> {
        let mut hexagram = Hexagram::new(self.context_label);
        for row in self.rows {
            hexagram.assimilate(Counts::from_row(row.counts))?;
        }
        Ok(hexagram)
    }
}

fn parse_row(number: usize, line: &str) -> Result<RecordRow> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < DATA_FIELDS {
        return Err(HexagramError::malformed(
            number,
            format!("expected {DATA_FIELDS} fields, found {}", fields.len()),
        ));
    }

    let mut counts = [0u64; 8];
    for (slot, field) in counts.iter_mut().zip(&fields[1..DATA_FIELDS]) {
        *slot = field.trim().parse().map_err(|_| {
            HexagramError::malformed(number, format!("count {field:?} is not a non-negative integer"))
        })?;
    }

    Ok(RecordRow {
        timestamp: fields[0].to_string(),
        counts,
    })
}

/// Write `hexagram` to `path` as a cast record.
pub fn write_record(path: impl AsRef<Path>, hexagram: &Hexagram) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, hexagram.to_record())?;
    info!(path = %path.display(), lines = hexagram.len(), "cast record written");
    Ok(())
}

/// Read a cast record from `path` without replaying it.
pub fn read_record(path: impl AsRef<Path>) -> Result<CastRecord> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "cast record read");
    CastRecord::parse(&text)
}

/// Read a cast record from `path` and rebuild its hexagram.
pub fn load_hexagram(path: impl AsRef<Path>) -> Result<Hexagram> {
    read_record(path)?.into_hexagram()
}
