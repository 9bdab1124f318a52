//! Serializable and tabular views of a cast

use qyq_core::{Counts, Hexagram, Line, OutcomeKey};
use serde::Serialize;
use tabled::Tabled;

/// One line of a cast as shown to the user
#[derive(Debug, Serialize)]
pub struct LineView {
    pub position: usize,
    pub value: u8,
    pub yang: bool,
    pub changing: bool,
    pub primary: &'static str,
    pub derivative: &'static str,
    pub counts: Counts,
}

impl LineView {
    fn new(position: usize, line: &Line, counts: &Counts) -> Self {
        Self {
            position,
            value: line.value(),
            yang: line.is_yang(),
            changing: line.is_changing(),
            primary: line.render_primary(),
            derivative: line.render_derivative(),
            counts: counts.clone(),
        }
    }
}

/// A whole cast, top line first
#[derive(Debug, Serialize)]
pub struct HexagramView {
    pub context_label: String,
    pub complete: bool,
    pub changing_positions: Vec<usize>,
    pub lines: Vec<LineView>,
}

impl From<&Hexagram> for HexagramView {
    fn from(hexagram: &Hexagram) -> Self {
        let mut lines: Vec<LineView> = hexagram
            .lines()
            .iter()
            .zip(hexagram.observations())
            .enumerate()
            .map(|(i, (line, obs))| LineView::new(i + 1, line, obs.counts()))
            .collect();
        lines.reverse();

        Self {
            context_label: hexagram.context_label().to_string(),
            complete: hexagram.is_complete(),
            changing_positions: hexagram.changing_positions(),
            lines,
        }
    }
}

/// Table row for `inspect`
#[derive(Debug, Serialize, Tabled)]
pub struct LineRow {
    /// Line position, 1 at the bottom
    #[tabled(rename = "line")]
    pub position: usize,
    /// Capture time as recorded
    pub recorded: String,
    /// Counts in canonical key order
    pub counts: String,
    /// Coin-sum value
    pub value: u8,
    /// Primary glyph
    pub primary: String,
    /// Derivative glyph
    pub derivative: String,
}

impl LineRow {
    pub fn new(position: usize, recorded: &str, line: &Line, row: [u64; 8]) -> Self {
        Self {
            position,
            recorded: recorded.to_string(),
            counts: format_counts(row),
            value: line.value(),
            primary: line.render_primary().to_string(),
            derivative: line.render_derivative().to_string(),
        }
    }
}

/// `000:130 001:127 ...`
pub fn format_counts(row: [u64; 8]) -> String {
    OutcomeKey::ALL
        .iter()
        .zip(row)
        .map(|(key, count)| format!("{key}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}
