//! The hexagram accumulator.
//!
//! A [`Hexagram`] grows one line at a time from the distributions of a cast.
//! Lines are stored bottom first (index 0 is line 1); traditional notation
//! draws the top line first, so display code asks for `draw(true)`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::error::Result;
use crate::line::Line;
use crate::observation::Observation;
use crate::outcome::Counts;
use crate::record::CastRecord;

/// Lines in a complete hexagram.
pub const HEXAGRAM_LINES: usize = 6;

/// Space between the primary and derivative glyph on a drawn row.
const COLUMN_GAP: &str = "   ";

/// A cast under construction or completed: lines plus the observations that
/// produced them.
#[derive(Clone, Debug, Serialize)]
pub struct Hexagram {
    context_label: String,
    lines: Vec<Line>,
    observations: Vec<Observation>,
}

impl Hexagram {
    /// Start an empty cast. `context_label` identifies where the counts came
    /// from and is echoed verbatim in the record header.
    pub fn new(context_label: impl Into<String>) -> Self {
        Self {
            context_label: context_label.into(),
            lines: Vec::with_capacity(HEXAGRAM_LINES),
            observations: Vec::with_capacity(HEXAGRAM_LINES),
        }
    }

    /// Classify `counts` and append the resulting line with its observation.
    ///
    /// Nothing is appended when classification fails.
    pub fn assimilate(&mut self, counts: Counts) -> Result<Line> {
        let line = classify(&counts)?;
        if self.is_complete() {
            warn!(lines = self.lines.len(), "assimilating past a complete hexagram");
        }
        self.lines.push(line);
        self.observations.push(Observation::now(counts));
        debug!(
            position = self.lines.len(),
            value = line.value(),
            context = %self.context_label,
            "line assimilated"
        );
        Ok(line)
    }

    /// Append a line that did not come from a distribution.
    ///
    /// Its observation carries an empty distribution, so a record written
    /// from this hexagram cannot be read back.
    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
        self.observations.push(Observation::now(Counts::new()));
    }

    pub fn context_label(&self) -> &str {
        &self.context_label
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.lines.len() == HEXAGRAM_LINES
    }

    /// Lines of the primary hexagram, bottom first.
    pub fn primary(&self) -> Vec<Line> {
        self.lines.clone()
    }

    /// Lines of the derivative hexagram, bottom first.
    pub fn derivative(&self) -> Vec<Line> {
        self.lines.iter().map(Line::changed).collect()
    }

    /// 1-based positions of the changing lines, bottom first.
    pub fn changing_positions(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_changing())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// One row per line: primary glyph, gap, derivative glyph.
    ///
    /// Rows run bottom to top, or top to bottom when `reverse` is set.
    pub fn draw(&self, reverse: bool) -> Vec<String> {
        let row = |line: &Line| {
            format!(
                "{}{}{}",
                line.render_primary(),
                COLUMN_GAP,
                line.render_derivative()
            )
        };
        if reverse {
            self.lines.iter().rev().map(row).collect()
        } else {
            self.lines.iter().map(row).collect()
        }
    }

    /// [`draw`](Self::draw) joined into text, one row per line.
    pub fn render(&self, reverse: bool) -> String {
        self.draw(reverse)
            .into_iter()
            .map(|row| row + "\n")
            .collect()
    }

    /// The cast as a `;`-delimited record.
    pub fn to_record(&self) -> String {
        CastRecord::from_hexagram(self).to_text()
    }

    /// Rebuild a cast from record text by re-assimilating its six rows.
    ///
    /// Capture times are those of the rebuild, not the recorded ones.
    pub fn from_record(text: &str) -> Result<Self> {
        CastRecord::parse(text)?.into_hexagram()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HexagramError;
    use crate::line::Pattern;

    fn counts(pairs: &[(&str, u64)]) -> Counts {
        Counts::from_raw(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn assimilate_appends_line_and_observation() {
        let mut hexagram = Hexagram::new("Test:Test");
        let line = hexagram.assimilate(counts(&[("000", 900), ("111", 124)])).unwrap();

        assert_eq!(line.pattern(), Pattern::YinChanging);
        assert_eq!(hexagram.len(), 1);
        assert_eq!(hexagram.observations().len(), 1);
        assert_eq!(hexagram.observations()[0].row()[0], 900);
        assert_eq!(hexagram.draw(false), vec!["***XXX***   *********".to_string()]);
    }

    #[test]
    fn failed_assimilation_leaves_state_untouched() {
        let mut hexagram = Hexagram::new("t");
        hexagram.assimilate(counts(&[("111", 1)])).unwrap();

        let err = hexagram.assimilate(Counts::new()).unwrap_err();
        assert!(matches!(err, HexagramError::EmptyDistribution));
        assert_eq!(hexagram.lines().len(), 1);
        assert_eq!(hexagram.observations().len(), 1);
    }

    #[test]
    fn reverse_draw_is_exact_reverse() {
        let mut hexagram = Hexagram::new("Test:Test");
        for pattern in [
            Pattern::YangUnchanging,
            Pattern::YangChanging,
            Pattern::YangUnchanging,
            Pattern::YangChanging,
            Pattern::YinChanging,
            Pattern::YinUnchanging,
        ] {
            hexagram.push_line(pattern.into());
        }
        let before = hexagram.lines().to_vec();

        let mut forward = hexagram.draw(false);
        let backward = hexagram.draw(true);
        forward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(hexagram.lines(), before.as_slice());
        assert_eq!(backward[0], "***   ***   ***   ***");
        assert_eq!(backward[1], "***XXX***   *********");
        assert_eq!(hexagram.render(true).lines().count(), 6);
    }

    #[test]
    fn derivative_and_changing_positions() {
        let mut hexagram = Hexagram::new("t");
        hexagram.push_line(Pattern::YinChanging.into());
        hexagram.push_line(Pattern::YangUnchanging.into());
        hexagram.push_line(Pattern::YangChanging.into());

        assert_eq!(hexagram.changing_positions(), vec![1, 3]);
        let values: Vec<u8> = hexagram.derivative().iter().map(Line::value).collect();
        assert_eq!(values, vec![7, 7, 8]);
        assert!(!hexagram.is_complete());
    }

    #[test]
    fn six_lines_complete_the_hexagram() {
        let mut hexagram = Hexagram::new("t");
        for _ in 0..HEXAGRAM_LINES {
            hexagram.assimilate(counts(&[("011", 10)])).unwrap();
        }
        assert!(hexagram.is_complete());
        assert!(hexagram.changing_positions().is_empty());
    }
}
