//! Hexagram lines: the four line patterns, the coin-rule table and glyphs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outcome::OutcomeKey;

/// Coin value of a '0' bit.
pub const TAILS: u8 = 2;
/// Coin value of a '1' bit.
pub const HEADS: u8 = 3;

const YANG_GLYPH: &str = "*********";
const YIN_GLYPH: &str = "***   ***";
const YANG_CHANGING_GLYPH: &str = "***000***";
const YIN_CHANGING_GLYPH: &str = "***XXX***";

/// The four line patterns, named by polarity and whether the line changes.
///
/// Discriminants are the traditional line values obtained by summing three
/// coins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    /// 6, old yin
    YinChanging = 6,
    /// 7, young yang
    YangUnchanging = 7,
    /// 8, young yin
    YinUnchanging = 8,
    /// 9, old yang
    YangChanging = 9,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::YinChanging,
        Pattern::YangUnchanging,
        Pattern::YinUnchanging,
        Pattern::YangChanging,
    ];

    pub fn from_parts(yang: bool, changing: bool) -> Self {
        match (yang, changing) {
            (false, true) => Pattern::YinChanging,
            (true, false) => Pattern::YangUnchanging,
            (false, false) => Pattern::YinUnchanging,
            (true, true) => Pattern::YangChanging,
        }
    }

    /// Pattern for a coin sum in `6..=9`.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            6 => Some(Pattern::YinChanging),
            7 => Some(Pattern::YangUnchanging),
            8 => Some(Pattern::YinUnchanging),
            9 => Some(Pattern::YangChanging),
            _ => None,
        }
    }

    /// Classification table entry for an outcome key.
    ///
    /// Each '1' is a heads worth 3, each '0' a tails worth 2; the three coins
    /// are summed.
    pub fn for_outcome(key: OutcomeKey) -> Self {
        let heads = key.ones() as u8;
        let sum = heads * HEADS + (3 - heads) * TAILS;
        match sum {
            6 => Pattern::YinChanging,
            7 => Pattern::YangUnchanging,
            8 => Pattern::YinUnchanging,
            _ => Pattern::YangChanging,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_yang(self) -> bool {
        matches!(self, Pattern::YangUnchanging | Pattern::YangChanging)
    }

    pub fn is_changing(self) -> bool {
        matches!(self, Pattern::YinChanging | Pattern::YangChanging)
    }
}

/// One line of a hexagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pattern: Pattern,
}

impl Line {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn from_parts(yang: bool, changing: bool) -> Self {
        Self::new(Pattern::from_parts(yang, changing))
    }

    pub fn from_outcome(key: OutcomeKey) -> Self {
        Self::new(Pattern::for_outcome(key))
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn value(&self) -> u8 {
        self.pattern.value()
    }

    pub fn is_yang(&self) -> bool {
        self.pattern.is_yang()
    }

    pub fn is_changing(&self) -> bool {
        self.pattern.is_changing()
    }

    /// The line as it stands in the derivative hexagram.
    pub fn changed(&self) -> Line {
        let yang = self.is_yang() != self.is_changing();
        Line::from_parts(yang, false)
    }

    /// Glyph in the primary hexagram; each pattern has its own.
    pub fn render_primary(&self) -> &'static str {
        match self.pattern {
            Pattern::YinChanging => YIN_CHANGING_GLYPH,
            Pattern::YangUnchanging => YANG_GLYPH,
            Pattern::YinUnchanging => YIN_GLYPH,
            Pattern::YangChanging => YANG_CHANGING_GLYPH,
        }
    }

    /// Glyph in the derivative hexagram: changing lines flip polarity.
    pub fn render_derivative(&self) -> &'static str {
        if self.changed().is_yang() {
            YANG_GLYPH
        } else {
            YIN_GLYPH
        }
    }
}

impl From<Pattern> for Line {
    fn from(pattern: Pattern) -> Self {
        Line::new(pattern)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render_primary())
    }
}
