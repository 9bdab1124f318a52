//! Quantum Yi Qing - cast a Yi Qing oracle from 3-bit measurement counts.
//!
//! Six times over, a measured circuit yields a frequency distribution over
//! the eight 3-bit outcomes. Each distribution becomes one line of a
//! hexagram, exactly as three tossed coins would:
//!
//! - a '1' bit is heads and counts 3, a '0' bit is tails and counts 2
//! - the sum of the three coins names the line: 6 old yin, 7 young yang,
//!   8 young yin, 9 old yang
//! - old (changing) lines flip in the derivative hexagram
//!
//! ## Key Concepts
//!
//! - **Counts**: one line's distribution, keyed by [`OutcomeKey`]
//! - **Line / Pattern**: polarity plus changing flag, with glyphs
//! - **classify**: most frequent outcome wins, ties settled by line value
//! - **Hexagram**: lines plus the timestamped observations behind them
//! - **CastRecord**: the `;`-delimited text a cast is saved as
//! - **CountsSource**: anything that supplies distributions

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod classify;
pub mod error;
pub mod hexagram;
pub mod line;
pub mod observation;
pub mod outcome;
pub mod record;
pub mod source;

pub use classify::{classify, classify_raw, resolve_tie};
pub use error::{HexagramError, Result};
pub use hexagram::{Hexagram, HEXAGRAM_LINES};
pub use line::{Line, Pattern};
pub use observation::{Observation, TIMESTAMP_FORMAT};
pub use outcome::{Counts, OutcomeKey};
pub use record::{load_hexagram, read_record, write_record, CastRecord, RecordRow, DELIMITER};
pub use source::{cast, cast_with, CountsSource, ReplaySource, ShotSampler, DEFAULT_SHOTS};
