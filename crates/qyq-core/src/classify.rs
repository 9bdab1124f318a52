//! Turning one frequency distribution into one line.
//!
//! The most frequent outcome wins. When two outcomes share the top count the
//! tie is settled by the lines they stand for:
//!
//! | pair   | winner |
//! |--------|--------|
//! | 6 v 7  | 7      |
//! | 6 v 8  | 8      |
//! | 6 v 9  | 6      |
//! | 7 v 8  | 8      |
//! | 7 v 9  | 9      |
//! | 8 v 9  | 9      |
//!
//! Identical lines need no tie-break. With three or more outcomes at the top
//! count only the first and the last, in ascending key order, are compared;
//! the ones in between are ignored.

use tracing::trace;

use crate::error::{HexagramError, Result};
use crate::line::{Line, Pattern};
use crate::outcome::{Counts, OutcomeKey};

/// Outcome(s) holding the top count after a scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Leaders {
    first: OutcomeKey,
    last_tie: Option<OutcomeKey>,
}

fn scan(counts: &Counts) -> Option<Leaders> {
    let mut best = 0u64;
    let mut leaders: Option<Leaders> = None;

    for (key, count) in counts.iter().filter(|(_, count)| *count > 0) {
        if count > best {
            best = count;
            leaders = Some(Leaders {
                first: key,
                last_tie: None,
            });
        } else if count == best {
            if let Some(leaders) = leaders.as_mut() {
                leaders.last_tie = Some(key);
            }
        }
    }

    leaders
}

/// Settle a tie between two different patterns.
///
/// The relation is not a ranking (9 beats 8, 8 beats 6, 6 beats 9), so each
/// unordered pair is spelled out.
pub fn resolve_tie(a: Pattern, b: Pattern) -> Pattern {
    use Pattern::*;

    let (low, high) = if a.value() <= b.value() { (a, b) } else { (b, a) };
    match (low, high) {
        (YinChanging, YangUnchanging) => YangUnchanging,
        (YinChanging, YinUnchanging) => YinUnchanging,
        (YinChanging, YangChanging) => YinChanging,
        (YangUnchanging, YinUnchanging) => YinUnchanging,
        (YangUnchanging, YangChanging) => YangChanging,
        (YinUnchanging, YangChanging) => YangChanging,
        (same, _) => same,
    }
}

/// Classify a distribution into the line it casts.
pub fn classify(counts: &Counts) -> Result<Line> {
    let leaders = scan(counts).ok_or(HexagramError::EmptyDistribution)?;
    let first = Pattern::for_outcome(leaders.first);

    let pattern = match leaders.last_tie {
        None => first,
        Some(tied) => {
            let second = Pattern::for_outcome(tied);
            let winner = resolve_tie(first, second);
            trace!(
                first = %leaders.first,
                tied = %tied,
                winner = winner.value(),
                "top count tied"
            );
            winner
        }
    };

    Ok(Line::new(pattern))
}

/// Classify raw `(key, count)` pairs, rejecting keys outside the alphabet.
pub fn classify_raw<I, K>(pairs: I) -> Result<Line>
where
    I: IntoIterator<Item = (K, u64)>,
    K: AsRef<str>,
{
    classify(&Counts::from_raw(pairs)?)
}
