//! Outcome keys and the per-line frequency distribution.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{HexagramError, Result};

/// Width of an outcome key in classical bits.
pub const OUTCOME_BITS: usize = 3;

/// One of the eight classical 3-bit measurement results.
///
/// Stored as its numeric value; the textual form is the 3-character bit
/// string, most significant character first, so numeric order and the
/// lexical order of the strings agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutcomeKey(u8);

impl OutcomeKey {
    /// All eight keys in canonical (ascending) order.
    pub const ALL: [OutcomeKey; 8] = [
        OutcomeKey(0),
        OutcomeKey(1),
        OutcomeKey(2),
        OutcomeKey(3),
        OutcomeKey(4),
        OutcomeKey(5),
        OutcomeKey(6),
        OutcomeKey(7),
    ];

    /// Key from its numeric value, `None` above 7.
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 8).then_some(OutcomeKey(index))
    }

    /// Position of the key in canonical order.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Number of '1' characters in the key.
    pub fn ones(self) -> u32 {
        self.0.count_ones()
    }

    /// Parse a measured register string, keeping its rightmost three bits.
    ///
    /// Executors report the whole classical register; only the low three
    /// bits carry the toss.
    pub fn from_register(bits: &str) -> Result<Self> {
        let start = bits
            .len()
            .checked_sub(OUTCOME_BITS)
            .filter(|_| bits.is_ascii())
            .ok_or_else(|| HexagramError::UnknownOutcomeKey(bits.to_string()))?;
        bits[start..]
            .parse()
            .map_err(|_| HexagramError::UnknownOutcomeKey(bits.to_string()))
    }
}

impl FromStr for OutcomeKey {
    type Err = HexagramError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != OUTCOME_BITS {
            return Err(HexagramError::UnknownOutcomeKey(s.to_string()));
        }
        s.bytes().try_fold(OutcomeKey(0), |acc, b| match b {
            b'0' => Ok(OutcomeKey(acc.0 << 1)),
            b'1' => Ok(OutcomeKey((acc.0 << 1) | 1)),
            _ => Err(HexagramError::UnknownOutcomeKey(s.to_string())),
        })
    }
}

impl fmt::Display for OutcomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03b}", self.0)
    }
}

impl Serialize for OutcomeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Observed counts per outcome key for one line.
///
/// Absent keys count as zero. Iteration is always in ascending key order,
/// which is the scan order the classifier depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<OutcomeKey, u64>);

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, count)` pairs; every key must be a 3-bit string.
    pub fn from_raw<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut counts = Counts::new();
        for (key, count) in pairs {
            counts.add(key.as_ref().parse()?, count);
        }
        Ok(counts)
    }

    /// Build from executor output whose keys may be wider than three bits.
    ///
    /// Keys are truncated to their rightmost three bits; counts that land on
    /// the same key are summed.
    pub fn from_register_counts<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut counts = Counts::new();
        for (key, count) in pairs {
            counts.add(OutcomeKey::from_register(key.as_ref())?, count);
        }
        Ok(counts)
    }

    /// Build from the eight counts in canonical key order.
    pub fn from_row(row: [u64; 8]) -> Self {
        Counts(OutcomeKey::ALL.iter().copied().zip(row).collect())
    }

    /// Add `count` observations of `key`.
    pub fn add(&mut self, key: OutcomeKey, count: u64) {
        *self.0.entry(key).or_insert(0) += count;
    }

    pub fn get(&self, key: OutcomeKey) -> u64 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    /// Present entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeKey, u64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// The eight counts in canonical key order, zero for absent keys.
    pub fn to_row(&self) -> [u64; 8] {
        OutcomeKey::ALL.map(|key| self.get(key))
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// True when no key has a positive count.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl FromIterator<(OutcomeKey, u64)> for Counts {
    fn from_iter<T: IntoIterator<Item = (OutcomeKey, u64)>>(iter: T) -> Self {
        let mut counts = Counts::new();
        for (key, count) in iter {
            counts.add(key, count);
        }
        counts
    }
}
