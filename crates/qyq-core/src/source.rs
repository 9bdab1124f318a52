//! Where distributions come from.
//!
//! Running a circuit on a backend is someone else's job; the engine only needs
//! something that hands over one distribution per line. [`ShotSampler`]
//! stands in for the hardware locally, [`ReplaySource`] plays back counts an
//! executor produced elsewhere.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::{HexagramError, Result};
use crate::hexagram::{Hexagram, HEXAGRAM_LINES};
use crate::outcome::{Counts, OutcomeKey, OUTCOME_BITS};

/// Shots per line when nothing else is configured.
pub const DEFAULT_SHOTS: u32 = 1024;

/// A supplier of one frequency distribution per hexagram line.
pub trait CountsSource {
    /// Human-readable origin of the counts, used as the default context label.
    fn describe(&self) -> String;

    /// Distribution for the next line.
    fn next_counts(&mut self) -> Result<Counts>;
}

/// Local pseudo-random stand-in for the measured circuit.
///
/// Each measured qubit is one half of a Bell pair and reads 0 or 1 with equal
/// probability, so a shot is three independent fair bits.
pub struct ShotSampler {
    shots: u32,
    seed: Option<u64>,
    rng: StdRng,
}

impl ShotSampler {
    pub fn new(shots: u32) -> Self {
        Self {
            shots,
            seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sampler.
    pub fn seeded(shots: u32, seed: u64) -> Self {
        Self {
            shots,
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    fn shot(&mut self) -> OutcomeKey {
        let bits = (0..OUTCOME_BITS).fold(0u8, |acc, _| (acc << 1) | u8::from(self.rng.gen::<bool>()));
        OutcomeKey::ALL[bits as usize]
    }
}

impl Default for ShotSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SHOTS)
    }
}

impl CountsSource for ShotSampler {
    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("local:shot-sampler(seed={seed})"),
            None => "local:shot-sampler".to_string(),
        }
    }

    fn next_counts(&mut self) -> Result<Counts> {
        let counts: Counts = (0..self.shots).map(|_| (self.shot(), 1)).collect();
        debug!(shots = self.shots, "sampled distribution");
        Ok(counts)
    }
}

/// Plays back a fixed queue of distributions.
pub struct ReplaySource {
    label: String,
    queue: VecDeque<Counts>,
    drawn: usize,
}

impl ReplaySource {
    pub fn new(label: impl Into<String>, counts: impl IntoIterator<Item = Counts>) -> Self {
        Self {
            label: label.into(),
            queue: counts.into_iter().collect(),
            drawn: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CountsSource for ReplaySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn next_counts(&mut self) -> Result<Counts> {
        let counts = self
            .queue
            .pop_front()
            .ok_or(HexagramError::ExhaustedSource { drawn: self.drawn })?;
        self.drawn += 1;
        Ok(counts)
    }
}

/// Cast a full hexagram from `source`, calling `on_line` after every line.
pub fn cast_with<S, F>(source: &mut S, context_label: impl Into<String>, mut on_line: F) -> Result<Hexagram>
where
    S: CountsSource + ?Sized,
    F: FnMut(&Hexagram),
{
    let mut hexagram = Hexagram::new(context_label);
    info!(context = %hexagram.context_label(), "casting hexagram");

    for _ in 0..HEXAGRAM_LINES {
        let counts = source.next_counts()?;
        hexagram.assimilate(counts)?;
        on_line(&hexagram);
    }

    info!(
        changing = ?hexagram.changing_positions(),
        "cast complete"
    );
    Ok(hexagram)
}

/// Cast a full hexagram from `source`, labelled with the source's description.
pub fn cast<S>(source: &mut S) -> Result<Hexagram>
where
    S: CountsSource + ?Sized,
{
    let label = source.describe();
    cast_with(source, label, |_| {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Pattern;

    #[test]
    fn sampler_records_every_shot() {
        let mut sampler = ShotSampler::seeded(2048, 7);
        let counts = sampler.next_counts().unwrap();
        assert_eq!(counts.total(), 2048);
        // 2048 fair shots leave no key unseen in practice
        assert!(OutcomeKey::ALL.iter().all(|k| counts.get(*k) > 0));
    }

    #[test]
    fn seeded_samplers_agree() {
        let a = cast(&mut ShotSampler::seeded(256, 42)).unwrap();
        let b = cast(&mut ShotSampler::seeded(256, 42)).unwrap();
        assert_eq!(a.lines(), b.lines());
        assert_eq!(a.context_label(), "local:shot-sampler(seed=42)");
    }

    #[test]
    fn replay_casts_in_order() {
        let rows = ["000", "001", "011", "111", "010", "101"]
            .map(|k| Counts::from_raw([(k, 10)]).unwrap());
        let mut source = ReplaySource::new("replay", rows);

        let mut seen = Vec::new();
        let hexagram = cast_with(&mut source, "Test:Test", |h| seen.push(h.len())).unwrap();

        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(source.remaining(), 0);
        let values: Vec<u8> = hexagram.lines().iter().map(|l| l.value()).collect();
        assert_eq!(values, vec![6, 7, 8, 9, 7, 8]);
        assert_eq!(hexagram.lines()[0].pattern(), Pattern::YinChanging);
    }

    #[test]
    fn short_replay_is_exhausted() {
        let mut source = ReplaySource::new("short", vec![Counts::from_raw([("000", 1)]).unwrap()]);
        assert!(matches!(
            cast(&mut source),
            Err(HexagramError::ExhaustedSource { drawn: 1 })
        ));
    }
}
