//! Property tests: classification, rendering and cast-record round trips.

use proptest::prelude::*;
use qyq_core::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_key() -> impl Strategy<Value = OutcomeKey> {
    (0u8..8).prop_map(|i| OutcomeKey::ALL[i as usize])
}

fn arb_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        Just(Pattern::YinChanging),
        Just(Pattern::YangUnchanging),
        Just(Pattern::YinUnchanging),
        Just(Pattern::YangChanging),
    ]
}

/// A distribution with at least one positive count.
fn arb_counts() -> impl Strategy<Value = Counts> {
    (prop::array::uniform8(0u64..2048), arb_key(), 1u64..2048).prop_map(|(row, key, bump)| {
        let mut counts = Counts::from_row(row);
        counts.add(key, bump);
        counts
    })
}

/// Winner's count and a set of strictly lower counts for the other keys.
fn arb_unique_max() -> impl Strategy<Value = (OutcomeKey, Counts)> {
    (arb_key(), 1u64..4096, prop::array::uniform8(0.0f64..1.0)).prop_map(|(winner, top, fractions)| {
        let counts: Counts = OutcomeKey::ALL
            .iter()
            .zip(fractions)
            .map(|(key, f)| {
                if *key == winner {
                    (*key, top)
                } else {
                    (*key, ((top - 1) as f64 * f) as u64)
                }
            })
            .collect();
        (winner, counts)
    })
}

/// Two distinct keys at the top count, everything else strictly below.
fn arb_two_way_tie() -> impl Strategy<Value = (OutcomeKey, OutcomeKey, Counts)> {
    (arb_key(), arb_key(), 2u64..4096)
        .prop_filter("keys must differ", |(a, b, _)| a != b)
        .prop_map(|(a, b, top)| {
            let mut counts = Counts::new();
            for key in OutcomeKey::ALL {
                let count = if key == a || key == b { top } else { top / 2 };
                counts.add(key, count);
            }
            (a, b, counts)
        })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// A unique maximum classifies as that key's table entry.
    #[test]
    fn unique_maximum_classifies_by_table((winner, counts) in arb_unique_max()) {
        let line = classify(&counts).unwrap();
        prop_assert_eq!(line.pattern(), Pattern::for_outcome(winner));
    }

    /// Two-way ties follow the precedence rule, whatever the insertion order.
    #[test]
    fn two_way_tie_follows_precedence((a, b, counts) in arb_two_way_tie()) {
        let expected = resolve_tie(Pattern::for_outcome(a), Pattern::for_outcome(b));
        prop_assert_eq!(classify(&counts).unwrap().pattern(), expected);

        let reordered: Counts = counts.iter().collect::<Vec<_>>().into_iter().rev().collect();
        prop_assert_eq!(classify(&reordered).unwrap().pattern(), expected);

        if Pattern::for_outcome(a) == Pattern::for_outcome(b) {
            prop_assert_eq!(expected, Pattern::for_outcome(a));
        }
    }

    /// Raw pairs given in either order classify the same.
    #[test]
    fn raw_tie_is_symmetric(a in arb_key(), b in arb_key(), n in 1u64..10_000) {
        let (ka, kb) = (a.to_string(), b.to_string());
        let forward = classify_raw([(ka.as_str(), n), (kb.as_str(), n)]).unwrap();
        let backward = classify_raw([(kb.as_str(), n), (ka.as_str(), n)]).unwrap();
        prop_assert_eq!(forward, backward);
    }

    /// Tie resolution is symmetric and always returns one of its arguments.
    #[test]
    fn resolve_tie_picks_an_argument(a in arb_pattern(), b in arb_pattern()) {
        let winner = resolve_tie(a, b);
        prop_assert_eq!(winner, resolve_tie(b, a));
        prop_assert!(winner == a || winner == b);
    }

    /// Derivative glyphs flip exactly the changing lines.
    #[test]
    fn derivative_flips_changing_lines(pattern in arb_pattern()) {
        let line = Line::new(pattern);
        let flipped = Line::from_parts(!line.is_yang(), false);
        let kept = Line::from_parts(line.is_yang(), false);
        if line.is_changing() {
            prop_assert_eq!(line.render_derivative(), flipped.render_primary());
        } else {
            prop_assert_eq!(line.render_derivative(), kept.render_primary());
        }
    }

    /// Writing a cast and reading it back yields the same lines and counts.
    #[test]
    fn record_round_trip(rows in prop::collection::vec(arb_counts(), 6)) {
        let mut hexagram = Hexagram::new("IBMQ:ibmq_qasm_simulator");
        for counts in rows.clone() {
            hexagram.assimilate(counts).unwrap();
        }

        let restored = Hexagram::from_record(&hexagram.to_record()).unwrap();

        prop_assert_eq!(restored.lines(), hexagram.lines());
        prop_assert_eq!(restored.context_label(), hexagram.context_label());
        for (obs, counts) in restored.observations().iter().zip(&rows) {
            prop_assert_eq!(obs.row(), counts.to_row());
        }
    }

    /// Drawing reversed is the exact mirror and never changes the hexagram.
    #[test]
    fn draw_reverse_mirrors(rows in prop::collection::vec(arb_counts(), 0..=6)) {
        let mut hexagram = Hexagram::new("t");
        for counts in rows {
            hexagram.assimilate(counts).unwrap();
        }
        let lines_before = hexagram.lines().to_vec();

        let mut forward = hexagram.draw(false);
        let backward = hexagram.draw(true);
        forward.reverse();

        prop_assert_eq!(forward, backward);
        prop_assert_eq!(hexagram.lines(), lines_before.as_slice());
        prop_assert_eq!(hexagram.observations().len(), hexagram.lines().len());
    }
}
