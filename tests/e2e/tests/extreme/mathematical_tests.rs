//! Property-Based Tests for the FSRS Memory Model
//!
//! Tests the following invariants:
//! - Forgetting curve: R(0) = 1, R ∈ (0, 1], non-increasing in time
//! - Intervals: monotone in stability, bounded by [1, maximum_interval]
//! - Difficulty: stays in [1, 10] for every grade
//! - Fuzz: identity when disabled or below 2.5 days, inside its window otherwise
//! - Alea: equal seeds give equal draws
//! - Strategies: interval ordering across grades

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use hazel_fsrs::{Alea, Card, Fsrs, Parameters, Rating, State};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_rating() -> impl Strategy<Value = Rating> {
    prop_oneof![
        Just(Rating::Again),
        Just(Rating::Hard),
        Just(Rating::Good),
        Just(Rating::Easy),
    ]
}

fn arb_stability() -> impl Strategy<Value = f64> {
    0.01f64..1000.0
}

fn arb_difficulty() -> impl Strategy<Value = f64> {
    1.0f64..=10.0
}

fn arb_review_card() -> impl Strategy<Value = Card> {
    (arb_stability(), arb_difficulty(), 0i64..400, 0u64..50).prop_map(
        |(stability, difficulty, days_ago, reps)| {
            let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
            Card {
                due: now,
                stability,
                difficulty,
                reps,
                state: State::Review,
                last_review: Some(now - Duration::days(days_ago)),
                ..Card::default()
            }
        },
    )
}

proptest! {
    #[test]
    fn forgetting_curve_bounds(s in arb_stability(), t1 in 0.0f64..2000.0, dt in 0.0f64..2000.0) {
        let params = Parameters::default();
        prop_assert_eq!(params.forgetting_curve(0.0, s), 1.0);

        let r1 = params.forgetting_curve(t1, s);
        let r2 = params.forgetting_curve(t1 + dt, s);
        prop_assert!(r1 > 0.0 && r1 <= 1.0);
        prop_assert!(r2 <= r1);
    }

    #[test]
    fn next_interval_monotone_and_bounded(
        s1 in arb_stability(),
        ds in 0.0f64..500.0,
        retention in 0.7f64..0.97,
        max_ivl in 1.0f64..36500.0,
    ) {
        let params = Parameters::default()
            .with_retention(retention)
            .with_maximum_interval(max_ivl.floor());
        let a = params.next_interval(s1, 0.0, "");
        let b = params.next_interval(s1 + ds, 0.0, "");

        prop_assert!(a <= b);
        prop_assert!(a >= 1.0 && b <= max_ivl.floor());
    }

    #[test]
    fn next_difficulty_bounded(d in arb_difficulty(), rating in arb_rating()) {
        let params = Parameters::default();
        let next = params.next_difficulty(d, rating);
        prop_assert!((1.0..=10.0).contains(&next));
    }

    #[test]
    fn fuzz_stays_in_window(ivl in 3u64..365, elapsed in 0u64..400, seed in "[0-9_.]{1,24}") {
        let params = Parameters::default();
        let ivl = ivl as f64;
        let elapsed = elapsed as f64;

        prop_assert_eq!(params.apply_fuzz(ivl, elapsed, false, &seed), ivl);

        let fuzzed = params.apply_fuzz(ivl, elapsed, true, &seed);
        let (min, max) = params.fuzz_range(ivl, elapsed);
        prop_assert!(fuzzed >= min as f64 && fuzzed <= max as f64);
        prop_assert_eq!(fuzzed, params.apply_fuzz(ivl, elapsed, true, &seed));
    }

    #[test]
    fn fuzz_skips_short_intervals(ivl in 0.0f64..2.5, seed in ".{0,16}") {
        let params = Parameters::default();
        prop_assert_eq!(params.apply_fuzz(ivl, 0.0, true, &seed), ivl);
    }

    #[test]
    fn alea_same_seed_same_draws(seed in ".{0,32}") {
        let mut a = Alea::new(&seed);
        let mut b = Alea::new(&seed);
        for _ in 0..16 {
            let x = a.next_f64();
            prop_assert_eq!(x, b.next_f64());
            prop_assert!((0.0..1.0).contains(&x));
        }
        prop_assert_eq!(a.double(), b.double());
    }

    #[test]
    fn long_term_review_ordering(card in arb_review_card(), fuzz in any::<bool>()) {
        let fsrs = Fsrs::new(Parameters::default().with_short_term(false).with_fuzz(fuzz));
        let log = fsrs.repeat(&card, card.due);
        let days: Vec<u64> = Rating::ALL.iter().map(|r| log[*r].card.scheduled_days).collect();

        prop_assert!(days[0] >= 1);
        prop_assert!(days[0] < days[1] && days[1] < days[2] && days[2] < days[3], "{:?}", days);
        prop_assert_eq!(log[Rating::Again].card.lapses, card.lapses + 1);
    }

    #[test]
    fn short_term_review_ordering(card in arb_review_card(), fuzz in any::<bool>()) {
        let fsrs = Fsrs::new(Parameters::default().with_fuzz(fuzz));
        let log = fsrs.repeat(&card, card.due);
        let hard = log[Rating::Hard].card.scheduled_days;
        let good = log[Rating::Good].card.scheduled_days;
        let easy = log[Rating::Easy].card.scheduled_days;

        prop_assert!(hard >= 1 && hard < good && good < easy, "{} {} {}", hard, good, easy);
        prop_assert_eq!(log[Rating::Again].card.state, State::Relearning);
        prop_assert_eq!(log[Rating::Again].card.scheduled_days, 0);
    }

    #[test]
    fn scheduling_never_mutates_input(card in arb_review_card(), rating in arb_rating()) {
        let fsrs = Fsrs::default();
        let before = card;
        let info = fsrs.next(&card, card.due, rating);
        prop_assert_eq!(card, before);
        prop_assert_eq!(info.card.reps, card.reps + 1);
        prop_assert!((1.0..=10.0).contains(&info.card.difficulty));
        prop_assert!(info.card.stability > 0.0 && info.card.stability.is_finite());
    }
}
