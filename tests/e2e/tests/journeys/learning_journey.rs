//! Learning Journey Tests
//!
//! A card's life from first sight through lapses and recovery, driven on a
//! simulated clock exactly as an application would drive it.

use chrono::Duration;
use hazel_e2e_tests::{init_tracing, ReviewSimulator, TestDataFactory};
use hazel_fsrs::{recall_accuracy, Card, Parameters, Rating, State};

#[test]
fn test_short_term_first_steps() {
    init_tracing();
    let mut sim = ReviewSimulator::new(Parameters::default());
    let start = sim.now();

    let again = sim.review(Rating::Again);
    assert_eq!(again.card.state, State::Learning);
    assert_eq!(again.card.scheduled_days, 0);
    assert_eq!(again.card.due, start + Duration::minutes(1));
    assert_eq!(again.review_log.state, State::New);

    sim.advance_to_due();
    let hard = sim.review(Rating::Hard);
    assert_eq!(hard.card.state, State::Learning);
    assert_eq!(hard.card.due, sim.now() + Duration::minutes(10));

    sim.advance_to_due();
    let good = sim.review(Rating::Good);
    assert_eq!(good.card.state, State::Review);
    assert!(good.card.scheduled_days >= 1);
    assert_eq!(sim.card().reps, 3);
    assert_eq!(sim.history().len(), 3);
}

#[test]
fn test_on_time_reviews_grow_intervals() {
    init_tracing();
    let mut sim = ReviewSimulator::new(Parameters::default());
    sim.review(Rating::Good);

    let outcomes = sim.run(&[Rating::Good; 8]);
    let intervals: Vec<u64> = outcomes.iter().map(|o| o.card.scheduled_days).collect();

    for pair in intervals.windows(2) {
        assert!(pair[0] <= pair[1], "intervals shrank: {intervals:?}");
    }
    assert!(intervals[7] > intervals[1]);
    assert!(intervals.iter().all(|&d| d <= 365));
    assert_eq!(sim.card().state, State::Review);
    assert_eq!(sim.card().lapses, 0);
}

#[test]
fn test_lapse_and_relearn() {
    init_tracing();
    let mut sim = ReviewSimulator::with_card(
        Parameters::default(),
        TestDataFactory::review_card(10.0, 5.0, 10),
        42,
    );

    let lapse = sim.review(Rating::Again);
    assert_eq!(lapse.card.state, State::Relearning);
    assert_eq!(lapse.card.lapses, 1);
    assert_eq!(lapse.card.scheduled_days, 0);
    assert_eq!(lapse.card.due, sim.now() + Duration::minutes(5));
    assert_eq!(lapse.review_log.elapsed_days, 10);
    assert!(lapse.card.stability < 10.0);

    sim.advance_to_due();
    let again = sim.review(Rating::Again);
    assert_eq!(again.card.state, State::Relearning);
    assert_eq!(again.card.lapses, 1);

    sim.advance_to_due();
    let recovered = sim.review(Rating::Good);
    assert_eq!(recovered.card.state, State::Review);
    assert!(recovered.card.scheduled_days >= 1);

    let accuracy = recall_accuracy(sim.card());
    assert!((accuracy - (8.0 - 1.0) / 8.0).abs() < 1e-12);
}

#[test]
fn test_long_term_skips_learning_steps() {
    init_tracing();
    let params = Parameters::default().with_short_term(false);
    let mut sim = ReviewSimulator::new(params);

    let preview = sim.preview();
    let days: Vec<u64> = Rating::ALL.iter().map(|r| preview[*r].card.scheduled_days).collect();
    assert_eq!(days, vec![1, 2, 3, 8]);

    for outcome in sim.run(&[Rating::Again, Rating::Good, Rating::Hard, Rating::Easy]) {
        assert_eq!(outcome.card.state, State::Review);
        assert!(outcome.card.scheduled_days >= 1);
    }
    assert_eq!(sim.card().lapses, 0);
}

#[test]
fn test_preview_matches_commit() {
    init_tracing();
    let mut sim = ReviewSimulator::new(Parameters::default().with_fuzz(true));
    for rating in [Rating::Good, Rating::Good, Rating::Again, Rating::Good, Rating::Easy] {
        sim.advance_to_due();
        let preview = sim.preview();
        let committed = sim.review(rating);
        assert_eq!(preview[rating], committed);
    }
}

#[test]
fn test_fuzz_is_reproducible() {
    init_tracing();
    let grades = [
        Rating::Good,
        Rating::Good,
        Rating::Hard,
        Rating::Good,
        Rating::Easy,
        Rating::Good,
    ];
    let params = Parameters::default().with_fuzz(true);

    let a = TestDataFactory::simulated_history(1, &grades, params.clone());
    let b = TestDataFactory::simulated_history(1, &grades, params);
    assert_eq!(a, b);
}

#[test]
fn test_retrievability_decays_between_reviews() {
    init_tracing();
    let params = Parameters::default().with_short_term(false);
    let card = TestDataFactory::review_card(20.0, 5.0, 20);
    let mut sim = ReviewSimulator::with_card(params, card, 3);
    sim.review(Rating::Good);

    assert_eq!(sim.retrievability(), 1.0);
    let mut last = 1.0;
    for _ in 0..5 {
        sim.advance(Duration::days(7));
        let r = sim.retrievability();
        assert!(r < last);
        last = r;
    }

    let mut on_time = ReviewSimulator::with_card(
        Parameters::default().with_short_term(false),
        TestDataFactory::review_card(20.0, 5.0, 20),
        3,
    );
    on_time.review(Rating::Good);
    on_time.advance_to_due();
    let r = on_time.retrievability();
    assert!((0.85..0.95).contains(&r), "retrievability at due: {r}");
}

#[test]
fn test_card_survives_json_between_reviews() {
    init_tracing();
    let mut sim = ReviewSimulator::new(Parameters::default());
    sim.run(&[Rating::Good, Rating::Good, Rating::Again]);

    let json = serde_json::to_string(sim.card()).unwrap();
    assert!(json.contains("\"lastReview\""));
    let restored: Card = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, sim.card());

    let original = sim.fsrs().repeat(sim.card(), sim.now());
    let reloaded = sim.fsrs().repeat(&restored, sim.now());
    assert_eq!(original, reloaded);
}

#[test]
fn test_learning_cards_from_factory() {
    init_tracing();
    let fsrs = hazel_fsrs::Fsrs::default();
    let now = ReviewSimulator::epoch();
    for state in [State::Learning, State::Relearning] {
        let card = TestDataFactory::learning_card(state, 1.5, 6.0);
        let log = fsrs.repeat(&card, now);
        assert_eq!(log[Rating::Again].card.state, state);
        assert_eq!(log[Rating::Hard].card.state, state);
        assert_eq!(log[Rating::Good].card.state, State::Review);
        assert!(log[Rating::Easy].card.scheduled_days > log[Rating::Good].card.scheduled_days);
    }
}
