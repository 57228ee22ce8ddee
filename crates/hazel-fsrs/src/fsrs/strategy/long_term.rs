//! Long-term strategy: whole-day intervals only

use super::{due_in_days, next_recall_states, Candidates, SchedulingStrategy};
use crate::card::{Rating, SchedulingInfo, State};
use crate::fsrs::scheduler::ReviewSession;

/// Every outcome lands in Review with an interval of at least one day
#[derive(Debug, Clone, Copy, Default)]
pub struct LongTermScheduler;

impl LongTermScheduler {
    /// Strictly increasing intervals Again < Hard < Good < Easy
    fn chain(intervals: [f64; 4]) -> [f64; 4] {
        let [again, hard, good, easy] = intervals;
        let again = again.min(hard);
        let hard = hard.max(again + 1.0);
        let good = good.max(hard + 1.0);
        let easy = easy.max(good + 1.0);
        [again, hard, good, easy]
    }

    fn schedule(
        session: &mut ReviewSession<'_>,
        mut next: Candidates,
        elapsed_days: f64,
        grade: Rating,
    ) -> SchedulingInfo {
        let now = session.now;
        let raw = Rating::ALL
            .map(|rating| session.next_interval(next.get_mut(rating).stability, elapsed_days));
        let intervals = Self::chain(raw);

        for (rating, interval) in Rating::ALL.into_iter().zip(intervals) {
            let card = next.get_mut(rating);
            card.scheduled_days = interval as u64;
            card.due = due_in_days(now, interval);
            card.state = State::Review;
        }

        next.record(session, grade)
    }
}

impl SchedulingStrategy for LongTermScheduler {
    fn new_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        session.current.scheduled_days = 0;
        session.current.elapsed_days = 0;

        let params = session.params;
        let mut next = Candidates::splat(session.current);
        for rating in Rating::ALL {
            let card = next.get_mut(rating);
            card.difficulty = params.init_difficulty(rating);
            card.stability = params.init_stability(rating);
        }

        Self::schedule(session, next, 0.0, grade)
    }

    fn learning_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        self.review_state(session, grade)
    }

    fn review_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        let params = session.params;
        let elapsed_days = session.current.elapsed_days as f64;
        let difficulty = session.last.difficulty;
        let stability = session.last.stability;
        let retrievability = params.forgetting_curve(elapsed_days, stability);

        let mut next = Candidates::splat(session.current);

        next.again.difficulty = params.next_difficulty(difficulty, Rating::Again);
        next.again.stability =
            stability.min(params.next_forget_stability(difficulty, stability, retrievability));
        next.again.lapses = next.again.lapses.saturating_add(1);
        next_recall_states(session, &mut next, difficulty, stability, retrievability);

        Self::schedule(session, next, elapsed_days, grade)
    }
}
