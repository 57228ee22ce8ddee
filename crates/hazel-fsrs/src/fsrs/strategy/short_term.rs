//! Short-term strategy: same-day learning steps

use chrono::Duration;

use super::{due_in_days, next_recall_states, Candidates, SchedulingStrategy};
use crate::card::{Rating, SchedulingInfo, State};
use crate::fsrs::scheduler::ReviewSession;

/// Minute-granularity learning steps, then day intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTermScheduler;

impl SchedulingStrategy for ShortTermScheduler {
    fn new_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        let params = session.params;
        let now = session.now;
        let mut next = session.current;
        next.difficulty = params.init_difficulty(grade);
        next.stability = params.init_stability(grade);

        match grade {
            Rating::Again | Rating::Hard | Rating::Good => {
                let minutes = match grade {
                    Rating::Again => 1,
                    Rating::Hard => 5,
                    _ => 10,
                };
                next.scheduled_days = 0;
                next.due = now + Duration::minutes(minutes);
                next.state = State::Learning;
            }
            Rating::Easy => {
                let interval = session.next_interval(next.stability, next.elapsed_days as f64);
                next.scheduled_days = interval as u64;
                next.due = due_in_days(now, interval);
                next.state = State::Review;
            }
        }

        session.record(grade, next)
    }

    fn learning_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        let params = session.params;
        let now = session.now;
        let last = session.last;
        let elapsed_days = session.current.elapsed_days as f64;

        let mut next = session.current;
        next.difficulty = params.next_difficulty(last.difficulty, grade);
        next.stability = params.short_term_stability(last.stability, grade);

        match grade {
            Rating::Again => {
                next.scheduled_days = 0;
                next.due = now + Duration::minutes(5);
                next.state = last.state;
            }
            Rating::Hard => {
                next.scheduled_days = 0;
                next.due = now + Duration::minutes(10);
                next.state = last.state;
            }
            Rating::Good => {
                let interval = session.next_interval(next.stability, elapsed_days);
                next.scheduled_days = interval as u64;
                next.due = due_in_days(now, interval);
                next.state = State::Review;
            }
            Rating::Easy => {
                let good_stability = params.short_term_stability(last.stability, Rating::Good);
                let good_interval = session.next_interval(good_stability, elapsed_days);
                let interval = session
                    .next_interval(next.stability, elapsed_days)
                    .max(good_interval + 1.0);
                next.scheduled_days = interval as u64;
                next.due = due_in_days(now, interval);
                next.state = State::Review;
            }
        }

        session.record(grade, next)
    }

    fn review_state(&self, session: &mut ReviewSession<'_>, grade: Rating) -> SchedulingInfo {
        let params = session.params;
        let now = session.now;
        let elapsed_days = session.current.elapsed_days as f64;
        let difficulty = session.last.difficulty;
        let stability = session.last.stability;
        let retrievability = params.forgetting_curve(elapsed_days, stability);

        let mut next = Candidates::splat(session.current);

        next.again.difficulty = params.next_difficulty(difficulty, Rating::Again);
        next.again.stability = params
            .same_day_lapse_stability(stability)
            .min(params.next_forget_stability(difficulty, stability, retrievability));
        next_recall_states(session, &mut next, difficulty, stability, retrievability);

        let good = session.next_interval(next.good.stability, elapsed_days);
        let hard = session.next_interval(next.hard.stability, elapsed_days).min(good);
        let good = good.max(hard + 1.0);
        let easy = session
            .next_interval(next.easy.stability, elapsed_days)
            .max(good + 1.0);

        next.again.scheduled_days = 0;
        next.again.due = now + Duration::minutes(5);
        next.again.state = State::Relearning;
        next.again.lapses = next.again.lapses.saturating_add(1);

        let recalled = [(&mut next.hard, hard), (&mut next.good, good), (&mut next.easy, easy)];
        for (card, interval) in recalled {
            card.scheduled_days = interval as u64;
            card.due = due_in_days(now, interval);
            card.state = State::Review;
        }

        next.record(session, grade)
    }
}
