//! Property-based tests for the quiz session state machine.

use proptest::prelude::*;

use goon_core::model::Difficulty;
use goon_core::time::fixed_clock;
use services::{QuizService, SessionError};

#[derive(Debug, Clone)]
enum Step {
    SubmitCorrect,
    SubmitWrong,
    SubmitGarbage(String),
    TickLive,
    TickStale,
    Skip,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::SubmitCorrect),
        2 => Just(Step::SubmitWrong),
        1 => "[^0-9]{0,6}".prop_map(Step::SubmitGarbage),
        6 => Just(Step::TickLive),
        2 => Just(Step::TickStale),
        1 => Just(Step::Skip),
    ]
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::NoLimit),
        Just(Difficulty::Limit20),
        Just(Difficulty::Limit10),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Score never drops, never outruns the index, and each decisive event
    /// moves the index by exactly one.
    #[test]
    fn prop_session_bookkeeping(
        seed in any::<u64>(),
        difficulty in difficulty(),
        steps in prop::collection::vec(step(), 0..400),
    ) {
        let mut service = QuizService::new(fixed_clock()).with_seed(Some(seed));
        let mut session = service.start_session(difficulty);
        let quota = session.quota();
        let mut retired = Vec::new();

        for step in steps {
            let (score, index) = (session.score(), session.question_index());
            let complete = session.is_complete();
            let live = session.timer_handle();

            let advanced = match step {
                Step::SubmitCorrect | Step::SubmitWrong | Step::SubmitGarbage(_) => {
                    let text = match &step {
                        Step::SubmitCorrect => session
                            .current_problem()
                            .map_or_else(String::new, |p| p.answer().to_string()),
                        Step::SubmitWrong => session
                            .current_problem()
                            .map_or_else(String::new, |p| (p.answer() + 1).to_string()),
                        Step::SubmitGarbage(text) => text.clone(),
                        _ => unreachable!(),
                    };
                    match session.submit(&text) {
                        Ok(outcome) => {
                            prop_assert!(!complete);
                            prop_assert_eq!(outcome.correct, matches!(step, Step::SubmitCorrect));
                            true
                        }
                        Err(err) => {
                            prop_assert!(complete);
                            prop_assert_eq!(err, SessionError::Completed);
                            false
                        }
                    }
                }
                Step::TickLive => match live {
                    Some(handle) => {
                        let tick = session.tick(handle).unwrap().unwrap();
                        if tick.expired {
                            retired.push(handle);
                        }
                        tick.expired
                    }
                    None => false,
                },
                Step::TickStale => {
                    if let Some(&handle) = retired.last() {
                        prop_assert_eq!(session.tick(handle), Ok(None));
                    }
                    false
                }
                Step::Skip => session.advance().is_ok(),
            };

            if let Some(handle) = live {
                if advanced {
                    retired.push(handle);
                }
            }

            prop_assert!(session.score() >= score);
            prop_assert!(session.score() <= session.question_index());
            prop_assert!(session.question_index() <= quota);
            let expected_index = if advanced { index + 1 } else { index };
            prop_assert_eq!(session.question_index(), expected_index);
            prop_assert_eq!(session.is_complete(), session.question_index() == quota);
            if !difficulty.is_timed() {
                prop_assert_eq!(session.timer_handle(), None);
            }
        }
    }

    /// Stale ticks never change anything, however many arrive.
    #[test]
    fn prop_stale_ticks_are_inert(seed in any::<u64>(), stale_ticks in 1usize..50) {
        let mut service = QuizService::new(fixed_clock()).with_seed(Some(seed));
        let mut session = service.start_session(Difficulty::Limit10);
        let first = session.timer_handle().unwrap();
        let answer = session.current_problem().unwrap().answer().to_string();
        session.submit(&answer).unwrap();

        let remaining = session.time_remaining();
        for _ in 0..stale_ticks {
            prop_assert_eq!(session.tick(first).unwrap(), None);
        }
        prop_assert_eq!(session.score(), 1);
        prop_assert_eq!(session.question_index(), 1);
        prop_assert_eq!(session.time_remaining(), remaining);
    }
}
