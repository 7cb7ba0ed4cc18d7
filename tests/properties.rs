use proptest::prelude::*;

use interval_timer::timer::{Configuration, CountdownEngine, ManualClock, Phase, TimerEvent};

fn configuration() -> impl Strategy<Value = Configuration> {
    (
        0u64..=15,
        0u64..=15,
        0u64..=15,
        1u64..=5,
        1u64..=4,
        0u64..=15,
        0u64..=15,
    )
        .prop_map(
            |(warmup, workout, rest, rounds, sets, set_rest, cooldown)| Configuration {
                warmup_seconds: warmup,
                workout_seconds: workout,
                rest_seconds: rest,
                rounds,
                sets,
                set_rest_seconds: set_rest,
                cooldown_seconds: cooldown,
            },
        )
}

/// Drive a run to completion with the given clock steps, returning every event
fn run_to_end(config: Configuration, steps: &[i64]) -> (Vec<TimerEvent>, CountdownEngine<ManualClock>) {
    let clock = ManualClock::default();
    let mut engine = CountdownEngine::with_clock(clock.clone());
    let mut events = engine.start(config).unwrap();

    let mut i = 0;
    while engine.state().phase != Phase::Finished {
        clock.advance_millis(steps[i % steps.len()]);
        events.extend(engine.tick());

        let state = engine.state();
        assert!(state.round >= 1 && state.round <= config.rounds);
        assert!(state.set >= 1 && state.set <= config.sets);
        assert!(state.remaining_seconds <= state.total_seconds);
        i += 1;
    }
    (events, engine)
}

proptest! {
    #[test]
    fn round_and_set_stay_in_bounds(
        config in configuration(),
        steps in prop::collection::vec(1i64..=7_000, 1..8),
    ) {
        let (events, _engine) = run_to_end(config, &steps);

        for event in &events {
            if let TimerEvent::PhaseChanged { phase, round, set, total_seconds } = *event {
                prop_assert!(round >= 1 && round <= config.rounds);
                prop_assert!(set >= 1 && set <= config.sets);
                // Never lands on a zero-length timed phase
                prop_assert!(phase == Phase::Finished || total_seconds > 0);
            }
        }
        prop_assert_eq!(
            events.iter().filter(|e| **e == TimerEvent::Finished).count(),
            1
        );
    }

    #[test]
    fn optional_phases_at_zero_only_visit_workout(
        workout in 1u64..=10,
        rounds in 1u64..=6,
        sets in 1u64..=4,
        step in 100i64..=15_000,
    ) {
        let config = Configuration {
            warmup_seconds: 0,
            workout_seconds: workout,
            rest_seconds: 0,
            rounds,
            sets,
            set_rest_seconds: 0,
            cooldown_seconds: 0,
        };
        let (events, _engine) = run_to_end(config, &[step]);

        let entered: Vec<Phase> = events
            .iter()
            .filter_map(|event| match event {
                TimerEvent::PhaseChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();

        prop_assert_eq!(entered.last(), Some(&Phase::Finished));
        prop_assert!(entered[..entered.len() - 1].iter().all(|p| *p == Phase::Workout));
        prop_assert_eq!(entered.len() as u64 - 1, rounds * sets);
    }

    #[test]
    fn elapsed_time_splits_do_not_matter(
        config in configuration(),
        elapsed in 0i64..=400,
        splits in prop::collection::vec(1i64..=30_000, 1..6),
    ) {
        // One big gap and many small ticks must land on the same state
        let clock_a = ManualClock::default();
        let mut a = CountdownEngine::with_clock(clock_a.clone());
        a.start(config).unwrap();
        clock_a.advance_secs(elapsed);
        a.tick();

        let clock_b = ManualClock::default();
        let mut b = CountdownEngine::with_clock(clock_b.clone());
        b.start(config).unwrap();
        let target = elapsed * 1000;
        let mut advanced = 0;
        let mut i = 0;
        while advanced < target {
            let step = splits[i % splits.len()].min(target - advanced);
            clock_b.advance_millis(step);
            advanced += step;
            b.tick();
            i += 1;
        }

        prop_assert_eq!(a.state(), b.state());
    }

    #[test]
    fn pause_is_idempotent_and_resume_loses_nothing(
        config in configuration(),
        before in 0i64..=60_000,
        paused_for in 0i64..=600_000,
    ) {
        let clock = ManualClock::default();
        let mut engine = CountdownEngine::with_clock(clock.clone());
        engine.start(config).unwrap();

        clock.advance_millis(before);
        engine.pause();
        let once = engine.state();
        engine.pause();
        prop_assert_eq!(engine.state(), once);

        clock.advance_millis(paused_for);
        engine.tick();
        engine.resume();
        prop_assert_eq!(engine.state().remaining_seconds, once.remaining_seconds);
        prop_assert_eq!(engine.state().phase, once.phase);
    }
}
