//! Counter outcomes under each schedule.

use counter_race::simulator::{
    increment_task, run_async, simulate, Job, RandomScheduler, ReadsFirstScheduler,
    RoundRobinScheduler, SerialScheduler, SharedCounter, SimulationRunner, StepKind,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn serial_increments_never_collide() {
    let outcome = simulate(SerialScheduler::with_jobs(Job::batch(5)), 0);

    assert_eq!(outcome.final_value, 5);
    assert_eq!(outcome.results, vec![1, 2, 3, 4, 5]);
    assert_eq!(outcome.lost_updates(), 0);
}

#[test]
fn back_to_back_increment_task_calls_count_up() {
    let counter = SharedCounter::new(0);
    let results: Vec<i64> = (0..3).map(|_| increment_task(&counter)).collect();

    assert_eq!(results, vec![1, 2, 3]);
    assert_eq!(counter.read(), 3);
}

#[test]
fn two_tasks_reading_first_lose_one_update() {
    let outcome = simulate(ReadsFirstScheduler::with_jobs(Job::batch(2)), 0);

    assert_eq!(outcome.results, vec![1, 1]);
    assert_eq!(outcome.final_value, 1);
}

#[test]
fn three_tasks_reading_first_lose_two_updates() {
    let outcome = simulate(ReadsFirstScheduler::with_jobs(Job::batch(3)), 0);

    assert_eq!(outcome.results, vec![1, 1, 1]);
    assert_eq!(outcome.final_value, 1);
    assert_eq!(outcome.lost_updates(), 2);
}

#[test]
fn no_tasks_leave_counter_untouched() {
    let outcomes = vec![
        simulate(SerialScheduler::with_jobs(Job::batch(0)), 4),
        simulate(ReadsFirstScheduler::with_jobs(Job::batch(0)), 4),
        simulate(RoundRobinScheduler::with_jobs(Job::batch(0), 1), 4),
        simulate(RandomScheduler::with_jobs(Job::batch(0), 17), 4),
        run_async(0, 4).unwrap(),
    ];

    for outcome in outcomes {
        assert_eq!(outcome.final_value, 4, "{}", outcome.scheduler);
        assert!(outcome.results.is_empty(), "{}", outcome.scheduler);
    }
}

#[test]
fn simulators_do_not_share_counters() {
    let first = simulate(SerialScheduler::with_jobs(Job::batch(3)), 0);
    let second = simulate(SerialScheduler::with_jobs(Job::batch(3)), 0);

    assert_eq!(first.final_value, 3);
    assert_eq!(second.final_value, 3);
}

#[test]
fn counter_wraps_instead_of_overflowing() {
    let outcome = simulate(SerialScheduler::with_jobs(Job::batch(2)), i64::MAX);

    assert_eq!(outcome.results, vec![i64::MIN, i64::MIN + 1]);
    assert_eq!(outcome.final_value, i64::MIN + 1);
    assert_eq!(outcome.expected(), i64::MIN + 1);
    assert_eq!(outcome.lost_updates(), 0);
}

#[test]
fn lost_updates_near_the_top_of_the_range() {
    let outcome = simulate(ReadsFirstScheduler::with_jobs(Job::batch(3)), i64::MAX - 1);

    assert_eq!(outcome.results, vec![i64::MAX; 3]);
    assert_eq!(outcome.final_value, i64::MAX);
    assert_eq!(outcome.lost_updates(), 2);

    let outcome = run_async(3, i64::MAX).unwrap();
    assert_eq!(outcome.results.len(), 3);
}

proptest! {
    #[test]
    fn any_initial_value_runs_to_completion(
        tasks in 0usize..20,
        initial in any::<i64>(),
        seed in any::<u64>(),
    ) {
        let outcomes = vec![
            simulate(SerialScheduler::with_jobs(Job::batch(tasks)), initial),
            simulate(ReadsFirstScheduler::with_jobs(Job::batch(tasks)), initial),
            simulate(RoundRobinScheduler::with_jobs(Job::batch(tasks), 1), initial),
            simulate(RandomScheduler::with_jobs(Job::batch(tasks), seed), initial),
        ];

        for outcome in outcomes {
            prop_assert_eq!(outcome.results.len(), tasks);
            prop_assert!((0..=tasks as i64).contains(&outcome.lost_updates()));
        }
    }

    #[test]
    fn serial_final_value_equals_task_count(tasks in 1usize..200, initial in -1000i64..1000) {
        let outcome = simulate(SerialScheduler::with_jobs(Job::batch(tasks)), initial);

        prop_assert_eq!(outcome.final_value, initial + tasks as i64);
        let expected: Vec<i64> = (1..=tasks as i64).map(|n| initial + n).collect();
        prop_assert_eq!(outcome.results, expected);
    }

    #[test]
    fn reads_first_always_ends_one_above_initial(tasks in 1usize..200, initial in -1000i64..1000) {
        let outcome = simulate(ReadsFirstScheduler::with_jobs(Job::batch(tasks)), initial);

        prop_assert_eq!(outcome.final_value, initial + 1);
        prop_assert!(outcome.results.iter().all(|&value| value == initial + 1));
    }

    #[test]
    fn round_robin_quantum_picks_the_interleaving(tasks in 0usize..50, quantum in 2u32..10) {
        let interleaved = simulate(RoundRobinScheduler::with_jobs(Job::batch(tasks), 1), 0);
        let reads_first = simulate(ReadsFirstScheduler::with_jobs(Job::batch(tasks)), 0);
        prop_assert_eq!(interleaved.final_value, reads_first.final_value);
        prop_assert_eq!(interleaved.results, reads_first.results);

        let serialized = simulate(RoundRobinScheduler::with_jobs(Job::batch(tasks), quantum), 0);
        let serial = simulate(SerialScheduler::with_jobs(Job::batch(tasks)), 0);
        prop_assert_eq!(serialized.final_value, serial.final_value);
        prop_assert_eq!(serialized.results, serial.results);
    }

    #[test]
    fn random_schedule_stays_in_bounds(tasks in 1usize..50, seed in any::<u64>()) {
        let mut runner =
            SimulationRunner::new(RandomScheduler::with_jobs(Job::batch(tasks), seed), 0);
        let trace: Vec<_> = std::iter::from_fn(|| runner.step()).collect();
        let outcome = runner.outcome();

        prop_assert_eq!(trace.len(), tasks * 2);
        prop_assert_eq!(outcome.results.len(), tasks);
        prop_assert!(outcome.results.iter().all(|&value| (1..=tasks as i64).contains(&value)));

        let last_write = trace.iter().rev().find(|step| step.kind == StepKind::Write);
        prop_assert_eq!(last_write.map(|step| step.value), Some(outcome.final_value));
    }

    #[test]
    fn random_schedule_is_reproducible(tasks in 0usize..30, seed in any::<u64>()) {
        let first = simulate(RandomScheduler::with_jobs(Job::batch(tasks), seed), 0);
        let second = simulate(RandomScheduler::with_jobs(Job::batch(tasks), seed), 0);
        prop_assert_eq!(first, second);
    }
}
