use super::{Scheduler, SharedCounter, TaskState};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Read,
    Write,
}

/// One executed step: which job ran and the value it read or wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub job: usize,
    pub name: String,
    pub kind: StepKind,
    pub value: i64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StepKind::Read => write!(f, "{} read {}", self.name, self.value),
            StepKind::Write => write!(f, "{} wrote {}", self.name, self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub scheduler: String,
    pub initial: i64,
    pub final_value: i64,
    /// Values returned by the finished tasks, in job order.
    pub results: Vec<i64>,
}

impl Outcome {
    /// What the counter would hold had no update been lost.
    pub fn expected(&self) -> i64 {
        self.initial.wrapping_add(self.results.len() as i64)
    }

    pub fn lost_updates(&self) -> i64 {
        self.expected().wrapping_sub(self.final_value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Report<'a> {
            #[serde(flatten)]
            outcome: &'a Outcome,
            expected: i64,
            lost_updates: i64,
        }

        serde_json::to_string_pretty(&Report {
            outcome: self,
            expected: self.expected(),
            lost_updates: self.lost_updates(),
        })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scheduler: {}", self.scheduler)?;
        writeln!(f, "final counter: {}", self.final_value)?;
        writeln!(f, "results: {:?}", self.results)?;
        write!(
            f,
            "expected: {} (lost updates: {})",
            self.expected(),
            self.lost_updates()
        )
    }
}

/// Drives a scheduler's jobs against one counter, a step at a time.
pub struct SimulationRunner<S> {
    scheduler: S,
    counter: SharedCounter,
    initial: i64,
    last_step: Option<StepRecord>,
    steps: u64,
}

impl<S: Scheduler> SimulationRunner<S> {
    pub fn new(scheduler: S, initial: i64) -> Self {
        Self {
            scheduler,
            counter: SharedCounter::new(initial),
            initial,
            last_step: None,
            steps: 0,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn counter(&self) -> &SharedCounter {
        &self.counter
    }

    pub fn last_step(&self) -> Option<&StepRecord> {
        self.last_step.as_ref()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.scheduler.is_finished()
    }

    /// Runs the next scheduled step. Returns `None` once every job has finished.
    pub fn step(&mut self) -> Option<StepRecord> {
        let job = self.scheduler.schedule()?;
        let (kind, value) = match job.step(&self.counter) {
            TaskState::Suspended { observed } => (StepKind::Read, observed),
            TaskState::Finished { value } => (StepKind::Write, value),
            TaskState::Ready => (StepKind::Read, self.counter.read()),
        };
        let record = StepRecord {
            job: job.id(),
            name: job.name().to_owned(),
            kind,
            value,
        };

        debug!(job = %record.name, kind = ?record.kind, value = record.value, "step");
        self.steps += 1;
        self.last_step = Some(record.clone());
        Some(record)
    }

    /// Results of the jobs finished so far, with the counter as it stands now.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            scheduler: self.scheduler.label(),
            initial: self.initial,
            final_value: self.counter.read(),
            results: self
                .scheduler
                .jobs()
                .iter()
                .filter_map(|job| job.state().result())
                .collect(),
        }
    }

    pub fn run(&mut self) -> Outcome {
        while self.step().is_some() {}

        let outcome = self.outcome();
        info!(
            scheduler = %outcome.scheduler,
            final_value = outcome.final_value,
            steps = self.steps,
            "simulation finished"
        );
        if outcome.lost_updates() > 0 {
            warn!(
                lost = outcome.lost_updates(),
                expected = outcome.expected(),
                "updates were lost"
            );
        }
        outcome
    }
}

/// Runs every job in `scheduler` against a fresh counter starting at `initial`.
pub fn simulate<S: Scheduler>(scheduler: S, initial: i64) -> Outcome {
    SimulationRunner::new(scheduler, initial).run()
}
