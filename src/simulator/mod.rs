mod async_tasks;
mod counter;
mod display;
mod interactive;
mod job;
mod random;
mod reads_first;
mod round_robin;
mod runner;
mod serial;
mod tasks;

pub use async_tasks::{increment_task_async, run_async, ASYNC_RUNTIME_NAME};
pub use counter::SharedCounter;
pub use display::{render, DisplayTerminal};
pub use interactive::{InteractiveRunner, RunnerEvent};
pub use job::Job;
pub use random::RandomScheduler;
pub use reads_first::ReadsFirstScheduler;
pub use round_robin::RoundRobinScheduler;
pub use runner::{simulate, Outcome, SimulationRunner, StepKind, StepRecord};
pub use serial::SerialScheduler;
pub use tasks::{increment_task, IncrementTask, Task, TaskState};

pub const DEFAULT_TASKS: usize = 2;
pub const DEFAULT_QUANTUM: u32 = 1;

/// Decides which job takes the next step.
///
/// Returning `None` from `schedule` means every job has finished.
pub trait Scheduler {
    const NAME: &'static str;

    fn jobs(&self) -> &[Job];
    fn add_job(&mut self, job: Job);
    fn schedule(&mut self) -> Option<&mut Job>;
    fn current_job(&self) -> Option<&Job>;

    /// Name shown in reports, with whatever is needed to replay the run.
    fn label(&self) -> String {
        Self::NAME.to_owned()
    }

    fn is_finished(&self) -> bool {
        self.jobs().iter().all(Job::is_finished)
    }
}
