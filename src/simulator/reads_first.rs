use super::{Job, Scheduler, TaskState};

/// Runs every pending read before any write.
///
/// Each task suspends after reading, so with two or more jobs every task
/// observes the same value and all but one update is lost.
pub struct ReadsFirstScheduler {
    jobs: Vec<Job>,
    current: usize,
}

impl ReadsFirstScheduler {
    pub fn new() -> Self {
        ReadsFirstScheduler::with_jobs(Vec::new())
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self { jobs, current: 0 }
    }
}

impl Default for ReadsFirstScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ReadsFirstScheduler {
    const NAME: &'static str = "Reads-First Scheduler";

    fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn schedule(&mut self) -> Option<&mut Job> {
        self.current = self
            .jobs
            .iter()
            .position(|job| job.state() == TaskState::Ready)
            .or_else(|| self.jobs.iter().position(|job| !job.is_finished()))?;
        self.jobs.get_mut(self.current)
    }

    fn current_job(&self) -> Option<&Job> {
        self.jobs.get(self.current)
    }
}
