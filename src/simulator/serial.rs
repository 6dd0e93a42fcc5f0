use super::{Job, Scheduler};

/// Runs each job to completion before starting the next.
pub struct SerialScheduler {
    jobs: Vec<Job>,
    current: usize,
}

impl SerialScheduler {
    pub fn new() -> Self {
        SerialScheduler::with_jobs(Vec::new())
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self { jobs, current: 0 }
    }
}

impl Default for SerialScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SerialScheduler {
    const NAME: &'static str = "Serial Scheduler";

    fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn schedule(&mut self) -> Option<&mut Job> {
        self.current = self.jobs.iter().position(|job| !job.is_finished())?;
        self.jobs.get_mut(self.current)
    }

    fn current_job(&self) -> Option<&Job> {
        self.jobs.get(self.current)
    }
}
