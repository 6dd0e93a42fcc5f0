use super::{Job, Scheduler, DEFAULT_QUANTUM};

/// Rotates through unfinished jobs, granting each `quantum` steps per turn.
pub struct RoundRobinScheduler {
    jobs: Vec<Job>,
    current: usize,
    quantum: u32,
    slice_used: u32,
}

impl RoundRobinScheduler {
    pub fn new() -> Self {
        RoundRobinScheduler::with_jobs(Vec::new(), DEFAULT_QUANTUM)
    }

    /// A quantum of zero is treated as one.
    pub fn with_jobs(jobs: Vec<Job>, quantum: u32) -> Self {
        Self {
            jobs,
            current: 0,
            quantum: quantum.max(1),
            slice_used: 0,
        }
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    fn poll_job(&mut self) {
        let len = self.jobs.len();
        // Wraps all the way round so a sole remaining job can be picked again.
        if let Some(next) = (1..=len)
            .map(|offset| (self.current + offset) % len)
            .find(|&index| !self.jobs[index].is_finished())
        {
            self.current = next;
        }
        self.slice_used = 0;
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round Robin Scheduler";

    fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn schedule(&mut self) -> Option<&mut Job> {
        if self.is_finished() {
            return None;
        }

        let current_done = self
            .jobs
            .get(self.current)
            .map_or(true, Job::is_finished);
        if current_done || self.slice_used >= self.quantum {
            self.poll_job();
        }

        self.slice_used += 1;
        self.jobs.get_mut(self.current)
    }

    fn current_job(&self) -> Option<&Job> {
        self.jobs.get(self.current)
    }
}
