use super::{Job, Scheduler};

/// Picks a random unfinished job for every step.
///
/// Stands in for a runtime whose interleaving nobody controls, but stays
/// reproducible: the same seed yields the same schedule.
pub struct RandomScheduler {
    jobs: Vec<Job>,
    current: usize,
    seed: u64,
    rng: fastrand::Rng,
}

impl RandomScheduler {
    pub fn new(seed: u64) -> Self {
        RandomScheduler::with_jobs(Vec::new(), seed)
    }

    pub fn with_jobs(jobs: Vec<Job>, seed: u64) -> Self {
        Self {
            jobs,
            current: 0,
            seed,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn poll_job(&mut self) -> Option<usize> {
        let runnable: Vec<usize> = self
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| !job.is_finished())
            .map(|(index, _)| index)
            .collect();

        if runnable.is_empty() {
            return None;
        }
        Some(runnable[self.rng.usize(..runnable.len())])
    }
}

impl Scheduler for RandomScheduler {
    const NAME: &'static str = "Random Scheduler";

    fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    fn schedule(&mut self) -> Option<&mut Job> {
        self.current = self.poll_job()?;
        self.jobs.get_mut(self.current)
    }

    fn current_job(&self) -> Option<&Job> {
        self.jobs.get(self.current)
    }

    fn label(&self) -> String {
        format!("{} (seed {})", Self::NAME, self.seed)
    }
}
