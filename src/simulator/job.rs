use super::{
    tasks::{IncrementTask, Task, TaskState},
    SharedCounter,
};

pub struct Job {
    id: usize,
    name: String,
    task: Box<dyn Task>,
    steps: u32,
}

impl Job {
    pub fn new(id: usize, task: Box<dyn Task>) -> Self {
        Job::named(id, &format!("task-{id}"), task)
    }

    pub fn named(id: usize, name: &str, task: Box<dyn Task>) -> Self {
        Self {
            id,
            name: name.to_owned(),
            task,
            steps: 0,
        }
    }

    /// `count` increment jobs with ids starting at 1.
    pub fn batch(count: usize) -> Vec<Job> {
        (1..=count)
            .map(|id| Job::new(id, Box::new(IncrementTask::new())))
            .collect()
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn state(&self) -> TaskState {
        self.task.state()
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn step(&mut self, counter: &SharedCounter) -> TaskState {
        self.steps += 1;
        self.task.step(counter)
    }
}
