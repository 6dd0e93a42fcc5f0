use super::SharedCounter;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Ready,
    /// Read done, write pending.
    Suspended { observed: i64 },
    Finished { value: i64 },
}

impl TaskState {
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskState::Finished { .. })
    }

    pub fn observed(&self) -> Option<i64> {
        match *self {
            TaskState::Suspended { observed } => Some(observed),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<i64> {
        match *self {
            TaskState::Finished { value } => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Ready => f.write_str("ready"),
            TaskState::Suspended { .. } => f.write_str("suspended"),
            TaskState::Finished { .. } => f.write_str("finished"),
        }
    }
}

pub trait Task {
    /// Runs the task up to its next suspension point.
    ///
    /// Should not return `Ready`; the runner records such a step as a read
    /// of the current counter value.
    fn step(&mut self, counter: &SharedCounter) -> TaskState;
    fn state(&self) -> TaskState;
}

/// Read-modify-write of the shared counter, split between the read and the write.
pub struct IncrementTask {
    state: TaskState,
}

impl IncrementTask {
    pub fn new() -> Self {
        Self {
            state: TaskState::Ready,
        }
    }
}

impl Default for IncrementTask {
    fn default() -> Self {
        Self::new()
    }
}

impl Task for IncrementTask {
    fn step(&mut self, counter: &SharedCounter) -> TaskState {
        self.state = match self.state {
            TaskState::Ready => TaskState::Suspended {
                observed: counter.read(),
            },
            TaskState::Suspended { observed } => {
                // Wraps at i64::MAX like a machine register would.
                let value = observed.wrapping_add(1);
                counter.write(value);
                TaskState::Finished { value }
            }
            finished @ TaskState::Finished { .. } => finished,
        };
        self.state
    }

    fn state(&self) -> TaskState {
        self.state
    }
}

/// Increments the counter with nothing else running in between and returns the stored value.
pub fn increment_task(counter: &SharedCounter) -> i64 {
    let mut task = IncrementTask::new();
    loop {
        if let TaskState::Finished { value } = task.step(counter) {
            return value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_only_reads() {
        let counter = SharedCounter::new(7);
        let mut task = IncrementTask::new();

        assert_eq!(task.step(&counter), TaskState::Suspended { observed: 7 });
        assert_eq!(counter.read(), 7);
    }

    #[test]
    fn second_step_writes_observed_plus_one() {
        let counter = SharedCounter::new(7);
        let mut task = IncrementTask::new();
        task.step(&counter);
        counter.write(100);

        assert_eq!(task.step(&counter), TaskState::Finished { value: 8 });
        assert_eq!(counter.read(), 8);
    }

    #[test]
    fn finished_task_does_not_touch_counter() {
        let counter = SharedCounter::new(0);
        let mut task = IncrementTask::new();
        task.step(&counter);
        task.step(&counter);
        counter.write(42);

        assert_eq!(task.step(&counter), TaskState::Finished { value: 1 });
        assert_eq!(counter.read(), 42);
    }

    #[test]
    fn increment_wraps_at_max() {
        let counter = SharedCounter::new(i64::MAX);
        assert_eq!(increment_task(&counter), i64::MIN);
    }

    #[test]
    fn increment_task_returns_stored_value() {
        let counter = SharedCounter::new(0);
        assert_eq!(increment_task(&counter), 1);
        assert_eq!(increment_task(&counter), 2);
        assert_eq!(counter.read(), 2);
    }
}
