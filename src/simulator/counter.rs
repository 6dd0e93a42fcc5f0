use std::cell::Cell;

/// The integer every task reads and writes back.
///
/// Reads and writes are separate operations with nothing tying them together,
/// so a task that suspends between the two can write back a stale value.
/// `Cell` keeps the counter on one thread without putting a lock in the way.
#[derive(Debug, Default)]
pub struct SharedCounter {
    value: Cell<i64>,
}

impl SharedCounter {
    pub fn new(initial: i64) -> Self {
        Self {
            value: Cell::new(initial),
        }
    }

    pub fn read(&self) -> i64 {
        self.value.get()
    }

    pub fn write(&self, value: i64) {
        self.value.set(value);
    }
}
