use super::{Outcome, SharedCounter};
use crate::error::SimError;
use std::rc::Rc;
use tokio::{runtime, task};
use tracing::{debug, info};

pub const ASYNC_RUNTIME_NAME: &str = "Tokio Local Runtime";

/// Reads the counter, hands control back to the runtime, then writes.
pub async fn increment_task_async(counter: Rc<SharedCounter>) -> i64 {
    let observed = counter.read();
    debug!(observed, "read shared counter");

    task::yield_now().await;

    let value = observed.wrapping_add(1);
    counter.write(value);
    debug!(value, "wrote shared counter");
    value
}

/// Spawns `tasks` increments on a single-threaded runtime and awaits them in spawn order.
///
/// The interleaving is up to tokio's local queue, so the final value is only
/// bounded, never predicted.
pub fn run_async(tasks: usize, initial: i64) -> Result<Outcome, SimError> {
    let runtime = runtime::Builder::new_current_thread().build()?;
    let local = task::LocalSet::new();
    let counter = Rc::new(SharedCounter::new(initial));

    let results = local.block_on(&runtime, async {
        let handles: Vec<_> = (0..tasks)
            .map(|_| task::spawn_local(increment_task_async(Rc::clone(&counter))))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await?);
        }
        Ok::<_, SimError>(results)
    })?;

    let outcome = Outcome {
        scheduler: ASYNC_RUNTIME_NAME.to_owned(),
        initial,
        final_value: counter.read(),
        results,
    };
    info!(final_value = outcome.final_value, tasks, "async simulation finished");
    Ok(outcome)
}
