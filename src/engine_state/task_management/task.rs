//! # Task System Core Types
//!
//! ## Core Components
//! - `Task`: a unit of deferred work, consumed when it runs
//! - `TaskPriority`: whether a task runs at once or waits for idle time
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and handed to `TaskManager::publish_task()`
//! 2. `Immediate` tasks run inside `publish_task()` before it returns
//! 3. `Background` tasks are queued with a deadline and run from
//!    `TaskManager::process_queued_tasks()`, either in idle time or once
//!    their deadline has passed

use web_time::Duration;

/// A unit of work scheduled through the `TaskManager`.
///
/// Tasks own everything they need. Work that may become stale while queued
/// should hold weak handles and turn into a no-op when they no longer resolve.
pub trait Task {
    /// Runs the task to completion. There are no suspension points.
    fn process(self: Box<Self>);

    /// Short label used in log output.
    fn describe(&self) -> String {
        String::from("task")
    }
}

/// Scheduling policy for a published task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    /// Run synchronously, blocking the publisher
    Immediate,
    /// Run when idle time is available, but no later than `timeout` after publishing
    Background { timeout: Duration },
}
