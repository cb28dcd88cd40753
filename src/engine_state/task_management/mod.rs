//! # Task Management System
//!
//! A single-threaded, cooperative task queue. Work is either run on the spot or
//! deferred to idle time with an upper bound on how long it may wait.
//!
//! ## Scheduling Policy
//! - `TaskPriority::Immediate`: processed inside `publish_task()`
//! - `TaskPriority::Background`: queued in FIFO order with a deadline
//!
//! Each call to `process_queued_tasks()` is given an idle budget. Overdue tasks
//! always run; the others run only while the budget has not been spent. Tasks
//! left over keep their relative order. Once a task starts it runs to completion,
//! so the budget can be overshot by at most one task.
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new();
//!
//! task_manager.publish_task(
//!     Box::new(MyTask::new(...)),
//!     TaskPriority::Background { timeout: Duration::from_millis(1000) },
//! );
//!
//! // In your main/game loop:
//! task_manager.process_queued_tasks(Duration::from_millis(4));
//! ```

pub mod task;

use std::collections::VecDeque;

use log::{debug, trace};
use web_time::{Duration, Instant};

use task::{Task, TaskPriority};

/// A background task waiting in the queue.
struct QueuedTask {
    task: Box<dyn Task>,
    deadline: Instant,
}

/// Owns the deferred work of the engine and decides when it runs.
///
/// # Fields
/// - `queued_tasks`: background tasks in publishing order
#[derive(Default)]
pub struct TaskManager {
    queued_tasks: VecDeque<QueuedTask>,
}

impl TaskManager {
    pub fn new() -> Self {
        TaskManager {
            queued_tasks: VecDeque::new(),
        }
    }

    /// Publishes a new task.
    ///
    /// # Arguments
    /// * `task` - The task to run
    /// * `priority` - Run now, or defer to idle time with a timeout
    ///
    /// # Returns
    /// - `true` if the task already ran
    /// - `false` if the task was queued
    pub fn publish_task(&mut self, task: Box<dyn Task>, priority: TaskPriority) -> bool {
        match priority {
            TaskPriority::Immediate => {
                trace!("Running {} immediately", task.describe());
                task.process();
                true
            }
            TaskPriority::Background { timeout } => {
                trace!("Queueing {} with {:?} timeout", task.describe(), timeout);
                self.queued_tasks.push_back(QueuedTask {
                    task,
                    deadline: Instant::now() + timeout,
                });
                false
            }
        }
    }

    /// Runs queued tasks that are overdue, plus as many others as fit in `idle_budget`.
    ///
    /// # Arguments
    /// * `idle_budget` - Time the host can spare this frame. A zero budget runs
    ///   overdue tasks only.
    ///
    /// # Returns
    /// The number of tasks that ran.
    pub fn process_queued_tasks(&mut self, idle_budget: Duration) -> usize {
        if self.queued_tasks.is_empty() {
            return 0;
        }

        let start = Instant::now();
        let mut remaining = VecDeque::with_capacity(self.queued_tasks.len());
        let mut processed = 0;

        while let Some(queued) = self.queued_tasks.pop_front() {
            let overdue = queued.deadline <= Instant::now();
            if overdue || start.elapsed() < idle_budget {
                if overdue {
                    debug!("Running overdue {}", queued.task.describe());
                }
                queued.task.process();
                processed += 1;
            } else {
                remaining.push_back(queued);
            }
        }

        self.queued_tasks = remaining;
        processed
    }

    /// Drops every queued task without running it.
    pub fn clear(&mut self) {
        self.queued_tasks.clear();
    }

    /// Number of queued tasks.
    pub fn len(&self) -> usize {
        self.queued_tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued_tasks.is_empty()
    }
}
