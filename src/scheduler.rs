//! Task scheduling: a deterministic slot scheduler for simulation and the
//! async periodic runner used on the device.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Device build                                                │
//! │    LocalExecutor ─▶ run_periodic(remote,  ReactorDelay)      │
//! │                  ─▶ run_periodic(control, ReactorDelay)      │
//! │                  ─▶ run_periodic(display, ReactorDelay)      │
//! │                                                              │
//! │  Host / tests                                                │
//! │    TaskScheduler.tick(elapsed_ms) ─▶ TaskDelegate            │
//! │                                        └─▶ TaskSet.run_once  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both paths run each task's `run_once` at its period and interleave
//! tasks only between runs.  The slot scheduler knows nothing about the
//! tasks themselves; it notifies a [`TaskDelegate`] with the slot's id.

use log::{debug, info};

use crate::app::ports::{AsyncDelay, TaskDelegate};
use crate::tasks::PeriodicTask;

// ═══════════════════════════════════════════════════════════════
//  Slot scheduler
// ═══════════════════════════════════════════════════════════════

/// Maximum number of scheduled tasks (stack-allocated).
pub const MAX_TASKS: usize = 4;

/// Internal bookkeeping for a live slot.
#[derive(Debug, Clone)]
struct TaskEntry {
    id: u8,
    label: &'static str,
    period_ms: u32,
    /// Milliseconds since the slot last fired.
    elapsed_ms: u32,
    enabled: bool,
}

/// Simulated-time scheduler.
///
/// Time only advances when [`tick`](Self::tick) is called, so a test can
/// replay hours of operation in microseconds and get the same interleaving
/// every run.
pub struct TaskScheduler {
    slots: [Option<TaskEntry>; MAX_TASKS],
    now_ms: u64,
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
            now_ms: 0,
        }
    }

    /// Add a periodic slot.  Returns the slot index, or `None` if full or
    /// `period_ms` is zero.
    pub fn add(&mut self, id: u8, label: &'static str, period_ms: u32) -> Option<usize> {
        if period_ms == 0 {
            return None;
        }
        let (i, slot) = self.slots.iter_mut().enumerate().find(|(_, s)| s.is_none())?;
        info!("Scheduler: added '{label}' every {period_ms} ms at slot {i}");
        *slot = Some(TaskEntry {
            id,
            label,
            period_ms,
            elapsed_ms: 0,
            enabled: true,
        });
        Some(i)
    }

    /// Add a slot for `task`, using its name and period.
    pub fn add_task(&mut self, id: u8, task: &dyn PeriodicTask) -> Option<usize> {
        self.add(id, task.name(), task.period_ms())
    }

    /// Remove a slot by index.
    pub fn remove(&mut self, slot: usize) {
        if let Some(entry) = self.slots.get_mut(slot).and_then(Option::take) {
            info!("Scheduler: removed '{}' from slot {}", entry.label, slot);
        }
    }

    /// Pause or resume a slot.  A paused slot does not accumulate time.
    pub fn set_enabled(&mut self, slot: usize, enabled: bool) {
        if let Some(Some(entry)) = self.slots.get_mut(slot) {
            entry.enabled = enabled;
        }
    }

    /// Advance simulated time by `elapsed_ms` and fire every slot that
    /// came due, in slot order.
    ///
    /// A slot fires at most once per call.  Its phase is kept: the time
    /// past the due point carries over to the next period.
    pub fn tick(&mut self, elapsed_ms: u32, delegate: &mut dyn TaskDelegate) {
        self.now_ms += u64::from(elapsed_ms);

        for entry in self.slots.iter_mut().flatten() {
            if !entry.enabled {
                continue;
            }
            entry.elapsed_ms = entry.elapsed_ms.saturating_add(elapsed_ms);
            if entry.elapsed_ms >= entry.period_ms {
                debug!("Scheduler: '{}' due at {} ms", entry.label, self.now_ms);
                delegate.on_task_due(entry.id);
                entry.elapsed_ms %= entry.period_ms;
            }
        }
    }

    /// Simulated milliseconds since construction.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of enabled slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().filter(|e| e.enabled).count()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Task set (delegate mapping ids to tasks)
// ═══════════════════════════════════════════════════════════════

/// Routes [`TaskDelegate::on_task_due`] to the task at that index.
pub struct TaskSet<'t> {
    tasks: heapless::Vec<&'t mut dyn PeriodicTask, MAX_TASKS>,
}

impl Default for TaskSet<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> TaskSet<'t> {
    pub fn new() -> Self {
        Self {
            tasks: heapless::Vec::new(),
        }
    }

    /// Add a task.  Its id is its insertion index.
    pub fn push(&mut self, task: &'t mut dyn PeriodicTask) -> Option<u8> {
        let id = self.tasks.len() as u8;
        self.tasks.push(task).ok()?;
        Some(id)
    }

    /// A scheduler with one slot per task, ids matching.
    pub fn scheduler(&self) -> TaskScheduler {
        let mut sched = TaskScheduler::new();
        for (id, task) in self.tasks.iter().enumerate() {
            sched.add_task(id as u8, &**task);
        }
        sched
    }
}

impl TaskDelegate for TaskSet<'_> {
    fn on_task_due(&mut self, id: u8) {
        if let Some(task) = self.tasks.get_mut(usize::from(id)) {
            task.run_once();
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Async periodic runner
// ═══════════════════════════════════════════════════════════════

/// Run `task` forever (or `max_runs` times): one unit of work, then wait
/// one period.
///
/// The wait is the only suspension point, so tasks on the same executor
/// interleave only between runs.
pub async fn run_periodic<T, D>(task: &mut T, delay: &mut D, max_runs: Option<u32>)
where
    T: PeriodicTask + ?Sized,
    D: AsyncDelay,
{
    info!("task '{}' running every {} ms", task.name(), task.period_ms());
    let mut runs: u32 = 0;
    loop {
        task.run_once();
        runs = runs.saturating_add(1);
        if max_runs.is_some_and(|m| runs >= m) {
            return;
        }
        delay.delay_ms(task.period_ms()).await;
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
