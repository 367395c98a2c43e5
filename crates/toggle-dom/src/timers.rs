//! Timer queue
//!
//! setTimeout/clearTimeout over a virtual millisecond clock. Time only
//! moves when the owner advances it, so timer-driven behavior is
//! deterministic.

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Deferred task
pub type TimerTask = Box<dyn FnOnce()>;

struct ScheduledTask {
    id: TimerId,
    due_at: u64,
    order: u64,
    task: TimerTask,
}

/// Pending timeouts, ordered by (due time, scheduling order)
#[derive(Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    next_order: u64,
    tasks: Vec<ScheduledTask>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, delay_ms: u64, task: TimerTask) -> TimerId {
        self.next_id += 1;
        self.next_order += 1;
        let id = TimerId(self.next_id);
        self.tasks.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms),
            order: self.next_order,
            task,
        });
        id
    }

    /// Clear a timer, returns false if it already ran or never existed
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Due time of the earliest pending timer
    pub fn next_due_at(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due_at).min()
    }

    /// Remove the earliest task due at or before `limit`, moving the clock
    /// to its due time. The caller runs the task.
    pub fn pop_due(&mut self, limit: u64) -> Option<TimerTask> {
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= limit)
            .min_by_key(|(_, t)| (t.due_at, t.order))
            .map(|(idx, _)| idx)?;

        let scheduled = self.tasks.remove(idx);
        self.now_ms = self.now_ms.max(scheduled.due_at);
        tracing::trace!(id = scheduled.id.0, due_at = scheduled.due_at, "timer due");
        Some(scheduled.task)
    }

    /// Move the clock forward without running anything; never moves back
    pub fn advance_to(&mut self, target_ms: u64) {
        self.now_ms = self.now_ms.max(target_ms);
    }
}
