//! Timed tasks that can be cancelled individually or all at once.

/// Identifies a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: f32,
    payload: T,
}

/// Pending payloads ordered by due time. Ties keep scheduling order.
#[derive(Clone, Debug)]
pub struct TaskQueue<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `payload` to fire at time `due`.
    pub fn schedule(&mut self, due: f32, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let at = self.pending.partition_point(|t| t.due <= due);
        self.pending.insert(
            at,
            Scheduled {
                handle,
                due,
                payload,
            },
        );
        handle
    }

    /// Drop a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.pending.iter().position(|t| t.handle == handle) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop the earliest task due at or before `now`, with its due time.
    pub fn pop_due(&mut self, now: f32) -> Option<(f32, T)> {
        if self.pending.first().is_some_and(|t| t.due <= now) {
            let task = self.pending.remove(0);
            Some((task.due, task.payload))
        } else {
            None
        }
    }
}
