//! Virtual clock scheduler and in-memory store
//!
//! Deterministic stand-ins for setTimeout and LocalStorage. Time only moves
//! when the owner calls `run_until`/`run_for`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use super::{KeyValueStore, Scheduler, Task, TaskHandle};
use crate::error::StorageError;

#[derive(Debug, Default)]
struct Clock {
    now_ms: u64,
    next_handle: u64,
    /// Ordered by (due time, handle) so equal deadlines fire in schedule order
    queue: BTreeMap<(u64, u64), Task>,
    due_by_handle: HashMap<u64, u64>,
}

/// Scheduler driven by a virtual clock.
///
/// Clones share the same clock, so a caller can hand one clone to a
/// controller and keep another to advance time.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Number of tasks still waiting to fire
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Count pending tasks matching a predicate
    pub fn pending_matching(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.clock.borrow().queue.values().filter(|t| pred(t)).count()
    }

    /// Fire every task due at or before `until`, in deadline order.
    ///
    /// Tasks scheduled by `fire` are picked up in the same run if they fall
    /// due before `until`. The clock ends at `until`.
    pub fn run_until(&self, until: u64, mut fire: impl FnMut(Task)) {
        loop {
            // Keep the borrow short: `fire` usually schedules or cancels.
            let next = {
                let mut clock = self.clock.borrow_mut();
                let key = match clock.queue.keys().next() {
                    Some(&key) if key.0 <= until => key,
                    _ => break,
                };
                let task = clock.queue.remove(&key);
                clock.due_by_handle.remove(&key.1);
                clock.now_ms = key.0;
                task
            };
            if let Some(task) = next {
                fire(task);
            }
        }
        let mut clock = self.clock.borrow_mut();
        clock.now_ms = clock.now_ms.max(until);
    }

    /// Advance the clock by `ms`, firing what falls due
    pub fn run_for(&self, ms: u64, fire: impl FnMut(Task)) {
        let until = self.now() + ms;
        self.run_until(until, fire);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32, task: Task) -> TaskHandle {
        let mut clock = self.clock.borrow_mut();
        let handle = clock.next_handle;
        clock.next_handle += 1;
        let due = clock.now_ms + u64::from(delay_ms);
        clock.queue.insert((due, handle), task);
        clock.due_by_handle.insert(handle, due);
        TaskHandle(handle)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        let mut clock = self.clock.borrow_mut();
        if let Some(due) = clock.due_by_handle.remove(&handle.0) {
            clock.queue.remove(&(due, handle.0));
        }
    }
}

/// In-memory key-value store.
///
/// `failing()` builds a store whose writes are refused, standing in for
/// disabled or full browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_with: Option<StorageError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(err: StorageError) -> Self {
        Self {
            entries: HashMap::new(),
            fail_with: Some(err),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
