//! Cancelable timer contracts and deterministic adapters.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

/// Boxed one-shot callback executed when a scheduled timer fires.
pub type TimerCallback = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque handle identifying one scheduled timer.
pub struct TimerHandle(pub u64);

/// Host service for one-shot timers that can be cancelled before they fire.
///
/// Callers own the returned [`TimerHandle`] and are responsible for cancelling it on teardown.
/// Cancelling a handle that already fired (or was never issued) is a no-op.
pub trait TimerService {
    /// Schedules `callback` to run once after `delay`.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancels a pending timer.
    fn cancel(&self, handle: TimerHandle);
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer service that never fires, for hosts without an event loop.
pub struct NoopTimerService;

impl TimerService for NoopTimerService {
    fn schedule(&self, _delay: Duration, _callback: TimerCallback) -> TimerHandle {
        TimerHandle(0)
    }

    fn cancel(&self, _handle: TimerHandle) {}
}

#[derive(Default)]
struct ManualTimerInner {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), TimerCallback>,
}

#[derive(Clone, Default)]
/// Virtual-clock timer service; timers only fire when [`ManualTimerService::advance`] is called.
///
/// Timers due at the same instant fire in scheduling order. Callbacks may schedule or cancel
/// other timers while running.
pub struct ManualTimerService {
    inner: Rc<RefCell<ManualTimerInner>>,
}

impl std::fmt::Debug for ManualTimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ManualTimerService")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl ManualTimerService {
    /// Creates a service with its virtual clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Returns the number of timers that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Advances the virtual clock by `elapsed`, firing every timer that becomes due.
    ///
    /// Returns how many callbacks ran.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let target = self
            .inner
            .borrow()
            .now_ms
            .saturating_add(elapsed.as_millis() as u64);
        let mut fired = 0;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due_key = inner
                    .pending
                    .keys()
                    .next()
                    .copied()
                    .filter(|(due, _)| *due <= target);
                match due_key {
                    Some(key) => {
                        inner.now_ms = inner.now_ms.max(key.0);
                        inner.pending.remove(&key)
                    }
                    None => None,
                }
            };
            // The borrow is released before running so callbacks can reschedule.
            let Some(callback) = next else {
                break;
            };
            callback();
            fired += 1;
        }
        self.inner.borrow_mut().now_ms = target;
        fired
    }
}

impl TimerService for ManualTimerService {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id = inner.next_id.saturating_add(1);
        let id = inner.next_id;
        let due = inner.now_ms.saturating_add(delay.as_millis() as u64);
        inner.pending.insert((due, id), callback);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|(_, id), _| *id != handle.0);
    }
}
