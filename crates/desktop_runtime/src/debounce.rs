//! Single-slot cancelable timer built on [`TimerService`].

use std::{cell::Cell, rc::Rc, time::Duration};

use platform_host::{TimerHandle, TimerService};

/// Holds at most one pending timer. Scheduling replaces (and cancels) the previous one and
/// dropping the debouncer cancels whatever is still pending.
pub struct Debouncer {
    timers: Rc<dyn TimerService>,
    delay: Duration,
    pending: Rc<Cell<Option<TimerHandle>>>,
}

impl Debouncer {
    pub fn new(timers: Rc<dyn TimerService>, delay: Duration) -> Self {
        Self {
            timers,
            delay,
            pending: Rc::new(Cell::new(None)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Cancels any pending callback and schedules `callback` after the configured delay.
    pub fn trigger(&self, callback: impl FnOnce() + 'static) {
        self.cancel();
        let slot = Rc::downgrade(&self.pending);
        let handle = self.timers.schedule(
            self.delay,
            Box::new(move || {
                if let Some(slot) = slot.upgrade() {
                    slot.set(None);
                }
                callback();
            }),
        );
        self.pending.set(Some(handle));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use platform_host::ManualTimerService;

    use super::*;

    #[test]
    fn burst_collapses_into_last_callback() {
        let timers = ManualTimerService::new();
        let debouncer = Debouncer::new(Rc::new(timers.clone()), Duration::from_millis(100));
        let calls = Rc::new(RefCell::new(Vec::new()));

        for n in 0..5 {
            let calls = calls.clone();
            debouncer.trigger(move || calls.borrow_mut().push(n));
            timers.advance(Duration::from_millis(30));
        }
        assert!(calls.borrow().is_empty());
        assert_eq!(timers.pending_count(), 1);

        timers.advance(Duration::from_millis(100));
        assert_eq!(*calls.borrow(), vec![4]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn drop_cancels_pending_timer() {
        let timers = ManualTimerService::new();
        let fired = Rc::new(Cell::new(false));
        {
            let debouncer = Debouncer::new(Rc::new(timers.clone()), Duration::ZERO);
            let fired = fired.clone();
            debouncer.trigger(move || fired.set(true));
        }
        assert_eq!(timers.pending_count(), 0);
        timers.advance(Duration::from_millis(10));
        assert!(!fired.get());
    }
}
