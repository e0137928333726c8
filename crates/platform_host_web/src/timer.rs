//! `setTimeout`-backed [`TimerService`] for the browser.

use std::time::Duration;

use platform_host::{TimerCallback, TimerHandle, TimerService};

#[derive(Clone, Default)]
/// Browser timer service backed by `window.setTimeout` / `window.clearTimeout`.
///
/// Off-wasm builds have no event loop, so scheduled callbacks are dropped without running.
pub struct WebTimerService {
    #[cfg(target_arch = "wasm32")]
    inner: std::rc::Rc<std::cell::RefCell<imp::Timers>>,
}

impl std::fmt::Debug for WebTimerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebTimerService").finish_non_exhaustive()
    }
}

impl WebTimerService {
    /// Creates an empty timer registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerService for WebTimerService {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        #[cfg(target_arch = "wasm32")]
        {
            imp::schedule(&self.inner, delay, callback)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay, callback);
            TimerHandle(0)
        }
    }

    fn cancel(&self, handle: TimerHandle) {
        #[cfg(target_arch = "wasm32")]
        imp::cancel(&self.inner, handle);

        #[cfg(not(target_arch = "wasm32"))]
        let _ = handle;
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

    use platform_host::{TimerCallback, TimerHandle};
    use wasm_bindgen::{closure::Closure, JsCast};

    struct Entry {
        id: u64,
        timeout_id: i32,
        _closure: Closure<dyn FnMut()>,
    }

    #[derive(Default)]
    pub(super) struct Timers {
        next_id: u64,
        active: HashMap<u64, Entry>,
        // Fired closures cannot be dropped while the JS engine is still inside them.
        fired: Vec<Entry>,
        executing: Option<u64>,
    }

    impl Timers {
        fn purge_fired(&mut self) {
            let executing = self.executing;
            self.fired.retain(|entry| Some(entry.id) == executing);
        }
    }

    pub(super) fn schedule(
        timers: &Rc<RefCell<Timers>>,
        delay: Duration,
        callback: TimerCallback,
    ) -> TimerHandle {
        let id = {
            let mut inner = timers.borrow_mut();
            inner.purge_fired();
            inner.next_id = inner.next_id.saturating_add(1);
            inner.next_id
        };

        let Some(window) = web_sys::window() else {
            return TimerHandle(id);
        };

        let weak = Rc::downgrade(timers);
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            let Some(timers) = weak.upgrade() else {
                return;
            };
            {
                let mut inner = timers.borrow_mut();
                if let Some(entry) = inner.active.remove(&id) {
                    inner.fired.push(entry);
                }
                inner.executing = Some(id);
            }
            if let Some(callback) = callback.take() {
                callback();
            }
            timers.borrow_mut().executing = None;
        }) as Box<dyn FnMut()>);

        let delay_ms = delay.as_millis().min(i32::MAX as u128) as i32;
        let Ok(timeout_id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms,
        ) else {
            return TimerHandle(id);
        };

        timers.borrow_mut().active.insert(
            id,
            Entry {
                id,
                timeout_id,
                _closure: closure,
            },
        );
        TimerHandle(id)
    }

    pub(super) fn cancel(timers: &Rc<RefCell<Timers>>, handle: TimerHandle) {
        let entry = {
            let mut inner = timers.borrow_mut();
            inner.purge_fired();
            inner.active.remove(&handle.0)
        };
        if let (Some(entry), Some(window)) = (entry, web_sys::window()) {
            window.clear_timeout_with_handle(entry.timeout_id);
        }
    }
}
