//! Viewport sync controller: turns raw resize/orientation signals into store reconciliation.
//!
//! A reconciliation always refreshes the mobile classification first and resets layout second,
//! so the reset observes the updated flag. Resize bursts are coalesced through a [`Debouncer`];
//! a newer signal replaces the pending one and dropping the controller cancels it.

use std::{rc::Rc, time::Duration};

use platform_host::{TimerService, ViewportSize, ViewportSource};

use crate::debounce::Debouncer;

/// Store-side operations the controller drives, in the order it drives them.
pub trait LayoutTarget {
    /// Records the viewport and refreshes the mobile/desktop classification.
    fn refresh_viewport(&self, viewport: ViewportSize);
    /// Recomputes geometry for every open window.
    fn reset_layout(&self);
}

pub struct ViewportSyncController {
    target: Rc<dyn LayoutTarget>,
    viewport: Rc<dyn ViewportSource>,
    debouncer: Debouncer,
}

impl ViewportSyncController {
    /// Creates the controller and performs one synchronous reconciliation, covering pages that
    /// load already resized or rotated.
    pub fn mount(
        target: Rc<dyn LayoutTarget>,
        viewport: Rc<dyn ViewportSource>,
        timers: Rc<dyn TimerService>,
        debounce: Duration,
    ) -> Self {
        let controller = Self {
            target,
            viewport,
            debouncer: Debouncer::new(timers, debounce),
        };
        controller.reconcile_now();
        controller
    }

    pub fn on_resize(&self) {
        let target = self.target.clone();
        let viewport = self.viewport.clone();
        self.debouncer
            .trigger(move || reconcile(target.as_ref(), viewport.as_ref()));
    }

    /// Orientation changes share the resize debounce; browsers usually fire both.
    pub fn on_orientation_change(&self) {
        self.on_resize();
    }

    pub fn reconcile_now(&self) {
        self.debouncer.cancel();
        reconcile(self.target.as_ref(), self.viewport.as_ref());
    }

    pub fn has_pending_reconcile(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Cancels a pending reconciliation without giving up the controller.
    pub fn cancel_pending(&self) {
        self.debouncer.cancel();
    }

    /// Cancels any pending reconciliation. Dropping the controller has the same effect.
    pub fn teardown(self) {
        self.cancel_pending();
    }
}

fn reconcile(target: &dyn LayoutTarget, viewport: &dyn ViewportSource) {
    target.refresh_viewport(viewport.viewport());
    target.reset_layout();
}
