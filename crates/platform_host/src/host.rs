//! Host-bundle models for browser and headless runtime composition.

use std::rc::Rc;

use crate::{
    FixedViewport, ManualTimerService, NoopTimerService, TimerService, ViewportSize,
    ViewportSource,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Composition without a DOM (native builds, tests, prerendering).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the window manager runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `desktop_runtime`, which keeps the window manager decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Cancelable timer service used for debouncing and deferred layout side effects.
    pub timers: Rc<dyn TimerService>,
    /// Live viewport and root-container measurements.
    pub viewport: Rc<dyn ViewportSource>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Headless bundle whose timers never fire and whose viewport is fixed at `size`.
    pub fn headless(size: ViewportSize) -> Self {
        Self {
            timers: Rc::new(NoopTimerService),
            viewport: Rc::new(FixedViewport::new(size)),
            host_strategy: HostStrategy::Headless,
        }
    }

    /// Headless bundle driven by caller-owned test doubles.
    pub fn manual(timers: ManualTimerService, viewport: FixedViewport) -> Self {
        Self {
            timers: Rc::new(timers),
            viewport: Rc::new(viewport),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("viewport", &self.viewport.viewport())
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn manual_bundle_shares_doubles_with_caller() {
        let timers = ManualTimerService::new();
        let viewport = FixedViewport::new(ViewportSize::new(1200.0, 800.0));
        let host = HostServices::manual(timers.clone(), viewport.clone());

        host.timers.schedule(Duration::from_millis(5), Box::new(|| {}));
        assert_eq!(timers.pending_count(), 1);

        viewport.set(ViewportSize::new(500.0, 900.0));
        assert_eq!(host.viewport.viewport().width, 500.0);
        assert_eq!(host.host_strategy.as_str(), "headless");
    }
}
