//! Host-side runtime helpers for executing reducer effects and querying the browser environment.
//!
//! The window manager never touches timers or viewport APIs directly; it goes through the
//! [`HostServices`] bundle held here, which the entry layer can swap for headless doubles.

use std::{rc::Rc, time::Duration};

use leptos::logging;
use platform_host::{HostServices, TimerService, ViewportSize, ViewportSource};
use platform_host_web::build_host_services;

use crate::{reducer::RuntimeEffect, runtime_context::WindowManagerContext};

#[derive(Clone)]
/// Host service bundle for window manager side effects.
pub struct WindowHostContext {
    services: HostServices,
}

impl Default for WindowHostContext {
    fn default() -> Self {
        Self::new(build_host_services())
    }
}

impl WindowHostContext {
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured cancelable timer service.
    pub fn timers(&self) -> Rc<dyn TimerService> {
        self.services.timers.clone()
    }

    /// Returns the configured viewport source.
    pub fn viewport_source(&self) -> Rc<dyn ViewportSource> {
        self.services.viewport.clone()
    }

    pub fn viewport(&self) -> ViewportSize {
        self.services.viewport.viewport()
    }

    /// Size of the desktop root container, falling back to the viewport before it mounts.
    pub fn drag_root(&self) -> ViewportSize {
        self.services
            .viewport
            .root_container()
            .unwrap_or_else(|| self.viewport())
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: WindowManagerContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::ClearWindowTransforms(windows) => {
                runtime.schedule_transform_reset(windows)
            }
            RuntimeEffect::LayoutModeChanged { is_mobile } => {
                let mode = if is_mobile { "mobile" } else { "desktop" };
                logging::log!(
                    "window layout switched to {mode} ({})",
                    self.host_strategy_name()
                );
            }
        }
    }
}

/// Delay before transform resets reach the windows; zero defers past the current render.
pub(crate) const TRANSFORM_RESET_DELAY: Duration = Duration::ZERO;
