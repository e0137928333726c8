use std::rc::Rc;

use platform_host::{HostServices, HostStrategy, TimerService, ViewportSource};

use crate::{WebTimerService, WebViewport};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(target_arch = "wasm32")]
    {
        HostStrategy::Browser
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostStrategy::Headless
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Builds the timer service for the selected host strategy.
pub fn timer_service() -> Rc<dyn TimerService> {
    Rc::new(WebTimerService::new())
}

/// Builds the viewport source for the selected host strategy.
pub fn viewport_source() -> Rc<dyn ViewportSource> {
    Rc::new(WebViewport::default())
}

/// Builds the host service bundle for the selected host strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        timers: timer_service(),
        viewport: viewport_source(),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_select_headless_strategy() {
        let host = build_host_services();
        assert_eq!(host.host_strategy, HostStrategy::Headless);
        assert_eq!(host_strategy_name(), "headless");
    }
}
