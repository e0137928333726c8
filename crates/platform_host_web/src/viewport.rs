//! Browser viewport and root-container measurement.

use platform_host::{ViewportSize, ViewportSource};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// CSS selector of the desktop root container used for drag bounds.
pub const DEFAULT_ROOT_SELECTOR: &str = ".os-root";

#[derive(Debug, Clone)]
/// [`ViewportSource`] reading `window.innerWidth/innerHeight` and the root container's client size.
pub struct WebViewport {
    root_selector: String,
}

impl Default for WebViewport {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_SELECTOR)
    }
}

impl WebViewport {
    /// Creates a source that measures the element matching `root_selector` as the root container.
    pub fn new(root_selector: impl Into<String>) -> Self {
        Self {
            root_selector: root_selector.into(),
        }
    }

    /// Returns the configured root container selector.
    pub fn root_selector(&self) -> &str {
        &self.root_selector
    }
}

impl ViewportSource for WebViewport {
    fn viewport(&self) -> ViewportSize {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let fallback = ViewportSize::default();
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .unwrap_or(fallback.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .unwrap_or(fallback.height);
                return ViewportSize::new(width, height);
            }
        }

        ViewportSize::default()
    }

    fn root_container(&self) -> Option<ViewportSize> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()?.document()?;
            let element = document
                .query_selector(&self.root_selector)
                .ok()
                .flatten()?
                .dyn_into::<web_sys::HtmlElement>()
                .ok()?;
            Some(ViewportSize::new(
                f64::from(element.client_width()),
                f64::from(element.client_height()),
            ))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}
