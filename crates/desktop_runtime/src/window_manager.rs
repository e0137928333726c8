//! Shared window-manager geometry helpers used by the window store reducer and drag layer.
//!
//! Every function here is pure and deterministic: the same viewport, window size, and cascade
//! count always produce the same layout.

use platform_host::ViewportSize;

use crate::model::{LayoutMetrics, VisualTransform, WindowPosition, WindowRecord, WindowSize};

/// Clamps `value` into `[min, max]`; when the range is empty the lower bound wins.
pub fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Clamps a position so a window of `size` stays inside the viewport minus `margin`.
pub fn clamp_position(
    position: WindowPosition,
    size: WindowSize,
    viewport: ViewportSize,
    margin: f64,
) -> WindowPosition {
    WindowPosition {
        top: clamp_axis(position.top, margin, viewport.height - size.height - margin),
        left: clamp_axis(position.left, margin, viewport.width - size.width - margin),
    }
}

/// Centers a window of `size` on the viewport, never closer than `margin` to the top-left edge.
pub fn centered_position(size: WindowSize, viewport: ViewportSize, margin: f64) -> WindowPosition {
    WindowPosition {
        top: ((viewport.height - size.height) / 2.0).max(margin),
        left: ((viewport.width - size.width) / 2.0).max(margin),
    }
}

/// Centered base position shifted diagonally by `offset * index`, then clamped on-screen.
pub fn cascade_position(
    size: WindowSize,
    viewport: ViewportSize,
    index: u32,
    metrics: &LayoutMetrics,
) -> WindowPosition {
    let base = centered_position(size, viewport, metrics.margin);
    let shift = metrics.cascade_offset * f64::from(index);
    clamp_position(
        WindowPosition {
            top: base.top + shift,
            left: base.left + shift,
        },
        size,
        viewport,
        metrics.margin,
    )
}

/// Geometry of a mobile-mode window: pinned at the origin and filling the viewport.
pub fn mobile_fullscreen(viewport: ViewportSize) -> (WindowPosition, WindowSize) {
    (
        WindowPosition::default(),
        WindowSize {
            width: viewport.width,
            height: viewport.height,
        },
    )
}

/// Designer reset position for a window, falling back to the global defaults.
pub fn default_position(window: &WindowRecord, metrics: &LayoutMetrics) -> WindowPosition {
    WindowPosition {
        top: window.default_top.unwrap_or(metrics.default_top),
        left: window.default_left.unwrap_or(metrics.default_left),
    }
}

/// Area a window may be dragged within: the root container below the navbar chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl DragBounds {
    pub fn from_root(root: ViewportSize, chrome_height: f64) -> Self {
        Self {
            top: chrome_height,
            left: 0.0,
            width: root.width.max(0.0),
            height: (root.height - chrome_height).max(0.0),
        }
    }

    /// Clamps a transient translate so the committed rect plus the translate stays in bounds.
    ///
    /// A window already outside the bounds may stay where it is: the identity translate is
    /// always allowed, and further movement is limited to moving back inside.
    pub fn clamp_transform(
        &self,
        origin: WindowPosition,
        size: WindowSize,
        transform: VisualTransform,
    ) -> VisualTransform {
        let min_x = (self.left - origin.left).min(0.0);
        let max_x = (self.left + self.width - size.width - origin.left).max(0.0);
        let min_y = (self.top - origin.top).min(0.0);
        let max_y = (self.top + self.height - size.height - origin.top).max(0.0);
        VisualTransform {
            x: clamp_axis(transform.x, min_x, max_x),
            y: clamp_axis(transform.y, min_y, max_y),
        }
    }
}
