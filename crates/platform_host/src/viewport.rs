//! Viewport geometry models and the host contract for reading them.

use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Width (in CSS px) at or below which the desktop switches to its mobile layout.
pub const MOBILE_BREAKPOINT_PX: f64 = 640.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Size of a rectangular surface in CSS pixels.
pub struct ViewportSize {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl ViewportSize {
    /// Builds a size from width and height.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns whether this viewport classifies as mobile for `breakpoint`.
    pub fn is_mobile(self, breakpoint: f64) -> bool {
        self.width <= breakpoint
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Host service exposing the live viewport and the desktop root container size.
pub trait ViewportSource {
    /// Returns the current window inner size.
    fn viewport(&self) -> ViewportSize;

    /// Returns the size of the desktop root container, when it is mounted.
    ///
    /// Drag bounds are derived from this surface rather than the raw viewport.
    fn root_container(&self) -> Option<ViewportSize>;
}

#[derive(Debug, Clone, Default)]
/// Settable viewport source for tests and headless composition.
pub struct FixedViewport {
    size: Rc<Cell<ViewportSize>>,
}

impl FixedViewport {
    /// Creates a source reporting `size` for both the viewport and the root container.
    pub fn new(size: ViewportSize) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
        }
    }

    /// Replaces the reported size; clones observe the change.
    pub fn set(&self, size: ViewportSize) {
        self.size.set(size);
    }
}

impl ViewportSource for FixedViewport {
    fn viewport(&self) -> ViewportSize {
        self.size.get()
    }

    fn root_container(&self) -> Option<ViewportSize> {
        Some(self.size.get())
    }
}
