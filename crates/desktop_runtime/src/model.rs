use std::collections::BTreeMap;

use platform_host::{ViewportSize, MOBILE_BREAKPOINT_PX};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Z-index baseline given to closed windows; every open window sits above it.
pub const INITIAL_Z_INDEX: u32 = 1000;
pub const DEFAULT_WINDOW_TOP: f64 = 100.0;
pub const DEFAULT_WINDOW_LEFT: f64 = 200.0;
pub const DEFAULT_WINDOW_WIDTH: f64 = 600.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 400.0;
pub const CASCADE_OFFSET: f64 = 24.0;
pub const WINDOW_MARGIN: f64 = 12.0;
/// Height of the navbar chrome that windows may not be dragged under.
pub const CHROME_HEIGHT: f64 = 50.0;
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowKey(pub String);

impl WindowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WindowKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for WindowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for WindowKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Tunable layout constants shared by the reducer, drag layer, and viewport sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub margin: f64,
    pub cascade_offset: f64,
    pub default_top: f64,
    pub default_left: f64,
    pub fallback_size: WindowSize,
    pub mobile_breakpoint: f64,
    pub chrome_height: f64,
    pub resize_debounce_ms: u64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            margin: WINDOW_MARGIN,
            cascade_offset: CASCADE_OFFSET,
            default_top: DEFAULT_WINDOW_TOP,
            default_left: DEFAULT_WINDOW_LEFT,
            fallback_size: WindowSize::default(),
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            chrome_height: CHROME_HEIGHT,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub key: WindowKey,
    pub title: String,
    pub is_open: bool,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub default_width: f64,
    pub default_height: f64,
    pub default_top: Option<f64>,
    pub default_left: Option<f64>,
    pub cascading: bool,
    pub z_index: u32,
    pub data: Option<Value>,
    /// Number of cascaded opens since the last layout reset; `None` until first use.
    pub cascade_index: Option<u32>,
    pub prevent_transform_reset: bool,
}

impl WindowRecord {
    pub fn position(&self) -> WindowPosition {
        WindowPosition {
            top: self.top,
            left: self.left,
        }
    }

    pub fn size(&self) -> WindowSize {
        WindowSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn default_size(&self) -> WindowSize {
        WindowSize {
            width: self.default_width,
            height: self.default_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowManagerState {
    pub windows: BTreeMap<WindowKey, WindowRecord>,
    pub next_z_index: u32,
    pub is_mobile: bool,
    pub viewport: ViewportSize,
    pub metrics: LayoutMetrics,
    /// Bumped whenever a layout reset repositions open windows; renderers drop stale transforms.
    pub layout_epoch: u64,
}

impl Default for WindowManagerState {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            next_z_index: INITIAL_Z_INDEX + 1,
            is_mobile: false,
            viewport: ViewportSize::default(),
            metrics: LayoutMetrics::default(),
            layout_epoch: 0,
        }
    }
}

impl WindowManagerState {
    pub fn window(&self, key: &str) -> Option<&WindowRecord> {
        self.windows.get(key)
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values().filter(|w| w.is_open)
    }

    /// Open window with the highest z-index.
    pub fn frontmost_window(&self) -> Option<&WindowRecord> {
        self.open_windows().max_by_key(|w| w.z_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Transient translate applied by the renderer while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualTransform {
    pub x: f64,
    pub y: f64,
}

impl VisualTransform {
    pub fn is_identity(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
