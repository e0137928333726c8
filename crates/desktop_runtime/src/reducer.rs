//! Reducer actions, side-effect intents, and transition logic for the window store.

use std::collections::BTreeMap;

use platform_host::ViewportSize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    config::WindowManagerConfig,
    model::{WindowKey, WindowManagerState, WindowRecord, INITIAL_Z_INDEX},
    window_manager::{
        cascade_position, centered_position, clamp_position, default_position, mobile_fullscreen,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_windows`] to mutate [`WindowManagerState`].
pub enum WindowAction {
    /// Open (or re-open) a window and bring it to the front.
    OpenWindow {
        /// Window to open.
        key: WindowKey,
        /// Content payload; `None` keeps the window's current payload.
        payload: Option<Value>,
    },
    /// Close a window and drop its payload.
    CloseWindow {
        /// Window to close.
        key: WindowKey,
    },
    /// Raise an open window above every other window.
    FocusWindow {
        /// Window to focus.
        key: WindowKey,
    },
    /// Commit a drag delta onto a window's position.
    MoveWindow {
        /// Window to move.
        key: WindowKey,
        /// Horizontal delta in px.
        dx: f64,
        /// Vertical delta in px.
        dy: f64,
    },
    /// Recompute geometry of every open window after a layout transition.
    ResetWindows,
    /// Record a new viewport and refresh the mobile classification.
    SyncViewport {
        /// Current viewport size.
        viewport: ViewportSize,
    },
    /// Close the window if open, otherwise open it (dock and navbar behavior).
    ToggleWindow {
        /// Window to toggle.
        key: WindowKey,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_windows`] for the presentation layer to execute.
pub enum RuntimeEffect {
    /// Drop any in-flight visual transform on these windows; the store position is authoritative.
    ClearWindowTransforms(Vec<WindowKey>),
    /// The viewport crossed the mobile breakpoint.
    LayoutModeChanged {
        /// New classification.
        is_mobile: bool,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
/// Reducer errors for actions that must leave state untouched.
pub enum ReducerError {
    /// The key is not part of the configured catalog.
    #[error("unknown window `{0}`")]
    UnknownWindow(WindowKey),
    /// The action requires an open window.
    #[error("window `{0}` is not open")]
    WindowClosed(WindowKey),
    /// A move delta was NaN or infinite.
    #[error("move delta must be finite")]
    NonFiniteDelta,
    /// Windows are pinned fullscreen while the mobile layout is active.
    #[error("windows cannot be moved in the mobile layout")]
    MobileLayout,
    /// The viewport reported a non-finite or negative size.
    #[error("viewport size must be finite and non-negative")]
    InvalidViewport,
}

/// Builds the initial store state: one closed record per configured window.
pub fn build_initial_state(
    config: &WindowManagerConfig,
    viewport: ViewportSize,
) -> WindowManagerState {
    let metrics = config.metrics;
    let windows = config
        .windows
        .iter()
        .map(|cfg| {
            let key = WindowKey::new(cfg.id.clone());
            let record = WindowRecord {
                key: key.clone(),
                title: if cfg.title.is_empty() {
                    cfg.id.clone()
                } else {
                    cfg.title.clone()
                },
                is_open: false,
                top: cfg.default_top.unwrap_or(metrics.default_top),
                left: cfg.default_left.unwrap_or(metrics.default_left),
                width: cfg.width,
                height: cfg.height,
                default_width: cfg.width,
                default_height: cfg.height,
                default_top: cfg.default_top,
                default_left: cfg.default_left,
                cascading: cfg.cascading,
                z_index: INITIAL_Z_INDEX,
                data: None,
                cascade_index: None,
                prevent_transform_reset: cfg.prevent_transform_reset,
            };
            (key, record)
        })
        .collect::<BTreeMap<_, _>>();

    WindowManagerState {
        windows,
        next_z_index: INITIAL_Z_INDEX + 1,
        is_mobile: viewport.is_mobile(metrics.mobile_breakpoint),
        viewport,
        metrics,
        layout_epoch: 0,
    }
}

/// Applies a [`WindowAction`] to the window store state and collects resulting side effects.
///
/// Every transition validates its inputs before mutating, so an `Err` always leaves `state`
/// exactly as it was.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action targets an unknown or closed window, carries a
/// non-finite delta or viewport, or tries to move a window in the mobile layout.
pub fn reduce_windows(
    state: &mut WindowManagerState,
    action: WindowAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        WindowAction::OpenWindow { key, payload } => open_window(state, &key, payload)?,
        WindowAction::CloseWindow { key } => {
            let window = find_window_mut(&mut state.windows, &key)?;
            window.is_open = false;
            window.z_index = INITIAL_Z_INDEX;
            window.data = None;
        }
        WindowAction::FocusWindow { key } => {
            let z_index = state.next_z_index;
            let window = find_window_mut(&mut state.windows, &key)?;
            if !window.is_open {
                return Err(ReducerError::WindowClosed(key));
            }
            window.z_index = z_index;
            state.next_z_index = z_index.saturating_add(1);
        }
        WindowAction::MoveWindow { key, dx, dy } => {
            let is_mobile = state.is_mobile;
            let viewport = state.viewport;
            let margin = state.metrics.margin;
            let window = find_window_mut(&mut state.windows, &key)?;
            if is_mobile {
                return Err(ReducerError::MobileLayout);
            }
            if !dx.is_finite() || !dy.is_finite() {
                return Err(ReducerError::NonFiniteDelta);
            }
            let mut position = window.position();
            position.left += dx;
            position.top += dy;
            let position = clamp_position(position, window.size(), viewport, margin);
            window.top = position.top;
            window.left = position.left;
        }
        WindowAction::ResetWindows => reset_windows(state, &mut effects),
        WindowAction::SyncViewport { viewport } => {
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(viewport.width) || !valid(viewport.height) {
                return Err(ReducerError::InvalidViewport);
            }
            let was_mobile = state.is_mobile;
            state.viewport = viewport;
            state.is_mobile = viewport.is_mobile(state.metrics.mobile_breakpoint);
            if state.is_mobile != was_mobile {
                effects.push(RuntimeEffect::LayoutModeChanged {
                    is_mobile: state.is_mobile,
                });
            }
        }
        WindowAction::ToggleWindow { key } => {
            let is_open = state
                .windows
                .get(key.as_str())
                .map(|w| w.is_open)
                .ok_or_else(|| ReducerError::UnknownWindow(key.clone()))?;
            let action = if is_open {
                WindowAction::CloseWindow { key }
            } else {
                WindowAction::OpenWindow { key, payload: None }
            };
            effects.extend(reduce_windows(state, action)?);
        }
    }

    Ok(effects)
}

fn open_window(
    state: &mut WindowManagerState,
    key: &WindowKey,
    payload: Option<Value>,
) -> Result<(), ReducerError> {
    let z_index = state.next_z_index;
    let is_mobile = state.is_mobile;
    let viewport = state.viewport;
    let metrics = state.metrics;
    let window = find_window_mut(&mut state.windows, key)?;

    window.is_open = true;
    window.z_index = z_index;
    if let Some(payload) = payload.filter(|p| !p.is_null()) {
        window.data = Some(payload);
    }

    if is_mobile {
        apply_mobile_geometry(window, viewport);
    } else {
        let size = window.default_size();
        window.width = size.width;
        window.height = size.height;
        let position = if window.cascading {
            let index = window.cascade_index.unwrap_or(0);
            window.cascade_index = Some(index.saturating_add(1));
            cascade_position(size, viewport, index, &metrics)
        } else {
            clamp_position(
                centered_position(size, viewport, metrics.margin),
                size,
                viewport,
                metrics.margin,
            )
        };
        window.top = position.top;
        window.left = position.left;
    }

    state.next_z_index = z_index.saturating_add(1);
    Ok(())
}

fn reset_windows(state: &mut WindowManagerState, effects: &mut Vec<RuntimeEffect>) {
    let is_mobile = state.is_mobile;
    let viewport = state.viewport;
    let metrics = state.metrics;
    let mut cleared = Vec::new();
    let mut touched = false;

    for window in state.windows.values_mut() {
        window.cascade_index = None;
    }
    for window in state.windows.values_mut().filter(|w| w.is_open) {
        touched = true;
        if is_mobile {
            apply_mobile_geometry(window, viewport);
        } else {
            let size = window.default_size();
            let position = clamp_position(
                default_position(window, &metrics),
                size,
                viewport,
                metrics.margin,
            );
            window.width = size.width;
            window.height = size.height;
            window.top = position.top;
            window.left = position.left;
        }
        if !window.prevent_transform_reset {
            cleared.push(window.key.clone());
        }
    }

    if !touched {
        return;
    }
    state.layout_epoch = state.layout_epoch.saturating_add(1);
    if !cleared.is_empty() {
        effects.push(RuntimeEffect::ClearWindowTransforms(cleared));
    }
}

fn apply_mobile_geometry(window: &mut WindowRecord, viewport: ViewportSize) {
    let (position, size) = mobile_fullscreen(viewport);
    window.top = position.top;
    window.left = position.left;
    window.width = size.width;
    window.height = size.height;
}

fn find_window_mut<'a>(
    windows: &'a mut BTreeMap<WindowKey, WindowRecord>,
    key: &WindowKey,
) -> Result<&'a mut WindowRecord, ReducerError> {
    windows
        .get_mut(key.as_str())
        .ok_or_else(|| ReducerError::UnknownWindow(key.clone()))
}
