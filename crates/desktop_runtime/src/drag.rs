//! Drag/focus integration for one managed window.
//!
//! Pointer input moves a transient [`VisualTransform`] only. The store position changes once,
//! at drag end, through a [`WindowAction::MoveWindow`] carrying the transform as a delta; the
//! transform is then cleared so the store is the single source of truth again.
//!
//! Methods return the store actions to dispatch instead of mutating the store, which keeps the
//! ordering (focus before drag, move before release focus) explicit and testable.

use platform_host::ViewportSize;

use crate::{
    model::{
        LayoutMetrics, PointerPosition, VisualTransform, WindowKey, WindowManagerState,
        WindowPosition, WindowSize,
    },
    reducer::WindowAction,
    window_manager::DragBounds,
};

/// Where on the window a pointer event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRegion {
    /// The title-bar drag handle.
    Header,
    /// Window content, including controls inside it.
    Body,
    /// The window element itself rather than one of its children.
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    pointer_start: PointerPosition,
    origin: WindowPosition,
    size: WindowSize,
}

/// Deferred instruction to drop in-flight transforms after a layout reset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformReset {
    pub generation: u64,
    pub windows: Vec<WindowKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowDrag {
    key: WindowKey,
    bounds: DragBounds,
    chrome_height: f64,
    session: Option<DragSession>,
    transform: VisualTransform,
    seen_reset: u64,
}

impl WindowDrag {
    pub fn new(key: WindowKey, root: ViewportSize, metrics: &LayoutMetrics) -> Self {
        Self {
            key,
            bounds: DragBounds::from_root(root, metrics.chrome_height),
            chrome_height: metrics.chrome_height,
            session: None,
            transform: VisualTransform::default(),
            seen_reset: 0,
        }
    }

    pub fn key(&self) -> &WindowKey {
        &self.key
    }

    pub fn transform(&self) -> VisualTransform {
        self.transform
    }

    pub fn bounds(&self) -> DragBounds {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Recomputes drag bounds after the root container changed size.
    pub fn apply_bounds(&mut self, root: ViewportSize) {
        self.bounds = DragBounds::from_root(root, self.chrome_height);
        if let Some(session) = self.session {
            self.transform =
                self.bounds
                    .clamp_transform(session.origin, session.size, self.transform);
        }
    }

    /// Pointer pressed on the window. Always focuses; starts a drag only from the header on
    /// desktop layouts.
    pub fn pointer_down(
        &mut self,
        state: &WindowManagerState,
        region: PointerRegion,
        pointer: PointerPosition,
    ) -> Vec<WindowAction> {
        let Some(window) = state.window(self.key.as_str()) else {
            return Vec::new();
        };
        if !window.is_open {
            return Vec::new();
        }

        if region == PointerRegion::Header && !state.is_mobile {
            self.session = Some(DragSession {
                pointer_start: pointer,
                origin: window.position(),
                size: window.size(),
            });
            self.transform = VisualTransform::default();
        }

        vec![WindowAction::FocusWindow {
            key: self.key.clone(),
        }]
    }

    /// Updates the transient transform for an in-flight drag.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> VisualTransform {
        if let Some(session) = self.session {
            let raw = VisualTransform {
                x: pointer.x - session.pointer_start.x,
                y: pointer.y - session.pointer_start.y,
            };
            self.transform = self
                .bounds
                .clamp_transform(session.origin, session.size, raw);
        }
        self.transform
    }

    /// Pointer released. Commits an in-flight drag, and focuses when released on the frame.
    pub fn pointer_up(
        &mut self,
        region: PointerRegion,
        pointer: PointerPosition,
    ) -> Vec<WindowAction> {
        let mut actions = Vec::new();
        if let Some(session) = self.session {
            let moved = pointer != session.pointer_start;
            let delta = if moved {
                self.pointer_move(pointer)
            } else {
                VisualTransform::default()
            };
            self.session = None;
            self.transform = VisualTransform::default();
            if !delta.is_identity() {
                actions.push(WindowAction::MoveWindow {
                    key: self.key.clone(),
                    dx: delta.x,
                    dy: delta.y,
                });
            }
        }
        if region == PointerRegion::Frame {
            actions.push(WindowAction::FocusWindow {
                key: self.key.clone(),
            });
        }
        actions
    }

    /// Aborts an in-flight drag without committing it.
    pub fn pointer_cancel(&mut self) {
        self.session = None;
        self.transform = VisualTransform::default();
    }

    /// Drops the transform when a not-yet-seen reset names this window. Returns whether it did.
    pub fn apply_transform_reset(&mut self, reset: &TransformReset) -> bool {
        if reset.generation <= self.seen_reset {
            return false;
        }
        self.seen_reset = reset.generation;
        if !reset.windows.contains(&self.key) {
            return false;
        }
        self.pointer_cancel();
        true
    }

    /// Cancels dragging when the store switched to the mobile layout mid-gesture.
    pub fn sync_layout_mode(&mut self, state: &WindowManagerState) {
        if state.is_mobile && self.session.is_some() {
            self.pointer_cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::{WindowConfig, WindowManagerConfig},
        reducer::{build_initial_state, reduce_windows},
    };

    const DESKTOP: ViewportSize = ViewportSize::new(1200.0, 800.0);

    fn open_finder() -> WindowManagerState {
        let config =
            WindowManagerConfig::new(vec![WindowConfig::new("finder", 600.0, 400.0).cascading()]);
        let mut state = build_initial_state(&config, DESKTOP);
        reduce_windows(
            &mut state,
            WindowAction::OpenWindow {
                key: "finder".into(),
                payload: None,
            },
        )
        .unwrap();
        state
    }

    fn drag() -> WindowDrag {
        WindowDrag::new("finder".into(), DESKTOP, &LayoutMetrics::default())
    }

    fn at(x: f64, y: f64) -> PointerPosition {
        PointerPosition { x, y }
    }

    #[test]
    fn header_drag_commits_delta_once_at_end() {
        let mut state = open_finder();
        let mut drag = drag();

        let actions = drag.pointer_down(&state, PointerRegion::Header, at(400.0, 210.0));
        assert_eq!(
            actions,
            vec![WindowAction::FocusWindow {
                key: "finder".into()
            }]
        );
        assert!(drag.is_dragging());

        assert_eq!(
            drag.pointer_move(at(450.0, 240.0)),
            VisualTransform { x: 50.0, y: 30.0 }
        );
        assert_eq!(state.window("finder").unwrap().left, 300.0);

        let actions = drag.pointer_up(PointerRegion::Header, at(450.0, 240.0));
        assert_eq!(
            actions,
            vec![WindowAction::MoveWindow {
                key: "finder".into(),
                dx: 50.0,
                dy: 30.0
            }]
        );
        assert!(drag.transform().is_identity());

        for action in actions {
            reduce_windows(&mut state, action).unwrap();
        }
        let finder = state.window("finder").unwrap();
        assert_eq!((finder.top, finder.left), (230.0, 350.0));
    }

    #[test]
    fn body_press_focuses_without_dragging() {
        let state = open_finder();
        let mut drag = drag();
        let actions = drag.pointer_down(&state, PointerRegion::Body, at(10.0, 10.0));
        assert_eq!(actions.len(), 1);
        assert!(!drag.is_dragging());
        assert!(drag.pointer_move(at(200.0, 200.0)).is_identity());
        assert!(drag.pointer_up(PointerRegion::Body, at(200.0, 200.0)).is_empty());
    }

    #[test]
    fn frame_release_focuses() {
        let mut drag = drag();
        assert_eq!(
            drag.pointer_up(PointerRegion::Frame, at(0.0, 0.0)),
            vec![WindowAction::FocusWindow {
                key: "finder".into()
            }]
        );
    }

    #[test]
    fn mobile_layout_never_starts_a_drag() {
        let mut state = open_finder();
        reduce_windows(
            &mut state,
            WindowAction::SyncViewport {
                viewport: ViewportSize::new(390.0, 844.0),
            },
        )
        .unwrap();
        let mut drag = drag();
        let actions = drag.pointer_down(&state, PointerRegion::Header, at(5.0, 5.0));
        assert_eq!(actions.len(), 1);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn transform_is_clamped_to_bounds_below_chrome() {
        let state = open_finder();
        let mut drag = drag();
        drag.pointer_down(&state, PointerRegion::Header, at(400.0, 210.0));

        let transform = drag.pointer_move(at(-2000.0, -2000.0));
        assert_eq!(transform, VisualTransform { x: -300.0, y: -150.0 });

        drag.apply_bounds(ViewportSize::new(1000.0, 700.0));
        let transform = drag.pointer_move(at(5000.0, 5000.0));
        assert_eq!(transform, VisualTransform { x: 100.0, y: 100.0 });
    }

    #[test]
    fn layout_reset_clears_transform_unless_window_opted_out() {
        let state = open_finder();
        let mut drag = drag();
        drag.pointer_down(&state, PointerRegion::Header, at(400.0, 210.0));
        drag.pointer_move(at(420.0, 220.0));

        let unrelated = TransformReset {
            generation: 1,
            windows: vec!["terminal".into()],
        };
        assert!(!drag.apply_transform_reset(&unrelated));
        assert!(drag.is_dragging());

        let reset = TransformReset {
            generation: 2,
            windows: vec!["finder".into()],
        };
        assert!(drag.apply_transform_reset(&reset));
        assert!(drag.transform().is_identity());
        assert!(drag.pointer_up(PointerRegion::Header, at(500.0, 500.0)).is_empty());
        assert!(!drag.apply_transform_reset(&reset));
    }

    #[test]
    fn switching_to_mobile_mid_drag_cancels_it() {
        let mut state = open_finder();
        let mut drag = drag();
        drag.pointer_down(&state, PointerRegion::Header, at(400.0, 210.0));
        drag.pointer_move(at(430.0, 230.0));

        drag.sync_layout_mode(&state);
        assert!(drag.is_dragging());

        reduce_windows(
            &mut state,
            WindowAction::SyncViewport {
                viewport: ViewportSize::new(600.0, 900.0),
            },
        )
        .unwrap();
        drag.sync_layout_mode(&state);
        assert!(!drag.is_dragging());
        assert!(drag.transform().is_identity());
    }

    #[test]
    fn header_click_without_motion_never_moves_window() {
        let viewport = ViewportSize::new(1200.0, 600.0);
        let config =
            WindowManagerConfig::new(vec![WindowConfig::new("browser", 760.0, 520.0)]);
        let mut state = build_initial_state(&config, viewport);
        reduce_windows(
            &mut state,
            WindowAction::OpenWindow {
                key: "browser".into(),
                payload: None,
            },
        )
        .unwrap();
        let before = state.window("browser").unwrap().position();
        assert_eq!(before, WindowPosition { top: 40.0, left: 220.0 });

        let mut drag = WindowDrag::new("browser".into(), viewport, &LayoutMetrics::default());
        let down = drag.pointer_down(&state, PointerRegion::Header, at(500.0, 60.0));
        assert_eq!(
            down,
            vec![WindowAction::FocusWindow {
                key: "browser".into()
            }]
        );
        assert!(drag.pointer_move(at(500.0, 60.0)).is_identity());
        assert!(drag
            .pointer_up(PointerRegion::Header, at(500.0, 60.0))
            .is_empty());

        for action in down {
            reduce_windows(&mut state, action).unwrap();
        }
        assert_eq!(state.window("browser").unwrap().position(), before);
    }

    #[test]
    fn closed_window_ignores_pointer_down() {
        let config = WindowManagerConfig::new(vec![WindowConfig::new("finder", 600.0, 400.0)]);
        let state = build_initial_state(&config, DESKTOP);
        let mut drag = drag();
        assert!(drag
            .pointer_down(&state, PointerRegion::Header, at(0.0, 0.0))
            .is_empty());
    }
}
