//! Owned window store: reducer state plus the queue of effects awaiting the presentation layer.
//!
//! This is the explicit, injectable replacement for a global store. It is constructed once
//! from a [`WindowManagerConfig`] and a viewport, and every mutation goes through
//! [`WindowStore::dispatch`]. Invalid operations (unknown keys, non-finite deltas, moves in the
//! mobile layout) are logged in debug builds and otherwise ignored.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use leptos::logging;
use platform_host::ViewportSize;
use serde_json::Value;

use crate::{
    config::WindowManagerConfig,
    model::{WindowKey, WindowManagerState, WindowRecord},
    reducer::{build_initial_state, reduce_windows, RuntimeEffect, WindowAction},
    viewport_sync::LayoutTarget,
};

#[derive(Debug, Clone)]
pub struct WindowStore {
    state: WindowManagerState,
    effects: Vec<RuntimeEffect>,
}

/// Single-threaded shared handle used by controllers that outlive one call frame.
pub type SharedWindowStore = Rc<RefCell<WindowStore>>;

impl WindowStore {
    pub fn new(config: &WindowManagerConfig, viewport: ViewportSize) -> Self {
        Self {
            state: build_initial_state(config, viewport),
            effects: Vec::new(),
        }
    }

    pub fn shared(self) -> SharedWindowStore {
        Rc::new(RefCell::new(self))
    }

    pub fn state(&self) -> &WindowManagerState {
        &self.state
    }

    pub fn snapshot(&self) -> WindowManagerState {
        self.state.clone()
    }

    pub fn windows(&self) -> &BTreeMap<WindowKey, WindowRecord> {
        &self.state.windows
    }

    pub fn window(&self, key: &str) -> Option<&WindowRecord> {
        self.state.window(key)
    }

    pub fn is_mobile(&self) -> bool {
        self.state.is_mobile
    }

    /// Applies `action`, queueing any effects. Returns whether the transition was accepted.
    pub fn dispatch(&mut self, action: WindowAction) -> bool {
        match reduce_windows(&mut self.state, action) {
            Ok(effects) => {
                self.effects.extend(effects);
                true
            }
            Err(err) => {
                logging::debug_warn!("window store ignored action: {err}");
                false
            }
        }
    }

    /// Applies `action` like [`WindowStore::dispatch`] and returns the new snapshot only when
    /// the state actually changed.
    pub fn dispatch_changed(&mut self, action: WindowAction) -> Option<WindowManagerState> {
        let previous = self.state.clone();
        self.dispatch(action);
        (self.state != previous).then(|| self.state.clone())
    }

    /// Drains effects emitted since the last call, in emission order.
    pub fn take_effects(&mut self) -> Vec<RuntimeEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn open_window(&mut self, key: &str, payload: Option<Value>) {
        self.dispatch(WindowAction::OpenWindow {
            key: key.into(),
            payload,
        });
    }

    pub fn close_window(&mut self, key: &str) {
        self.dispatch(WindowAction::CloseWindow { key: key.into() });
    }

    pub fn focus_window(&mut self, key: &str) {
        self.dispatch(WindowAction::FocusWindow { key: key.into() });
    }

    pub fn move_window(&mut self, key: &str, dx: f64, dy: f64) {
        self.dispatch(WindowAction::MoveWindow {
            key: key.into(),
            dx,
            dy,
        });
    }

    pub fn reset_windows(&mut self) {
        self.dispatch(WindowAction::ResetWindows);
    }

    pub fn sync_viewport(&mut self, viewport: ViewportSize) {
        self.dispatch(WindowAction::SyncViewport { viewport });
    }

    pub fn toggle_window(&mut self, key: &str) {
        self.dispatch(WindowAction::ToggleWindow { key: key.into() });
    }
}

impl LayoutTarget for RefCell<WindowStore> {
    fn refresh_viewport(&self, viewport: ViewportSize) {
        self.borrow_mut().sync_viewport(viewport);
    }

    fn reset_layout(&self) {
        self.borrow_mut().reset_windows();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{config::WindowConfig, model::INITIAL_Z_INDEX};

    fn store() -> WindowStore {
        WindowStore::new(
            &WindowManagerConfig::new(vec![
                WindowConfig::new("finder", 600.0, 400.0).cascading(),
                WindowConfig::new("browser", 700.0, 500.0),
            ]),
            ViewportSize::new(1200.0, 800.0),
        )
    }

    #[test]
    fn rejected_actions_report_false_and_queue_nothing() {
        let mut store = store();
        let before = store.snapshot();
        assert!(!store.dispatch(WindowAction::FocusWindow {
            key: "finder".into()
        }));
        store.open_window("nope", None);
        assert_eq!(store.snapshot(), before);
        assert!(store.take_effects().is_empty());
    }

    #[test]
    fn dispatch_changed_reports_only_real_transitions() {
        let mut store = store();
        assert_eq!(
            store.dispatch_changed(WindowAction::FocusWindow {
                key: "finder".into()
            }),
            None
        );

        let opened = store.dispatch_changed(WindowAction::OpenWindow {
            key: "finder".into(),
            payload: None,
        });
        assert_eq!(opened.as_ref(), Some(store.state()));

        assert_eq!(
            store.dispatch_changed(WindowAction::MoveWindow {
                key: "finder".into(),
                dx: 0.0,
                dy: 0.0,
            }),
            None
        );
        assert_eq!(
            store
                .dispatch_changed(WindowAction::ResetWindows)
                .map(|state| state.layout_epoch),
            Some(1)
        );
        assert_eq!(
            store.take_effects(),
            vec![RuntimeEffect::ClearWindowTransforms(vec!["finder".into()])]
        );
    }

    #[test]
    fn effects_drain_in_order() {
        let mut store = store();
        store.open_window("finder", None);
        store.sync_viewport(ViewportSize::new(400.0, 700.0));
        store.reset_windows();

        assert_eq!(
            store.take_effects(),
            vec![
                RuntimeEffect::LayoutModeChanged { is_mobile: true },
                RuntimeEffect::ClearWindowTransforms(vec!["finder".into()]),
            ]
        );
        assert!(store.take_effects().is_empty());
    }

    #[test]
    fn layout_target_refreshes_before_reset() {
        let shared = store().shared();
        shared.borrow_mut().open_window("browser", None);

        shared.refresh_viewport(ViewportSize::new(390.0, 844.0));
        shared.reset_layout();

        let store = shared.borrow();
        let browser = store.window("browser").unwrap();
        assert!(store.is_mobile());
        assert_eq!((browser.top, browser.left), (0.0, 0.0));
        assert_eq!((browser.width, browser.height), (390.0, 844.0));
        assert_eq!(browser.z_index, INITIAL_Z_INDEX + 1);
    }
}
