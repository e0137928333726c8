//! Runtime provider and context wiring for the window manager.
//!
//! This module owns the long-lived reducer container, runtime effect queue, deferred transform
//! resets, and the viewport sync subscription. Per-window UI stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use std::{rc::Rc, time::Duration};

use leptos::*;
use platform_host::{HostServices, ViewportSize};
use serde_json::Value;

use crate::{
    config::WindowManagerConfig,
    debounce::Debouncer,
    drag::TransformReset,
    effect_executor,
    host::{WindowHostContext, TRANSFORM_RESET_DELAY},
    model::{WindowKey, WindowManagerState},
    reducer::{RuntimeEffect, WindowAction},
    store::WindowStore,
    viewport_sync::{LayoutTarget, ViewportSyncController},
};

#[derive(Clone, Copy)]
/// Leptos context for reading window manager state and dispatching [`WindowAction`] values.
pub struct WindowManagerContext {
    /// Host service bundle for timers and viewport queries.
    pub host: StoredValue<WindowHostContext>,
    /// Authoritative window store; every action goes through it.
    pub store: StoredValue<WindowStore>,
    /// Reactive snapshot of the store, updated after each accepted transition.
    pub state: RwSignal<WindowManagerState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Latest deferred transform reset; windows compare generations to apply each one once.
    pub transform_resets: RwSignal<TransformReset>,
    /// Pending deferral for the next transform reset.
    pub reset_deferral: StoredValue<Debouncer>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<WindowAction>,
}

impl WindowManagerContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: WindowAction) {
        self.dispatch.call(action);
    }

    pub fn open_window(&self, key: &str, payload: Option<Value>) {
        self.dispatch_action(WindowAction::OpenWindow {
            key: key.into(),
            payload,
        });
    }

    pub fn close_window(&self, key: &str) {
        self.dispatch_action(WindowAction::CloseWindow { key: key.into() });
    }

    pub fn focus_window(&self, key: &str) {
        self.dispatch_action(WindowAction::FocusWindow { key: key.into() });
    }

    pub fn move_window(&self, key: &str, dx: f64, dy: f64) {
        self.dispatch_action(WindowAction::MoveWindow {
            key: key.into(),
            dx,
            dy,
        });
    }

    pub fn reset_windows(&self) {
        self.dispatch_action(WindowAction::ResetWindows);
    }

    pub fn toggle_window(&self, key: &str) {
        self.dispatch_action(WindowAction::ToggleWindow { key: key.into() });
    }

    /// Publishes a transform reset for `windows` after the current render pass.
    ///
    /// A newer reset replaces one that has not fired yet.
    pub(crate) fn schedule_transform_reset(&self, windows: Vec<WindowKey>) {
        let transform_resets = self.transform_resets;
        self.reset_deferral.with_value(|deferral| {
            deferral.trigger(move || {
                transform_resets.update(|reset| {
                    reset.generation += 1;
                    reset.windows = windows;
                });
            });
        });
    }
}

impl LayoutTarget for WindowManagerContext {
    fn refresh_viewport(&self, viewport: ViewportSize) {
        self.dispatch_action(WindowAction::SyncViewport { viewport });
    }

    fn reset_layout(&self) {
        self.reset_windows();
    }
}

fn install_viewport_sync(runtime: WindowManagerContext) {
    let host = runtime.host.get_value();
    let debounce_ms = runtime
        .state
        .with_untracked(|state| state.metrics.resize_debounce_ms);
    let controller = Rc::new(ViewportSyncController::mount(
        Rc::new(runtime),
        host.viewport_source(),
        host.timers(),
        Duration::from_millis(debounce_ms),
    ));

    let resize_listener = {
        let controller = controller.clone();
        window_event_listener(ev::resize, move |_| controller.on_resize())
    };
    let orientation_listener = {
        let controller = controller.clone();
        window_event_listener_untyped("orientationchange", move |_| {
            controller.on_orientation_change()
        })
    };

    on_cleanup(move || {
        resize_listener.remove();
        orientation_listener.remove();
        controller.cancel_pending();
    });
}

fn install_runtime_orchestration(runtime: WindowManagerContext) {
    effect_executor::install(runtime);
    install_viewport_sync(runtime);
}

#[component]
/// Provides [`WindowManagerContext`] to descendant components and starts viewport sync.
pub fn WindowManagerProvider(
    /// Window catalog and layout metrics; defaults to the built-in catalog.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    /// Injected host bundle; defaults to the browser adapters.
    #[prop(optional)]
    host_services: Option<HostServices>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let host = host_services
        .map(WindowHostContext::new)
        .unwrap_or_default();
    let window_store = WindowStore::new(&config, host.viewport());
    let state = create_rw_signal(window_store.snapshot());
    let store = store_value(window_store);
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let transform_resets = create_rw_signal(TransformReset::default());
    let reset_deferral = store_value(Debouncer::new(host.timers(), TRANSFORM_RESET_DELAY));
    let host = store_value(host);

    let dispatch = Callback::new(move |action: WindowAction| {
        let Some((next, new_effects)) = store.try_update_value(|store| {
            let next = store.dispatch_changed(action);
            (next, store.take_effects())
        }) else {
            return;
        };

        if let Some(next) = next {
            state.set(next);
        }
        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = WindowManagerContext {
        host,
        store,
        state,
        effects,
        transform_resets,
        reset_deferral,
        dispatch,
    };

    provide_context(runtime.clone());

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`WindowManagerContext`].
///
/// # Panics
///
/// Panics if called outside [`WindowManagerProvider`].
pub fn use_window_manager() -> WindowManagerContext {
    use_context::<WindowManagerContext>().expect("WindowManagerContext not provided")
}
