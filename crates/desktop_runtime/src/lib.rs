//! Window manager core for the browser-hosted desktop.
//!
//! The pure layers ([`window_manager`] geometry, [`reducer`] transitions, [`store`],
//! [`viewport_sync`] and [`drag`]) have no DOM dependency and are tested natively. The Leptos
//! layers ([`runtime_context`] and [`components`]) bind them to signals and browser events.

pub mod components;
pub mod config;
pub mod debounce;
pub mod drag;
mod effect_executor;
pub mod host;
pub mod model;
pub mod reducer;
pub mod runtime_context;
pub mod store;
pub mod viewport_sync;
pub mod window_manager;

pub use components::{window_style, ManagedWindow, WINDOW_HEADER_ATTR};
pub use config::{builtin_windows, ConfigError, WindowConfig, WindowManagerConfig};
pub use debounce::Debouncer;
pub use drag::{PointerRegion, TransformReset, WindowDrag};
pub use host::WindowHostContext;
pub use model::*;
pub use platform_host::{HostServices, ViewportSize};
pub use reducer::{build_initial_state, reduce_windows, ReducerError, RuntimeEffect, WindowAction};
pub use runtime_context::{use_window_manager, WindowManagerContext, WindowManagerProvider};
pub use store::{SharedWindowStore, WindowStore};
pub use viewport_sync::{LayoutTarget, ViewportSyncController};
