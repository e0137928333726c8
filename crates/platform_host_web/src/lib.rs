//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring for the window manager: `setTimeout`
//! timers and viewport/root-container measurement. Non-wasm builds compile to inert
//! fallbacks so the runtime and its tests build natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod timer;
pub mod viewport;

pub use adapters::{
    build_host_services, host_strategy_name, selected_host_strategy, timer_service,
    viewport_source,
};
pub use timer::WebTimerService;
pub use viewport::{WebViewport, DEFAULT_ROOT_SELECTOR};
