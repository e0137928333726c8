//! Typed host-domain contracts shared by the window manager runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services the window manager depends on:
//! cancelable timers and viewport measurement. Concrete browser adapters live in
//! `platform_host_web`; the in-memory adapters here back headless composition and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod timer;
pub mod viewport;

pub use host::{HostServices, HostStrategy};
pub use timer::{ManualTimerService, NoopTimerService, TimerCallback, TimerHandle, TimerService};
pub use viewport::{FixedViewport, ViewportSize, ViewportSource, MOBILE_BREAKPOINT_PX};
