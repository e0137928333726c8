//! Window manager UI composition: the managed window wrapper and its style helpers.

mod window;

use leptos::*;

pub use self::window::ManagedWindow;

use crate::model::{PointerPosition, VisualTransform, WindowRecord};

/// Attribute marking the drag handle inside a managed window's content.
pub const WINDOW_HEADER_ATTR: &str = "data-window-header";

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const WINDOW_HEADER_SELECTOR: &str = "[data-window-header]";

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: f64::from(ev.client_x()),
        y: f64::from(ev.client_y()),
    }
}

/// Inline style for a managed window in its current layout mode.
pub fn window_style(window: &WindowRecord, is_mobile: bool, transform: VisualTransform) -> String {
    let display = if window.is_open { "flex" } else { "none" };
    if is_mobile {
        return format!(
            "display:{display};position:fixed;top:0;left:0;width:100dvw;height:100dvh;z-index:{};",
            window.z_index
        );
    }
    format!(
        "display:{display};position:absolute;top:{}px;left:{}px;width:{}px;height:{}px;z-index:{};transform:translate({}px, {}px);",
        window.top,
        window.left,
        window.width,
        window.height,
        window.z_index,
        transform.x,
        transform.y
    )
}

fn window_dom_id(window: &WindowRecord) -> String {
    format!("window-{}", window.key)
}

fn window_class(window: &WindowRecord, is_mobile: bool) -> String {
    let open_class = if window.is_open { " open" } else { "" };
    let mobile_class = if is_mobile { " mobile" } else { "" };
    format!("managed-window{open_class}{mobile_class}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::{WindowConfig, WindowManagerConfig},
        reducer::{build_initial_state, reduce_windows, WindowAction},
    };
    use platform_host::ViewportSize;

    fn finder(open: bool) -> WindowRecord {
        let config = WindowManagerConfig::new(vec![WindowConfig::new("finder", 600.0, 400.0)]);
        let mut state = build_initial_state(&config, ViewportSize::new(1200.0, 800.0));
        if open {
            reduce_windows(
                &mut state,
                WindowAction::OpenWindow {
                    key: "finder".into(),
                    payload: None,
                },
            )
            .unwrap();
        }
        state.window("finder").cloned().unwrap()
    }

    #[test]
    fn desktop_style_positions_window_and_applies_transform() {
        let style = window_style(&finder(true), false, VisualTransform { x: 12.0, y: -4.0 });
        assert_eq!(
            style,
            "display:flex;position:absolute;top:200px;left:300px;width:600px;height:400px;\
             z-index:1001;transform:translate(12px, -4px);"
        );
    }

    #[test]
    fn mobile_style_is_fullscreen_without_transform() {
        let style = window_style(&finder(true), true, VisualTransform { x: 30.0, y: 30.0 });
        assert!(style.contains("position:fixed"));
        assert!(style.contains("width:100dvw"));
        assert!(!style.contains("translate"));
    }

    #[test]
    fn closed_window_is_hidden() {
        let window = finder(false);
        assert!(
            window_style(&window, false, VisualTransform::default()).starts_with("display:none")
        );
        assert_eq!(window_class(&window, false), "managed-window");
        assert_eq!(window_dom_id(&window), "window-finder");
    }
}
