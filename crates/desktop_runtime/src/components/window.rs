use super::*;
use crate::{
    drag::{PointerRegion, WindowDrag},
    model::WindowKey,
    runtime_context::{use_window_manager, WindowManagerContext},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[cfg(target_arch = "wasm32")]
fn pointer_region(ev: &web_sys::PointerEvent) -> PointerRegion {
    let target = ev.target();
    let in_header = target
        .clone()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|element| element.closest(WINDOW_HEADER_SELECTOR).ok().flatten())
        .is_some();
    if in_header {
        PointerRegion::Header
    } else if target.is_some() && target == ev.current_target() {
        PointerRegion::Frame
    } else {
        PointerRegion::Body
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn pointer_region(_: &web_sys::PointerEvent) -> PointerRegion {
    PointerRegion::Body
}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn dispatch_all(runtime: WindowManagerContext, actions: Vec<crate::reducer::WindowAction>) {
    for action in actions {
        runtime.dispatch_action(action);
    }
}

#[component]
/// Positions its children as one store-managed window and wires drag/focus input to the store.
///
/// Content marks its drag handle with [`WINDOW_HEADER_ATTR`]. Keys missing from the catalog
/// render nothing.
pub fn ManagedWindow(
    /// Catalog key of the window this wrapper presents.
    #[prop(into)]
    window_key: WindowKey,
    children: Children,
) -> impl IntoView {
    let runtime = use_window_manager();
    let known = runtime
        .state
        .with_untracked(|state| state.window(window_key.as_str()).is_some());
    if !known {
        logging::debug_warn!("ManagedWindow: unknown window `{window_key}`");
        return ().into_view();
    }

    let metrics = runtime.state.with_untracked(|state| state.metrics);
    let drag_root = runtime.host.get_value().drag_root();
    let drag = store_value(WindowDrag::new(window_key.clone(), drag_root, &metrics));
    let transform = create_rw_signal(VisualTransform::default());

    let lookup_key = window_key.clone();
    let window = create_memo(move |_| {
        runtime
            .state
            .with(|state| state.window(lookup_key.as_str()).cloned())
    });
    let is_mobile = create_memo(move |_| runtime.state.with(|state| state.is_mobile));

    let release = move |region: PointerRegion, pointer: PointerPosition| {
        let actions = drag
            .try_update_value(|drag| drag.pointer_up(region, pointer))
            .unwrap_or_default();
        transform.set(VisualTransform::default());
        dispatch_all(runtime, actions);
    };

    let on_pointer_down = move |ev: web_sys::PointerEvent| {
        let region = if is_primary_press(&ev) {
            pointer_region(&ev)
        } else {
            PointerRegion::Body
        };
        let pointer = pointer_from_pointer_event(&ev);
        let actions = runtime.state.with_untracked(|state| {
            drag.try_update_value(|drag| drag.pointer_down(state, region, pointer))
                .unwrap_or_default()
        });
        if drag.with_value(|drag| drag.is_dragging()) {
            try_set_pointer_capture(&ev);
            ev.prevent_default();
        }
        dispatch_all(runtime, actions);
    };

    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        release(pointer_region(&ev), pointer_from_pointer_event(&ev));
    };

    let move_listener = window_event_listener(ev::pointermove, move |ev| {
        if !drag.with_value(|drag| drag.is_dragging()) {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        if let Some(next) = drag.try_update_value(|drag| drag.pointer_move(pointer)) {
            transform.set(next);
        }
    });
    let up_listener = window_event_listener(ev::pointerup, move |ev| {
        if drag.with_value(|drag| drag.is_dragging()) {
            release(PointerRegion::Body, pointer_from_pointer_event(&ev));
        }
    });
    let cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        drag.update_value(|drag| drag.pointer_cancel());
        transform.set(VisualTransform::default());
    });
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let root = runtime.host.get_value().drag_root();
        if let Some(next) = drag.try_update_value(|drag| {
            drag.apply_bounds(root);
            drag.transform()
        }) {
            transform.set(next);
        }
    });
    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
        cancel_listener.remove();
        resize_listener.remove();
    });

    create_effect(move |_| {
        let reset = runtime.transform_resets.get();
        let cleared = drag
            .try_update_value(|drag| drag.apply_transform_reset(&reset))
            .unwrap_or(false);
        if cleared {
            transform.set(VisualTransform::default());
        }
    });

    create_effect(move |_| {
        if is_mobile.get() {
            runtime
                .state
                .with_untracked(|state| drag.update_value(|drag| drag.sync_layout_mode(state)));
            transform.set(VisualTransform::default());
        }
    });

    let style = move || {
        window
            .get()
            .map(|win| window_style(&win, is_mobile.get(), transform.get()))
            .unwrap_or_default()
    };
    let class = move || {
        window
            .get()
            .map(|win| window_class(&win, is_mobile.get()))
            .unwrap_or_default()
    };
    let dom_id = window
        .get_untracked()
        .map(|win| window_dom_id(&win))
        .unwrap_or_default();
    let title = window
        .get_untracked()
        .map(|win| win.title)
        .unwrap_or_default();

    view! {
        <section
            id=dom_id
            class=class
            style=style
            role="dialog"
            aria-label=title
            on:pointerdown=on_pointer_down
            on:pointerup=on_pointer_up
        >
            {children()}
        </section>
    }
    .into_view()
}
