use std::{rc::Rc, time::Duration};

use desktop_runtime::{
    config::{FINDER, IMAGE, TERMINAL},
    RuntimeEffect, ViewportSize, ViewportSyncController, WindowAction, WindowManagerConfig,
    WindowStore, INITIAL_Z_INDEX,
};
use platform_host::{FixedViewport, ManualTimerService};
use pretty_assertions::assert_eq;
use serde_json::json;

const DESKTOP: ViewportSize = ViewportSize::new(1200.0, 800.0);
const PHONE: ViewportSize = ViewportSize::new(390.0, 844.0);

fn builtin_store(viewport: ViewportSize) -> WindowStore {
    WindowStore::new(&WindowManagerConfig::default(), viewport)
}

fn position(store: &WindowStore, key: &str) -> (f64, f64) {
    let window = store.window(key).expect("window in catalog");
    (window.top, window.left)
}

#[test]
fn reopening_cascading_window_steps_diagonally_and_raises() {
    let mut store = builtin_store(DESKTOP);

    store.open_window(FINDER, None);
    assert_eq!(position(&store, FINDER), (200.0, 300.0));
    let first_z = store.window(FINDER).unwrap().z_index;
    assert_eq!(first_z, INITIAL_Z_INDEX + 1);

    store.open_window(FINDER, None);
    assert_eq!(position(&store, FINDER), (224.0, 324.0));
    assert_eq!(store.window(FINDER).unwrap().z_index, first_z + 1);
}

#[test]
fn drag_delta_commits_and_unknown_keys_change_nothing() {
    let mut store = builtin_store(DESKTOP);
    store.open_window(FINDER, None);

    store.move_window(FINDER, 50.0, 50.0);
    assert_eq!(position(&store, FINDER), (250.0, 350.0));

    let before = store.snapshot();
    assert!(!store.dispatch(WindowAction::MoveWindow {
        key: "nonexistent".into(),
        dx: 10.0,
        dy: 10.0,
    }));
    assert!(!store.dispatch(WindowAction::FocusWindow {
        key: "nonexistent".into(),
    }));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn moves_are_clamped_inside_the_margin() {
    let mut store = builtin_store(DESKTOP);
    store.open_window(FINDER, None);

    store.move_window(FINDER, 10_000.0, 10_000.0);
    assert_eq!(position(&store, FINDER), (388.0, 588.0));

    store.move_window(FINDER, -10_000.0, -10_000.0);
    assert_eq!(position(&store, FINDER), (12.0, 12.0));

    let before = store.snapshot();
    store.move_window(FINDER, 0.0, 0.0);
    assert_eq!(store.snapshot(), before);
}

#[test]
fn open_close_round_trip_keeps_or_drops_payload() {
    let mut store = builtin_store(DESKTOP);

    store.open_window(TERMINAL, Some(json!({ "cwd": "/home" })));
    store.open_window(TERMINAL, None);
    assert_eq!(
        store.window(TERMINAL).unwrap().data,
        Some(json!({ "cwd": "/home" }))
    );

    store.close_window(TERMINAL);
    let terminal = store.window(TERMINAL).unwrap();
    assert!(!terminal.is_open);
    assert_eq!(terminal.data, None);
    assert_eq!(terminal.z_index, INITIAL_Z_INDEX);

    store.close_window(TERMINAL);
    assert!(!store.window(TERMINAL).unwrap().is_open);
}

#[test]
fn focus_order_is_strictly_increasing() {
    let mut store = builtin_store(DESKTOP);
    store.open_window(FINDER, None);
    store.open_window(TERMINAL, None);
    store.open_window(IMAGE, None);

    let mut last = 0;
    for key in [FINDER, IMAGE, FINDER, TERMINAL] {
        store.focus_window(key);
        let z = store.window(key).unwrap().z_index;
        assert!(z > last, "{key} got {z} after {last}");
        last = z;
        assert_eq!(store.state().frontmost_window().unwrap().key.as_str(), key);
    }
}

#[test]
fn reset_with_nothing_open_is_a_no_op() {
    let mut store = builtin_store(DESKTOP);
    let before = store.snapshot();
    store.reset_windows();
    assert_eq!(store.snapshot(), before);
    assert!(store.take_effects().is_empty());
}

#[test]
fn identical_histories_produce_identical_layouts() {
    let run = || {
        let mut store = builtin_store(DESKTOP);
        for _ in 0..4 {
            store.open_window(FINDER, None);
        }
        store.open_window(TERMINAL, None);
        store.move_window(TERMINAL, -30.0, 45.0);
        store.reset_windows();
        store.open_window(FINDER, None);
        store.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn viewport_sync_switches_layout_modes_after_debounce() {
    let timers = ManualTimerService::new();
    let viewport = FixedViewport::new(DESKTOP);
    let store = builtin_store(DESKTOP).shared();

    let controller = ViewportSyncController::mount(
        store.clone(),
        Rc::new(viewport.clone()),
        Rc::new(timers.clone()),
        Duration::from_millis(100),
    );
    assert!(store.borrow_mut().take_effects().is_empty());

    store.borrow_mut().open_window(FINDER, None);
    viewport.set(PHONE);
    controller.on_resize();
    timers.advance(Duration::from_millis(50));
    assert!(!store.borrow().is_mobile());

    timers.advance(Duration::from_millis(50));
    {
        let mut store = store.borrow_mut();
        assert!(store.is_mobile());
        let finder = store.window(FINDER).unwrap();
        assert_eq!(
            (finder.top, finder.left, finder.width, finder.height),
            (0.0, 0.0, 390.0, 844.0)
        );
        assert_eq!(
            store.take_effects(),
            vec![
                RuntimeEffect::LayoutModeChanged { is_mobile: true },
                RuntimeEffect::ClearWindowTransforms(vec![FINDER.into()]),
            ]
        );
    }

    viewport.set(DESKTOP);
    controller.on_orientation_change();
    timers.advance(Duration::from_millis(100));
    let store = store.borrow();
    assert!(!store.is_mobile());
    let finder = store.window(FINDER).unwrap();
    assert_eq!(
        (finder.top, finder.left, finder.width, finder.height),
        (100.0, 200.0, 600.0, 400.0)
    );
    assert_eq!(store.state().layout_epoch, 2);
}

#[test]
fn custom_catalog_drives_the_store() {
    let config = WindowManagerConfig::from_json_str(
        r#"{
            "windows": [
                { "id": "notes", "title": "Notes", "width": 300, "height": 200, "cascading": true }
            ],
            "metrics": { "cascade_offset": 10 }
        }"#,
    )
    .expect("valid catalog");
    let mut store = WindowStore::new(&config, DESKTOP);

    store.open_window("notes", None);
    store.open_window("notes", None);
    assert_eq!(position(&store, "notes"), (310.0, 460.0));
    assert_eq!(store.window("notes").unwrap().title, "Notes");
}
