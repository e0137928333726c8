use desktop_runtime::{use_window_manager, ManagedWindow, WindowKey, WindowManagerProvider};
use leptos::*;
use leptos_meta::*;
use serde_json::Value;

/// Window requested through the `?open=<key>[:<payload>]` query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub key: String,
    pub payload: Option<Value>,
}

/// Parses a location search string such as `?open=text:hello`.
pub fn parse_open_request(search: &str) -> Option<OpenRequest> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("open="))?;
    let (key, payload) = match raw.split_once(':') {
        Some((key, payload)) if !payload.is_empty() => {
            (key, Some(Value::String(payload.to_string())))
        }
        Some((key, _)) => (key, None),
        None => (raw, None),
    };
    if key.is_empty() {
        return None;
    }
    Some(OpenRequest {
        key: key.to_string(),
        payload,
    })
}

#[cfg(target_arch = "wasm32")]
fn location_open_request() -> Option<OpenRequest> {
    let search = web_sys::window()?.location().search().ok()?;
    parse_open_request(&search)
}

#[cfg(not(target_arch = "wasm32"))]
fn location_open_request() -> Option<OpenRequest> {
    None
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Desktop" />
        <Meta name="description" content="A retro desktop-style personal website shell." />

        <main class="os-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <WindowManagerProvider>
            <DeepLinkOpener />
            <Dock />
            <DesktopWindows />
        </WindowManagerProvider>
    }
}

#[component]
fn DeepLinkOpener() -> impl IntoView {
    let runtime = use_window_manager();
    if let Some(request) = location_open_request() {
        runtime.open_window(&request.key, request.payload);
    }
}

fn catalog_entries() -> Vec<(WindowKey, String)> {
    use_window_manager().state.with_untracked(|state| {
        state
            .windows
            .values()
            .map(|window| (window.key.clone(), window.title.clone()))
            .collect()
    })
}

#[component]
fn Dock() -> impl IntoView {
    let runtime = use_window_manager();

    view! {
        <nav class="dock" aria-label="Dock">
            {catalog_entries()
                .into_iter()
                .map(|(key, title)| {
                    let is_open = {
                        let key = key.clone();
                        move || {
                            runtime
                                .state
                                .with(|state| state.window(key.as_str()).is_some_and(|w| w.is_open))
                        }
                    };
                    view! {
                        <button
                            class="dock-item"
                            class:running=is_open
                            on:click=move |_| runtime.toggle_window(key.as_str())
                        >
                            {title}
                        </button>
                    }
                })
                .collect_view()}
            <button class="dock-item dock-reset" on:click=move |_| runtime.reset_windows()>
                "Reset windows"
            </button>
        </nav>
    }
}

#[component]
fn DesktopWindows() -> impl IntoView {
    let runtime = use_window_manager();

    catalog_entries()
        .into_iter()
        .map(|(key, title)| {
            let close_key = key.clone();
            let data_key = key.clone();
            let data = move || {
                runtime.state.with(|state| {
                    state
                        .window(data_key.as_str())
                        .and_then(|window| window.data.as_ref())
                        .map(|data| match data {
                            Value::String(text) => text.clone(),
                            other => other.to_string(),
                        })
                })
            };
            view! {
                <ManagedWindow window_key=key>
                    <header class="window-header" data-window-header="">
                        <button
                            class="window-close"
                            aria-label="Close"
                            on:pointerdown=|ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=move |_| runtime.close_window(close_key.as_str())
                        ></button>
                        <span class="window-title">{title}</span>
                    </header>
                    <div class="window-body">{data}</div>
                </ManagedWindow>
            }
        })
        .collect_view()
}
