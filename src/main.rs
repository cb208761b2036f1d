//! elm-shell entry point
//!
//! Wires the browser platform into the boot sequence on wasm32; natively it
//! runs the same sequence against the in-memory fakes as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    use elm_shell::platform::web::{ElmRuntime, WebDom, WebServiceWorker, WebStorage};

    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("elm-shell starting...");

    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");

    let store = WebStorage::new(&window);
    let dom = WebDom::new(document);
    let sw = WebServiceWorker::new(&window);

    // Boot errors are unrecoverable here; let them halt the script
    let _app = elm_shell::boot(&store, &dom, &ElmRuntime, &sw).expect("boot failed");

    log::info!("elm-shell running");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("elm-shell (native) starting...");
    log::info!("No browser here - running the boot sequence against the in-memory platform");

    smoke_boot();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_boot() {
    use elm_shell::consts;
    use elm_shell::platform::StateStore;
    use elm_shell::platform::memory::{MemoryDom, MemoryRuntime, MemoryServiceWorker, MemoryStore};

    let store = MemoryStore::new();
    store.set(consts::STATE_KEY, r#"{"count":3}"#);
    let dom = MemoryDom::new();
    dom.insert(consts::MOUNT_ID);
    let runtime = MemoryRuntime::new();
    let sw = MemoryServiceWorker::new();

    let app = elm_shell::boot(&store, &dom, &runtime, &sw).expect("boot failed");
    app.ports.fire(consts::BLUR_PORT);

    assert_eq!(dom.blur_count(), 1);
    assert_eq!(sw.registration_count(), 1);
    println!("✓ Boot sequence ok (flags restored, blur port wired, service worker registered)");
}
