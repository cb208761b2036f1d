//! Browser platform backed by web-sys
//!
//! Everything here is wasm32-only; natively the memory fakes stand in.

use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, HtmlElement, Window};

use super::{Dom, ServiceWorker, StateStore};
use crate::app::{AppInstance, AppRuntime, PortHandler};

// JS bindings for the compiled application bundle, loaded globally as `Elm`
#[wasm_bindgen(inline_js = "
    export function elm_init(node, flags) {
        return Elm.Main.init({ node: node, flags: flags });
    }

    export function elm_subscribe(app, port, handler) {
        app.ports[port].subscribe(handler);
    }
")]
extern "C" {
    fn elm_init(node: &Element, flags: &JsValue) -> JsValue;
    fn elm_subscribe(app: &JsValue, port: &str, handler: &js_sys::Function);
}

/// LocalStorage-backed `StateStore`.
///
/// Storage access errors (disabled storage, private browsing quirks) read as
/// an empty store rather than failing boot.
pub struct WebStorage {
    storage: Option<web_sys::Storage>,
}

impl WebStorage {
    pub fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl StateStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.set_item(key, value);
        }
    }
}

/// Document-backed `Dom`.
#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn load_stylesheet(&self, href: &str) {
        // <link rel=stylesheet> in <head>; a broken href surfaces as the
        // browser's own resource load error
        let link = match self.document.create_element("link") {
            Ok(el) => el,
            Err(_) => return,
        };
        let _ = link.set_attribute("rel", "stylesheet");
        let _ = link.set_attribute("href", href);
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&link);
        }
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn blur_active_element(&self) {
        if let Some(el) = self.document.active_element() {
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let _ = el.blur();
            }
        }
    }
}

/// navigator.serviceWorker registrar.
///
/// Registration runs as a detached task; the outcome is logged here and
/// goes no further.
pub struct WebServiceWorker {
    container: web_sys::ServiceWorkerContainer,
}

impl WebServiceWorker {
    pub fn new(window: &Window) -> Self {
        Self {
            container: window.navigator().service_worker(),
        }
    }
}

impl ServiceWorker for WebServiceWorker {
    fn register(&self, url: &str) {
        let promise = self.container.register(url);
        let url = url.to_string();
        spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => log::info!("Service worker registered ({})", url),
                Err(err) => log::warn!("Service worker registration failed: {:?}", err),
            }
        });
    }
}

/// Entry point of the compiled application bundle.
pub struct ElmRuntime;

impl AppRuntime<Element> for ElmRuntime {
    type Instance = ElmApp;

    fn init(&self, node: Element, flags: Option<Value>) -> ElmApp {
        let flags = match flags {
            // Already validated as JSON; re-parse on the JS side of the
            // boundary to hand the app a plain object
            Some(value) => js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        };
        ElmApp {
            handle: elm_init(&node, &flags),
        }
    }
}

/// Handle to the running application and its outbound ports.
pub struct ElmApp {
    handle: JsValue,
}

impl AppInstance for ElmApp {
    fn subscribe(&self, port: &str, handler: PortHandler) {
        let closure = Closure::wrap(handler);
        elm_subscribe(&self.handle, port, closure.as_ref().unchecked_ref());
        // Subscription lives for the page lifetime
        closure.forget();
    }
}
