//! Platform abstraction layer
//!
//! The shell's only ambient dependencies are the key-value store, the
//! document, and the service worker registrar. Each is a trait seam so the
//! boot sequence runs unchanged against the browser or the in-memory fakes.

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// String key-value storage whose lifetime spans the browsing session
/// (LocalStorage in the browser).
pub trait StateStore {
    /// Value stored under `key`, or `None` if the key was never set.
    /// A missing key is the normal first-run case, not an error.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

/// The document, reduced to the three operations the shell performs.
pub trait Dom {
    /// Handle to a mount element, opaque to the boot sequence.
    type Node;

    /// Request a stylesheet load. Side effect only; a missing resource
    /// surfaces as a platform load error, not here.
    fn load_stylesheet(&self, href: &str);

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Drop keyboard focus from whatever element currently holds it.
    fn blur_active_element(&self);
}

/// Service worker registrar.
///
/// `register` never blocks; success or failure of the registration is owned
/// entirely by the implementation and never reaches the caller.
pub trait ServiceWorker {
    fn register(&self, url: &str);
}
