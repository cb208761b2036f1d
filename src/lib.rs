//! elm-shell - Browser host shell for an Elm-style application
//!
//! Core modules:
//! - `state`: Persisted-state decoding (LocalStorage JSON blob → init flags)
//! - `app`: Application runtime contract (init entry point + outbound ports)
//! - `platform`: Browser/native platform abstraction (storage, DOM, service worker)
//! - `boot`: The one-shot startup sequence wiring everything together

pub mod app;
pub mod boot;
pub mod platform;
pub mod state;

pub use boot::{BootError, boot};
pub use state::MalformedState;

/// Fixed wiring between the shell and the page
pub mod consts {
    /// LocalStorage key holding the app's persisted state
    pub const STATE_KEY: &str = "elm:state";
    /// Id of the DOM element the app renders into
    pub const MOUNT_ID: &str = "root";
    /// Outbound port asking the host to drop keyboard focus
    pub const BLUR_PORT: &str = "blurActiveElement";
    /// Stylesheet loaded before the app mounts
    pub const STYLESHEET_HREF: &str = "main.css";
    /// Service worker script registered after boot
    pub const SERVICE_WORKER_URL: &str = "service-worker.js";
}
