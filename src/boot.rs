//! One-shot startup sequence
//!
//! Stylesheet, persisted state, app init, port wiring, then service worker
//! registration in the background. Runs exactly once per page load; every
//! failure aborts startup rather than limping along without the user's
//! state.

use thiserror::Error;

use crate::app::{AppInstance, AppRuntime};
use crate::consts;
use crate::platform::{Dom, ServiceWorker, StateStore};
use crate::state::{self, MalformedState};

/// Startup failures. None are recovered by the shell: the entry point lets
/// them halt script execution and the page stays unrendered.
#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    MalformedState(#[from] MalformedState),

    #[error("mount point #{id} not found in document")]
    MountPointNotFound { id: &'static str },
}

/// Run the boot sequence against the given platform collaborators.
///
/// Returns the live application instance; its port subscriptions stay
/// installed for the page lifetime. The service worker registration is
/// fired last and never awaited.
pub fn boot<S, D, A>(
    store: &S,
    dom: &D,
    runtime: &A,
    sw: &impl ServiceWorker,
) -> Result<A::Instance, BootError>
where
    S: StateStore,
    D: Dom + Clone + 'static,
    A: AppRuntime<D::Node>,
{
    dom.load_stylesheet(consts::STYLESHEET_HREF);

    let raw = store.get(consts::STATE_KEY);
    let flags = state::decode_flags(raw.as_deref())?;
    match &flags {
        Some(_) => log::info!("Restored persisted state from {}", consts::STATE_KEY),
        None => log::info!("No persisted state, starting fresh"),
    }

    let node = dom
        .element_by_id(consts::MOUNT_ID)
        .ok_or(BootError::MountPointNotFound { id: consts::MOUNT_ID })?;

    let app = runtime.init(node, flags);

    let blur_dom = dom.clone();
    app.subscribe(
        consts::BLUR_PORT,
        Box::new(move || blur_dom.blur_active_element()),
    );

    sw.register(consts::SERVICE_WORKER_URL);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryDom, MemoryRuntime, MemoryServiceWorker, MemoryStore};
    use serde_json::json;

    /// Store, document with a mount point, recording runtime and registrar.
    fn platform() -> (MemoryStore, MemoryDom, MemoryRuntime, MemoryServiceWorker) {
        let dom = MemoryDom::new();
        dom.insert(consts::MOUNT_ID);
        (
            MemoryStore::new(),
            dom,
            MemoryRuntime::new(),
            MemoryServiceWorker::new(),
        )
    }

    #[test]
    fn test_first_run_boots_with_absent_flags() {
        let (store, dom, runtime, sw) = platform();

        let app = boot(&store, &dom, &runtime, &sw);
        assert!(app.is_ok());
        assert_eq!(runtime.init_count(), 1);
        assert_eq!(runtime.last_flags(), Some(None));
    }

    #[test]
    fn test_stored_state_becomes_init_flags() {
        let (store, dom, runtime, sw) = platform();
        store.set(consts::STATE_KEY, r#"{"count":3}"#);

        boot(&store, &dom, &runtime, &sw).unwrap();
        assert_eq!(runtime.last_flags(), Some(Some(json!({"count": 3}))));
    }

    #[test]
    fn test_malformed_state_aborts_before_init() {
        let (store, dom, runtime, sw) = platform();
        store.set(consts::STATE_KEY, "not-json");

        let result = boot(&store, &dom, &runtime, &sw);
        assert!(matches!(result, Err(BootError::MalformedState(_))));
        // Nothing past the decode step may run
        assert_eq!(runtime.init_count(), 0);
        assert_eq!(sw.registration_count(), 0);
    }

    #[test]
    fn test_missing_mount_point_aborts() {
        let store = MemoryStore::new();
        let dom = MemoryDom::new(); // no #root
        let runtime = MemoryRuntime::new();
        let sw = MemoryServiceWorker::new();

        let result = boot(&store, &dom, &runtime, &sw);
        assert!(matches!(
            result,
            Err(BootError::MountPointNotFound { id: "root" })
        ));
        assert_eq!(runtime.init_count(), 0);
        assert_eq!(sw.registration_count(), 0);
    }

    #[test]
    fn test_blur_port_blurs_active_element_once_per_firing() {
        let (store, dom, runtime, sw) = platform();

        let app = boot(&store, &dom, &runtime, &sw).unwrap();
        assert_eq!(dom.blur_count(), 0);

        assert_eq!(app.ports.fire(consts::BLUR_PORT), 1);
        assert_eq!(dom.blur_count(), 1);

        app.ports.fire(consts::BLUR_PORT);
        assert_eq!(dom.blur_count(), 2);
    }

    #[test]
    fn test_service_worker_registered_once_after_boot() {
        let (store, dom, runtime, sw) = platform();

        boot(&store, &dom, &runtime, &sw).unwrap();
        assert_eq!(sw.registration_count(), 1);
    }

    #[test]
    fn test_stylesheet_requested_exactly_once() {
        let (store, dom, runtime, sw) = platform();

        boot(&store, &dom, &runtime, &sw).unwrap();
        assert_eq!(dom.stylesheets(), vec![consts::STYLESHEET_HREF.to_string()]);
    }

    #[test]
    fn test_stylesheet_loads_even_when_state_is_corrupt() {
        // Step order: the style side effect happens before the decode
        let (store, dom, runtime, sw) = platform();
        store.set(consts::STATE_KEY, "{broken");

        let _ = boot(&store, &dom, &runtime, &sw);
        assert_eq!(dom.stylesheets().len(), 1);
    }
}
