//! Application runtime contract
//!
//! The application itself is an external collaborator (a compiled Elm bundle
//! in the browser). The shell needs two things from it: an init entry point
//! taking a mount node plus flags, and a way to subscribe handlers to its
//! named outbound ports.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

/// Handler for a no-payload outbound port firing.
pub type PortHandler = Box<dyn FnMut()>;

/// External application entry point.
pub trait AppRuntime<N> {
    type Instance: AppInstance;

    /// Mount the app into `node` with the decoded persisted state as flags.
    fn init(&self, node: N, flags: Option<Value>) -> Self::Instance;
}

/// A running application instance.
pub trait AppInstance {
    /// Register `handler` on the outbound port named `port`.
    ///
    /// Fire-and-forget: the app may fire the port any number of times over
    /// the page lifetime, each firing runs the handler synchronously, and
    /// nothing flows back. Subscriptions are never cancelled.
    fn subscribe(&self, port: &str, handler: PortHandler);
}

/// Observer registry backing non-JS runtimes' ports.
///
/// No queue and no backpressure; firings are serialized by the
/// single-threaded event loop. Handlers must not re-subscribe from inside
/// a firing (the registry is borrowed for the duration).
#[derive(Clone, Default)]
pub struct Ports {
    handlers: Rc<RefCell<HashMap<String, Vec<PortHandler>>>>,
}

impl Ports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `port`.
    pub fn subscribe(&self, port: &str, handler: PortHandler) {
        self.handlers
            .borrow_mut()
            .entry(port.to_string())
            .or_default()
            .push(handler);
    }

    /// Invoke every handler registered on `port` once, in subscription
    /// order. Returns how many handlers ran.
    pub fn fire(&self, port: &str) -> usize {
        let mut handlers = self.handlers.borrow_mut();
        match handlers.get_mut(port) {
            Some(subs) => {
                for handler in subs.iter_mut() {
                    handler();
                }
                subs.len()
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fire_with_no_subscribers_is_a_noop() {
        let ports = Ports::new();
        assert_eq!(ports.fire("blurActiveElement"), 0);
    }

    #[test]
    fn test_every_subscriber_runs_once_per_firing() {
        let ports = Ports::new();
        let hits = Rc::new(Cell::new(0u32));

        for _ in 0..2 {
            let hits = hits.clone();
            ports.subscribe("blurActiveElement", Box::new(move || hits.set(hits.get() + 1)));
        }

        assert_eq!(ports.fire("blurActiveElement"), 2);
        assert_eq!(hits.get(), 2);

        ports.fire("blurActiveElement");
        assert_eq!(hits.get(), 4);
    }

    #[test]
    fn test_ports_are_independent() {
        let ports = Ports::new();
        let hits = Rc::new(Cell::new(0u32));

        let h = hits.clone();
        ports.subscribe("blurActiveElement", Box::new(move || h.set(h.get() + 1)));

        ports.fire("somethingElse");
        assert_eq!(hits.get(), 0);
    }
}
