//! In-memory platform fakes
//!
//! Back the boot sequence natively and in tests. Every side effect is
//! recorded so callers can assert on exactly what ran.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde_json::Value;

use super::{Dom, ServiceWorker, StateStore};
use crate::app::{AppInstance, AppRuntime, PortHandler, Ports};

/// HashMap-backed `StateStore`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Fake document: a set of element ids plus recorded side effects.
#[derive(Clone, Default)]
pub struct MemoryDom {
    inner: Rc<RefCell<DomState>>,
}

#[derive(Default)]
struct DomState {
    ids: HashSet<String>,
    stylesheets: Vec<String>,
    blurs: u32,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element id to the fake document.
    pub fn insert(&self, id: &str) {
        self.inner.borrow_mut().ids.insert(id.to_string());
    }

    /// Stylesheet hrefs requested so far, in request order.
    pub fn stylesheets(&self) -> Vec<String> {
        self.inner.borrow().stylesheets.clone()
    }

    /// How many times the active element was blurred.
    pub fn blur_count(&self) -> u32 {
        self.inner.borrow().blurs
    }
}

impl Dom for MemoryDom {
    type Node = String;

    fn load_stylesheet(&self, href: &str) {
        self.inner.borrow_mut().stylesheets.push(href.to_string());
    }

    fn element_by_id(&self, id: &str) -> Option<String> {
        self.inner.borrow().ids.get(id).cloned()
    }

    fn blur_active_element(&self) {
        self.inner.borrow_mut().blurs += 1;
    }
}

/// Counts registrations; never blocks, reports nothing back.
#[derive(Clone, Default)]
pub struct MemoryServiceWorker {
    registrations: Rc<RefCell<Vec<String>>>,
}

impl MemoryServiceWorker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.borrow().len()
    }
}

impl ServiceWorker for MemoryServiceWorker {
    fn register(&self, url: &str) {
        self.registrations.borrow_mut().push(url.to_string());
    }
}

/// Records every init call. Produced instances expose a plain `Ports`
/// registry so tests can fire outbound ports by hand.
#[derive(Clone, Default)]
pub struct MemoryRuntime {
    inits: Rc<RefCell<Vec<Option<Value>>>>,
}

impl MemoryRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_count(&self) -> usize {
        self.inits.borrow().len()
    }

    /// Flags passed to the most recent init, if any init ran.
    pub fn last_flags(&self) -> Option<Option<Value>> {
        self.inits.borrow().last().cloned()
    }
}

impl AppRuntime<String> for MemoryRuntime {
    type Instance = MemoryApp;

    fn init(&self, _node: String, flags: Option<Value>) -> MemoryApp {
        self.inits.borrow_mut().push(flags);
        MemoryApp { ports: Ports::new() }
    }
}

/// Fake application instance backed by a `Ports` registry.
pub struct MemoryApp {
    pub ports: Ports,
}

impl AppInstance for MemoryApp {
    fn subscribe(&self, port: &str, handler: PortHandler) {
        self.ports.subscribe(port, handler);
    }
}
