use std::fmt;
use std::rc::Rc;

use tracing::{debug, instrument};

pub type ReloadHook = Rc<dyn Fn()>;

/// Page-level data loaders run after the viewing date changes, kept in
/// registration order. Registering an existing name replaces its callback in
/// place.
#[derive(Clone, Default)]
pub struct ReloadHooks {
    hooks: Vec<(String, ReloadHook)>,
}

impl fmt::Debug for ReloadHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReloadHooks")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ReloadHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, hook: ReloadHook) {
        let name = name.into();
        if let Some(slot) = self.hooks.iter_mut().find(|(existing, _)| *existing == name) {
            debug!(hook = %name, "replacing reload hook");
            slot.1 = hook;
        } else {
            debug!(hook = %name, "registering reload hook");
            self.hooks.push((name, hook));
        }
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(existing, _)| existing != name);
        before != self.hooks.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|(name, _)| name.as_str())
    }

    /// Snapshot of the callbacks, so hooks may register others while firing.
    pub fn snapshot(&self) -> Vec<ReloadHook> {
        self.hooks.iter().map(|(_, hook)| Rc::clone(hook)).collect()
    }

    #[instrument(skip(self))]
    pub fn fire(&self) -> usize {
        let hooks = self.snapshot();
        debug!(count = hooks.len(), "running reload hooks");
        for hook in &hooks {
            hook();
        }
        hooks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn logger(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> ReloadHook {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn fires_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = ReloadHooks::new();
        hooks.register("loadInvoices", logger(&log, "invoices"));
        hooks.register("loadBills", logger(&log, "bills"));

        assert_eq!(hooks.fire(), 2);
        assert_eq!(*log.borrow(), vec!["invoices", "bills"]);
    }

    #[test]
    fn same_name_replaces_in_place() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = ReloadHooks::new();
        hooks.register("loadCards", logger(&log, "old cards"));
        hooks.register("loadDashboard", logger(&log, "dashboard"));
        hooks.register("loadCards", logger(&log, "new cards"));

        hooks.fire();
        assert_eq!(*log.borrow(), vec!["new cards", "dashboard"]);
        assert_eq!(hooks.names().collect::<Vec<_>>(), vec!["loadCards", "loadDashboard"]);
    }

    #[test]
    fn unregister_removes_only_the_named_hook() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = ReloadHooks::new();
        hooks.register("loadCards", logger(&log, "cards"));

        assert!(!hooks.unregister("loadBills"));
        assert!(hooks.unregister("loadCards"));
        assert_eq!(hooks.fire(), 0);
        assert!(log.borrow().is_empty());
    }
}
