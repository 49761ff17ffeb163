// ABOUTME: Environment for symbol bindings with parent chaining

use crate::value::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A symbol table with an optional parent. Entries keep insertion
/// order, which is observable through `list_env`. The parent handle is
/// interior-mutable because a lambda's private environment is
/// re-parented onto the caller's environment at application time. The
/// quit flag lives on the root and is raised by the `exit` builtin.
#[derive(Debug, Default)]
pub struct Env {
    entries: RefCell<Vec<(String, Value)>>,
    parent: RefCell<Option<Rc<Env>>>,
    quit: Cell<bool>,
}

impl Env {
    /// Creates a new empty environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Env::default())
    }

    /// Looks up a symbol here, then through the parent chain. Returns
    /// a copy of the bound value.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some((_, value)) = self.entries.borrow().iter().find(|(sym, _)| sym.as_str() == name) {
            return Some(value.clone());
        }
        let parent = self.parent.borrow().clone();
        parent.and_then(|p| p.get(name))
    }

    /// Binds in this environment only. Binding an existing symbol
    /// replaces the old value in place, keeping its position.
    pub fn put(&self, name: &str, value: Value) {
        let mut entries = self.entries.borrow_mut();
        if let Some(slot) = entries.iter_mut().find(|(sym, _)| sym.as_str() == name) {
            slot.1 = value;
        } else {
            entries.push((name.to_string(), value));
        }
    }

    /// Binds in the root environment reached through the parent chain.
    pub fn def(&self, name: &str, value: Value) {
        let parent = self.parent.borrow().clone();
        match parent {
            Some(p) => p.def(name, value),
            None => self.put(name, value),
        }
    }

    pub fn set_parent(&self, parent: Rc<Env>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Symbols bound here (parents excluded), in insertion order.
    pub fn symbols(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(sym, _)| sym.clone())
            .collect()
    }

    /// Raises the quit flag on the root environment.
    pub fn request_quit(&self) {
        let parent = self.parent.borrow().clone();
        match parent {
            Some(p) => p.request_quit(),
            None => self.quit.set(true),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.get()
    }
}

impl Clone for Env {
    /// Copies the entries; the parent handle is shared, not owned.
    fn clone(&self) -> Self {
        Env {
            entries: RefCell::new(self.entries.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
            quit: Cell::new(false),
        }
    }
}
