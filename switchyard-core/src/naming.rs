//! Global action-name registry
//!
//! Assigns a stable global number to every distinct action name seen across
//! all components. Identical names registered from different components
//! collapse to the same number, which is what lets the model address one
//! logical action regardless of which component realizes it.

use crate::error::{Error, Result};
use crate::types::GlobalAction;
use std::collections::HashMap;

/// Name to number interning table with insertion-order allocation
#[derive(Debug, Clone)]
pub struct ActionNames {
    by_name: HashMap<String, GlobalAction>,
    // slot 0 stays empty so numbering starts at 1 and 0 keeps meaning "silence"
    names: Vec<String>,
}

impl ActionNames {
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            names: vec![String::new()],
        }
    }

    /// Return the number for `name`, allocating the next unused one if needed.
    ///
    /// Numbers are assigned in insertion order starting at 1 and are never
    /// reused, even if a name later becomes unreferenced.
    pub fn resolve(&mut self, name: &str) -> GlobalAction {
        if let Some(&action) = self.by_name.get(name) {
            return action;
        }
        let action = GlobalAction(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), action);
        action
    }

    /// Look up an already-assigned number without allocating
    pub fn lookup(&self, name: &str) -> Option<GlobalAction> {
        self.by_name.get(name).copied()
    }

    /// Inverse lookup; fails for numbers that were never assigned
    pub fn name_of(&self, action: GlobalAction) -> Result<&str> {
        if action.is_silence() {
            return Err(Error::UnknownAction(action));
        }
        self.names
            .get(action.0 as usize)
            .map(String::as_str)
            .ok_or(Error::UnknownAction(action))
    }

    /// Number of assigned names
    pub fn len(&self) -> usize {
        self.names.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate assigned (number, name) entries in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (GlobalAction, &str)> {
        self.names
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, name)| (GlobalAction(i as u32), name.as_str()))
    }
}

impl Default for ActionNames {
    fn default() -> Self {
        Self::new()
    }
}
