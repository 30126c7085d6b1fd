use serde::{Deserialize, Serialize};
use std::fmt;

/// Model-visible action number, shared across all components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlobalAction(pub u32);

impl GlobalAction {
    /// Reserved "no action" value; never a key of any mapping table
    pub const SILENCE: GlobalAction = GlobalAction(0);

    pub fn is_silence(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GlobalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Action number private to one component, 1-based (0 means "nothing")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalAction(pub u32);

impl fmt::Display for LocalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense 0-based index of a registered component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentIndex(pub usize);

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unit of bidirectional translation: one local action of one component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionPair {
    pub component: ComponentIndex,
    pub local: LocalAction,
}

impl ActionPair {
    pub fn new(component: ComponentIndex, local: LocalAction) -> Self {
        Self { component, local }
    }
}

impl fmt::Display for ActionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.component, self.local)
    }
}

/// Direction a mapped action is used in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRole {
    /// Model sends it to the component for execution
    Input,
    /// Component produces it as a spontaneous observation
    Output,
}

impl fmt::Display for ActionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionRole::Input => write!(f, "in"),
            ActionRole::Output => write!(f, "out"),
        }
    }
}
