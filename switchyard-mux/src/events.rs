//! Mux events

use switchyard_core::{ComponentIndex, GlobalAction};

/// Event broadcast on registration and protocol activity
#[derive(Debug, Clone)]
pub enum MuxEvent {
    /// Component registered
    ComponentRegistered {
        index: ComponentIndex,
        name: String,
    },
    /// Action dispatched to a component
    ActionExecuted {
        action: GlobalAction,
        component: ComponentIndex,
    },
    /// Spontaneous action observed from a component
    ActionObserved {
        action: GlobalAction,
        component: ComponentIndex,
    },
}
