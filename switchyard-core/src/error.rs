use crate::types::{ActionPair, ComponentIndex, GlobalAction};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown component index {0}")]
    UnknownComponent(ComponentIndex),

    #[error("Component index {0} already registered")]
    DuplicateIndex(ComponentIndex),

    #[error("Component index {index} out of registration order, expected {expected}")]
    IndexOutOfOrder {
        index: ComponentIndex,
        expected: ComponentIndex,
    },

    #[error("Unknown action number {0}")]
    UnknownAction(GlobalAction),

    #[error("No mapping for action {0}")]
    UnmappedAction(GlobalAction),

    #[error("Action pair {pair} already bound to action {bound}")]
    ConflictingMapping {
        pair: ActionPair,
        bound: GlobalAction,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
