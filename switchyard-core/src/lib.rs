//! switchyard-core: action-number translation for multi-adapter test execution
//!
//! A test model addresses actions through one global integer namespace; each
//! sub-adapter only understands its own private numbering. This crate holds
//! the shared name registry, the component table and the bidirectional
//! mapping tables that translate between the two, plus the error taxonomy of
//! the routing layer. Dispatch itself lives in switchyard-mux.

pub mod component;
pub mod error;
pub mod mapping;
pub mod naming;
pub mod types;

pub use component::{ComponentRecord, ComponentTable};
pub use error::{Error, Result};
pub use mapping::Mapper;
pub use naming::ActionNames;
pub use types::{ActionPair, ActionRole, ComponentIndex, GlobalAction, LocalAction};
