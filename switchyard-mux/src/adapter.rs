//! Sub-adapter contract
//!
//! A sub-adapter is an opaque collaborator (a process wrapper, a remote
//! endpoint, a protocol bridge) that executes and observes actions in its own
//! private numbering. Concrete implementations live outside this crate; the
//! mux reaches them only through this trait, by component index.

use async_trait::async_trait;
use switchyard_core::LocalAction;

/// Capability interface of one routed component
#[async_trait]
pub trait SubAdapter: Send + Sync {
    /// Short name used in logs and diagnostic dumps
    fn name(&self) -> &str;

    /// One-time setup, called once before the execution phase begins
    async fn init(&mut self) -> anyhow::Result<()>;

    /// Fire-and-forget execution of a local action
    async fn execute(&mut self, action: LocalAction) -> anyhow::Result<()>;

    /// Poll for a spontaneous action. `None` means nothing is pending.
    /// With `block` set the adapter may suspend until an action or an
    /// adapter error; cancellation follows the adapter's own semantics.
    async fn observe(&mut self, block: bool) -> anyhow::Result<Option<LocalAction>>;
}
