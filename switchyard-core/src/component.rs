//! Component table: one record per registered sub-adapter

use crate::error::{Error, Result};
use crate::types::{ComponentIndex, LocalAction};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Registration record of one sub-adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Dense index assigned at registration, never reused
    pub index: ComponentIndex,
    /// Human-readable component name
    pub name: String,
    /// Whether silence from this component is benign
    pub is_tau: bool,
    /// Local action names in discovery order; position + 1 is the local number
    pub local_action_names: Vec<String>,
    /// Adapter-spec identifiers associated with this component
    pub spec_files: Vec<String>,
}

impl ComponentRecord {
    fn new(index: ComponentIndex, name: &str, is_tau: bool) -> Self {
        Self {
            index,
            name: name.to_string(),
            is_tau,
            local_action_names: Vec::new(),
            spec_files: Vec::new(),
        }
    }

    /// Local number of `name` in this component's private numbering
    pub fn local_number(&self, name: &str) -> Option<LocalAction> {
        self.local_action_names
            .iter()
            .position(|n| n == name)
            .map(|pos| LocalAction(pos as u32 + 1))
    }
}

/// Table of registered components, indexed by their dense registration index
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    records: Vec<ComponentRecord>,
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component at `index`.
    ///
    /// Indexes must arrive densely in registration order: re-registering a
    /// taken index or skipping ahead of the next expected value is a
    /// configuration defect and fails.
    pub fn add(&mut self, index: ComponentIndex, name: &str, is_tau: bool) -> Result<()> {
        let expected = ComponentIndex(self.records.len());
        if index < expected {
            return Err(Error::DuplicateIndex(index));
        }
        if index > expected {
            return Err(Error::IndexOutOfOrder { index, expected });
        }
        self.records.push(ComponentRecord::new(index, name, is_tau));
        info!(index = index.0, name, is_tau, "component registered");
        Ok(())
    }

    /// Append a local action name, returning its 1-based local number.
    ///
    /// Idempotent: a name already present keeps its original number.
    pub fn add_local_action_name(
        &mut self,
        index: ComponentIndex,
        name: &str,
    ) -> Result<LocalAction> {
        let record = self.record_mut(index)?;
        if let Some(local) = record.local_number(name) {
            return Ok(local);
        }
        record.local_action_names.push(name.to_string());
        Ok(LocalAction(record.local_action_names.len() as u32))
    }

    /// Associate an adapter-spec identifier with a component
    pub fn add_spec_file(&mut self, index: ComponentIndex, spec: &str) -> Result<()> {
        let record = self.record_mut(index)?;
        if !record.spec_files.iter().any(|s| s == spec) {
            record.spec_files.push(spec.to_string());
        }
        Ok(())
    }

    pub fn is_tau(&self, index: ComponentIndex) -> Result<bool> {
        Ok(self.get(index)?.is_tau)
    }

    pub fn local_action_names(&self, index: ComponentIndex) -> Result<&[String]> {
        Ok(&self.get(index)?.local_action_names)
    }

    pub fn get(&self, index: ComponentIndex) -> Result<&ComponentRecord> {
        self.records
            .get(index.0)
            .ok_or(Error::UnknownComponent(index))
    }

    fn record_mut(&mut self, index: ComponentIndex) -> Result<&mut ComponentRecord> {
        self.records
            .get_mut(index.0)
            .ok_or(Error::UnknownComponent(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.records.iter()
    }

    /// True when every registered component is tau
    pub fn all_tau(&self) -> bool {
        self.records.iter().all(|r| r.is_tau)
    }
}
