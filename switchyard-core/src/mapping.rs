//! Bidirectional translation between global action numbers and per-component
//! action pairs.
//!
//! Four tables move together: the forward map (pair to global), the reverse
//! multimap (global to pairs, one global name may exist in several
//! components), and two used-action multimaps that partition pairs by the
//! direction they are used in. All four are mutated through a single entry
//! point so they cannot drift apart.

use crate::component::ComponentTable;
use crate::error::{Error, Result};
use crate::naming::ActionNames;
use crate::types::{ActionPair, ActionRole, ComponentIndex, GlobalAction, LocalAction};
use std::collections::HashMap;
use std::fmt::Write as _;
use tracing::debug;

/// The forward/reverse/used-action tables
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    forward: HashMap<ActionPair, GlobalAction>,
    reverse: HashMap<GlobalAction, Vec<ActionPair>>,
    used_in: HashMap<GlobalAction, Vec<ActionPair>>,
    used_out: HashMap<GlobalAction, Vec<ActionPair>>,
    // per-component count of output-role pairs, grown on demand
    out_counts: Vec<usize>,
}

impl ActionMap {
    /// Bind `pair` to `action` under `role`.
    ///
    /// Returns true when the forward entry is new. Re-binding an existing
    /// pair to the same action only records the additional role; re-binding
    /// it to a different action is rejected, which keeps the forward map a
    /// function.
    fn bind(&mut self, pair: ActionPair, action: GlobalAction, role: ActionRole) -> Result<bool> {
        let fresh = match self.forward.get(&pair) {
            Some(&bound) if bound != action => {
                return Err(Error::ConflictingMapping { pair, bound });
            }
            Some(_) => false,
            None => {
                self.forward.insert(pair, action);
                push_sorted(self.reverse.entry(action).or_default(), pair);
                true
            }
        };

        let used = match role {
            ActionRole::Input => &mut self.used_in,
            ActionRole::Output => &mut self.used_out,
        };
        if push_sorted(used.entry(action).or_default(), pair) && role == ActionRole::Output {
            let slot = pair.component.0;
            if slot >= self.out_counts.len() {
                self.out_counts.resize(slot + 1, 0);
            }
            self.out_counts[slot] += 1;
        }
        Ok(fresh)
    }

    fn pairs_for(&self, action: GlobalAction) -> Result<&[ActionPair]> {
        self.reverse
            .get(&action)
            .map(Vec::as_slice)
            .filter(|pairs| !pairs.is_empty())
            .ok_or(Error::UnmappedAction(action))
    }

    fn global_for(&self, pair: ActionPair) -> Option<GlobalAction> {
        self.forward.get(&pair).copied()
    }

    fn is_used_action(&self, action: GlobalAction, role: ActionRole) -> bool {
        let used = match role {
            ActionRole::Input => &self.used_in,
            ActionRole::Output => &self.used_out,
        };
        used.get(&action).map(|v| !v.is_empty()).unwrap_or(false)
    }

    fn is_used_pair(&self, pair: ActionPair, role: ActionRole) -> bool {
        let used = match role {
            ActionRole::Input => &self.used_in,
            ActionRole::Output => &self.used_out,
        };
        self.forward
            .get(&pair)
            .and_then(|action| used.get(action))
            .map(|pairs| pairs.binary_search(&pair).is_ok())
            .unwrap_or(false)
    }

    fn observes_anything(&self, index: ComponentIndex) -> bool {
        self.out_counts.get(index.0).copied().unwrap_or(0) > 0
    }
}

/// Keep candidate lists sorted so the lowest component index is always at the
/// front; returns false when the pair was already present.
fn push_sorted(pairs: &mut Vec<ActionPair>, pair: ActionPair) -> bool {
    match pairs.binary_search(&pair) {
        Ok(_) => false,
        Err(pos) => {
            pairs.insert(pos, pair);
            true
        }
    }
}

/// Owner of the name registry, the component table and the mapping tables.
///
/// All mutation flows through [`Mapper::map_alias`] (and its common-case
/// wrapper [`Mapper::anum_create`]); every other operation is a read-only
/// lookup.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    names: ActionNames,
    components: ComponentTable,
    map: ActionMap,
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &ActionNames {
        &self.names
    }

    pub fn components(&self) -> &ComponentTable {
        &self.components
    }

    /// Register an action name in the shared registry without mapping it
    pub fn resolve_name(&mut self, name: &str) -> GlobalAction {
        self.names.resolve(name)
    }

    pub fn name_of(&self, action: GlobalAction) -> Result<&str> {
        self.names.name_of(action)
    }

    pub fn add_component(&mut self, index: ComponentIndex, name: &str, is_tau: bool) -> Result<()> {
        self.components.add(index, name, is_tau)
    }

    pub fn add_spec_file(&mut self, index: ComponentIndex, spec: &str) -> Result<()> {
        self.components.add_spec_file(index, spec)
    }

    /// Map a component-local action name to the global action of the same
    /// name. Idempotent per (component, name, role).
    pub fn anum_create(
        &mut self,
        index: ComponentIndex,
        name: &str,
        role: ActionRole,
    ) -> Result<GlobalAction> {
        self.map_alias(index, name, name, role)
    }

    /// Map a component-local action name to a possibly different global
    /// name. This is the renaming form used when a component's private
    /// vocabulary differs from the model's.
    pub fn map_alias(
        &mut self,
        index: ComponentIndex,
        local_name: &str,
        global_name: &str,
        role: ActionRole,
    ) -> Result<GlobalAction> {
        self.components.get(index)?;
        let action = self.names.resolve(global_name);
        let local = self.components.add_local_action_name(index, local_name)?;
        let pair = ActionPair::new(index, local);
        if self.map.bind(pair, action, role)? {
            debug!(
                component = index.0,
                local = local.0,
                global = action.0,
                %role,
                name = global_name,
                "action mapped"
            );
        }
        Ok(action)
    }

    /// Candidate pairs that can realize `action`, lowest component first
    pub fn pairs_for(&self, action: GlobalAction) -> Result<&[ActionPair]> {
        self.map.pairs_for(action)
    }

    /// Global number of an observed pair; `None` means the component
    /// produced an action the model has no number for
    pub fn global_for(&self, pair: ActionPair) -> Option<GlobalAction> {
        self.map.global_for(pair)
    }

    pub fn is_used_action(&self, action: GlobalAction, role: ActionRole) -> bool {
        self.map.is_used_action(action, role)
    }

    pub fn is_used_pair(&self, pair: ActionPair, role: ActionRole) -> bool {
        self.map.is_used_pair(pair, role)
    }

    /// True when the component has at least one output-role mapping, i.e.
    /// polling it during observation can ever pay off
    pub fn observes_anything(&self, index: ComponentIndex) -> bool {
        self.map.observes_anything(index)
    }

    /// Human-readable dump of the mapping tables, deterministic order
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for record in self.components.iter() {
            let tau = if record.is_tau { " tau" } else { "" };
            let _ = writeln!(out, "component {}: {}{}", record.index, record.name, tau);
            for spec in &record.spec_files {
                let _ = writeln!(out, "  spec {}", spec);
            }
            for (pos, local_name) in record.local_action_names.iter().enumerate() {
                let pair = ActionPair::new(record.index, LocalAction(pos as u32 + 1));
                match self.map.global_for(pair) {
                    Some(action) => {
                        let global_name = self.names.name_of(action).unwrap_or("?");
                        let mut roles = String::new();
                        if self.map.is_used_pair(pair, ActionRole::Input) {
                            roles.push_str(" in");
                        }
                        if self.map.is_used_pair(pair, ActionRole::Output) {
                            roles.push_str(" out");
                        }
                        let _ = writeln!(
                            out,
                            "  local {} {} -> global {} {}{}",
                            pair.local, local_name, action, global_name, roles
                        );
                    }
                    None => {
                        let _ = writeln!(out, "  local {} {} unmapped", pos + 1, local_name);
                    }
                }
            }
        }
        out
    }
}
