//! Action mux: dispatch and observation over registered sub-adapters
//!
//! The mux owns the mapping tables and the sub-adapter collaborators. The
//! model side talks in global action numbers; each sub-adapter talks in its
//! own local numbers. Registration happens up front (dense component
//! indexes, mapping entries via the mapper), then the execution phase only
//! reads the tables. The `&mut self` registration surface makes that phase
//! separation visible in the type system, so no locking is carried here.

use crate::adapter::SubAdapter;
use crate::config::MuxConfig;
use crate::error::MuxError;
use crate::events::MuxEvent;
use std::time::Duration;
use switchyard_core::{
    ActionPair, ActionRole, ComponentIndex, GlobalAction, Mapper,
};
use tokio::sync::broadcast;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Round-robin dispatcher over the registered sub-adapters
pub struct ActionMux {
    config: MuxConfig,
    mapper: Mapper,
    adapters: Vec<Box<dyn SubAdapter>>,
    /// Next component polled first during observation
    robin: usize,
    /// Consecutive observation sweeps that produced nothing
    silence_sweeps: u64,
    result_actions: Vec<GlobalAction>,
    event_sender: broadcast::Sender<MuxEvent>,
}

impl ActionMux {
    /// Create a new mux with a validated configuration
    pub fn new(config: MuxConfig) -> Result<Self, MuxError> {
        config.validate().map_err(MuxError::Config)?;
        let (event_sender, _) = broadcast::channel(config.event_channel_capacity);
        Ok(Self {
            config,
            mapper: Mapper::new(),
            adapters: Vec::new(),
            robin: 0,
            silence_sweeps: 0,
            result_actions: Vec::new(),
            event_sender,
        })
    }

    /// Register a component and take ownership of its sub-adapter.
    ///
    /// Indexes must be dense and arrive in order; violations are
    /// configuration defects and abort setup.
    pub fn add_component(
        &mut self,
        index: ComponentIndex,
        name: &str,
        is_tau: bool,
        adapter: Box<dyn SubAdapter>,
    ) -> Result<(), MuxError> {
        self.mapper.add_component(index, name, is_tau)?;
        debug!(index = index.0, adapter = adapter.name(), "sub-adapter attached");
        self.adapters.push(adapter);
        let _ = self.event_sender.send(MuxEvent::ComponentRegistered {
            index,
            name: name.to_string(),
        });
        Ok(())
    }

    /// Associate an adapter-spec identifier with a component; parsing and
    /// loading of the spec file stays with the surrounding engine
    pub fn add_file(&mut self, index: ComponentIndex, spec_name: &str) -> Result<(), MuxError> {
        self.mapper.add_spec_file(index, spec_name)?;
        Ok(())
    }

    /// Register an action name whose verdict the engine tracks
    pub fn add_result_action(&mut self, name: &str) -> GlobalAction {
        let action = self.mapper.resolve_name(name);
        if !self.result_actions.contains(&action) {
            self.result_actions.push(action);
        }
        action
    }

    /// Map a component-local action name to the global action of the same
    /// name, under the given direction
    pub fn map_action(
        &mut self,
        index: ComponentIndex,
        name: &str,
        role: ActionRole,
    ) -> Result<GlobalAction, MuxError> {
        Ok(self.mapper.anum_create(index, name, role)?)
    }

    /// Renaming form: map a component-local name to a different global name
    pub fn map_action_as(
        &mut self,
        index: ComponentIndex,
        local_name: &str,
        global_name: &str,
        role: ActionRole,
    ) -> Result<GlobalAction, MuxError> {
        Ok(self.mapper.map_alias(index, local_name, global_name, role)?)
    }

    /// One-time init of every sub-adapter in index order; the first failure
    /// aborts initialization
    pub async fn init(&mut self) -> Result<(), MuxError> {
        for (i, adapter) in self.adapters.iter_mut().enumerate() {
            adapter
                .init()
                .await
                .map_err(|reason| MuxError::adapter(ComponentIndex(i), reason))?;
            debug!(index = i, adapter = adapter.name(), "sub-adapter initialized");
        }
        info!(components = self.adapters.len(), "mux initialized");
        Ok(())
    }

    /// Execute a global action on the component that owns it.
    ///
    /// When several components map the same action the lowest component
    /// index wins; candidate lists are kept sorted, so repeated calls with
    /// unchanged tables pick the same target.
    pub async fn execute(&mut self, action: GlobalAction) -> Result<(), MuxError> {
        let pair = match self.mapper.pairs_for(action)?.first() {
            Some(&pair) => pair,
            None => return Err(switchyard_core::Error::UnmappedAction(action).into()),
        };
        let adapter = match self.adapters.get_mut(pair.component.0) {
            Some(adapter) => adapter,
            None => return Err(switchyard_core::Error::UnknownComponent(pair.component).into()),
        };
        adapter
            .execute(pair.local)
            .await
            .map_err(|reason| MuxError::adapter(pair.component, reason))?;
        debug!(global = action.0, component = pair.component.0, local = pair.local.0, "executed");
        let _ = self.event_sender.send(MuxEvent::ActionExecuted {
            action,
            component: pair.component,
        });
        Ok(())
    }

    /// Observe a spontaneous action from any component.
    ///
    /// Components are polled in cyclic index order starting at the rotating
    /// `robin` position; the first mapped observation wins and advances the
    /// rotation. Without `block` an empty sweep returns
    /// [`GlobalAction::SILENCE`] immediately. With `block`, an all-tau fleet
    /// is swept again after a pause (tau silence is absorbed); once any
    /// non-tau component is registered its quiescence is itself a
    /// model-visible observation, so an empty sweep reports silence instead
    /// of spinning.
    pub async fn observe(&mut self, block: bool) -> Result<GlobalAction, MuxError> {
        if self.adapters.is_empty() {
            return Ok(GlobalAction::SILENCE);
        }
        loop {
            if let Some(action) = self.sweep().await? {
                self.silence_sweeps = 0;
                return Ok(action);
            }
            self.silence_sweeps += 1;
            if !block {
                return Ok(GlobalAction::SILENCE);
            }
            if !self.mapper.components().all_tau() {
                debug!(sweeps = self.silence_sweeps, "non-tau component quiescent, reporting silence");
                return Ok(GlobalAction::SILENCE);
            }
            sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
        }
    }

    /// One full non-blocking poll cycle over all components
    async fn sweep(&mut self) -> Result<Option<GlobalAction>, MuxError> {
        let count = self.adapters.len();
        for step in 0..count {
            let idx = (self.robin + step) % count;
            let component = ComponentIndex(idx);
            // a component with no output mappings can never produce
            // anything the model observes
            if !self.mapper.observes_anything(component) {
                continue;
            }
            let observed = self.adapters[idx]
                .observe(false)
                .await
                .map_err(|reason| MuxError::adapter(component, reason))?;
            let local = match observed {
                Some(local) => local,
                None => continue,
            };
            let pair = ActionPair::new(component, local);
            match self.mapper.global_for(pair) {
                Some(action) => {
                    self.robin = (idx + 1) % count;
                    debug!(global = action.0, component = idx, local = local.0, "observed");
                    let _ = self.event_sender.send(MuxEvent::ActionObserved { action, component });
                    return Ok(Some(action));
                }
                None => {
                    // the component produced an action the model was never
                    // told about; not observable here, keep scanning
                    warn!(component = idx, local = local.0, "dropping unmodeled action");
                }
            }
        }
        Ok(None)
    }

    /// Diagnostic access to one underlying sub-adapter
    pub fn down(&self, index: ComponentIndex) -> Option<&dyn SubAdapter> {
        self.adapters.get(index.0).map(|a| a.as_ref())
    }

    pub fn down_mut<'a>(&'a mut self, index: ComponentIndex) -> Option<&'a mut (dyn SubAdapter + 'a)> {
        self.adapters.get_mut(index.0).map(|a| a.as_mut() as &mut (dyn SubAdapter + 'a))
    }

    /// Human-readable dump of the mapping tables and attached adapters
    pub fn stringify(&self) -> String {
        let mut out = self.mapper.dump();
        for (i, adapter) in self.adapters.iter().enumerate() {
            out.push_str(&format!("adapter {}: {}\n", i, adapter.name()));
        }
        out
    }

    /// Subscribe to mux events
    pub fn subscribe_events(&self) -> broadcast::Receiver<MuxEvent> {
        self.event_sender.subscribe()
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn component_count(&self) -> usize {
        self.adapters.len()
    }

    /// Consecutive sweeps without an observation since the last one
    pub fn silence_sweeps(&self) -> u64 {
        self.silence_sweeps
    }

    /// Verdict-tracked actions in registration order
    pub fn result_actions(&self) -> &[GlobalAction] {
        &self.result_actions
    }
}
