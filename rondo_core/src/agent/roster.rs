use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use crate::agent::{LearningAgent, LearningPolicy, Policy, PolicyAgent, TurnAgent};
use crate::scheme::Scheme;

/// Source of agent instances for the experiment driver.
///
/// A roster produces two flavors of the same line-up: `agents` builds the
/// learning instances (constructed once, when the driver is created) and
/// `evaluation_agents` builds frozen instances sharing the same learned
/// parameters (constructed fresh for every evaluation pass). The roster is
/// where "learning vs frozen" is decided - the driver never toggles a mode.
pub trait AgentRoster<S: Scheme>{
    /// Collective label of the line-up, used when deriving the run name.
    fn label(&self) -> &str;

    fn agents(&self) -> HashMap<S::AgentId, Box<dyn TurnAgent<S>>>;

    fn evaluation_agents(&self) -> HashMap<S::AgentId, Box<dyn TurnAgent<S>>>;
}

/// Recipe producing the learning and the frozen variant of one agent.
pub trait AgentPreset<S: Scheme>: Send{
    fn agent(&self) -> Box<dyn TurnAgent<S>>;

    fn evaluation_agent(&self) -> Box<dyn TurnAgent<S>>;
}

/// Roster of independent agents, one preset per agent identifier.
pub struct IndependentRoster<S: Scheme>{
    label: String,
    presets: HashMap<S::AgentId, Box<dyn AgentPreset<S>>>,
}

impl<S: Scheme> IndependentRoster<S>{
    pub fn new(label: impl Into<String>) -> Self{
        Self{label: label.into(), presets: HashMap::new()}
    }

    pub fn with_preset<P: AgentPreset<S> + 'static>(mut self, id: S::AgentId, preset: P) -> Self{
        self.presets.insert(id, Box::new(preset));
        self
    }

    pub fn insert_preset<P: AgentPreset<S> + 'static>(&mut self, id: S::AgentId, preset: P){
        self.presets.insert(id, Box::new(preset));
    }

    pub fn ids(&self) -> impl Iterator<Item = &S::AgentId>{
        self.presets.keys()
    }
}

impl<S: Scheme> AgentRoster<S> for IndependentRoster<S>{
    fn label(&self) -> &str {
        &self.label
    }

    fn agents(&self) -> HashMap<S::AgentId, Box<dyn TurnAgent<S>>> {
        self.presets.iter()
            .map(|(id, preset)| (id.clone(), preset.agent()))
            .collect()
    }

    fn evaluation_agents(&self) -> HashMap<S::AgentId, Box<dyn TurnAgent<S>>> {
        self.presets.iter()
            .map(|(id, preset)| (id.clone(), preset.evaluation_agent()))
            .collect()
    }
}

/// Preset for agents that never learn: both variants run the same cloned
/// policy frozen.
pub struct StaticPreset<S: Scheme, P: Policy<S> + Clone + 'static>{
    policy: P,
    _scheme: PhantomData<S>,
}

impl<S: Scheme, P: Policy<S> + Clone + 'static> StaticPreset<S, P>{
    pub fn new(policy: P) -> Self{
        Self{policy, _scheme: PhantomData}
    }
}

impl<S: Scheme, P: Policy<S> + Clone + 'static> AgentPreset<S> for StaticPreset<S, P>{
    fn agent(&self) -> Box<dyn TurnAgent<S>> {
        Box::new(PolicyAgent::new(self.policy.clone()))
    }

    fn evaluation_agent(&self) -> Box<dyn TurnAgent<S>> {
        Box::new(PolicyAgent::new(self.policy.clone()))
    }
}

/// Preset sharing one learning policy between the learning agent and its
/// frozen evaluation twin through a mutex.
///
/// The learning variant drives [`LearningPolicy::observe`]; the evaluation
/// variant only ever calls [`Policy::select_action`], so parameters are
/// untouched by evaluation passes.
pub struct SharedPreset<S: Scheme, P: LearningPolicy<S> + 'static>{
    policy: Arc<Mutex<P>>,
    _scheme: PhantomData<S>,
}

impl<S: Scheme, P: LearningPolicy<S> + 'static> SharedPreset<S, P>{
    pub fn new(policy: P) -> Self{
        Self{policy: Arc::new(Mutex::new(policy)), _scheme: PhantomData}
    }

    /// Handle to the shared policy, e.g. for inspecting learned parameters.
    pub fn policy(&self) -> Arc<Mutex<P>>{
        self.policy.clone()
    }
}

impl<S: Scheme, P: LearningPolicy<S> + 'static> AgentPreset<S> for SharedPreset<S, P>{
    fn agent(&self) -> Box<dyn TurnAgent<S>> {
        Box::new(LearningAgent::new(self.policy.clone()))
    }

    fn evaluation_agent(&self) -> Box<dyn TurnAgent<S>> {
        Box::new(PolicyAgent::new(self.policy.clone()))
    }
}
