//! # Minimal example
//! ```
//! use rondo_core::agent::{IndependentRoster, StaticPreset};
//! use rondo_core::demo::{DemoAgentId, DemoPolicySelectFirst, ScriptedDuelSim};
//! use rondo_core::env::TurnEnvironment;
//! use rondo_core::experiment::{ExperimentOptions, MultiAgentExperiment};
//!
//! let env = TurnEnvironment::new(ScriptedDuelSim::canonical(), "scripted_duel");
//! let roster = IndependentRoster::new("demo")
//!     .with_preset(DemoAgentId::First, StaticPreset::new(DemoPolicySelectFirst{}))
//!     .with_preset(DemoAgentId::Second, StaticPreset::new(DemoPolicySelectFirst{}));
//! let mut experiment = MultiAgentExperiment::recording(
//!     roster, env, ExperimentOptions::default()).unwrap();
//!
//! experiment.train(1).unwrap().test(1).unwrap();
//!
//! assert_eq!(experiment.frame(), 20);
//! assert_eq!(experiment.episode(), 2);
//! let returns = experiment.writer().series("evaluation/first/returns").unwrap();
//! assert_eq!(returns.values, vec![6.0, 6.0]);
//! assert_eq!(returns.steps, vec![10, 20]);
//! ```

use std::fmt::{Display, Formatter};
use crate::env::{SideInfo, SpaceDescriptor, TurnAction, TurnState};
use crate::agent::{AgentIdentifier, Policy};
use crate::env::SequentialSimulation;
use crate::error::RondoError;
use crate::scheme::Scheme;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DemoAgentId{
    First,
    Second,
}

impl Display for DemoAgentId{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            DemoAgentId::First => write!(f, "first"),
            DemoAgentId::Second => write!(f, "second"),
        }
    }
}

impl AgentIdentifier for DemoAgentId{}

#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("demo simulation error")]
pub struct DemoError{}

#[derive(Clone, Debug)]
pub struct DemoScheme{}

impl Scheme for DemoScheme{
    type AgentId = DemoAgentId;
    type Observation = Vec<f32>;
    type SimError = DemoError;
}

/// Scripted two-agent simulation. Each agent has a fixed number of live
/// turns; the reward observed on its k-th turn and the final reward
/// delivered on its done turn come straight from the script, whatever the
/// actions were. Useful for walking through the turn protocol with known
/// numbers.
#[derive(Clone, Debug)]
pub struct ScriptedDuelSim{
    live: [Vec<f32>; 2],
    finals: [f32; 2],
    taken: [usize; 2],
    seed: u64,
}

impl ScriptedDuelSim{
    pub fn new(first: Vec<f32>, first_final: f32, second: Vec<f32>, second_final: f32) -> Self{
        Self{
            live: [first, second],
            finals: [first_final, second_final],
            taken: [0, 0],
            seed: 0,
        }
    }

    /// The canonical ±6 scenario: agent `first` collects +5, -2, +3 over
    /// ten interleaved frames, agent `second` the exact negation.
    pub fn canonical() -> Self{
        Self::new(
            vec![0.0, 5.0, -2.0, 0.0, 0.0], 3.0,
            vec![0.0, -5.0, 2.0, 0.0, 0.0], -3.0,
        )
    }

    fn index(agent: &DemoAgentId) -> usize{
        match agent{
            DemoAgentId::First => 0,
            DemoAgentId::Second => 1,
        }
    }
}

impl SequentialSimulation<DemoScheme> for ScriptedDuelSim{
    fn agents(&self) -> Vec<DemoAgentId> {
        vec![DemoAgentId::First, DemoAgentId::Second]
    }

    fn reset(&mut self) {
        self.taken = [0, 0];
    }

    fn seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    fn apply(&mut self, agent: &DemoAgentId, _action: i64) -> Result<(), DemoError> {
        let idx = Self::index(agent);
        if self.taken[idx] >= self.live[idx].len(){
            return Err(DemoError{});
        }
        self.taken[idx] += 1;
        Ok(())
    }

    fn dismiss(&mut self, _agent: &DemoAgentId) {}

    fn observe(&self, agent: &DemoAgentId) -> Vec<f32> {
        let idx = Self::index(agent);
        vec![self.taken[idx] as f32, self.seed as f32]
    }

    fn reward(&self, agent: &DemoAgentId) -> f32 {
        let idx = Self::index(agent);
        let taken = self.taken[idx];
        if taken >= self.live[idx].len(){
            self.finals[idx]
        } else {
            self.live[idx][taken]
        }
    }

    fn is_terminal(&self, agent: &DemoAgentId) -> bool {
        let idx = Self::index(agent);
        self.taken[idx] >= self.live[idx].len()
    }

    fn info(&self, _agent: &DemoAgentId) -> SideInfo {
        SideInfo::default()
    }

    fn observation_space(&self, _agent: &DemoAgentId) -> SpaceDescriptor {
        SpaceDescriptor::Continuous { shape: vec![2], low: 0.0, high: f32::MAX }
    }

    fn action_space(&self, _agent: &DemoAgentId) -> SpaceDescriptor {
        SpaceDescriptor::discrete(2)
    }
}

/// Demo policy always choosing the first available action.
#[derive(Copy, Clone, Debug, Default)]
pub struct DemoPolicySelectFirst{}

impl Policy<DemoScheme> for DemoPolicySelectFirst{
    fn select_action(&self, _state: &TurnState<DemoScheme>) -> Result<TurnAction, RondoError<DemoScheme>> {
        Ok(TurnAction::Scalar(0))
    }
}
