use std::collections::HashMap;
use crate::scheme::Scheme;

/// Single value of the opaque side-channel payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoValue{
    Text(String),
    Real(f64),
    Flag(bool),
}

/// Opaque side-channel mapping attached to every turn state. The protocol
/// layer passes it through untouched; its contents are defined by the
/// wrapped simulation alone.
pub type SideInfo = HashMap<String, InfoValue>;

/// Immutable snapshot of one agent's turn.
///
/// Produced fresh by the environment on every turn, consumed by the driver
/// and the acting agent, and discarded before the next turn is produced.
#[derive(Debug, Clone)]
pub struct TurnState<S: Scheme>{
    agent: S::AgentId,
    observation: S::Observation,
    reward: f32,
    done: bool,
    info: SideInfo,
}

impl<S: Scheme> TurnState<S>{
    pub fn new(agent: S::AgentId, observation: S::Observation, reward: f32, done: bool, info: SideInfo) -> Self{
        Self{agent, observation, reward, done, info}
    }

    /// Identifier of the agent this turn belongs to. Always a member of the
    /// agent set registered at environment construction, even after that
    /// agent finished the episode.
    pub fn agent(&self) -> &S::AgentId{
        &self.agent
    }

    pub fn observation(&self) -> &S::Observation{
        &self.observation
    }

    /// Reward accrued by the agent since its previous turn. Zero on the
    /// first turn after a reset.
    pub fn reward(&self) -> f32{
        self.reward
    }

    /// True once this agent has no further turns this episode.
    pub fn is_done(&self) -> bool{
        self.done
    }

    pub fn info(&self) -> &SideInfo{
        &self.info
    }
}
