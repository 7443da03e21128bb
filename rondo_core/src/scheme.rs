use std::fmt::Debug;
use crate::agent::AgentIdentifier;
use crate::error::SimulationError;

/// Trait locking the domain parameters of one simulation, to ensure the
/// environment wrapper, agents and experiment driver agree on types.
///
/// Rewards are plain `f32` scalars and actions cross the environment
/// boundary as [`TurnAction`](crate::env::TurnAction), so only the types
/// that actually vary between simulations are left open.
pub trait Scheme: Clone + Debug + Send + Sync + 'static{
    /// Identifier distinguishing agents sharing the simulation.
    type AgentId: AgentIdentifier;
    /// Observation exposed to a single agent, typically a fixed-shape
    /// numeric array.
    type Observation: Clone + Debug + Send;
    /// Error type raised inside the wrapped simulation.
    type SimError: SimulationError<Self>;
}
