use crate::env::{SideInfo, SpaceDescriptor};
use crate::scheme::Scheme;

/// Interface of the shared simulation wrapped by
/// [`TurnEnvironment`](crate::env::TurnEnvironment).
///
/// Concrete simulations (board games, physical models) live outside this
/// crate; the protocol layer only relies on this contract. Per-agent reward
/// follows accumulate-until-consumed semantics: `reward(agent)` reports
/// everything accrued since the agent's previous action and the simulation
/// clears that accumulator when `apply` is next called for the same agent.
pub trait SequentialSimulation<S: Scheme>: Send{
    /// Full agent roster, fixed for the lifetime of the simulation.
    fn agents(&self) -> Vec<S::AgentId>;

    /// Rewinds the simulation to a fresh episode.
    fn reset(&mut self);

    /// Deterministic reseed of the simulation's random number generators.
    /// Takes effect on the next `reset`.
    fn seed(&mut self, seed: u64);

    /// Applies one discrete action for `agent` and advances the shared
    /// state.
    fn apply(&mut self, agent: &S::AgentId, action: i64) -> Result<(), S::SimError>;

    /// Notifies the simulation that a terminated agent's final turn has
    /// been consumed and the agent leaves the turn order.
    fn dismiss(&mut self, agent: &S::AgentId);

    fn observe(&self, agent: &S::AgentId) -> S::Observation;

    /// Reward accrued by `agent` since its previous action.
    fn reward(&self, agent: &S::AgentId) -> f32;

    /// True once the simulation has no further transitions for `agent`.
    fn is_terminal(&self, agent: &S::AgentId) -> bool;

    /// Opaque side-channel payload for `agent`, passed through verbatim.
    fn info(&self, agent: &S::AgentId) -> SideInfo;

    fn observation_space(&self, agent: &S::AgentId) -> SpaceDescriptor;

    fn action_space(&self, agent: &S::AgentId) -> SpaceDescriptor;
}

impl<S: Scheme, T: SequentialSimulation<S> + ?Sized> SequentialSimulation<S> for Box<T>{
    fn agents(&self) -> Vec<S::AgentId> {
        self.as_ref().agents()
    }

    fn reset(&mut self) {
        self.as_mut().reset()
    }

    fn seed(&mut self, seed: u64) {
        self.as_mut().seed(seed)
    }

    fn apply(&mut self, agent: &S::AgentId, action: i64) -> Result<(), S::SimError> {
        self.as_mut().apply(agent, action)
    }

    fn dismiss(&mut self, agent: &S::AgentId) {
        self.as_mut().dismiss(agent)
    }

    fn observe(&self, agent: &S::AgentId) -> S::Observation {
        self.as_ref().observe(agent)
    }

    fn reward(&self, agent: &S::AgentId) -> f32 {
        self.as_ref().reward(agent)
    }

    fn is_terminal(&self, agent: &S::AgentId) -> bool {
        self.as_ref().is_terminal(agent)
    }

    fn info(&self, agent: &S::AgentId) -> SideInfo {
        self.as_ref().info(agent)
    }

    fn observation_space(&self, agent: &S::AgentId) -> SpaceDescriptor {
        self.as_ref().observation_space(agent)
    }

    fn action_space(&self, agent: &S::AgentId) -> SpaceDescriptor {
        self.as_ref().action_space(agent)
    }
}
