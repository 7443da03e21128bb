use thiserror::Error;
use crate::error::RondoError;
use crate::scheme::Scheme;

/// Error for capturing misbehavior in the turn protocol.
///
/// Every variant is fatal: the protocol layer never retries and never
/// silently repairs a violated turn order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError<S: Scheme>{
    #[error("step called before the first reset")]
    StepBeforeReset,
    #[error("step called when the episode is already finished")]
    StepAfterEpisodeDone,
    #[error("action supplied for agent {:} which already finished the episode", .0)]
    ActionForDoneAgent(S::AgentId),
    #[error("no action supplied for live agent {:}", .0)]
    MissingAction(S::AgentId),
    #[error("agent {:} is not known to the registry", .0)]
    UnknownAgent(S::AgentId),
    #[error("no agent is currently selected to act")]
    NoAgentSelected,
}

impl<S: Scheme> From<ProtocolError<S>> for RondoError<S>{
    fn from(value: ProtocolError<S>) -> Self {
        Self::Protocol{source: value}
    }
}
