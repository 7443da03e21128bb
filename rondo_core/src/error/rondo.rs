use thiserror::Error;
use crate::error::{ActionError, ProtocolError, WriterError};
use crate::scheme::Scheme;

/// Top level crate error, constructed from more specific error.
#[derive(Debug, Clone, Error)]
pub enum RondoError<S: Scheme>{
    /// Error occurring in the wrapped simulation's own game logic.
    #[error("Simulation error: {source}")]
    Simulation{
        #[source]
        source: S::SimError
    },
    /// General protocol violation, e.g. when an action is supplied on a turn
    /// of an agent that already finished the episode.
    #[error("Protocol error: {source}")]
    Protocol{
        #[source]
        source: ProtocolError<S>
    },
    /// Error when normalizing action shape at the environment boundary.
    #[error("Action error: {source}")]
    Action{
        #[source]
        source: ActionError
    },
    /// Error in the metrics writer backend.
    #[error("Metrics error: {source}")]
    Metrics{
        #[source]
        source: WriterError
    },
    /// Special error for policies to raise when no action can be selected.
    #[error("No action available: {context}")]
    NoActionAvailable{
        context: String
    },
    /// Error on locking shared object, built from [`PoisonError`](std::sync::PoisonError).
    #[error("Lock error on {object:} with {description:}")]
    Lock{
        description: String,
        object: String,
    },
    /// Custom error to return if error does not fit any other category.
    #[error("Custom: {0}")]
    Custom(String),
}
