use thiserror::Error;
use crate::error::RondoError;
use crate::scheme::Scheme;

/// Error in normalizing an action at the environment boundary.
///
/// The boundary accepts a bare scalar or a container holding exactly one
/// discrete choice; any other shape must fail loudly instead of being
/// truncated to its first element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError{
    #[error("expected exactly one action element, got {elements}")]
    AmbiguousSelection{
        elements: usize
    },
}

impl<S: Scheme> From<ActionError> for RondoError<S>{
    fn from(value: ActionError) -> Self {
        Self::Action{source: value}
    }
}
