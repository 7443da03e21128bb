use thiserror::Error;
use crate::error::RondoError;
use crate::scheme::Scheme;

/// Error raised by a metrics writer backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriterError{
    /// Flattened error from the tensorboard event writer.
    #[error("tboard failure in {context}: {error}")]
    Tboard{
        context: String,
        error: String,
    },
    #[error("I/O failure in metrics backend: {explanation}")]
    IO{
        explanation: String,
    },
}

impl<S: Scheme> From<WriterError> for RondoError<S>{
    fn from(value: WriterError) -> Self {
        Self::Metrics{source: value}
    }
}
