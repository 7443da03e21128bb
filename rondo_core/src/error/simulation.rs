use std::error::Error;
use std::fmt::Debug;
use crate::scheme::Scheme;

/// Trait bound for errors raised inside the wrapped simulation.
/// Simulation errors are opaque to the protocol layer, which only needs to
/// clone them into the top level error and surface them unmodified.
pub trait SimulationError<S: Scheme>: Error + Clone + PartialEq + Debug + Send{

}

impl<T: Error + Clone + PartialEq + Debug + Send, S: Scheme> SimulationError<S> for T{

}
