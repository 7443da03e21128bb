mod action;
mod protocol;
mod rondo;
mod simulation;
mod writer;

pub use action::*;
pub use protocol::*;
pub use rondo::*;
pub use simulation::*;
pub use writer::*;
