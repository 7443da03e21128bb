//! Classic matrix-game simulations and policies for the `rondo` turn
//! protocol: an iterated two-player duel over a configurable payoff table,
//! plus the usual deterministic strategies to play it with.

mod common;
pub mod domain;
mod env;
pub mod policy;

pub use common::*;
pub use env::*;
