//! # rondo
//!
//! Crate providing a strict turn-based interaction protocol between many
//! independent agents and one shared simulation, together with an
//! experiment driver running repeatable training and evaluation loops over
//! that interaction.
//!
//! The environment wrapper mediates access to the simulation so that every
//! agent only ever sees its own observation/reward/termination stream, in
//! turn order, with agents allowed to finish at different times. The driver
//! dispatches turns to the registered agents, accumulates each agent's
//! episode return and flushes it to a metrics writer exactly once per
//! episode, keyed by the global frame counter.
//!
//! ## Example
//! For a minimal walkthrough see the [`demo`] module (feature `demo`).
//! ## Licence: MIT

/// Traits and generic implementations of agents, policies and rosters.
pub mod agent;
/// Demonstration scripted simulation and policies.
#[cfg(feature = "demo")]
pub mod demo;
/// Turn-based environment wrapper, turn states, actions and spaces.
pub mod env;
/// Structures used for error handling in the framework.
pub mod error;
/// Experiment driver, progress counters and metrics writers.
pub mod experiment;
/// Domain-parameter trait binding one simulation's types together.
pub mod scheme;
