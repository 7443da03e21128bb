use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use rand::Rng;
use crate::env::{AgentSubView, TurnAction, TurnState};
use crate::error::RondoError;
use crate::scheme::Scheme;

/// Trait meant for structures working as action selectors.
///
/// A policy is a pure mapping from an observed turn state to an action; it
/// never mutates itself while selecting. Policies that additionally learn
/// implement [`LearningPolicy`].
pub trait Policy<S: Scheme>: Send{
    /// Selects action based on the turn state observed by the agent.
    /// If at least one action is possible result should be `Ok(action)`,
    /// otherwise suggested error is
    /// [`RondoError::NoActionAvailable`](crate::error::RondoError::NoActionAvailable).
    fn select_action(&self, state: &TurnState<S>) -> Result<TurnAction, RondoError<S>>;
}

/// Extension of [`Policy`] for selectors that update internal parameters
/// from observed transitions.
///
/// `state` and `action` describe the agent's previous own turn, `outcome`
/// is the state observed on its next own turn (carrying the reward accrued
/// in between and the termination flag).
pub trait LearningPolicy<S: Scheme>: Policy<S>{
    fn observe(&mut self, state: &TurnState<S>, action: &TurnAction, outcome: &TurnState<S>)
        -> Result<(), RondoError<S>>;
}

impl<S: Scheme, P: Policy<S>> Policy<S> for Arc<Mutex<P>>{
    fn select_action(&self, state: &TurnState<S>) -> Result<TurnAction, RondoError<S>> {
        match self.as_ref().lock(){
            Ok(internal_policy) => {
                internal_policy.select_action(state)
            }
            Err(e) => Err(RondoError::Lock { description: e.to_string(), object: "Policy (select_action)".to_string() })
        }
    }
}

impl<S: Scheme, P: LearningPolicy<S>> LearningPolicy<S> for Arc<Mutex<P>>{
    fn observe(&mut self, state: &TurnState<S>, action: &TurnAction, outcome: &TurnState<S>)
        -> Result<(), RondoError<S>> {
        match self.as_ref().lock(){
            Ok(mut internal_policy) => {
                internal_policy.observe(state, action, outcome)
            }
            Err(e) => Err(RondoError::Lock { description: e.to_string(), object: "Policy (observe)".to_string() })
        }
    }
}

impl<S: Scheme, P: Policy<S>> Policy<S> for Box<P>{
    fn select_action(&self, state: &TurnState<S>) -> Result<TurnAction, RondoError<S>> {
        self.as_ref().select_action(state)
    }
}

/// Generic random policy - selects uniformly from a discrete action space
/// of known cardinality.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RandomPolicy<S: Scheme>{
    actions: i64,
    _scheme: PhantomData<S>,
}

impl<S: Scheme> RandomPolicy<S>{
    pub fn new(actions: i64) -> Self{
        Self{actions, _scheme: PhantomData}
    }

    /// Configures the policy from the agent's sub-view, failing when the
    /// action space is not discrete.
    pub fn from_view(view: &AgentSubView<S>) -> Result<Self, RondoError<S>>{
        view.action_space().discrete_cardinality()
            .map(Self::new)
            .ok_or_else(|| RondoError::NoActionAvailable {
                context: format!("Random policy requires discrete action space, agent {}", view.id())})
    }
}

impl<S: Scheme> Policy<S> for RandomPolicy<S>{
    fn select_action(&self, _state: &TurnState<S>) -> Result<TurnAction, RondoError<S>> {
        if self.actions < 1{
            return Err(RondoError::NoActionAvailable { context: "Random policy over empty action space".into() });
        }
        let mut rng = rand::rng();
        Ok(TurnAction::Scalar(rng.random_range(0..self.actions)))
    }
}
