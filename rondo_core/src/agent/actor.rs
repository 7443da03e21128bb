use std::marker::PhantomData;
use crate::agent::{LearningPolicy, Policy};
use crate::env::{TurnAction, TurnState};
use crate::error::RondoError;
use crate::scheme::Scheme;

/// Capability trait of an agent as seen by the experiment driver.
///
/// The driver routes every turn of an agent through `act`, including the
/// agent's final done turn, and knows nothing else about the agent. On a
/// live turn the agent must return `Some(action)`; on its done turn it
/// returns `None` (the turn is advanced with a no-action step regardless -
/// the done turn exists so the agent can consume its terminal reward).
/// Whether acting also updates internal parameters is a property of the
/// implementation, chosen when the agent is constructed - there is no
/// runtime mode flag.
pub trait TurnAgent<S: Scheme>: Send{
    fn act(&mut self, state: &TurnState<S>) -> Result<Option<TurnAction>, RondoError<S>>;
}

/// Frozen agent: selects actions through an immutable policy and never
/// mutates it. Used for evaluation rosters.
pub struct PolicyAgent<S: Scheme, P: Policy<S>>{
    policy: P,
    _scheme: PhantomData<S>,
}

impl<S: Scheme, P: Policy<S>> PolicyAgent<S, P>{
    pub fn new(policy: P) -> Self{
        Self{policy, _scheme: PhantomData}
    }

    pub fn policy(&self) -> &P{
        &self.policy
    }
}

impl<S: Scheme, P: Policy<S>> TurnAgent<S> for PolicyAgent<S, P>{
    fn act(&mut self, state: &TurnState<S>) -> Result<Option<TurnAction>, RondoError<S>> {
        if state.is_done(){
            return Ok(None);
        }
        self.policy.select_action(state).map(Some)
    }
}

/// Learning agent: keeps the pending (state, action) of its previous own
/// turn and feeds the completed transition to its policy before selecting
/// the next action. The done turn delivers the terminal transition and
/// clears the pending slot, so nothing leaks into the next episode.
pub struct LearningAgent<S: Scheme, P: LearningPolicy<S>>{
    policy: P,
    pending: Option<(TurnState<S>, TurnAction)>,
}

impl<S: Scheme, P: LearningPolicy<S>> LearningAgent<S, P>{
    pub fn new(policy: P) -> Self{
        Self{policy, pending: None}
    }

    pub fn policy(&self) -> &P{
        &self.policy
    }
}

impl<S: Scheme, P: LearningPolicy<S>> TurnAgent<S> for LearningAgent<S, P>{
    fn act(&mut self, state: &TurnState<S>) -> Result<Option<TurnAction>, RondoError<S>> {
        if let Some((previous, action)) = self.pending.take(){
            self.policy.observe(&previous, &action, state)?;
        }
        if state.is_done(){
            return Ok(None);
        }
        let action = self.policy.select_action(state)?;
        self.pending = Some((state.clone(), action.clone()));
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::env::SideInfo;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug)]
    struct TestScheme;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("test simulation error")]
    struct TestSimError;

    impl Scheme for TestScheme{
        type AgentId = &'static str;
        type Observation = Vec<f32>;
        type SimError = TestSimError;
    }

    #[derive(Debug, Default)]
    struct CountingPolicy{
        observed: usize,
    }

    impl Policy<TestScheme> for CountingPolicy{
        fn select_action(&self, _state: &TurnState<TestScheme>) -> Result<TurnAction, RondoError<TestScheme>> {
            Ok(TurnAction::Scalar(0))
        }
    }

    impl LearningPolicy<TestScheme> for CountingPolicy{
        fn observe(&mut self, _state: &TurnState<TestScheme>, _action: &TurnAction, _outcome: &TurnState<TestScheme>)
            -> Result<(), RondoError<TestScheme>> {
            self.observed += 1;
            Ok(())
        }
    }

    fn turn(reward: f32, done: bool) -> TurnState<TestScheme>{
        TurnState::new("first", vec![0.0], reward, done, SideInfo::default())
    }

    #[test]
    fn learning_agent_feeds_previous_transition_on_next_own_turn(){
        let policy = Arc::new(Mutex::new(CountingPolicy::default()));
        let mut agent = LearningAgent::new(policy.clone());

        assert!(agent.act(&turn(0.0, false)).unwrap().is_some());
        assert_eq!(policy.lock().unwrap().observed, 0);
        agent.act(&turn(1.0, false)).unwrap();
        assert_eq!(policy.lock().unwrap().observed, 1);
        agent.act(&turn(-1.0, false)).unwrap();
        assert_eq!(policy.lock().unwrap().observed, 2);
    }

    #[test]
    fn done_turn_delivers_terminal_transition_and_yields_no_action(){
        let policy = Arc::new(Mutex::new(CountingPolicy::default()));
        let mut agent = LearningAgent::new(policy.clone());

        agent.act(&turn(0.0, false)).unwrap();
        let outcome = agent.act(&turn(3.0, true)).unwrap();
        assert!(outcome.is_none());
        assert_eq!(policy.lock().unwrap().observed, 1);

        // a fresh episode starts with an empty pending slot
        agent.act(&turn(0.0, false)).unwrap();
        assert_eq!(policy.lock().unwrap().observed, 1);
    }

    #[test]
    fn policy_agent_never_updates_shared_policy(){
        let policy = Arc::new(Mutex::new(CountingPolicy::default()));
        let mut agent = PolicyAgent::new(policy.clone());

        for _ in 0..5{
            assert!(agent.act(&turn(1.0, false)).unwrap().is_some());
        }
        assert!(agent.act(&turn(1.0, true)).unwrap().is_none());
        assert_eq!(policy.lock().unwrap().observed, 0);
    }
}
