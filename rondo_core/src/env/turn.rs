use std::collections::HashMap;
use crate::env::{AgentSubView, SequentialSimulation, TurnAction, TurnState};
use crate::error::{ProtocolError, RondoError};
use crate::scheme::Scheme;

/// Episode phase of the environment wrapper.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EpisodePhase{
    Uninitialized,
    InEpisode,
    EpisodeDone,
}

/// Per-agent lifecycle within one episode. An agent flips to `Done` when
/// the simulation reports it terminal; it then receives exactly one final
/// turn (with `done` set in its state) before leaving the turn order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum AgentLifecycle{
    Active,
    Done,
}

/// Turn-based view over a shared simulation.
///
/// The wrapper owns the turn order - a rotation over agents that still have
/// turns left - and mediates all access so that each agent only ever sees
/// its own observation, reward and termination stream, in strict turn
/// order. One atomic turn is: read [`last`](TurnEnvironment::last), act (or
/// skip, for a finished agent), advance with
/// [`step`](TurnEnvironment::step).
#[derive(Debug)]
pub struct TurnEnvironment<S: Scheme, Sim: SequentialSimulation<S>>{
    sim: Sim,
    name: String,
    phase: EpisodePhase,
    order: Vec<S::AgentId>,
    cursor: usize,
    lifecycle: HashMap<S::AgentId, AgentLifecycle>,
    views: HashMap<S::AgentId, AgentSubView<S>>,
    registered: Vec<S::AgentId>,
}

impl<S: Scheme, Sim: SequentialSimulation<S>> TurnEnvironment<S, Sim>{
    pub fn new(sim: Sim, name: impl Into<String>) -> Self{
        let registered = sim.agents();
        let views = registered.iter()
            .map(|id| {
                let view = AgentSubView::new(
                    id.clone(),
                    sim.observation_space(id),
                    sim.action_space(id),
                );
                (id.clone(), view)
            })
            .collect();
        Self{
            sim,
            name: name.into(),
            phase: EpisodePhase::Uninitialized,
            order: Vec::new(),
            cursor: 0,
            lifecycle: HashMap::new(),
            views,
            registered,
        }
    }

    /// Rewinds the simulation to a fresh episode, reinitializes the turn
    /// order to the full agent set and returns the first turn state.
    pub fn reset(&mut self) -> Result<TurnState<S>, RondoError<S>>{
        self.sim.reset();
        self.order = self.registered.clone();
        self.lifecycle = self.registered.iter()
            .map(|id| (id.clone(), AgentLifecycle::Active))
            .collect();
        self.cursor = 0;
        self.phase = EpisodePhase::InEpisode;
        if self.order.is_empty(){
            self.phase = EpisodePhase::EpisodeDone;
            return Err(ProtocolError::NoAgentSelected.into());
        }
        self.refresh_lifecycle();
        #[cfg(feature = "log_debug")]
        log::debug!("Environment {} reset with turn order {:?}", &self.name, &self.order);
        self.last()
    }

    /// Turn state of the currently selected agent. Pure read, callable any
    /// number of times; does not advance the turn order.
    pub fn last(&self) -> Result<TurnState<S>, RondoError<S>>{
        if self.phase != EpisodePhase::InEpisode{
            return Err(ProtocolError::NoAgentSelected.into());
        }
        let agent = self.order[self.cursor].clone();
        let done = self.lifecycle[&agent] == AgentLifecycle::Done;
        Ok(TurnState::new(
            agent.clone(),
            self.sim.observe(&agent),
            self.sim.reward(&agent),
            done,
            self.sim.info(&agent),
        ))
    }

    /// Advances the simulation by one turn.
    ///
    /// A real action is applied for the currently selected live agent. A
    /// `None` action consumes the final turn of an agent that already
    /// finished, removing it from the turn order while still advancing the
    /// underlying simulation. Mismatches - an action for a finished agent,
    /// no action for a live one, stepping outside an episode - are fatal
    /// protocol violations.
    ///
    /// Returns the next turn state, or `None` when the step completed the
    /// episode.
    pub fn step(&mut self, action: Option<TurnAction>) -> Result<Option<TurnState<S>>, RondoError<S>>{
        match self.phase{
            EpisodePhase::Uninitialized => return Err(ProtocolError::StepBeforeReset.into()),
            EpisodePhase::EpisodeDone => return Err(ProtocolError::StepAfterEpisodeDone.into()),
            EpisodePhase::InEpisode => {}
        }
        let agent = self.order[self.cursor].clone();
        let done = self.lifecycle[&agent] == AgentLifecycle::Done;
        match (action, done){
            (Some(_), true) => {
                #[cfg(feature = "log_error")]
                log::error!("Environment {}: action supplied for finished agent {}", &self.name, &agent);
                Err(ProtocolError::ActionForDoneAgent(agent).into())
            }
            (None, false) => Err(ProtocolError::MissingAction(agent).into()),
            (None, true) => {
                self.sim.dismiss(&agent);
                self.order.remove(self.cursor);
                #[cfg(feature = "log_debug")]
                log::debug!("Environment {}: agent {} left the turn order", &self.name, &agent);
                if self.order.is_empty(){
                    self.phase = EpisodePhase::EpisodeDone;
                    return Ok(None);
                }
                if self.cursor >= self.order.len(){
                    self.cursor = 0;
                }
                self.refresh_lifecycle();
                Ok(Some(self.last()?))
            }
            (Some(action), false) => {
                let choice = action.into_discrete()
                    .map_err(|source| RondoError::Action { source })?;
                #[cfg(feature = "log_trace")]
                log::trace!("Environment {}: agent {} plays {}", &self.name, &agent, choice);
                self.sim.apply(&agent, choice)
                    .map_err(|source| RondoError::Simulation { source })?;
                self.refresh_lifecycle();
                self.cursor = (self.cursor + 1) % self.order.len();
                Ok(Some(self.last()?))
            }
        }
    }

    /// True iff `agent` has no further live turns this episode.
    pub fn is_done(&self, agent: &S::AgentId) -> bool{
        matches!(self.lifecycle.get(agent), Some(AgentLifecycle::Done))
    }

    /// Identifier of the agent whose turn it is, `None` outside an episode.
    pub fn current_agent(&self) -> Option<S::AgentId>{
        match self.phase{
            EpisodePhase::InEpisode => Some(self.order[self.cursor].clone()),
            _ => None,
        }
    }

    /// True once every agent of the episode is done and dismissed.
    pub fn is_finished(&self) -> bool{
        self.phase == EpisodePhase::EpisodeDone
    }

    /// Lazy per-episode sequence of agent identifiers in turn order,
    /// exhausted when all agents are done; restartable only via
    /// [`reset`](TurnEnvironment::reset). The iterator doubles as the
    /// stepping handle so a driver loop can act between identifiers.
    pub fn agent_iter(&mut self) -> TurnIter<'_, S, Sim>{
        TurnIter{env: self}
    }

    /// Deterministic reseed of the simulation's random number generators,
    /// effective from the next reset.
    pub fn seed(&mut self, seed: u64){
        self.sim.seed(seed);
    }

    pub fn name(&self) -> &str{
        &self.name
    }

    /// Full agent set registered at construction.
    pub fn agents(&self) -> &[S::AgentId]{
        &self.registered
    }

    pub fn sub_view(&self, agent: &S::AgentId) -> Option<&AgentSubView<S>>{
        self.views.get(agent)
    }

    pub fn sub_views(&self) -> &HashMap<S::AgentId, AgentSubView<S>>{
        &self.views
    }

    pub fn simulation(&self) -> &Sim{
        &self.sim
    }

    fn refresh_lifecycle(&mut self){
        for id in &self.order{
            if self.lifecycle[id] == AgentLifecycle::Active && self.sim.is_terminal(id){
                self.lifecycle.insert(id.clone(), AgentLifecycle::Done);
            }
        }
    }
}

/// Stepping iterator over the turn order of one episode.
pub struct TurnIter<'a, S: Scheme, Sim: SequentialSimulation<S>>{
    env: &'a mut TurnEnvironment<S, Sim>,
}

impl<S: Scheme, Sim: SequentialSimulation<S>> TurnIter<'_, S, Sim>{
    pub fn last(&self) -> Result<TurnState<S>, RondoError<S>>{
        self.env.last()
    }

    pub fn step(&mut self, action: Option<TurnAction>) -> Result<Option<TurnState<S>>, RondoError<S>>{
        self.env.step(action)
    }

    pub fn env(&self) -> &TurnEnvironment<S, Sim>{
        self.env
    }
}

impl<S: Scheme, Sim: SequentialSimulation<S>> Iterator for TurnIter<'_, S, Sim>{
    type Item = S::AgentId;

    fn next(&mut self) -> Option<Self::Item> {
        self.env.current_agent()
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::env::{InfoValue, SideInfo, SpaceDescriptor};
    use crate::error::ActionError;

    #[derive(Clone, Debug)]
    struct TestScheme;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("scripted simulation error")]
    struct ScriptError;

    impl Scheme for TestScheme{
        type AgentId = &'static str;
        type Observation = Vec<f32>;
        type SimError = ScriptError;
    }

    /// Two agents, each with a fixed number of live turns. Rewards are
    /// scripted per live turn; the final reward is delivered on the done
    /// turn.
    struct ScriptSim{
        live: Vec<(&'static str, Vec<f32>, f32)>,
        taken: HashMap<&'static str, usize>,
    }

    impl ScriptSim{
        fn new(live: Vec<(&'static str, Vec<f32>, f32)>) -> Self{
            let taken = live.iter().map(|(id, _, _)| (*id, 0usize)).collect();
            Self{live, taken}
        }

        fn pair() -> Self{
            Self::new(vec![
                ("first", vec![0.0, 5.0, -2.0, 0.0, 0.0], 3.0),
                ("second", vec![0.0, -5.0, 2.0, 0.0, 0.0], -3.0),
            ])
        }

        fn script(&self, agent: &&'static str) -> &(&'static str, Vec<f32>, f32){
            self.live.iter().find(|(id, _, _)| id == agent).unwrap()
        }
    }

    impl SequentialSimulation<TestScheme> for ScriptSim{
        fn agents(&self) -> Vec<&'static str> {
            self.live.iter().map(|(id, _, _)| *id).collect()
        }

        fn reset(&mut self) {
            for taken in self.taken.values_mut(){
                *taken = 0;
            }
        }

        fn seed(&mut self, _seed: u64) {}

        fn apply(&mut self, agent: &&'static str, _action: i64) -> Result<(), ScriptError> {
            let turns = self.script(agent).1.len();
            let taken = self.taken.get_mut(agent).unwrap();
            if *taken >= turns{
                return Err(ScriptError);
            }
            *taken += 1;
            Ok(())
        }

        fn dismiss(&mut self, _agent: &&'static str) {}

        fn observe(&self, agent: &&'static str) -> Vec<f32> {
            vec![self.taken[agent] as f32]
        }

        fn reward(&self, agent: &&'static str) -> f32 {
            let (_, live, final_reward) = self.script(agent);
            let taken = self.taken[agent];
            if taken >= live.len(){
                *final_reward
            } else {
                live[taken]
            }
        }

        fn is_terminal(&self, agent: &&'static str) -> bool {
            self.taken[agent] >= self.script(agent).1.len()
        }

        fn info(&self, agent: &&'static str) -> SideInfo {
            SideInfo::from([("turns_taken".to_string(), InfoValue::Real(self.taken[agent] as f64))])
        }

        fn observation_space(&self, _agent: &&'static str) -> SpaceDescriptor {
            SpaceDescriptor::Continuous { shape: vec![1], low: 0.0, high: f32::MAX }
        }

        fn action_space(&self, _agent: &&'static str) -> SpaceDescriptor {
            SpaceDescriptor::discrete(2)
        }
    }

    fn pair_env() -> TurnEnvironment<TestScheme, ScriptSim>{
        TurnEnvironment::new(ScriptSim::pair(), "script")
    }

    #[test]
    fn step_before_reset_is_fatal(){
        let mut env = pair_env();
        let result = env.step(Some(TurnAction::Scalar(0)));
        assert!(matches!(
            result,
            Err(RondoError::Protocol { source: ProtocolError::StepBeforeReset })
        ));
    }

    #[test]
    fn reset_selects_first_agent_with_zero_reward(){
        let mut env = pair_env();
        let state = env.reset().unwrap();
        assert_eq!(state.agent(), &"first");
        assert_eq!(state.reward(), 0.0);
        assert!(!state.is_done());
    }

    #[test]
    fn last_is_a_pure_read(){
        let mut env = pair_env();
        env.reset().unwrap();
        let a = env.last().unwrap();
        let b = env.last().unwrap();
        assert_eq!(a.agent(), b.agent());
        assert_eq!(a.reward(), b.reward());
        assert_eq!(env.current_agent(), Some("first"));
    }

    #[test]
    fn turn_order_alternates_between_live_agents(){
        let mut env = pair_env();
        env.reset().unwrap();
        let mut seen = Vec::new();
        for _ in 0..4{
            let state = env.last().unwrap();
            seen.push(*state.agent());
            env.step(Some(TurnAction::Scalar(0))).unwrap();
        }
        assert_eq!(seen, vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn episode_runs_to_completion_and_rejects_further_steps(){
        let mut env = pair_env();
        env.reset().unwrap();
        let mut live_turns = 0;
        let mut done_turns = 0;
        while !env.is_finished(){
            let state = env.last().unwrap();
            if state.is_done(){
                done_turns += 1;
                env.step(None).unwrap();
            } else {
                live_turns += 1;
                env.step(Some(TurnAction::Scalar(0))).unwrap();
            }
        }
        assert_eq!(live_turns, 10);
        assert_eq!(done_turns, 2);
        assert!(matches!(
            env.step(None),
            Err(RondoError::Protocol { source: ProtocolError::StepAfterEpisodeDone })
        ));
        assert!(env.last().is_err());
    }

    #[test]
    fn done_turn_carries_final_reward(){
        let mut env = pair_env();
        env.reset().unwrap();
        loop{
            let state = env.last().unwrap();
            if state.is_done(){
                assert_eq!(state.agent(), &"first");
                assert_eq!(state.reward(), 3.0);
                break;
            }
            env.step(Some(TurnAction::Scalar(0))).unwrap();
        }
    }

    #[test]
    fn action_for_done_agent_is_fatal(){
        let mut env = pair_env();
        env.reset().unwrap();
        loop{
            let state = env.last().unwrap();
            if state.is_done(){
                break;
            }
            env.step(Some(TurnAction::Scalar(0))).unwrap();
        }
        assert!(matches!(
            env.step(Some(TurnAction::Scalar(0))),
            Err(RondoError::Protocol { source: ProtocolError::ActionForDoneAgent("first") })
        ));
    }

    #[test]
    fn missing_action_for_live_agent_is_fatal(){
        let mut env = pair_env();
        env.reset().unwrap();
        assert!(matches!(
            env.step(None),
            Err(RondoError::Protocol { source: ProtocolError::MissingAction("first") })
        ));
    }

    #[test]
    fn malformed_action_container_is_fatal(){
        let mut env = pair_env();
        env.reset().unwrap();
        let result = env.step(Some(TurnAction::Vector(vec![0, 1])));
        assert!(matches!(
            result,
            Err(RondoError::Action { source: ActionError::AmbiguousSelection { elements: 2 } })
        ));
        // the singleton container is the accepted shape
        env.step(Some(TurnAction::Vector(vec![0]))).unwrap();
        assert_eq!(env.current_agent(), Some("second"));
    }

    #[test]
    fn is_done_tracks_lifecycle(){
        let mut env = pair_env();
        env.reset().unwrap();
        assert!(!env.is_done(&"first"));
        while !env.is_finished(){
            let state = env.last().unwrap();
            let action = if state.is_done(){ None } else { Some(TurnAction::Scalar(0)) };
            env.step(action).unwrap();
        }
        assert!(env.is_done(&"first"));
        assert!(env.is_done(&"second"));
    }

    #[test]
    fn agent_iter_walks_the_episode(){
        let mut env = pair_env();
        env.reset().unwrap();
        let mut ids = Vec::new();
        let mut turns = env.agent_iter();
        while let Some(agent) = turns.next(){
            ids.push(agent);
            let state = TurnIter::last(&turns).unwrap();
            let action = if state.is_done(){ None } else { Some(TurnAction::Scalar(0)) };
            turns.step(action).unwrap();
        }
        assert_eq!(ids.len(), 12);
        assert_eq!(&ids[..4], &["first", "second", "first", "second"]);
        assert_eq!(&ids[10..], &["first", "second"]);
        assert!(env.is_finished());
    }

    #[test]
    fn info_payload_passes_through_untouched(){
        let mut env = pair_env();
        env.reset().unwrap();
        env.step(Some(TurnAction::Scalar(0))).unwrap();
        env.step(Some(TurnAction::Scalar(0))).unwrap();
        let state = env.last().unwrap();
        assert_eq!(state.info().get("turns_taken"), Some(&InfoValue::Real(1.0)));
    }

    #[test]
    fn sub_views_expose_space_descriptors(){
        let env = pair_env();
        let view = env.sub_view(&"first").unwrap();
        assert_eq!(view.id(), &"first");
        assert_eq!(view.action_space().discrete_cardinality(), Some(2));
        assert_eq!(env.sub_views().len(), 2);
    }
}
