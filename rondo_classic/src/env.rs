use enum_map::EnumMap;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rondo_core::env::{InfoValue, SequentialSimulation, SideInfo, SpaceDescriptor};
use crate::common::SymmetricRewardTable;
use crate::domain::{ClassicAction, DuelError, DuelPlayer, DuelScheme, NO_ACTION_ENCODING};

/// Iterated two-player matrix duel.
///
/// Players move alternately; once both have moved, the round resolves
/// against the payoff table and each player's payoff is accrued for
/// delivery on its next turn. The duel ends for both players after the
/// target number of rounds; the final round's payoffs arrive on the done
/// turns.
///
/// Observations are `[own_last, opponent_last, rounds_left_fraction,
/// noise]`, where `noise` is a seeded per-turn random feature standing in
/// for imperfect observation.
#[derive(Clone, Debug)]
pub struct IteratedDuelState{
    reward_table: SymmetricRewardTable,
    target_rounds: usize,
    rng: StdRng,
    seed: u64,
    current: DuelPlayer,
    round: usize,
    pending: Option<(DuelPlayer, ClassicAction)>,
    accrued: EnumMap<DuelPlayer, f32>,
    scores: EnumMap<DuelPlayer, f32>,
    last_actions: EnumMap<DuelPlayer, Option<ClassicAction>>,
    noise: f32,
    finished: bool,
}

impl IteratedDuelState{
    pub fn new(target_rounds: usize, reward_table: SymmetricRewardTable) -> Self{
        let mut state = Self{
            reward_table,
            target_rounds,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
            current: DuelPlayer::One,
            round: 0,
            pending: None,
            accrued: EnumMap::default(),
            scores: EnumMap::default(),
            last_actions: EnumMap::default(),
            noise: 0.0,
            finished: false,
        };
        state.reset();
        state
    }

    pub fn round(&self) -> usize{
        self.round
    }

    /// Total payoff collected by `player` so far this episode.
    pub fn score_of(&self, player: DuelPlayer) -> f32{
        self.scores[player]
    }

    fn encode(action: Option<ClassicAction>) -> f32{
        action.map(ClassicAction::encoding).unwrap_or(NO_ACTION_ENCODING)
    }
}

impl SequentialSimulation<DuelScheme> for IteratedDuelState{
    fn agents(&self) -> Vec<DuelPlayer> {
        vec![DuelPlayer::One, DuelPlayer::Two]
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.current = DuelPlayer::One;
        self.round = 0;
        self.pending = None;
        self.accrued = EnumMap::default();
        self.scores = EnumMap::default();
        self.last_actions = EnumMap::default();
        self.noise = self.rng.random_range(0.0..1.0);
        self.finished = false;
    }

    fn seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    fn apply(&mut self, agent: &DuelPlayer, action: i64) -> Result<(), DuelError> {
        if self.finished{
            return Err(DuelError::ActionAfterGameOver(*agent));
        }
        if *agent != self.current{
            return Err(DuelError::ViolatedOrder(*agent, self.current));
        }
        let action = ClassicAction::from_index(action)?;
        trace!("Duel round {}: {} plays {}", self.round + 1, agent, action);

        // the payoff observed on this turn has been consumed
        self.accrued[*agent] = 0.0;
        self.last_actions[*agent] = Some(action);

        match self.pending.take(){
            None => {
                self.pending = Some((*agent, action));
            }
            Some((opener, opening)) => {
                let own = self.reward_table.payoff(action, opening);
                let other = self.reward_table.payoff(opening, action);
                self.accrued[*agent] += own;
                self.accrued[opener] += other;
                self.scores[*agent] += own;
                self.scores[opener] += other;
                self.round += 1;
                if self.round >= self.target_rounds{
                    self.finished = true;
                }
            }
        }
        self.current = self.current.other();
        self.noise = self.rng.random_range(0.0..1.0);
        Ok(())
    }

    fn dismiss(&mut self, agent: &DuelPlayer) {
        trace!("Duel: player {} dismissed after {} rounds", agent, self.round);
    }

    fn observe(&self, agent: &DuelPlayer) -> Vec<f32> {
        let remaining = (self.target_rounds - self.round) as f32 / self.target_rounds as f32;
        vec![
            Self::encode(self.last_actions[*agent]),
            Self::encode(self.last_actions[agent.other()]),
            remaining,
            self.noise,
        ]
    }

    fn reward(&self, agent: &DuelPlayer) -> f32 {
        self.accrued[*agent]
    }

    fn is_terminal(&self, _agent: &DuelPlayer) -> bool {
        self.finished
    }

    fn info(&self, agent: &DuelPlayer) -> SideInfo {
        SideInfo::from([
            ("round".to_string(), InfoValue::Real(self.round as f64)),
            ("score".to_string(), InfoValue::Real(self.scores[*agent] as f64)),
        ])
    }

    fn observation_space(&self, _agent: &DuelPlayer) -> SpaceDescriptor {
        SpaceDescriptor::Continuous { shape: vec![4], low: -1.0, high: 1.0 }
    }

    fn action_space(&self, _agent: &DuelPlayer) -> SpaceDescriptor {
        SpaceDescriptor::discrete(2)
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use rondo_core::agent::{IndependentRoster, SharedPreset, StaticPreset};
    use rondo_core::env::{TurnAction, TurnEnvironment};
    use rondo_core::experiment::{ExperimentOptions, MultiAgentExperiment};
    use crate::policy::{ActionValuePolicy, AlwaysDefect, TitForTat};

    fn duel_env(rounds: usize) -> TurnEnvironment<DuelScheme, IteratedDuelState>{
        let sim = IteratedDuelState::new(rounds, SymmetricRewardTable::prisoners_dilemma());
        TurnEnvironment::new(sim, "iterated_duel")
    }

    #[test]
    fn round_payoffs_arrive_on_the_next_own_turn(){
        let mut env = duel_env(2);
        env.reset().unwrap();

        // round 1: One defects, Two cooperates
        assert_eq!(env.last().unwrap().agent(), &DuelPlayer::One);
        env.step(Some(TurnAction::Scalar(ClassicAction::Defect.index()))).unwrap();
        assert_eq!(env.last().unwrap().reward(), 0.0);
        env.step(Some(TurnAction::Scalar(ClassicAction::Cooperate.index()))).unwrap();

        // One opens round 2 observing the temptation payoff
        let state = env.last().unwrap();
        assert_eq!(state.agent(), &DuelPlayer::One);
        assert_eq!(state.reward(), 5.0);
        assert!(!state.is_done());

        // round 2: both cooperate; final payoffs arrive on the done turns
        env.step(Some(TurnAction::Scalar(ClassicAction::Cooperate.index()))).unwrap();
        let state = env.last().unwrap();
        assert_eq!(state.reward(), 0.0);
        env.step(Some(TurnAction::Scalar(ClassicAction::Cooperate.index()))).unwrap();

        let state = env.last().unwrap();
        assert_eq!(state.agent(), &DuelPlayer::One);
        assert!(state.is_done());
        assert_eq!(state.reward(), 3.0);
        let state = env.step(None).unwrap().unwrap();
        assert_eq!(state.agent(), &DuelPlayer::Two);
        assert!(state.is_done());
        assert_eq!(state.reward(), 3.0);
        assert!(env.step(None).unwrap().is_none());
        assert!(env.is_finished());
    }

    #[test]
    fn observations_expose_last_moves(){
        let mut env = duel_env(3);
        env.reset().unwrap();
        let state = env.reset().unwrap();
        assert_eq!(state.observation()[0], NO_ACTION_ENCODING);
        assert_eq!(state.observation()[1], NO_ACTION_ENCODING);

        env.step(Some(TurnAction::Scalar(ClassicAction::Defect.index()))).unwrap();
        let state = env.last().unwrap();
        // Two sees One's defection as the opponent's last move
        assert_eq!(state.observation()[0], NO_ACTION_ENCODING);
        assert_eq!(state.observation()[1], ClassicAction::Defect.encoding());
    }

    #[test]
    fn tit_for_tat_against_defector_through_the_experiment(){
        let roster = IndependentRoster::new("classic")
            .with_preset(DuelPlayer::One, StaticPreset::new(TitForTat{}))
            .with_preset(DuelPlayer::Two, StaticPreset::new(AlwaysDefect{}));
        let mut experiment = MultiAgentExperiment::recording(
            roster, duel_env(10), ExperimentOptions::default()).unwrap();
        experiment.train(1).unwrap();

        // One is betrayed once and retaliates for the remaining 9 rounds
        let one = experiment.writer().series("evaluation/one/returns").unwrap();
        let two = experiment.writer().series("evaluation/two/returns").unwrap();
        assert_eq!(one.values, vec![9.0]);
        assert_eq!(two.values, vec![14.0]);
        assert_eq!(one.steps, vec![20]);
        assert_eq!(two.steps, vec![20]);
        assert_eq!(experiment.frame(), 20);
    }

    #[test]
    fn same_seed_reproduces_the_same_observation_stream(){
        let collect = |seed: u64| {
            let mut env = duel_env(4);
            env.seed(seed);
            env.reset().unwrap();
            let mut stream = Vec::new();
            while !env.is_finished(){
                let state = env.last().unwrap();
                stream.push(state.observation().clone());
                let action = if state.is_done(){
                    None
                } else {
                    Some(TurnAction::Scalar(ClassicAction::Cooperate.index()))
                };
                env.step(action).unwrap();
            }
            stream
        };
        assert_eq!(collect(7), collect(7));
        assert_ne!(collect(7), collect(8));
    }

    #[test]
    fn evaluation_leaves_the_learner_untouched(){
        let preset = SharedPreset::new(ActionValuePolicy::new(0.0));
        let policy = preset.policy();
        let roster = IndependentRoster::new("learner")
            .with_preset(DuelPlayer::One, preset)
            .with_preset(DuelPlayer::Two, StaticPreset::new(AlwaysDefect{}));
        let mut experiment = MultiAgentExperiment::silent(
            roster, duel_env(5), ExperimentOptions::default()).unwrap();

        experiment.test(3).unwrap();
        assert_eq!(policy.lock().unwrap().updates(), 0);

        experiment.train(2).unwrap();
        assert!(policy.lock().unwrap().updates() > 0);
    }
}
