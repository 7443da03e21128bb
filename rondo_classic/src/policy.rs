use rand::Rng;
use rondo_core::agent::{LearningPolicy, Policy};
use rondo_core::env::{TurnAction, TurnState};
use rondo_core::error::RondoError;
use crate::domain::{ClassicAction, DuelError, DuelScheme};

fn scalar(action: ClassicAction) -> TurnAction{
    TurnAction::Scalar(action.index())
}

/// Cooperates unconditionally.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysCooperate{}

impl Policy<DuelScheme> for AlwaysCooperate{
    fn select_action(&self, _state: &TurnState<DuelScheme>) -> Result<TurnAction, RondoError<DuelScheme>> {
        Ok(scalar(ClassicAction::Cooperate))
    }
}

/// Defects unconditionally.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysDefect{}

impl Policy<DuelScheme> for AlwaysDefect{
    fn select_action(&self, _state: &TurnState<DuelScheme>) -> Result<TurnAction, RondoError<DuelScheme>> {
        Ok(scalar(ClassicAction::Defect))
    }
}

/// Opens cooperating, then mirrors the opponent's previous move as read
/// from the observation.
#[derive(Copy, Clone, Debug, Default)]
pub struct TitForTat{}

impl Policy<DuelScheme> for TitForTat{
    fn select_action(&self, state: &TurnState<DuelScheme>) -> Result<TurnAction, RondoError<DuelScheme>> {
        let opponent_last = state.observation()[1];
        if opponent_last == ClassicAction::Defect.encoding(){
            Ok(scalar(ClassicAction::Defect))
        } else {
            Ok(scalar(ClassicAction::Cooperate))
        }
    }
}

/// Minimal demonstration learner: keeps an incremental mean of the reward
/// following each move and picks the better one epsilon-greedily.
///
/// This exists to exercise the learning/frozen agent split; it is not a
/// serious strategy for the iterated duel.
#[derive(Clone, Debug)]
pub struct ActionValuePolicy{
    epsilon: f64,
    values: [f32; 2],
    counts: [u64; 2],
}

impl ActionValuePolicy{
    pub fn new(epsilon: f64) -> Self{
        Self{epsilon, values: [0.0; 2], counts: [0; 2]}
    }

    pub fn values(&self) -> [f32; 2]{
        self.values
    }

    /// Number of transitions consumed so far.
    pub fn updates(&self) -> u64{
        self.counts.iter().sum()
    }
}

impl Policy<DuelScheme> for ActionValuePolicy{
    fn select_action(&self, _state: &TurnState<DuelScheme>) -> Result<TurnAction, RondoError<DuelScheme>> {
        let mut rng = rand::rng();
        if self.epsilon > 0.0 && rng.random_bool(self.epsilon){
            return Ok(TurnAction::Scalar(rng.random_range(0..2)));
        }
        if self.values[1] > self.values[0]{
            Ok(scalar(ClassicAction::Defect))
        } else {
            Ok(scalar(ClassicAction::Cooperate))
        }
    }
}

impl LearningPolicy<DuelScheme> for ActionValuePolicy{
    fn observe(&mut self, _state: &TurnState<DuelScheme>, action: &TurnAction, outcome: &TurnState<DuelScheme>)
        -> Result<(), RondoError<DuelScheme>> {
        let index = action.clone().into_discrete()?;
        if !(0..2).contains(&index){
            return Err(RondoError::Simulation { source: DuelError::InvalidActionIndex(index) });
        }
        let slot = index as usize;
        self.counts[slot] += 1;
        self.values[slot] += (outcome.reward() - self.values[slot]) / self.counts[slot] as f32;
        Ok(())
    }
}
