use std::fmt::{Display, Formatter};
use enum_map::Enum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use rondo_core::agent::AgentIdentifier;
use rondo_core::scheme::Scheme;

/// Identifier of a duel participant.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum DuelPlayer{
    One,
    Two,
}

impl DuelPlayer{
    pub fn other(self) -> Self{
        match self{
            DuelPlayer::One => DuelPlayer::Two,
            DuelPlayer::Two => DuelPlayer::One,
        }
    }

    pub fn index(self) -> usize{
        match self{
            DuelPlayer::One => 0,
            DuelPlayer::Two => 1,
        }
    }
}

impl Display for DuelPlayer{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            DuelPlayer::One => write!(f, "one"),
            DuelPlayer::Two => write!(f, "two"),
        }
    }
}

impl AgentIdentifier for DuelPlayer{}

/// Move in a single encounter of the duel.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum ClassicAction{
    Cooperate,
    Defect,
}

/// Observation encoding of "no move made yet".
pub const NO_ACTION_ENCODING: f32 = -1.0;

impl ClassicAction{
    pub fn index(self) -> i64{
        match self{
            ClassicAction::Cooperate => 0,
            ClassicAction::Defect => 1,
        }
    }

    pub fn from_index(index: i64) -> Result<Self, DuelError>{
        match index{
            0 => Ok(ClassicAction::Cooperate),
            1 => Ok(ClassicAction::Defect),
            other => Err(DuelError::InvalidActionIndex(other)),
        }
    }

    /// Observation encoding of the move; [`NO_ACTION_ENCODING`] marks the
    /// absence of one.
    pub fn encoding(self) -> f32{
        self.index() as f32
    }
}

impl Display for ClassicAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Internal error of the duel simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError{
    #[error("player {0} moved after the duel was over")]
    ActionAfterGameOver(DuelPlayer),
    #[error("invalid action index: {0}")]
    InvalidActionIndex(i64),
    #[error("player {0} moved on turn of {1}")]
    ViolatedOrder(DuelPlayer, DuelPlayer),
}

/// Domain parameters of the iterated duel.
#[derive(Clone, Debug)]
pub struct DuelScheme{}

impl Scheme for DuelScheme{
    type AgentId = DuelPlayer;
    type Observation = Vec<f32>;
    type SimError = DuelError;
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn action_indices_roundtrip(){
        for action in [ClassicAction::Cooperate, ClassicAction::Defect]{
            assert_eq!(ClassicAction::from_index(action.index()), Ok(action));
        }
        assert_eq!(
            ClassicAction::from_index(2),
            Err(DuelError::InvalidActionIndex(2))
        );
    }
}
