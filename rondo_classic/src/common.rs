use enum_map::{enum_map, EnumMap};
use serde::{Deserialize, Serialize};
use crate::domain::ClassicAction;

/// Payoff table of a symmetric two-player matrix game, indexed by own and
/// opponent move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymmetricRewardTable{
    table: EnumMap<ClassicAction, EnumMap<ClassicAction, f32>>,
}

impl SymmetricRewardTable{
    /// Builds the table from the four outcomes of one encounter, named by
    /// the conventional letters: `reward` for mutual cooperation,
    /// `temptation` for defecting on a cooperator, `sucker` for being
    /// defected on, `punishment` for mutual defection.
    pub fn new(reward: f32, temptation: f32, sucker: f32, punishment: f32) -> Self{
        Self{
            table: enum_map! {
                ClassicAction::Cooperate => enum_map! {
                    ClassicAction::Cooperate => reward,
                    ClassicAction::Defect => sucker,
                },
                ClassicAction::Defect => enum_map! {
                    ClassicAction::Cooperate => temptation,
                    ClassicAction::Defect => punishment,
                },
            },
        }
    }

    /// The standard prisoner's dilemma values (3, 5, 0, 1).
    pub fn prisoners_dilemma() -> Self{
        Self::new(3.0, 5.0, 0.0, 1.0)
    }

    pub fn payoff(&self, own: ClassicAction, opponent: ClassicAction) -> f32{
        self.table[own][opponent]
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::domain::ClassicAction::{Cooperate, Defect};

    #[test]
    fn prisoners_dilemma_payoffs(){
        let table = SymmetricRewardTable::prisoners_dilemma();
        assert_eq!(table.payoff(Cooperate, Cooperate), 3.0);
        assert_eq!(table.payoff(Cooperate, Defect), 0.0);
        assert_eq!(table.payoff(Defect, Cooperate), 5.0);
        assert_eq!(table.payoff(Defect, Defect), 1.0);
    }

    #[test]
    fn dilemma_ordering_holds(){
        // T > R > P > S is what makes the dilemma a dilemma
        let table = SymmetricRewardTable::prisoners_dilemma();
        assert!(table.payoff(Defect, Cooperate) > table.payoff(Cooperate, Cooperate));
        assert!(table.payoff(Cooperate, Cooperate) > table.payoff(Defect, Defect));
        assert!(table.payoff(Defect, Defect) > table.payoff(Cooperate, Defect));
    }
}
