use std::fmt::{Display, Formatter};
use crate::error::ActionError;

/// Discrete action crossing the environment boundary.
///
/// Agents may produce either a bare scalar or a single-element numeric
/// container (e.g. flattened from a tensor); the boundary normalizes both
/// to the scalar before forwarding to the wrapped simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAction{
    Scalar(i64),
    Vector(Vec<i64>),
}

impl TurnAction{
    /// Normalizes to the single discrete choice.
    ///
    /// Precondition: a `Vector` holds exactly one element. Any other shape
    /// is a fatal [`ActionError`] - never truncated.
    pub fn into_discrete(self) -> Result<i64, ActionError>{
        match self{
            TurnAction::Scalar(choice) => Ok(choice),
            TurnAction::Vector(elements) => {
                match elements.as_slice(){
                    [choice] => Ok(*choice),
                    _ => Err(ActionError::AmbiguousSelection { elements: elements.len() })
                }
            }
        }
    }
}

impl Display for TurnAction{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self{
            TurnAction::Scalar(choice) => write!(f, "{}", choice),
            TurnAction::Vector(elements) => write!(f, "{:?}", elements),
        }
    }
}

impl From<i64> for TurnAction{
    fn from(choice: i64) -> Self {
        TurnAction::Scalar(choice)
    }
}

#[cfg(feature = "torch")]
impl TryFrom<&tch::Tensor> for TurnAction{
    type Error = ActionError;

    fn try_from(tensor: &tch::Tensor) -> Result<Self, Self::Error> {
        if tensor.numel() != 1{
            return Err(ActionError::AmbiguousSelection { elements: tensor.numel() });
        }
        Ok(TurnAction::Scalar(tensor.int64_value(&[])))
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn scalar_normalizes_to_itself(){
        assert_eq!(TurnAction::Scalar(3).into_discrete(), Ok(3));
    }

    #[test]
    fn singleton_vector_normalizes_to_its_element(){
        assert_eq!(TurnAction::Vector(vec![7]).into_discrete(), Ok(7));
    }

    #[test]
    fn wider_vector_fails_loudly(){
        assert_eq!(
            TurnAction::Vector(vec![1, 2]).into_discrete(),
            Err(ActionError::AmbiguousSelection { elements: 2 })
        );
        assert_eq!(
            TurnAction::Vector(vec![]).into_discrete(),
            Err(ActionError::AmbiguousSelection { elements: 0 })
        );
    }
}
