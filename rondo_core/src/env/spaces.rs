use crate::scheme::Scheme;

/// Read-only descriptor of an observation or action space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpaceDescriptor{
    /// `n` distinct choices indexed `0..n`.
    Discrete{
        n: i64
    },
    /// Fixed-shape box of real values.
    Continuous{
        shape: Vec<usize>,
        low: f32,
        high: f32,
    },
}

impl SpaceDescriptor{
    pub fn discrete(n: i64) -> Self{
        SpaceDescriptor::Discrete { n }
    }

    pub fn discrete_cardinality(&self) -> Option<i64>{
        match self{
            SpaceDescriptor::Discrete { n } => Some(*n),
            SpaceDescriptor::Continuous { .. } => None,
        }
    }

    pub fn contains_discrete(&self, choice: i64) -> bool{
        match self{
            SpaceDescriptor::Discrete { n } => (0..*n).contains(&choice),
            SpaceDescriptor::Continuous { .. } => false,
        }
    }
}

/// Immutable per-agent view of the shared environment: the agent's own
/// identifier plus its space descriptors. Handed to agents so they can
/// configure themselves without inspecting the simulation directly.
#[derive(Debug, Clone)]
pub struct AgentSubView<S: Scheme>{
    id: S::AgentId,
    observation_space: SpaceDescriptor,
    action_space: SpaceDescriptor,
}

impl<S: Scheme> AgentSubView<S>{
    pub fn new(id: S::AgentId, observation_space: SpaceDescriptor, action_space: SpaceDescriptor) -> Self{
        Self{id, observation_space, action_space}
    }

    pub fn id(&self) -> &S::AgentId{
        &self.id
    }

    pub fn observation_space(&self) -> &SpaceDescriptor{
        &self.observation_space
    }

    pub fn action_space(&self) -> &SpaceDescriptor{
        &self.action_space
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    #[test]
    fn discrete_membership(){
        let space = SpaceDescriptor::discrete(3);
        assert!(space.contains_discrete(0));
        assert!(space.contains_discrete(2));
        assert!(!space.contains_discrete(3));
        assert!(!space.contains_discrete(-1));
        assert_eq!(space.discrete_cardinality(), Some(3));
    }

    #[test]
    fn continuous_has_no_cardinality(){
        let space = SpaceDescriptor::Continuous { shape: vec![4], low: -1.0, high: 1.0 };
        assert_eq!(space.discrete_cardinality(), None);
        assert!(!space.contains_discrete(0));
    }
}
