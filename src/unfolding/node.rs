use std::collections::BTreeSet;

use crate::petri::{PlaceId, TransitionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(pub usize);

/// A node of a branching process: a condition or an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeId {
    Condition(ConditionId),
    Event(EventId),
}

impl NodeId {
    pub fn is_condition(&self) -> bool {
        matches!(self, NodeId::Condition(_))
    }

    pub fn is_event(&self) -> bool {
        matches!(self, NodeId::Event(_))
    }
}

impl From<ConditionId> for NodeId {
    fn from(c: ConditionId) -> Self {
        NodeId::Condition(c)
    }
}

impl From<EventId> for NodeId {
    fn from(e: EventId) -> Self {
        NodeId::Event(e)
    }
}

/// A set of pairwise concurrent conditions.
pub type CoSet = BTreeSet<ConditionId>;

/// A maximal co-set.
pub type Cut = BTreeSet<ConditionId>;

/// An occurrence of a place. Initial conditions have no producing event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub(super) place: PlaceId,
    pub(super) pre_event: Option<EventId>,
}

impl Condition {
    pub fn place(&self) -> PlaceId {
        self.place
    }

    pub fn pre_event(&self) -> Option<EventId> {
        self.pre_event
    }
}

/// An occurrence of a transition, consuming its preconditions and producing its postconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub(super) transition: TransitionId,
    pub(super) pre: CoSet,
    pub(super) post: CoSet,
}

impl Event {
    pub fn transition(&self) -> TransitionId {
        self.transition
    }

    pub fn pre_conditions(&self) -> &CoSet {
        &self.pre
    }

    /// Empty until the event is appended to a branching process. Conditions appended later with
    /// this event as their producer are added too.
    pub fn post_conditions(&self) -> &CoSet {
        &self.post
    }
}

/// How two nodes of a branching process are ordered. Exactly one holds for any pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderingRelation {
    /// The first node precedes the second.
    Causal,
    /// The second node precedes the first.
    InverseCausal,
    Conflict,
    Concurrent,
}
