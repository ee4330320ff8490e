//! Branching processes of net systems.
//!
//! A [`BranchingProcess`] is an occurrence net grown by the caller, one condition or event at a
//! time, on top of a [`NetSystem`]. It starts from the initial cut (one condition per token of
//! the system's marking). Appending an event also appends one condition per output place of its
//! transition.
//!
//! Any two nodes are in exactly one [`OrderingRelation`]. Causal predecessor sets are kept up to
//! date on every append; conflict and concurrency are computed on demand and memoized. Nodes are
//! never removed, so a memoized relation never goes stale.
//!
//! ```rust
//! use process_graphs::petri::*;
//! use process_graphs::unfolding::*;
//!
//! // p0 → t → p1
//! let mut sys = NetSystem::new(PetriNet::empty());
//! let p0 = sys.add_place("p0");
//! let p1 = sys.add_place("p1");
//! let t = sys.add_transition("t");
//! sys.add_input(p0, t).unwrap();
//! sys.add_output(t, p1).unwrap();
//! sys.load_natural_marking();
//!
//! let mut bp = BranchingProcess::new(&sys);
//! let c0 = *bp.initial_cut().iter().next().unwrap();
//! let e = bp.append_event(BranchingProcess::create_event(t, [c0].into())).unwrap();
//! let c1 = *bp.event(e).post_conditions().iter().next().unwrap();
//!
//! assert_eq!(bp.condition(c1).place(), p1);
//! assert_eq!(bp.ordering_relation(c0.into(), c1.into()), OrderingRelation::Causal);
//! assert!(bp.is_conflict_free());
//! ```
mod node;

pub use node::*;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::petri::{NetSystem, Node, PetriNet, PlaceId, TransitionId};

/// Reasons a node could not be appended. A rejected append changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppendError {
    #[error("an event needs at least one precondition")]
    EmptyPreset,
    #[error("condition {0:?} is not in the branching process")]
    UnknownCondition(ConditionId),
    #[error("event {0:?} is not in the branching process")]
    UnknownEvent(EventId),
    #[error("transition {0:?} is not in the originative net")]
    UnknownTransition(TransitionId),
    #[error("place {0:?} is not in the originative net")]
    UnknownPlace(PlaceId),
}

// Memo key for a symmetric relation.
fn unordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A branching process of a net system, grown by appending conditions and events.
#[derive(Debug)]
pub struct BranchingProcess<'a> {
    system: &'a NetSystem,
    conditions: Vec<Condition>,
    events: Vec<Event>,
    initial_cut: Cut,

    // strict causal predecessors of each node
    condition_causes: Vec<HashSet<NodeId>>,
    event_causes: Vec<HashSet<NodeId>>,

    conflicts: RefCell<HashMap<(NodeId, NodeId), bool>>,
    concurrency: RefCell<HashMap<(NodeId, NodeId), bool>>,
}

impl<'a> BranchingProcess<'a> {
    /// The initial branching process of `system`: a condition for every token of its marking.
    pub fn new(system: &'a NetSystem) -> Self {
        let mut bp = BranchingProcess {
            system,
            conditions: vec![],
            events: vec![],
            initial_cut: Cut::new(),
            condition_causes: vec![],
            event_causes: vec![],
            conflicts: RefCell::new(HashMap::new()),
            concurrency: RefCell::new(HashMap::new()),
        };
        for p in system.marking().to_multiset() {
            let c = bp.push_condition(Self::create_condition(p, None));
            bp.initial_cut.insert(c);
        }
        debug!(conditions = bp.initial_cut.len(), "initial branching process");
        bp
    }

    /// The net system this process unfolds.
    pub fn originative_system(&self) -> &'a NetSystem {
        self.system
    }

    pub fn create_condition(place: PlaceId, pre_event: Option<EventId>) -> Condition {
        Condition { place, pre_event }
    }

    pub fn create_event(transition: TransitionId, pre_conditions: CoSet) -> Event {
        Event {
            transition,
            pre: pre_conditions,
            post: CoSet::new(),
        }
    }

    pub fn create_co_set() -> CoSet {
        CoSet::new()
    }

    pub fn create_cut() -> Cut {
        Cut::new()
    }

    pub fn initial_cut(&self) -> &Cut {
        &self.initial_cut
    }

    /// # Panics
    ///
    /// When `id` is not a condition of this process.
    pub fn condition(&self, id: ConditionId) -> &Condition {
        &self.conditions[id.0]
    }

    /// # Panics
    ///
    /// When `id` is not an event of this process.
    pub fn event(&self, id: EventId) -> &Event {
        &self.events[id.0]
    }

    pub fn conditions(&self) -> impl Iterator<Item = (ConditionId, &Condition)> + '_ {
        self.conditions
            .iter()
            .enumerate()
            .map(|(i, c)| (ConditionId(i), c))
    }

    pub fn events(&self) -> impl Iterator<Item = (EventId, &Event)> + '_ {
        self.events.iter().enumerate().map(|(i, e)| (EventId(i), e))
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        match node {
            NodeId::Condition(c) => c.0 < self.conditions.len(),
            NodeId::Event(e) => e.0 < self.events.len(),
        }
    }

    fn push_condition(&mut self, condition: Condition) -> ConditionId {
        let id = ConditionId(self.conditions.len());
        let mut causes = HashSet::new();
        if let Some(e) = condition.pre_event {
            causes.extend(self.event_causes[e.0].iter().copied());
            causes.insert(NodeId::Event(e));
        }
        if let Some(e) = condition.pre_event {
            self.events[e.0].post.insert(id);
        }
        self.conditions.push(condition);
        self.condition_causes.push(causes);
        id
    }

    /// Append a condition for a place of the originative net, produced by an existing event or
    /// by none. The producing event gains the condition as a postcondition.
    pub fn append_condition(&mut self, condition: Condition) -> Result<ConditionId, AppendError> {
        if !self.system.net().has_place(condition.place) {
            return Err(AppendError::UnknownPlace(condition.place));
        }
        if let Some(e) = condition.pre_event {
            if e.0 >= self.events.len() {
                return Err(AppendError::UnknownEvent(e));
            }
        }
        Ok(self.push_condition(condition))
    }

    /// Append an event whose preconditions are already in the process, together with one new
    /// postcondition per output place of its transition. Any postconditions already set on
    /// `event` are replaced.
    pub fn append_event(&mut self, mut event: Event) -> Result<EventId, AppendError> {
        let system = self.system;
        let net = system.net();
        if !net.has_transition(event.transition) {
            return Err(AppendError::UnknownTransition(event.transition));
        }
        if event.pre.is_empty() {
            return Err(AppendError::EmptyPreset);
        }
        if let Some(&c) = event.pre.iter().find(|c| c.0 >= self.conditions.len()) {
            return Err(AppendError::UnknownCondition(c));
        }

        let id = EventId(self.events.len());
        let mut causes = HashSet::new();
        for &c in &event.pre {
            causes.extend(self.condition_causes[c.0].iter().copied());
            causes.insert(NodeId::Condition(c));
        }
        self.event_causes.push(causes);

        event.post = CoSet::new();
        let transition = event.transition;
        self.events.push(event);

        for &p in net.postset(transition) {
            self.push_condition(Self::create_condition(p, Some(id)));
        }
        debug!(
            event = id.0,
            transition = transition.0,
            post = self.events[id.0].post.len(),
            "appended event"
        );
        Ok(id)
    }

    /// Strict causal predecessors of `node`.
    ///
    /// # Panics
    ///
    /// When `node` is not in this process.
    pub fn causal_predecessors(&self, node: NodeId) -> &HashSet<NodeId> {
        match node {
            NodeId::Condition(c) => &self.condition_causes[c.0],
            NodeId::Event(e) => &self.event_causes[e.0],
        }
    }

    /// True if `a` strictly precedes `b`.
    ///
    /// # Panics
    ///
    /// When `b` is not in this process.
    pub fn are_causal(&self, a: NodeId, b: NodeId) -> bool {
        self.causal_predecessors(b).contains(&a)
    }

    /// True if `b` strictly precedes `a`.
    ///
    /// # Panics
    ///
    /// When `a` is not in this process.
    pub fn are_inverse_causal(&self, a: NodeId, b: NodeId) -> bool {
        self.are_causal(b, a)
    }

    /// True if `a` and `b` are causally unrelated, yet their histories contain two distinct events
    /// consuming a common condition.
    ///
    /// # Panics
    ///
    /// When `a` and `b` differ and either is not in this process.
    pub fn are_in_conflict(&self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let key = unordered(a, b);
        if let Some(&known) = self.conflicts.borrow().get(&key) {
            return known;
        }

        let result = !self.are_causal(a, b)
            && !self.are_inverse_causal(a, b)
            && self.histories_clash(a, b);
        self.conflicts.borrow_mut().insert(key, result);
        result
    }

    // Events among `node` and its causes.
    fn history(&self, node: NodeId) -> Vec<EventId> {
        let mut events: Vec<EventId> = self
            .causal_predecessors(node)
            .iter()
            .filter_map(|n| match n {
                NodeId::Event(e) => Some(*e),
                NodeId::Condition(_) => None,
            })
            .collect();
        if let NodeId::Event(e) = node {
            events.push(e);
        }
        events
    }

    fn histories_clash(&self, a: NodeId, b: NodeId) -> bool {
        let (left, right) = (self.history(a), self.history(b));
        left.iter().any(|&e1| {
            right.iter().any(|&e2| {
                e1 != e2 && !self.events[e1.0].pre.is_disjoint(&self.events[e2.0].pre)
            })
        })
    }

    /// True if `a` and `b` are neither causally related nor in conflict.
    ///
    /// # Panics
    ///
    /// When `a` or `b` is not in this process.
    pub fn are_concurrent(&self, a: NodeId, b: NodeId) -> bool {
        let key = unordered(a, b);
        if let Some(&known) = self.concurrency.borrow().get(&key) {
            return known;
        }

        let result = !self.are_causal(a, b)
            && !self.are_inverse_causal(a, b)
            && !self.are_in_conflict(a, b);
        self.concurrency.borrow_mut().insert(key, result);
        result
    }

    /// The one relation in which `a` stands to `b`.
    ///
    /// # Panics
    ///
    /// When `a` or `b` is not in this process.
    pub fn ordering_relation(&self, a: NodeId, b: NodeId) -> OrderingRelation {
        if self.are_causal(a, b) {
            OrderingRelation::Causal
        } else if self.are_inverse_causal(a, b) {
            OrderingRelation::InverseCausal
        } else if self.are_in_conflict(a, b) {
            OrderingRelation::Conflict
        } else {
            OrderingRelation::Concurrent
        }
    }

    /// True if no condition is consumed by two distinct events.
    pub fn is_conflict_free(&self) -> bool {
        let mut consumer: HashMap<ConditionId, EventId> = HashMap::new();
        for (id, event) in self.events() {
            for &c in &event.pre {
                if consumer.insert(c, id).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// The occurrence net as a plain Petri net.
    ///
    /// Event `i` becomes `TransitionId(i)` and condition `i` becomes `PlaceId(i)`, each labelled
    /// like the transition or place it is an occurrence of.
    pub fn to_petri_net(&self) -> PetriNet {
        let source = self.system.net();
        let mut net = PetriNet::empty();

        for event in &self.events {
            let label = source.label(Node::Transition(event.transition)).unwrap_or_default();
            net.add_transition(label);
        }
        for condition in &self.conditions {
            let label = source.label(Node::Place(condition.place)).unwrap_or_default();
            net.add_place(label);
        }

        for (id, event) in self.events() {
            for &c in &event.pre {
                net.add_input(PlaceId(c.0), TransitionId(id.0))
                    .expect("every condition and event has a node");
            }
        }
        for (id, condition) in self.conditions() {
            if let Some(e) = condition.pre_event {
                net.add_output(TransitionId(e.0), PlaceId(id.0))
                    .expect("every condition and event has a node");
            }
        }
        net
    }
}
