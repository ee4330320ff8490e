use std::collections::{BTreeSet, HashMap};

use super::PetriError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub usize);

/// A node of a net, tagged with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Place(PlaceId),
    Transition(TransitionId),
}

impl Node {
    pub fn is_place(&self) -> bool {
        matches!(self, Node::Place(_))
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Node::Transition(_))
    }
}

impl From<PlaceId> for Node {
    fn from(p: PlaceId) -> Self {
        Node::Place(p)
    }
}

impl From<TransitionId> for Node {
    fn from(t: TransitionId) -> Self {
        Node::Transition(t)
    }
}

// Arcs incident to a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Arcs<T: Ord> {
    pre: BTreeSet<T>,
    post: BTreeSet<T>,
}

impl<T: Ord> Arcs<T> {
    fn new() -> Self {
        Arcs {
            pre: BTreeSet::new(),
            post: BTreeSet::new(),
        }
    }
}

// A live node has a label; removed nodes leave a tombstone so later ids stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot<T: Ord> {
    label: Option<String>,
    arcs: Arcs<T>,
}

/// A place/transition net with unit-weight arcs.
///
/// Places and transitions are stored in arenas indexed by [`PlaceId`] and [`TransitionId`].
/// Removing a node leaves its id unused; [`PetriNet::clone_compact`] renumbers densely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PetriNet {
    // arcs of a place point at transitions, and vice versa
    places: Vec<Slot<TransitionId>>,
    transitions: Vec<Slot<PlaceId>>,
}

impl PetriNet {
    pub fn empty() -> Self {
        PetriNet::default()
    }

    pub fn add_place(&mut self, label: impl Into<String>) -> PlaceId {
        self.places.push(Slot {
            label: Some(label.into()),
            arcs: Arcs::new(),
        });
        PlaceId(self.places.len() - 1)
    }

    pub fn add_transition(&mut self, label: impl Into<String>) -> TransitionId {
        self.transitions.push(Slot {
            label: Some(label.into()),
            arcs: Arcs::new(),
        });
        TransitionId(self.transitions.len() - 1)
    }

    pub fn has_place(&self, p: PlaceId) -> bool {
        self.places.get(p.0).is_some_and(|s| s.label.is_some())
    }

    pub fn has_transition(&self, t: TransitionId) -> bool {
        self.transitions.get(t.0).is_some_and(|s| s.label.is_some())
    }

    pub fn contains(&self, node: Node) -> bool {
        match node {
            Node::Place(p) => self.has_place(p),
            Node::Transition(t) => self.has_transition(t),
        }
    }

    fn check(&self, p: PlaceId, t: TransitionId) -> Result<(), PetriError> {
        if !self.has_place(p) {
            return Err(PetriError::UnknownPlace(p));
        }
        if !self.has_transition(t) {
            return Err(PetriError::UnknownTransition(t));
        }
        Ok(())
    }

    /// Add the arc `p → t`. Adding an existing arc does nothing.
    pub fn add_input(&mut self, p: PlaceId, t: TransitionId) -> Result<(), PetriError> {
        self.check(p, t)?;
        self.places[p.0].arcs.post.insert(t);
        self.transitions[t.0].arcs.pre.insert(p);
        Ok(())
    }

    /// Add the arc `t → p`. Adding an existing arc does nothing.
    pub fn add_output(&mut self, t: TransitionId, p: PlaceId) -> Result<(), PetriError> {
        self.check(p, t)?;
        self.transitions[t.0].arcs.post.insert(p);
        self.places[p.0].arcs.pre.insert(t);
        Ok(())
    }

    pub fn places(&self) -> impl Iterator<Item = PlaceId> + '_ {
        (0..self.places.len())
            .map(PlaceId)
            .filter(|&p| self.has_place(p))
    }

    pub fn transitions(&self) -> impl Iterator<Item = TransitionId> + '_ {
        (0..self.transitions.len())
            .map(TransitionId)
            .filter(|&t| self.has_transition(t))
    }

    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.places()
            .map(Node::Place)
            .chain(self.transitions().map(Node::Transition))
    }

    pub fn place_count(&self) -> usize {
        self.places().count()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions().count()
    }

    /// Label of a live node.
    pub fn label(&self, node: Node) -> Option<&str> {
        match node {
            Node::Place(p) => self.places.get(p.0)?.label.as_deref(),
            Node::Transition(t) => self.transitions.get(t.0)?.label.as_deref(),
        }
    }

    /// Input places of `t`.
    ///
    /// # Panics
    ///
    /// When `t` was never added to this net.
    pub fn preset(&self, t: TransitionId) -> &BTreeSet<PlaceId> {
        &self.transitions[t.0].arcs.pre
    }

    /// Output places of `t`.
    ///
    /// # Panics
    ///
    /// When `t` was never added to this net.
    pub fn postset(&self, t: TransitionId) -> &BTreeSet<PlaceId> {
        &self.transitions[t.0].arcs.post
    }

    /// Transitions producing into `p`.
    ///
    /// # Panics
    ///
    /// When `p` was never added to this net.
    pub fn place_preset(&self, p: PlaceId) -> &BTreeSet<TransitionId> {
        &self.places[p.0].arcs.pre
    }

    /// Transitions consuming from `p`.
    ///
    /// # Panics
    ///
    /// When `p` was never added to this net.
    pub fn place_postset(&self, p: PlaceId) -> &BTreeSet<TransitionId> {
        &self.places[p.0].arcs.post
    }

    /// All arcs, as `(source, target)` pairs.
    pub fn flows(&self) -> Vec<(Node, Node)> {
        let mut result = vec![];
        for t in self.transitions() {
            for &p in self.preset(t) {
                result.push((Node::Place(p), Node::Transition(t)));
            }
            for &p in self.postset(t) {
                result.push((Node::Transition(t), Node::Place(p)));
            }
        }
        result
    }

    /// Places without input arcs.
    pub fn source_places(&self) -> Vec<PlaceId> {
        self.places()
            .filter(|&p| self.place_preset(p).is_empty())
            .collect()
    }

    /// Places without output arcs.
    pub fn sink_places(&self) -> Vec<PlaceId> {
        self.places()
            .filter(|&p| self.place_postset(p).is_empty())
            .collect()
    }

    /// Transitions without input arcs.
    pub fn source_transitions(&self) -> Vec<TransitionId> {
        self.transitions()
            .filter(|&t| self.preset(t).is_empty())
            .collect()
    }

    /// Remove `p` and its arcs. Returns false if `p` was not in the net.
    pub fn remove_place(&mut self, p: PlaceId) -> bool {
        if !self.has_place(p) {
            return false;
        }
        let slot = &mut self.places[p.0];
        slot.label = None;
        let arcs = std::mem::replace(&mut slot.arcs, Arcs::new());
        for t in arcs.pre {
            self.transitions[t.0].arcs.post.remove(&p);
        }
        for t in arcs.post {
            self.transitions[t.0].arcs.pre.remove(&p);
        }
        true
    }

    /// Remove `t` and its arcs. Returns false if `t` was not in the net.
    pub fn remove_transition(&mut self, t: TransitionId) -> bool {
        if !self.has_transition(t) {
            return false;
        }
        let slot = &mut self.transitions[t.0];
        slot.label = None;
        let arcs = std::mem::replace(&mut slot.arcs, Arcs::new());
        for p in arcs.pre {
            self.places[p.0].arcs.post.remove(&t);
        }
        for p in arcs.post {
            self.places[p.0].arcs.pre.remove(&t);
        }
        true
    }

    pub fn remove_node(&mut self, node: Node) -> bool {
        match node {
            Node::Place(p) => self.remove_place(p),
            Node::Transition(t) => self.remove_transition(t),
        }
    }

    /// A copy of this net with removed nodes dropped and ids renumbered densely, together with
    /// the map from each live node to its copy.
    pub fn clone_compact(&self) -> (PetriNet, HashMap<Node, Node>) {
        let mut net = PetriNet::empty();
        let mut mapping = HashMap::new();
        let mut place_map = HashMap::new();

        for p in self.places() {
            let q = net.add_place(self.places[p.0].label.clone().unwrap_or_default());
            place_map.insert(p, q);
            mapping.insert(Node::Place(p), Node::Place(q));
        }

        for t in self.transitions() {
            let u = net.add_transition(self.transitions[t.0].label.clone().unwrap_or_default());
            mapping.insert(Node::Transition(t), Node::Transition(u));
            for p in self.preset(t) {
                net.transitions[u.0].arcs.pre.insert(place_map[p]);
                net.places[place_map[p].0].arcs.post.insert(u);
            }
            for p in self.postset(t) {
                net.transitions[u.0].arcs.post.insert(place_map[p]);
                net.places[place_map[p].0].arcs.pre.insert(u);
            }
        }

        (net, mapping)
    }
}
