use std::collections::HashMap;

use tracing::trace;

use super::{Marking, Node, PetriError, PetriNet, PlaceId, SystemId, TransitionId};

/// A Petri net together with its current marking.
///
/// The net can only be changed through the system, so removing a place also drops its tokens.
#[derive(Debug)]
pub struct NetSystem {
    id: SystemId,
    net: PetriNet,
    marking: Marking,
}

impl NetSystem {
    /// A system over `net` with no tokens.
    pub fn new(net: PetriNet) -> Self {
        let id = SystemId::fresh();
        NetSystem {
            id,
            net,
            marking: Marking::new(id),
        }
    }

    pub fn id(&self) -> SystemId {
        self.id
    }

    pub fn net(&self) -> &PetriNet {
        &self.net
    }

    pub fn marking(&self) -> &Marking {
        &self.marking
    }

    pub fn add_place(&mut self, label: impl Into<String>) -> PlaceId {
        self.net.add_place(label)
    }

    pub fn add_transition(&mut self, label: impl Into<String>) -> TransitionId {
        self.net.add_transition(label)
    }

    pub fn add_input(&mut self, p: PlaceId, t: TransitionId) -> Result<(), PetriError> {
        self.net.add_input(p, t)
    }

    pub fn add_output(&mut self, t: TransitionId, p: PlaceId) -> Result<(), PetriError> {
        self.net.add_output(t, p)
    }

    pub fn remove_place(&mut self, p: PlaceId) -> bool {
        let removed = self.net.remove_place(p);
        if removed {
            self.marking.remove(p);
        }
        removed
    }

    pub fn remove_transition(&mut self, t: TransitionId) -> bool {
        self.net.remove_transition(t)
    }

    pub fn remove_node(&mut self, node: Node) -> bool {
        match node {
            Node::Place(p) => self.remove_place(p),
            Node::Transition(t) => self.remove_transition(t),
        }
    }

    /// True if `t` is in the net and every input place holds a token.
    pub fn is_enabled(&self, t: TransitionId) -> bool {
        self.net.has_transition(t) && self.net.preset(t).iter().all(|&p| self.is_marked(p))
    }

    pub fn enabled_transitions(&self) -> Vec<TransitionId> {
        self.net
            .transitions()
            .filter(|&t| self.is_enabled(t))
            .collect()
    }

    /// Fire `t`: take a token from every input place and put one on every output place.
    pub fn fire(&mut self, t: TransitionId) -> Result<(), PetriError> {
        if !self.net.has_transition(t) {
            return Err(PetriError::UnknownTransition(t));
        }
        if !self.is_enabled(t) {
            return Err(PetriError::NotEnabled(t));
        }

        for &p in self.net.preset(t) {
            let n = self.marking.get(p);
            self.marking.put(p, n - 1);
        }
        for &p in self.net.postset(t) {
            let n = self.marking.get(p);
            self.marking.put(p, n + 1);
        }
        trace!(transition = t.0, "fired");
        Ok(())
    }

    pub fn marked_places(&self) -> Vec<PlaceId> {
        self.marking.marked_places().collect()
    }

    pub fn is_marked(&self, p: PlaceId) -> bool {
        self.marking.is_marked(p)
    }

    pub fn tokens(&self, p: PlaceId) -> usize {
        self.marking.get(p)
    }

    /// Set the tokens on `p`, returning the previous count.
    pub fn put_tokens(&mut self, p: PlaceId, tokens: usize) -> Result<usize, PetriError> {
        if !self.net.has_place(p) {
            return Err(PetriError::UnknownPlace(p));
        }
        Ok(self.marking.put(p, tokens))
    }

    /// One token on every source place, none elsewhere.
    pub fn load_natural_marking(&mut self) {
        self.marking.clear();
        for p in self.net.source_places() {
            self.marking.put(p, 1);
        }
    }

    /// Replace the current marking by `marking`, which must have been taken from this system.
    pub fn load_marking(&mut self, marking: &Marking) -> Result<(), PetriError> {
        if marking.owner() != self.id {
            return Err(PetriError::ForeignMarking);
        }
        if let Some(p) = marking.marked_places().find(|&p| !self.net.has_place(p)) {
            return Err(PetriError::UnknownPlace(p));
        }

        self.marking.clear();
        for (p, n) in marking.iter() {
            self.marking.put(p, n);
        }
        Ok(())
    }

    /// An independent copy of this system, with its net compacted, and the map from each node to
    /// its copy.
    pub fn clone_with_mapping(&self) -> (NetSystem, HashMap<Node, Node>) {
        let (net, mapping) = self.net.clone_compact();
        let mut clone = NetSystem::new(net);
        for (p, n) in self.marking.iter() {
            if let Some(&Node::Place(q)) = mapping.get(&Node::Place(p)) {
                clone.marking.put(q, n);
            }
        }
        (clone, mapping)
    }
}

impl Clone for NetSystem {
    fn clone(&self) -> Self {
        self.clone_with_mapping().0
    }
}
