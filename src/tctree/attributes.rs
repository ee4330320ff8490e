//! Per-vertex and per-edge attribute stores, and the working copy of the graph that the
//! decomposition mutates while splitting off components.
//!
//! Vertices of the working graph are dense indices `{0..n}`; edges are dense indices which
//! grow as virtual edges are introduced.
use core::ops::{Index, IndexMut};

/// A dense map from working-graph vertices to values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VertexMap<T>(pub(crate) Vec<T>);

impl<T: Clone> VertexMap<T> {
    pub fn new(n: usize, value: T) -> Self {
        VertexMap(vec![value; n])
    }
}

impl<T> Index<usize> for VertexMap<T> {
    type Output = T;
    fn index(&self, v: usize) -> &T {
        &self.0[v]
    }
}

impl<T> IndexMut<usize> for VertexMap<T> {
    fn index_mut(&mut self, v: usize) -> &mut T {
        &mut self.0[v]
    }
}

/// A map from working-graph edges to values.
///
/// Edges created after the map was built read as the default value; writing to one extends
/// the map.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EdgeMap<T> {
    values: Vec<T>,
    default: T,
}

impl<T: Clone> EdgeMap<T> {
    pub fn new(m: usize, default: T) -> Self {
        EdgeMap {
            values: vec![default.clone(); m],
            default,
        }
    }
}

impl<T> Index<usize> for EdgeMap<T> {
    type Output = T;
    fn index(&self, e: usize) -> &T {
        self.values.get(e).unwrap_or(&self.default)
    }
}

impl<T: Clone> IndexMut<usize> for EdgeMap<T> {
    fn index_mut(&mut self, e: usize) -> &mut T {
        if e >= self.values.len() {
            self.values.resize(e + 1, self.default.clone());
        }
        &mut self.values[e]
    }
}

/// Classification of an edge by the depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeType {
    Unseen,
    Tree,
    Frond,
}

/// An edge of the working graph. `origin` is `None` for virtual edges.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WorkEdge<E> {
    pub source: usize,
    pub target: usize,
    pub origin: Option<E>,
}

/// Mutable working copy of the input graph.
///
/// Edges are never deleted, only hidden, so edge indices stay valid for the attribute maps.
#[derive(Debug, Clone)]
pub(crate) struct WorkGraph<E> {
    pub edges: Vec<WorkEdge<E>>,
    pub hidden: EdgeMap<bool>,
    incidence: Vec<Vec<usize>>,
}

impl<E> WorkGraph<E> {
    pub fn new(n: usize) -> Self {
        WorkGraph {
            edges: vec![],
            hidden: EdgeMap::new(0, false),
            incidence: vec![vec![]; n],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn push_edge(&mut self, source: usize, target: usize, origin: Option<E>) -> usize {
        let e = self.edges.len();
        self.edges.push(WorkEdge {
            source,
            target,
            origin,
        });
        self.incidence[source].push(e);
        self.incidence[target].push(e);
        e
    }

    pub fn new_real_edge(&mut self, source: usize, target: usize, origin: E) -> usize {
        self.push_edge(source, target, Some(origin))
    }

    pub fn new_virtual_edge(&mut self, source: usize, target: usize) -> usize {
        self.push_edge(source, target, None)
    }

    pub fn is_virtual(&self, e: usize) -> bool {
        self.edges[e].origin.is_none()
    }

    pub fn hide(&mut self, e: usize) {
        self.hidden[e] = true;
    }

    pub fn source(&self, e: usize) -> usize {
        self.edges[e].source
    }

    pub fn target(&self, e: usize) -> usize {
        self.edges[e].target
    }

    /// The endpoint of `e` which is not `v`.
    pub fn opposite(&self, e: usize, v: usize) -> usize {
        let edge = &self.edges[e];
        if edge.source == v {
            edge.target
        } else {
            edge.source
        }
    }

    pub fn reverse(&mut self, e: usize) {
        let edge = &mut self.edges[e];
        core::mem::swap(&mut edge.source, &mut edge.target);
    }

    pub fn is_hidden(&self, e: usize) -> bool {
        self.hidden[e]
    }

    /// Edges incident to `v`, hidden ones included, in insertion order.
    pub fn incidence(&self, v: usize) -> &[usize] {
        &self.incidence[v]
    }

    /// Visible edges incident to `v`.
    pub fn incident(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.incidence[v].iter().copied().filter(|&e| !self.hidden[e])
    }

    /// Visible edges of the graph.
    pub fn visible_edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.edges.len()).filter(|&e| !self.hidden[e])
    }

    pub fn degree(&self, v: usize) -> usize {
        self.incident(v).count()
    }
}

/// Ordered adjacency lists whose entries can be replaced or deleted in place.
///
/// Each edge remembers the slot it occupies, so it can be removed from whichever list holds it
/// without a search. Deleted slots are left empty, keeping the positions of later entries stable
/// while a list is being walked.
#[derive(Debug, Clone)]
pub(crate) struct Adjacency {
    slots: Vec<Vec<Option<usize>>>,
    in_adj: EdgeMap<Option<(usize, usize)>>,
}

impl Adjacency {
    pub fn new(n: usize) -> Self {
        Adjacency {
            slots: vec![vec![]; n],
            in_adj: EdgeMap::new(0, None),
        }
    }

    pub fn push(&mut self, v: usize, e: usize) {
        let slot = self.slots[v].len();
        self.slots[v].push(Some(e));
        self.in_adj[e] = Some((v, slot));
    }

    /// Number of slots of `v`, including deleted ones.
    pub fn len(&self, v: usize) -> usize {
        self.slots[v].len()
    }

    pub fn live_count(&self, v: usize) -> usize {
        self.slots[v].iter().flatten().count()
    }

    pub fn get(&self, v: usize, slot: usize) -> Option<usize> {
        self.slots[v][slot]
    }

    /// First live entry of `v`.
    pub fn first(&self, v: usize) -> Option<usize> {
        self.slots[v].iter().flatten().next().copied()
    }

    pub fn entries(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.slots[v].iter().flatten().copied()
    }

    /// The position of `e`, if it is in some list.
    pub fn position(&self, e: usize) -> Option<(usize, usize)> {
        self.in_adj[e]
    }

    /// Delete `e` from the list holding it.
    pub fn remove(&mut self, e: usize) {
        if let Some((v, slot)) = self.in_adj[e].take() {
            self.slots[v][slot] = None;
        }
    }

    /// Delete whatever occupies `slot` of `v`.
    pub fn remove_slot(&mut self, v: usize, slot: usize) {
        if let Some(e) = self.slots[v][slot].take() {
            self.in_adj[e] = None;
        }
    }

    /// Put `e` into `slot` of `v`, evicting the previous occupant.
    pub fn replace(&mut self, v: usize, slot: usize, e: usize) {
        self.remove_slot(v, slot);
        self.slots[v][slot] = Some(e);
        self.in_adj[e] = Some((v, slot));
    }

    /// Put `new` in the slot currently held by `old`.
    pub fn replace_edge(&mut self, old: usize, new: usize) {
        if let Some((v, slot)) = self.in_adj[old] {
            self.replace(v, slot, new);
        }
    }
}
