use std::collections::HashSet;
use std::hash::Hash;

/// Identifies a pair of virtual edges. Each id appears in exactly two skeletons of a
/// [`crate::tctree::TCTree`]: the two attachment points of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualEdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkeletonEdgeKind<E> {
    /// An edge of the decomposed graph.
    Real(E),
    /// A synthetic edge standing for the rest of the graph beyond a separation pair.
    Virtual(VirtualEdgeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkeletonEdge<V, E> {
    pub source: V,
    pub target: V,
    pub kind: SkeletonEdgeKind<E>,
}

impl<V: PartialEq, E> SkeletonEdge<V, E> {
    pub fn is_virtual(&self) -> bool {
        matches!(self.kind, SkeletonEdgeKind::Virtual(_))
    }

    pub fn connects(&self, u: &V, v: &V) -> bool {
        (self.source == *u && self.target == *v) || (self.source == *v && self.target == *u)
    }
}

/// The graph owned by one node of a [`crate::tctree::TCTree`]: a multigraph over vertices of
/// the decomposed graph whose edges are either real or virtual.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skeleton<V, E> {
    pub(super) edges: Vec<SkeletonEdge<V, E>>,
}

impl<V, E> Default for Skeleton<V, E> {
    fn default() -> Self {
        Skeleton { edges: vec![] }
    }
}

impl<V: Copy + Eq + Hash, E: Copy + Eq> Skeleton<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, source: V, target: V, edge: E) {
        self.edges.push(SkeletonEdge {
            source,
            target,
            kind: SkeletonEdgeKind::Real(edge),
        });
    }

    pub fn add_virtual_edge(&mut self, source: V, target: V, id: VirtualEdgeId) {
        self.edges.push(SkeletonEdge {
            source,
            target,
            kind: SkeletonEdgeKind::Virtual(id),
        });
    }

    pub fn edges(&self) -> &[SkeletonEdge<V, E>] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Real edges, in skeleton order.
    pub fn real_edges(&self) -> impl Iterator<Item = E> + '_ {
        self.edges.iter().filter_map(|e| match e.kind {
            SkeletonEdgeKind::Real(x) => Some(x),
            SkeletonEdgeKind::Virtual(_) => None,
        })
    }

    /// Virtual edge ids, in skeleton order.
    pub fn virtual_edges(&self) -> impl Iterator<Item = VirtualEdgeId> + '_ {
        self.edges.iter().filter_map(|e| match e.kind {
            SkeletonEdgeKind::Real(_) => None,
            SkeletonEdgeKind::Virtual(id) => Some(id),
        })
    }

    pub fn contains_real(&self, edge: E) -> bool {
        self.real_edges().any(|x| x == edge)
    }

    pub fn contains_virtual(&self, id: VirtualEdgeId) -> bool {
        self.virtual_edges().any(|x| x == id)
    }

    /// Distinct vertices, in order of first appearance.
    pub fn vertices(&self) -> Vec<V> {
        let mut seen = HashSet::new();
        let mut result = vec![];
        for e in &self.edges {
            for v in [e.source, e.target] {
                if seen.insert(v) {
                    result.push(v);
                }
            }
        }
        result
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Number of skeleton edges (real or virtual) incident to `v`.
    pub fn degree(&self, v: V) -> usize {
        self.edges
            .iter()
            .map(|e| (e.source == v) as usize + (e.target == v) as usize)
            .sum()
    }

    /// All skeleton edges between `u` and `v`.
    pub fn edges_between(&self, u: V, v: V) -> Vec<&SkeletonEdge<V, E>> {
        self.edges.iter().filter(|e| e.connects(&u, &v)).collect()
    }

    /// Endpoints of the virtual edge `id`, if it belongs to this skeleton.
    pub fn virtual_endpoints(&self, id: VirtualEdgeId) -> Option<(V, V)> {
        self.edges
            .iter()
            .find(|e| e.kind == SkeletonEdgeKind::Virtual(id))
            .map(|e| (e.source, e.target))
    }
}
