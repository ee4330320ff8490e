//! The tree of triconnected components of a biconnected multigraph.
//!
//! Splitting a biconnected graph at its separation pairs yields three kinds of pieces, each
//! stored as a [`Skeleton`]:
//!
//! - a *bond*: two vertices joined by three or more parallel edges,
//! - a *polygon*: a simple cycle,
//! - a *rigid* component: a triconnected simple graph.
//!
//! Where the graph was split, both sides receive a virtual edge carrying the same
//! [`VirtualEdgeId`]. Those pairs are the edges of the [`TCTree`], which is rooted at the node
//! whose skeleton holds the chosen reference edge.
//!
//! ```rust
//! use process_graphs::graph::*;
//! use process_graphs::tctree::*;
//!
//! // a square with one diagonal splits at the diagonal's endpoints
//! let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap();
//! let tree = TCTree::with_reference(&g, EdgeId(0)).unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.nodes_of_type(TCType::Bond).len(), 1);
//! assert_eq!(tree.nodes_of_type(TCType::Polygon).len(), 2);
//!
//! let root = tree.root().unwrap();
//! assert!(tree.node(root).skeleton().contains_real(EdgeId(0)));
//! assert_eq!(tree.children(root).len(), 1);
//! ```
mod attributes;
mod dfs;
mod skeleton;

pub use skeleton::*;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

use tracing::{debug, trace};

use crate::graph::MultiGraph;
use crate::tree::RootedTree;
use crate::union_find::UnionFind;
use attributes::WorkGraph;
use dfs::{order_adjacency, LowPoints, Numbering, PathSearch};

/// The shape of a triconnected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TCType {
    Bond,
    Polygon,
    Rigid,
}

impl TCType {
    fn prefix(self) -> char {
        match self {
            TCType::Bond => 'B',
            TCType::Polygon => 'P',
            TCType::Rigid => 'R',
        }
    }

    /// Classify a skeleton by its shape: two vertices make a bond, a cycle makes a polygon, and
    /// anything else is rigid.
    pub fn of<V: Copy + Eq + Hash, E: Copy + Eq>(skeleton: &Skeleton<V, E>) -> TCType {
        let mut degree: HashMap<V, usize> = HashMap::new();
        for edge in skeleton.edges() {
            *degree.entry(edge.source).or_default() += 1;
            *degree.entry(edge.target).or_default() += 1;
        }

        if degree.len() == 2 {
            TCType::Bond
        } else if skeleton.edge_count() == degree.len() && degree.values().all(|&d| d == 2) {
            TCType::Polygon
        } else {
            TCType::Rigid
        }
    }
}

/// Index of a node in a [`TCTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TCNodeId(pub usize);

/// A triconnected component: its skeleton, its shape, and a display name such as `"P0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TCTreeNode<V, E> {
    skeleton: Skeleton<V, E>,
    kind: TCType,
    name: String,
}

impl<V, E> TCTreeNode<V, E> {
    pub fn skeleton(&self) -> &Skeleton<V, E> {
        &self.skeleton
    }

    pub fn kind(&self) -> TCType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Knobs for [`TCTree::with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionOptions {
    /// Merge adjacent components of the same type (bond with bond, polygon with polygon) so that
    /// no two neighbouring tree nodes are both bonds or both polygons.
    pub merge_bonds_and_polygons: bool,
}

/// Reasons a graph cannot be decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecompositionError {
    #[error("reference edge is not an edge of the graph")]
    MissingReferenceEdge,
    #[error("graph contains a self-loop")]
    SelfLoop,
    #[error("graph is not biconnected")]
    NotBiconnected,
}

/// The tree of triconnected components of a biconnected multigraph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TCTree<V, E> {
    nodes: Vec<TCTreeNode<V, E>>,
    tree: RootedTree,
    reference: Option<E>,
    graph_root: Option<V>,
}

impl<V, E> TCTree<V, E> {
    /// The decomposition of a graph without edges.
    pub fn empty() -> Self {
        TCTree {
            nodes: vec![],
            tree: RootedTree::empty(),
            reference: None,
            graph_root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The edge the tree was rooted at.
    pub fn reference_edge(&self) -> Option<&E> {
        self.reference.as_ref()
    }

    /// The vertex the depth-first searches started from: the first endpoint of the reference edge.
    pub fn graph_root(&self) -> Option<&V> {
        self.graph_root.as_ref()
    }

    /// # Panics
    ///
    /// When `id` is not a node of this tree.
    pub fn node(&self, id: TCNodeId) -> &TCTreeNode<V, E> {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (TCNodeId, &TCTreeNode<V, E>)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (TCNodeId(i), n))
    }

    pub fn nodes_of_type(&self, kind: TCType) -> Vec<TCNodeId> {
        self.nodes()
            .filter(|(_, n)| n.kind == kind)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn root(&self) -> Option<TCNodeId> {
        self.tree.root().map(TCNodeId)
    }

    pub fn is_root(&self, id: TCNodeId) -> bool {
        self.tree.is_root(id.0)
    }

    /// Root the tree at another node. Out of range ids leave the tree unchanged.
    pub fn reroot(&mut self, id: TCNodeId) -> Option<TCNodeId> {
        self.tree.reroot(id.0).map(TCNodeId)
    }

    pub fn parent(&self, id: TCNodeId) -> Option<TCNodeId> {
        self.tree.parent(id.0).map(TCNodeId)
    }

    pub fn children(&self, id: TCNodeId) -> Vec<TCNodeId> {
        self.tree.children(id.0).into_iter().map(TCNodeId).collect()
    }

    pub fn is_parent(&self, parent: TCNodeId, child: TCNodeId) -> bool {
        self.tree.is_parent(parent.0, child.0)
    }

    pub fn is_child(&self, child: TCNodeId, parent: TCNodeId) -> bool {
        self.tree.is_child(child.0, parent.0)
    }

    pub fn is_ancestor(&self, ancestor: TCNodeId, id: TCNodeId) -> bool {
        self.tree.is_ancestor(ancestor.0, id.0)
    }

    pub fn is_descendant(&self, id: TCNodeId, ancestor: TCNodeId) -> bool {
        self.tree.is_descendant(id.0, ancestor.0)
    }

    pub fn lca(&self, a: TCNodeId, b: TCNodeId) -> TCNodeId {
        TCNodeId(self.tree.lca(a.0, b.0))
    }

    /// Nodes in depth-first pre-order from the root.
    pub fn preorder(&self) -> Vec<TCNodeId> {
        self.tree.preorder().into_iter().map(TCNodeId).collect()
    }
}

impl<V: Copy + Eq + Hash, E: Copy + Eq> TCTree<V, E> {
    /// The other node holding the virtual edge `id`, seen from `node`.
    pub fn sibling(&self, node: TCNodeId, id: VirtualEdgeId) -> Option<TCNodeId> {
        self.nodes()
            .find(|&(other, n)| other != node && n.skeleton.contains_virtual(id))
            .map(|(other, _)| other)
    }

    /// Every real edge of every skeleton.
    pub fn real_edges(&self) -> impl Iterator<Item = E> + '_ {
        self.nodes.iter().flat_map(|n| n.skeleton.real_edges())
    }
}

impl<V, E> TCTree<V, E>
where
    V: Copy + Eq + Hash + core::fmt::Debug,
    E: Copy + Eq + Hash + core::fmt::Debug,
{
    /// Decompose `graph`, rooting the tree at its first edge.
    pub fn new<G>(graph: &G) -> Result<Self, DecompositionError>
    where
        G: MultiGraph<Vertex = V, Edge = E>,
    {
        match graph.edges().next() {
            None => Ok(Self::empty()),
            Some(reference) => Self::with_reference(graph, reference),
        }
    }

    /// Decompose `graph`, rooting the tree at the node holding `reference`.
    pub fn with_reference<G>(graph: &G, reference: E) -> Result<Self, DecompositionError>
    where
        G: MultiGraph<Vertex = V, Edge = E>,
    {
        Self::with_options(graph, reference, DecompositionOptions::default())
    }

    pub fn with_options<G>(
        graph: &G,
        reference: E,
        options: DecompositionOptions,
    ) -> Result<Self, DecompositionError>
    where
        G: MultiGraph<Vertex = V, Edge = E>,
    {
        if !graph.contains_edge(reference) {
            return Err(DecompositionError::MissingReferenceEdge);
        }

        let vertices: Vec<V> = graph.vertices().collect();
        let index: HashMap<V, usize> = vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();

        let mut g = WorkGraph::new(vertices.len());
        for e in graph.edges() {
            let (s, t) = graph.endpoints(e);
            if s == t {
                return Err(DecompositionError::SelfLoop);
            }
            g.new_real_edge(index[&s], index[&t], e);
        }
        debug!(
            vertices = g.vertex_count(),
            edges = g.edge_count(),
            "decomposing graph"
        );

        let graph_root = graph.endpoints(reference).0;
        let components = if g.vertex_count() <= 2 {
            vec![g.visible_edges().collect()]
        } else {
            split_components(&mut g, index[&graph_root])?
        };

        let mut skeletons = to_skeletons(&g, &vertices, &components);
        if options.merge_bonds_and_polygons {
            skeletons = merge_bonds_and_polygons(skeletons);
        }

        let tree = assemble(skeletons, reference, graph_root)?;
        debug!(
            nodes = tree.len(),
            bonds = tree.nodes_of_type(TCType::Bond).len(),
            polygons = tree.nodes_of_type(TCType::Polygon).len(),
            rigids = tree.nodes_of_type(TCType::Rigid).len(),
            "built tree of triconnected components"
        );
        Ok(tree)
    }
}

// Split the working graph into split components, returned as lists of working-graph edges.
fn split_components<E>(
    g: &mut WorkGraph<E>,
    root: usize,
) -> Result<Vec<Vec<usize>>, DecompositionError> {
    let mut components = split_multiple_edges(g);
    debug!(bonds = components.len(), "split multiple edges");

    let mut lp = LowPoints::compute(g, root);
    if !lp.is_biconnected() {
        return Err(DecompositionError::NotBiconnected);
    }
    lp.orient(g);

    let adj = order_adjacency(g, &lp);
    let num = Numbering::compute(g, &mut lp, &adj);
    let found = PathSearch::new(g, lp, num, adj).run();
    debug!(
        components = found.len(),
        virtual_edges = (0..g.edge_count()).filter(|&e| g.is_virtual(e)).count(),
        "path search finished"
    );

    components.extend(found);
    Ok(components)
}

// Replace every run of two or more parallel edges by a single virtual edge, returning one bond
// per run. Edges are bucket sorted by their smaller endpoint and then by the endpoint sum, which
// puts parallel edges next to each other.
fn split_multiple_edges<E>(g: &mut WorkGraph<E>) -> Vec<Vec<usize>> {
    let mut buckets: Vec<Vec<usize>> = vec![vec![]; g.vertex_count()];
    for e in g.visible_edges() {
        buckets[g.source(e).min(g.target(e))].push(e);
    }

    let mut sorted = Vec::with_capacity(g.edge_count());
    for bucket in buckets {
        let mut by_sum: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for e in bucket {
            by_sum.entry(g.source(e) + g.target(e)).or_default().push(e);
        }
        sorted.extend(by_sum.into_values().flatten());
    }

    let mut components = vec![];
    let mut i = 0;
    while i < sorted.len() {
        let first = sorted[i];
        let (s, t) = (g.source(first), g.target(first));
        let mut j = i + 1;
        while j < sorted.len() && same_endpoints(g, sorted[j], s, t) {
            j += 1;
        }

        if j - i >= 2 {
            let run = &sorted[i..j];
            for &e in run {
                g.hide(e);
            }
            let virt = g.new_virtual_edge(s, t);
            trace!(s, t, parallel = run.len(), "bond");

            let mut component = vec![virt];
            component.extend_from_slice(run);
            components.push(component);
        }
        i = j;
    }
    components
}

fn same_endpoints<E>(g: &WorkGraph<E>, e: usize, s: usize, t: usize) -> bool {
    let (a, b) = (g.source(e), g.target(e));
    (a == s && b == t) || (a == t && b == s)
}

// Translate components into skeletons over the caller's vertices, numbering virtual edges densely
// in order of first appearance.
fn to_skeletons<V, E>(
    g: &WorkGraph<E>,
    vertices: &[V],
    components: &[Vec<usize>],
) -> Vec<Skeleton<V, E>>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq,
{
    let mut virtual_ids: HashMap<usize, VirtualEdgeId> = HashMap::new();
    components
        .iter()
        .map(|component| {
            let mut skeleton = Skeleton::new();
            for &e in component {
                let edge = &g.edges[e];
                let (s, t) = (vertices[edge.source], vertices[edge.target]);
                match edge.origin {
                    Some(origin) => skeleton.add_edge(s, t, origin),
                    None => {
                        let next = VirtualEdgeId(virtual_ids.len());
                        let id = *virtual_ids.entry(e).or_insert(next);
                        skeleton.add_virtual_edge(s, t, id);
                    }
                }
            }
            skeleton
        })
        .collect()
}

// Glue together neighbouring bonds, and neighbouring polygons, dropping the virtual edge pair
// they were split along.
fn merge_bonds_and_polygons<V, E>(skeletons: Vec<Skeleton<V, E>>) -> Vec<Skeleton<V, E>>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq,
{
    let kinds: Vec<TCType> = skeletons.iter().map(TCType::of).collect();

    let mut owners: BTreeMap<VirtualEdgeId, Vec<usize>> = BTreeMap::new();
    for (i, skeleton) in skeletons.iter().enumerate() {
        for id in skeleton.virtual_edges() {
            owners.entry(id).or_default().push(i);
        }
    }

    let mut uf = UnionFind::new(skeletons.len());
    let mut consumed = HashSet::new();
    for (id, owner) in &owners {
        if let [a, b] = owner[..] {
            if kinds[a] == kinds[b] && kinds[a] != TCType::Rigid {
                uf.union(a, b);
                consumed.insert(*id);
            }
        }
    }
    if consumed.is_empty() {
        return skeletons;
    }

    let (classes, count) = uf.classes();
    debug!(
        before = skeletons.len(),
        after = count,
        "merged bonds and polygons"
    );

    let mut merged = vec![Skeleton::new(); count];
    for (i, skeleton) in skeletons.into_iter().enumerate() {
        for edge in skeleton.edges {
            if let SkeletonEdgeKind::Virtual(id) = edge.kind {
                if consumed.contains(&id) {
                    continue;
                }
            }
            merged[classes[i]].edges.push(edge);
        }
    }
    merged
}

// Classify and name the skeletons, then link them through their shared virtual edges.
fn assemble<V, E>(
    skeletons: Vec<Skeleton<V, E>>,
    reference: E,
    graph_root: V,
) -> Result<TCTree<V, E>, DecompositionError>
where
    V: Copy + Eq + Hash,
    E: Copy + Eq,
{
    let mut counters: HashMap<TCType, usize> = HashMap::new();
    let nodes: Vec<TCTreeNode<V, E>> = skeletons
        .into_iter()
        .map(|skeleton| {
            let kind = TCType::of(&skeleton);
            let count = counters.entry(kind).or_insert(0);
            let name = format!("{}{}", kind.prefix(), count);
            *count += 1;
            TCTreeNode {
                skeleton,
                kind,
                name,
            }
        })
        .collect();

    let root = nodes
        .iter()
        .position(|n| n.skeleton.contains_real(reference))
        .ok_or(DecompositionError::MissingReferenceEdge)?;

    let mut first_owner: HashMap<VirtualEdgeId, usize> = HashMap::new();
    let mut tree_edges = vec![];
    for (i, node) in nodes.iter().enumerate() {
        for id in node.skeleton.virtual_edges() {
            match first_owner.get(&id) {
                Some(&j) => tree_edges.push((j, i)),
                None => {
                    first_owner.insert(id, i);
                }
            }
        }
    }

    let tree = RootedTree::new(nodes.len(), &tree_edges, root)
        .ok_or(DecompositionError::NotBiconnected)?;

    Ok(TCTree {
        nodes,
        tree,
        reference: Some(reference),
        graph_root: Some(graph_root),
    })
}
