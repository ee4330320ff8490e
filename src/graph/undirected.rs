use super::MultiGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId(pub usize);

/// An undirected multigraph stored as a list of edges over vertices `{0..n}`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    /// Endpoints of each edge, indexed by [`EdgeId`].
    pub edges: Vec<(VertexId, VertexId)>,

    // incident edges of each vertex, indexed by VertexId
    incidence: Vec<Vec<EdgeId>>,
}

impl Graph {
    /// The empty graph with no vertices or edges.
    pub fn empty() -> Self {
        Graph::default()
    }

    /// A graph with `n` vertices and no edges.
    pub fn discrete(n: usize) -> Self {
        Graph {
            edges: vec![],
            incidence: vec![vec![]; n],
        }
    }

    /// Build a graph on `n` vertices from a list of endpoint pairs.
    /// Returns `None` if any endpoint is not in `{0..n}`.
    ///
    /// ```rust
    /// # use process_graphs::graph::*;
    /// let g = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    /// assert_eq!(g.vertex_count(), 3);
    /// assert_eq!(g.edge_count(), 3);
    /// assert!(Graph::from_edges(2, &[(0, 2)]).is_none());
    /// ```
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Option<Self> {
        let mut g = Graph::discrete(n);
        for &(u, v) in edges {
            if u >= n || v >= n {
                return None;
            }
            g.new_edge(VertexId(u), VertexId(v));
        }
        Some(g)
    }

    /// Add a single isolated vertex.
    pub fn new_vertex(&mut self) -> VertexId {
        let index = self.incidence.len();
        self.incidence.push(vec![]);
        VertexId(index)
    }

    /// Add an edge between `u` and `v`, returning its [`EdgeId`].
    ///
    /// # Panics
    ///
    /// When `u` or `v` is not a vertex of this graph.
    pub fn new_edge(&mut self, u: VertexId, v: VertexId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push((u, v));
        self.incidence[u.0].push(id);
        if u != v {
            self.incidence[v.0].push(id);
        }
        id
    }

    /// The edges between `u` and `v`, in insertion order.
    pub fn edges_between(&self, u: VertexId, v: VertexId) -> Vec<EdgeId> {
        self.incidence
            .get(u.0)
            .map(|es| {
                es.iter()
                    .copied()
                    .filter(|e| {
                        let (a, b) = self.edges[e.0];
                        (a == u && b == v) || (a == v && b == u)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of edge ends at `v`: a self-loop at `v` counts twice.
    ///
    /// # Panics
    ///
    /// When `v` is not a vertex of this graph.
    pub fn degree(&self, v: VertexId) -> usize {
        self.incidence[v.0]
            .iter()
            .map(|e| {
                let (a, b) = self.edges[e.0];
                if a == b {
                    2
                } else {
                    1
                }
            })
            .sum()
    }
}

impl MultiGraph for Graph {
    type Vertex = VertexId;
    type Edge = EdgeId;

    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.incidence.len()).map(VertexId)
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId)
    }

    fn incident_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.incidence[v.0].iter().copied()
    }

    fn endpoints(&self, e: EdgeId) -> (VertexId, VertexId) {
        self.edges[e.0]
    }

    fn contains_edge(&self, e: EdgeId) -> bool {
        e.0 < self.edges.len()
    }

    fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
