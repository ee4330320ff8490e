//! Undirected multigraphs consumed by the triconnected decomposition.
//!
//! The decomposition only needs a handful of queries, captured by the [`MultiGraph`] trait.
//! A small arena-backed implementation is provided as [`Graph`].
mod undirected;

pub use undirected::*;

use core::fmt::Debug;
use core::hash::Hash;

/// An undirected multigraph: parallel edges between the same pair of vertices are allowed.
///
/// Vertex and edge identities must be cheap to copy and compare.
pub trait MultiGraph {
    type Vertex: Copy + Eq + Hash + Debug;
    type Edge: Copy + Eq + Hash + Debug;

    /// All vertices of the graph.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    /// All edges of the graph.
    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    /// The edges incident to `v`.
    fn incident_edges(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    /// The two endpoints of `e`. The order carries no meaning.
    ///
    /// # Panics
    ///
    /// May panic if `e` is not an edge of this graph.
    fn endpoints(&self, e: Self::Edge) -> (Self::Vertex, Self::Vertex);

    /// Test if `e` is an edge of this graph.
    fn contains_edge(&self, e: Self::Edge) -> bool;

    fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    fn edge_count(&self) -> usize {
        self.edges().count()
    }
}
