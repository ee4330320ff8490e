//! # Process Graphs
//!
//! Two structural tools for process models:
//!
//! - the [tree of triconnected components](crate::tctree::TCTree) of a biconnected multigraph,
//!   which splits a graph at its separation pairs into bonds, polygons and rigid components, and
//! - [net systems](crate::petri::NetSystem), which fire transitions of a Petri net against a
//!   marking, together with their [branching processes](crate::unfolding::BranchingProcess),
//!   which record partial-order runs and answer causality, conflict and concurrency queries.
//!
//! # Triconnected components
//!
//! Any type implementing [MultiGraph](crate::graph::MultiGraph) can be decomposed; the crate
//! ships a small arena-backed [Graph](crate::graph::Graph).
//!
//! ```rust
//! use process_graphs::prelude::*;
//!
//! // K4: every pair of vertices adjacent, so there is nothing to split
//! let g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
//! let tree = TCTree::new(&g).unwrap();
//!
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree.node(tree.root().unwrap()).kind(), TCType::Rigid);
//! ```
//!
//! The decomposition is computed with three depth-first searches in linear time. It reports
//! progress through [`tracing`] at `debug` and `trace` level; install a subscriber to see it.
//!
//! # Petri nets
//!
//! ```rust
//! use process_graphs::prelude::*;
//!
//! let mut sys = NetSystem::new(PetriNet::empty());
//! let p = sys.add_place("p");
//! let t = sys.add_transition("t");
//! sys.add_input(p, t).unwrap();
//! sys.put_tokens(p, 2).unwrap();
//!
//! sys.fire(t).unwrap();
//! sys.fire(t).unwrap();
//! assert_eq!(sys.fire(t), Err(PetriError::NotEnabled(t)));
//! ```

pub mod graph;
pub mod tree;
pub mod union_find;

pub mod tctree;

pub mod petri;
pub mod unfolding;

pub mod prelude {
    //! The types needed for everyday use of the crate.
    pub use crate::graph::{EdgeId, Graph, MultiGraph, VertexId};
    pub use crate::petri::{
        Marking, NetSystem, Node, PetriError, PetriNet, PlaceId, SystemId, TransitionId,
    };
    pub use crate::tctree::{
        DecompositionError, DecompositionOptions, Skeleton, SkeletonEdgeKind, TCNodeId, TCTree,
        TCType, VirtualEdgeId,
    };
    pub use crate::unfolding::{
        AppendError, BranchingProcess, ConditionId, EventId, NodeId, OrderingRelation,
    };
}
