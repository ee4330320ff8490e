//! Place/transition nets and their execution.
//!
//! A [`PetriNet`] is a bipartite directed graph of places and transitions with unit-weight
//! arcs. A [`NetSystem`] pairs a net with a [`Marking`] and fires transitions against it.
//!
//! ```rust
//! use process_graphs::petri::*;
//!
//! let mut sys = NetSystem::new(PetriNet::empty());
//! let p1 = sys.add_place("p1");
//! let p2 = sys.add_place("p2");
//! let t = sys.add_transition("t");
//! sys.add_input(p1, t).unwrap();
//! sys.add_output(t, p2).unwrap();
//!
//! sys.load_natural_marking();
//! assert!(sys.is_enabled(t));
//! sys.fire(t).unwrap();
//! assert_eq!(sys.tokens(p1), 0);
//! assert_eq!(sys.tokens(p2), 1);
//! assert_eq!(sys.fire(t), Err(PetriError::NotEnabled(t)));
//! ```
mod marking;
mod net;
mod system;

pub use marking::*;
pub use net::*;
pub use system::*;

/// Reasons an operation on a net or net system was rejected.
///
/// A rejected operation leaves the net and its marking unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PetriError {
    #[error("transition {0:?} is not in the net")]
    UnknownTransition(TransitionId),
    #[error("place {0:?} is not in the net")]
    UnknownPlace(PlaceId),
    #[error("transition {0:?} is not enabled")]
    NotEnabled(TransitionId),
    #[error("marking belongs to a different net system")]
    ForeignMarking,
}
