use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::PlaceId;

static NEXT_SYSTEM: AtomicU64 = AtomicU64::new(0);

/// Identity of a [`super::NetSystem`]. Every system, including every clone, gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemId(u64);

impl SystemId {
    pub(crate) fn fresh() -> Self {
        SystemId(NEXT_SYSTEM.fetch_add(1, Ordering::Relaxed))
    }
}

/// Token counts of the places of one net system.
///
/// Places without tokens have no entry, so a marking with an explicit zero and one without the
/// place compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marking {
    owner: SystemId,
    tokens: BTreeMap<PlaceId, usize>,
}

impl Marking {
    pub(crate) fn new(owner: SystemId) -> Self {
        Marking {
            owner,
            tokens: BTreeMap::new(),
        }
    }

    /// The net system this marking belongs to.
    pub fn owner(&self) -> SystemId {
        self.owner
    }

    pub fn get(&self, p: PlaceId) -> usize {
        self.tokens.get(&p).copied().unwrap_or(0)
    }

    /// Set the tokens on `p`, returning the previous count.
    pub fn put(&mut self, p: PlaceId, tokens: usize) -> usize {
        let previous = if tokens == 0 {
            self.tokens.remove(&p)
        } else {
            self.tokens.insert(p, tokens)
        };
        previous.unwrap_or(0)
    }

    pub(crate) fn remove(&mut self, p: PlaceId) {
        self.tokens.remove(&p);
    }

    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn is_marked(&self, p: PlaceId) -> bool {
        self.tokens.contains_key(&p)
    }

    /// Places holding at least one token, in id order.
    pub fn marked_places(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.tokens.keys().copied()
    }

    /// `(place, tokens)` for every marked place.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceId, usize)> + '_ {
        self.tokens.iter().map(|(&p, &n)| (p, n))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Every marked place, repeated once per token.
    pub fn to_multiset(&self) -> Vec<PlaceId> {
        self.iter()
            .flat_map(|(p, n)| std::iter::repeat(p).take(n))
            .collect()
    }
}
