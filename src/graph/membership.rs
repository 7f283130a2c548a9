//! Global coordinate -> feature membership index.
//!
//! Each coordinate moves through three states: unseen (no entry), touched by a
//! single feature, and shared by several features. The move from single to
//! shared happens at most once per coordinate and is reported to the caller
//! as it happens, which is when the coordinate becomes an intersection node.

use hashbrown::hash_map::Entry;
use hashbrown::{HashMap, HashSet};

use crate::models::{Coordinate, FeatureId};

/// Membership state of one coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    /// Touched by exactly one feature so far
    Single(FeatureId),
    /// Touched by two or more distinct features. Terminal.
    Shared(HashSet<FeatureId>),
}

impl Membership {
    pub fn contains(&self, id: &FeatureId) -> bool {
        match self {
            Membership::Single(owner) => owner == id,
            Membership::Shared(owners) => owners.contains(id),
        }
    }

    pub fn owner_count(&self) -> usize {
        match self {
            Membership::Single(_) => 1,
            Membership::Shared(owners) => owners.len(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MembershipIndex {
    entries: HashMap<Coordinate, Membership>,
    shared: usize,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` touches `coord`.
    ///
    /// Returns `true` only on the call that makes `coord` shared by a second
    /// distinct feature.
    pub fn record(&mut self, coord: Coordinate, id: &FeatureId) -> bool {
        let state = match self.entries.entry(coord) {
            Entry::Vacant(slot) => {
                slot.insert(Membership::Single(id.clone()));
                return false;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        match state {
            Membership::Single(owner) if *owner == *id => false,
            Membership::Single(owner) => {
                let mut owners = HashSet::with_capacity(2);
                owners.insert(owner.clone());
                owners.insert(id.clone());
                *state = Membership::Shared(owners);
                self.shared += 1;
                true
            }
            Membership::Shared(owners) => {
                if !owners.contains(id) {
                    owners.insert(id.clone());
                }
                false
            }
        }
    }

    pub fn get(&self, coord: &Coordinate) -> Option<&Membership> {
        self.entries.get(coord)
    }

    /// Feature ids touching `coord`
    pub fn owners(&self, coord: &Coordinate) -> Vec<&FeatureId> {
        match self.entries.get(coord) {
            None => Vec::new(),
            Some(Membership::Single(owner)) => vec![owner],
            Some(Membership::Shared(owners)) => owners.iter().collect(),
        }
    }

    pub fn is_shared(&self, coord: &Coordinate) -> bool {
        matches!(self.entries.get(coord), Some(Membership::Shared(_)))
    }

    /// Number of coordinates shared by two or more features
    pub fn shared_count(&self) -> usize {
        self.shared
    }

    /// Number of coordinates seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
