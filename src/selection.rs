use std::collections::HashSet;

use crate::media::MovieId;

/// A user tag over movie ids (favorited, watched). Membership is a set;
/// iteration follows the order ids were added.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<MovieId>,
    members: HashSet<MovieId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns whether `id` is now a member.
    pub fn toggle(&mut self, id: MovieId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|&member| member != id);
            false
        } else {
            self.members.insert(id);
            self.order.push(id);
            true
        }
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.order.iter().copied()
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for SelectionSet {}
