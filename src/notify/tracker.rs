//! Detects when the top of the result list changes between passes.

use tracing::debug;

/// Listing ids retained from the last pass that triggered a notification.
///
/// Starts empty. Only replaced when a change is detected, so a run of
/// identical passes leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingState {
    ids: Vec<u64>,
}

impl RankingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All retained ids, including those past the compared prefix.
    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Compares the first `follow` ids of a pass against the retained ones.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector {
    follow: usize,
}

impl ChangeDetector {
    pub fn new(follow: usize) -> Self {
        Self { follow }
    }

    pub fn follow(&self) -> usize {
        self.follow
    }

    /// Returns true when the followed prefix differs from the retained one.
    ///
    /// Order matters: the same ids in a different order count as a change.
    /// On change the state takes the whole of `new_ids`, though later calls
    /// still only look at its first `follow` entries.
    pub fn has_changed(&self, new_ids: &[u64], state: &mut RankingState) -> bool {
        let previous = prefix(&state.ids, self.follow);
        let current = prefix(new_ids, self.follow);

        if previous == current {
            debug!("Top {} listings unchanged", self.follow);
            return false;
        }

        debug!("Top {} listings changed: {:?} -> {:?}", self.follow, previous, current);
        state.ids = new_ids.to_vec();
        true
    }
}

fn prefix(ids: &[u64], len: usize) -> &[u64] {
    &ids[..len.min(ids.len())]
}
