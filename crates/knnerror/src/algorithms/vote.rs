//! Majority vote over neighbor labels.
//!
//! ## Purpose
//!
//! This module decides the predicted label of a query from the labels of its
//! selected neighbors.
//!
//! ## Design notes
//!
//! * **Sort and count**: Votes are sorted ascending and counted in runs, the
//!   same shape as a unique-with-counts followed by an arg-max.
//! * **Tie-break**: The first run reaching the maximum count wins, i.e. the
//!   smallest label among those tied. This is deterministic for any `Ord` label.
//! * **Borrowing**: Votes are references into the caller's label slice, so
//!   string labels are never cloned during voting.
//!
//! ## Invariants
//!
//! * The winner is always one of the votes.
//!
//! ## Non-goals
//!
//! * Distance-weighted voting.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Majority label among `votes`; `None` when there are no votes.
///
/// `votes` is reordered in place.
pub fn majority_vote<'a, L: Ord>(votes: &mut [&'a L]) -> Option<&'a L> {
    votes.sort_unstable();

    let mut best: Option<(&'a L, usize)> = None;
    let mut i = 0;
    while i < votes.len() {
        let label = votes[i];
        let mut run = 1;
        while i + run < votes.len() && votes[i + run] == label {
            run += 1;
        }
        if best.is_none_or(|(_, count)| run > count) {
            best = Some((label, run));
        }
        i += run;
    }

    best.map(|(label, _)| label)
}

/// Majority label among `y[neighbors[..]]`, reusing `scratch` for the votes.
pub fn vote_neighbors<'a, L: Ord>(
    y: &'a [L],
    neighbors: &[usize],
    scratch: &mut Vec<&'a L>,
) -> Option<&'a L> {
    if let [only] = neighbors {
        return y.get(*only);
    }
    scratch.clear();
    scratch.extend(neighbors.iter().map(|&j| &y[j]));
    majority_vote(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_simple() {
        let labels = [2, 1, 2];
        let mut votes: Vec<&i32> = labels.iter().collect();
        assert_eq!(majority_vote(&mut votes), Some(&2));
    }

    #[test]
    fn test_majority_tie_picks_smallest_label() {
        let labels = [3, 1, 3, 1, 2];
        let mut votes: Vec<&i32> = labels.iter().collect();
        assert_eq!(majority_vote(&mut votes), Some(&1));
    }

    #[test]
    fn test_majority_strings() {
        let labels = ["dog", "cat", "dog", "cat"];
        let mut votes: Vec<&&str> = labels.iter().collect();
        assert_eq!(majority_vote(&mut votes), Some(&"cat"));
    }

    #[test]
    fn test_majority_empty() {
        let mut votes: Vec<&u8> = Vec::new();
        assert_eq!(majority_vote(&mut votes), None);
    }
}
