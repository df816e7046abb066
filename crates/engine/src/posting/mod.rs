use std::cmp::Ordering;

use crate::trigram::Rid;

mod tree;

pub use tree::{PostingTree, SegmentPolicy};

/// A sorted, duplicate-free run of row identifiers.
///
/// Built by appending in arbitrary order and calling [`sort_dedup`]
/// once; read-only afterwards.
///
/// [`sort_dedup`]: PostingList::sort_dedup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    rids: Vec<Rid>,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already strictly increasing vector.
    pub fn from_sorted(rids: Vec<Rid>) -> Self {
        debug_assert!(rids.windows(2).all(|w| w[0] < w[1]), "rids not strictly increasing");
        PostingList { rids }
    }

    /// Build-time append; call [`sort_dedup`](Self::sort_dedup) before reading.
    pub fn push(&mut self, rid: Rid) {
        self.rids.push(rid);
    }

    pub fn sort_dedup(&mut self) {
        self.rids.sort_unstable();
        self.rids.dedup();
    }

    pub fn len(&self) -> usize {
        self.rids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rids.is_empty()
    }

    pub fn as_slice(&self) -> &[Rid] {
        &self.rids
    }

    pub fn iter(&self) -> impl Iterator<Item = Rid> + '_ {
        self.rids.iter().copied()
    }

    pub fn contains(&self, rid: Rid) -> bool {
        self.rids.binary_search(&rid).is_ok()
    }
}

/// Intersection of two strictly sorted runs.
///
/// Walks both slices simultaneously, shedding the head of whichever side
/// is behind; equal heads are kept. O(len(a) + len(b)).
pub fn intersect_sorted<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    let mut common = Vec::with_capacity(a.len().min(b.len()));
    let (mut left, mut right) = (a, b);

    while let ([x, tail_l @ ..], [y, tail_r @ ..]) = (left, right) {
        match x.cmp(y) {
            Ordering::Less => left = tail_l,
            Ordering::Greater => right = tail_r,
            Ordering::Equal => {
                common.push(*x);
                left = tail_l;
                right = tail_r;
            }
        }
    }

    common
}

/// Intersect any number of sorted lists, short-circuiting as soon as an
/// intermediate result is empty.
pub fn intersect_many<L: AsRef<[Rid]>>(lists: &[L]) -> Vec<Rid> {
    let Some(first) = lists.first() else {
        return Vec::new();
    };

    let mut result = first.as_ref().to_vec();
    for list in &lists[1..] {
        if result.is_empty() {
            break;
        }
        result = intersect_sorted(&result, list.as_ref());
    }
    result
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
