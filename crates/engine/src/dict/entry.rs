use std::borrow::Cow;

use crate::posting::{PostingList, PostingTree};
use crate::trigram::{Rid, Trigram};

/// Posting storage for one dictionary entry: a small sorted list held
/// inline, or a posting tree once the list outgrows the inline budget.
#[derive(Debug)]
pub enum PostingStore {
    Inline(PostingList),
    Tree(PostingTree),
}

/// The per-trigram dictionary record: key, rid count, and posting storage.
///
/// Immutable once emitted by the builder. Tuples with zero rids are never
/// constructed.
#[derive(Debug)]
pub struct EntryTuple {
    key: Trigram,
    count: usize,
    store: PostingStore,
}

impl EntryTuple {
    pub fn inline(key: Trigram, list: PostingList) -> Self {
        debug_assert!(!list.is_empty(), "empty posting list for {key}");
        EntryTuple {
            key,
            count: list.len(),
            store: PostingStore::Inline(list),
        }
    }

    pub fn tree(key: Trigram, tree: PostingTree) -> Self {
        debug_assert!(!tree.is_empty(), "empty posting tree for {key}");
        EntryTuple {
            key,
            count: tree.len(),
            store: PostingStore::Tree(tree),
        }
    }

    #[inline]
    pub fn key(&self) -> Trigram {
        self.key
    }

    /// Number of rids behind this entry.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn store(&self) -> &PostingStore {
        &self.store
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.store, PostingStore::Inline(_))
    }

    /// The posting list in ascending rid order: borrowed when inline,
    /// collected when backed by a tree.
    pub fn rids(&self) -> Cow<'_, [Rid]> {
        match &self.store {
            PostingStore::Inline(list) => Cow::Borrowed(list.as_slice()),
            PostingStore::Tree(tree) => Cow::Owned(tree.iter().collect()),
        }
    }

    pub fn contains(&self, rid: Rid) -> bool {
        match &self.store {
            PostingStore::Inline(list) => list.contains(rid),
            PostingStore::Tree(tree) => tree.contains(rid),
        }
    }

    /// Logical size of the posting storage in bytes.
    pub fn posting_bytes(&self) -> usize {
        match &self.store {
            PostingStore::Inline(list) => list.len() * std::mem::size_of::<Rid>(),
            PostingStore::Tree(tree) => tree.size_bytes(),
        }
    }
}
