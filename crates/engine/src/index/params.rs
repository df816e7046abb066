use std::mem;

use crate::dict::DictionaryKind;
use crate::posting::SegmentPolicy;
use crate::trigram::Rid;

/// Build-time configuration for the index. Fixed once the build starts.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams {
    /// Byte budget below which a posting list stays inline in its entry
    /// tuple; above it, the tuple carries a posting tree.
    pub max_inline_bytes: usize,
    /// Posting-tree leaf sizing.
    pub segments: SegmentPolicy,
    /// Posting-tree internal fanout.
    pub branching: usize,
    /// Which dictionary structure to bulk-load.
    pub dictionary: DictionaryKind,
}

impl BuildParams {
    /// Rids that fit in the inline byte budget.
    #[inline]
    pub fn max_inline_count(&self) -> usize {
        self.max_inline_bytes / mem::size_of::<Rid>()
    }
}

impl Default for BuildParams {
    fn default() -> Self {
        BuildParams {
            max_inline_bytes: 384,
            segments: SegmentPolicy::DEFAULT,
            branching: 16,
            dictionary: DictionaryKind::EntryTree,
        }
    }
}
