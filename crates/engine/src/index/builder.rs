use hashbrown::HashMap;
use log::debug;

use crate::dict::EntryTuple;
use crate::index::params::BuildParams;
use crate::index::rowstore::RowStore;
use crate::index::{IndexStats, SearchIndex};
use crate::posting::{PostingList, PostingTree};
use crate::trigram::{Rid, Trigram, trigrams_of};

/// Aggregates rows into per-trigram posting data, then emits entry tuples
/// and bulk-loads the configured dictionary.
#[derive(Debug)]
pub struct IndexBuilder {
    params: BuildParams,
    rows: RowStore,
    postings: HashMap<Trigram, Vec<Rid>>,
}

impl IndexBuilder {
    pub fn new(params: BuildParams) -> Self {
        IndexBuilder {
            params,
            rows: RowStore::new(),
            postings: HashMap::new(),
        }
    }

    /// Ingest one row. A row whose text yields no trigrams is stored but
    /// appears in no posting list.
    pub fn add_row(&mut self, rid: Rid, text: String) {
        for tri in trigrams_of(&text) {
            self.postings.entry(tri).or_default().push(rid);
        }
        self.rows.insert(rid, text);
    }

    pub fn add_batch<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = (Rid, String)>,
    {
        for (rid, text) in batch {
            self.add_row(rid, text);
        }
    }

    /// Sort and dedup every posting run, form entry tuples in key order,
    /// and hand them to the dictionary's bulk load.
    pub fn finish(self) -> SearchIndex {
        let IndexBuilder { params, rows, postings } = self;

        let mut entries: Vec<(Trigram, Vec<Rid>)> = postings.into_iter().collect();
        entries.sort_unstable_by_key(|(tri, _)| *tri);

        let max_inline = params.max_inline_count();
        let mut tuples = Vec::with_capacity(entries.len());
        let mut stats = IndexStats {
            rows: rows.len(),
            ..IndexStats::default()
        };

        for (tri, mut rids) in entries {
            rids.sort_unstable();
            rids.dedup();
            if rids.is_empty() {
                continue;
            }

            let tuple = if rids.len() <= max_inline {
                stats.inline_tuples += 1;
                EntryTuple::inline(tri, PostingList::from_sorted(rids))
            } else {
                stats.tree_tuples += 1;
                EntryTuple::tree(
                    tri,
                    PostingTree::bulk_load(params.segments, params.branching, &rids),
                )
            };
            stats.posting_bytes += tuple.posting_bytes();
            tuples.push(tuple);
        }

        stats.keys = tuples.len();
        debug!(
            "built {} tuples ({} inline, {} tree) over {} rows",
            stats.keys, stats.inline_tuples, stats.tree_tuples, stats.rows
        );

        let dict = params.dictionary.build(tuples);
        SearchIndex::from_parts(rows, dict, params, stats)
    }
}
