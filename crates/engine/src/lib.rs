mod dict;
mod index;
mod posting;
mod query;
mod timing;
mod trigram;

pub use dict::{Art, DictionaryKind, EntryTree, EntryTuple, PostingStore, TrigramDict};
pub use index::{BuildParams, IndexBuilder, IndexStats, RowStore, SearchIndex};
pub use posting::{PostingList, PostingTree, SegmentPolicy, intersect_many, intersect_sorted};
pub use query::{QueryEngine, QueryError, literals_appear_in_order};
pub use timing::{MetricsTimer, NoopTimer, QueryMetrics, Stage, Timer};
pub use trigram::{PatternTrigrams, Rid, Trigram, normalize, pattern_trigrams, trigrams_of};
