use std::borrow::Cow;

use log::debug;
use thiserror::Error;

use crate::dict::{EntryTuple, TrigramDict};
use crate::index::RowStore;
use crate::posting::intersect_many;
use crate::timing::{MetricsTimer, NoopTimer, QueryMetrics, Stage, Timer};
use crate::trigram::{Rid, normalize, pattern_trigrams};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The pattern has no usable literal content, so the trigram index
    /// cannot constrain it. The engine never guesses "match-all"; callers
    /// may fall back to a scan.
    #[error("pattern has no required trigrams")]
    UnsupportedPattern,
}

/// Candidate retrieval and verification over a built dictionary.
///
/// Read-only: borrows the dictionary and the row store for its lifetime.
pub struct QueryEngine<'a> {
    dict: &'a dyn TrigramDict,
    rows: &'a RowStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dict: &'a dyn TrigramDict, rows: &'a RowStore) -> Self {
        QueryEngine { dict, rows }
    }

    /// Evaluate a `LIKE` pattern, returning matching rids in ascending order.
    pub fn run(&self, pattern: &str) -> Result<Vec<Rid>, QueryError> {
        self.run_with(pattern, &mut NoopTimer)
    }

    /// As [`run`](Self::run), also reporting per-stage timings.
    pub fn run_timed(&self, pattern: &str) -> (Result<Vec<Rid>, QueryError>, QueryMetrics) {
        let mut timer = MetricsTimer::new();
        let result = self.run_with(pattern, &mut timer);
        (result, timer.into_metrics())
    }

    fn run_with<T: Timer>(&self, pattern: &str, timer: &mut T) -> Result<Vec<Rid>, QueryError> {
        let pat = timer.measure(Stage::Extract, || pattern_trigrams(pattern));
        if pat.required.is_empty() {
            return Err(QueryError::UnsupportedPattern);
        }

        // A missing trigram is a hard miss: no row can match, and the row
        // store is never consulted.
        let tuples: Option<Vec<&EntryTuple>> = timer.measure(Stage::Lookup, || {
            pat.required.iter().map(|&tri| self.dict.lookup(tri)).collect()
        });
        let Some(tuples) = tuples else {
            debug!("query {pattern:?}: required trigram absent, short-circuiting");
            return Ok(Vec::new());
        };

        let candidates = timer.measure(Stage::Intersect, || {
            let lists: Vec<Cow<'_, [Rid]>> = tuples.iter().map(|t| t.rids()).collect();
            intersect_many(&lists)
        });

        debug!(
            "query {pattern:?}: {} trigrams, {} candidates",
            pat.required.len(),
            candidates.len()
        );

        let hits = timer.measure(Stage::Verify, || {
            candidates
                .into_iter()
                .filter(|&rid| {
                    self.rows
                        .get(rid)
                        .is_some_and(|text| literals_appear_in_order(&normalize(text), &pat.literals))
                })
                .collect()
        });

        Ok(hits)
    }
}

/// True iff every literal appears in `text`, in left-to-right order.
///
/// Each search resumes one byte past the previous match start. That is
/// conservative (overlapping matches are re-examined) but correct.
pub fn literals_appear_in_order(text: &str, literals: &[String]) -> bool {
    let mut pos = 0;
    for lit in literals {
        if lit.is_empty() {
            continue;
        }
        match text[pos..].find(lit.as_str()) {
            Some(offset) => pos += offset + 1,
            None => return false,
        }
    }
    true
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
