use std::time::{Duration, Instant};

/// Query stages for which timings can be recorded.
#[derive(Copy, Clone, Debug)]
pub enum Stage {
    /// Required-trigram extraction from the pattern.
    Extract,
    /// Dictionary lookups.
    Lookup,
    /// Posting-list intersection.
    Intersect,
    /// Ordered-literal verification against the row store.
    Verify,
}

/// Timing metrics collected during query execution.
#[derive(Debug, Clone, Default)]
pub struct QueryMetrics {
    pub extract_time: Option<Duration>,
    pub lookup_time: Option<Duration>,
    pub intersect_time: Option<Duration>,
    pub verify_time: Option<Duration>,
}

impl QueryMetrics {
    /// Total time across all measured stages.
    pub fn total(&self) -> Duration {
        self.extract_time.unwrap_or_default()
            + self.lookup_time.unwrap_or_default()
            + self.intersect_time.unwrap_or_default()
            + self.verify_time.unwrap_or_default()
    }
}

/// Strategy trait for timing behavior.
///
/// Implementations decide whether to measure stages and how to store the
/// results; the query engine is generic over this so the untimed path pays
/// nothing.
pub trait Timer {
    /// Run `f`, optionally measuring and recording the duration for `stage`.
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R;

    /// Return metrics if timing is enabled.
    fn metrics(&self) -> Option<&QueryMetrics> {
        None
    }
}

/// Timer implementation that does nothing.
#[derive(Debug, Default)]
pub struct NoopTimer;

impl Timer for NoopTimer {
    #[inline]
    fn measure<F, R>(&mut self, _stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}

/// Timer implementation that collects [`QueryMetrics`].
#[derive(Debug, Default)]
pub struct MetricsTimer {
    metrics: QueryMetrics,
}

impl MetricsTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metrics(self) -> QueryMetrics {
        self.metrics
    }
}

impl Timer for MetricsTimer {
    fn measure<F, R>(&mut self, stage: Stage, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match stage {
            Stage::Extract => self.metrics.extract_time = Some(elapsed),
            Stage::Lookup => self.metrics.lookup_time = Some(elapsed),
            Stage::Intersect => self.metrics.intersect_time = Some(elapsed),
            Stage::Verify => self.metrics.verify_time = Some(elapsed),
        }

        result
    }

    fn metrics(&self) -> Option<&QueryMetrics> {
        Some(&self.metrics)
    }
}
