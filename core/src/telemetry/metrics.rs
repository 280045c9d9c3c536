use crate::prelude::ProcessError;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Pipeline run counters, shareable between pipelines behind an `Arc`.
///
/// Failures are also tallied by the processor that raised them, which is the
/// name every `ProcessError` carries.
#[derive(Default)]
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub failed: usize,
    pub failures_by_processor: BTreeMap<String, usize>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_processed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
        }
    }

    pub fn record_failure(&self, error: &ProcessError) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failed += 1;
            *metrics
                .failures_by_processor
                .entry(error.processor().to_string())
                .or_insert(0) += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| metrics.clone())
            .unwrap_or_default()
    }
}
