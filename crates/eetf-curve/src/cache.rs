//! Memoized curve construction.
//!
//! Frames sharing one luminance configuration reuse the same curve. Keys
//! are the exact bit patterns of the knee points and line, so `0.0` and
//! `-0.0` are distinct keys and no tolerance matching happens.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CurveResult, KneeCurveSpec, LinearSegment, ReferenceOperator, ToneCurve};

type CurveKey = ([u64; 6], [u64; 2]);

/// Cache of built curves keyed by knee triple and line.
#[derive(Debug, Default)]
pub struct CurveCache {
    curves: HashMap<CurveKey, Arc<ToneCurve>>,
    hits: u64,
    misses: u64,
}

impl CurveCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the curve for `spec` and `line`, building it on first use.
    pub fn get_or_build(&mut self, spec: KneeCurveSpec, line: LinearSegment) -> Arc<ToneCurve> {
        let key = (spec.key_bits(), [line.slope.to_bits(), line.intercept.to_bits()]);

        if let Some(curve) = self.curves.get(&key) {
            self.hits += 1;
            tracing::trace!(hits = self.hits, "tone curve cache hit");
            return Arc::clone(curve);
        }

        self.misses += 1;
        tracing::debug!(misses = self.misses, "tone curve cache miss");
        let curve = Arc::new(ToneCurve::new(spec, line));
        self.curves.insert(key, Arc::clone(&curve));
        curve
    }

    /// Like [`get_or_build`](Self::get_or_build) for knee luminances under `op`.
    pub fn get_for_luminance(
        &mut self,
        op: &ReferenceOperator,
        knee_start_nits: f64,
        knee_end_nits: f64,
    ) -> CurveResult<Arc<ToneCurve>> {
        let spec = op.knee_spec(knee_start_nits, knee_end_nits)?;
        Ok(self.get_or_build(spec, op.line()))
    }

    /// Number of distinct curves held.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// True when nothing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// `(hits, misses)` since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Drops all cached curves and resets the counters.
    pub fn clear(&mut self) {
        self.curves.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
