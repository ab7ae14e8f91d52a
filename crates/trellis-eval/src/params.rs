// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Evaluator Parameters
//!
//! The tunable constants of the cost model, bundled with their standard
//! defaults so an evaluator can be constructed without any configuration.
//!
//! | Parameter                    | Default | Meaning                                            |
//! |------------------------------|---------|----------------------------------------------------|
//! | `hop_penalty`                | 1.0     | Cost per distinct edge a flow uses                 |
//! | `penalty_threshold`          | 0.8     | Latency/deadline ratio above which headroom costs  |
//! | `threshold_exceeded_penalty` | 0.1     | Cost per percentage point over the threshold       |
//! | `link_rate_mbps`             | 100.0   | Physical transmission rate of a link               |
//! | `max_allocation_ratio`       | 0.75    | Allocatable share of raw edge capacity             |
//! | `max_best_effort_frame_bytes`| 1522    | Largest interfering best-effort frame              |
//!
//! All setters consume and return `self`, so overrides chain:
//!
//! ```rust
//! use trellis_eval::params::EvaluatorParams;
//!
//! let params = EvaluatorParams::new()
//!     .with_hop_penalty(2.0)
//!     .with_link_rate_mbps(1000.0);
//!
//! assert_eq!(params.hop_penalty(), 2.0);
//! assert_eq!(params.max_allocation_ratio(), 0.75);
//! ```

/// Tunable constants of the cost model.
///
/// Fields are private and range-checked by the `with_*` setters, so a value
/// read back from this type is always usable without further validation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EvaluatorParams {
    hop_penalty: f64,
    penalty_threshold: f64,
    threshold_exceeded_penalty: f64,
    link_rate_mbps: f64,
    max_allocation_ratio: f64,
    max_best_effort_frame_bytes: u32,
}

impl Default for EvaluatorParams {
    #[inline]
    fn default() -> Self {
        Self {
            hop_penalty: 1.0,
            penalty_threshold: 0.8,
            threshold_exceeded_penalty: 0.1,
            link_rate_mbps: 100.0,
            max_allocation_ratio: 0.75,
            max_best_effort_frame_bytes: 1522,
        }
    }
}

impl EvaluatorParams {
    /// Creates parameters with the standard defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the cost charged per distinct edge a flow uses.
    ///
    /// # Panics
    ///
    /// Panics if the value is negative or not finite.
    #[must_use]
    pub fn with_hop_penalty(mut self, hop_penalty: f64) -> Self {
        assert!(
            hop_penalty.is_finite() && hop_penalty >= 0.0,
            "called `EvaluatorParams::with_hop_penalty` with a negative or non-finite value: {}",
            hop_penalty
        );
        self.hop_penalty = hop_penalty;
        self
    }

    /// Overrides the latency/deadline ratio above which headroom is charged.
    ///
    /// # Panics
    ///
    /// Panics if the value is not in `(0, 1]`.
    #[must_use]
    pub fn with_penalty_threshold(mut self, penalty_threshold: f64) -> Self {
        assert!(
            penalty_threshold > 0.0 && penalty_threshold <= 1.0,
            "called `EvaluatorParams::with_penalty_threshold` with a value outside (0, 1]: {}",
            penalty_threshold
        );
        self.penalty_threshold = penalty_threshold;
        self
    }

    /// Overrides the cost per percentage point of ratio over the threshold.
    ///
    /// # Panics
    ///
    /// Panics if the value is negative or not finite.
    #[must_use]
    pub fn with_threshold_exceeded_penalty(mut self, threshold_exceeded_penalty: f64) -> Self {
        assert!(
            threshold_exceeded_penalty.is_finite() && threshold_exceeded_penalty >= 0.0,
            "called `EvaluatorParams::with_threshold_exceeded_penalty` with a negative or non-finite value: {}",
            threshold_exceeded_penalty
        );
        self.threshold_exceeded_penalty = threshold_exceeded_penalty;
        self
    }

    /// Overrides the physical link transmission rate in Mbps.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a positive finite number.
    #[must_use]
    pub fn with_link_rate_mbps(mut self, link_rate_mbps: f64) -> Self {
        assert!(
            link_rate_mbps.is_finite() && link_rate_mbps > 0.0,
            "called `EvaluatorParams::with_link_rate_mbps` with a non-positive value: {}",
            link_rate_mbps
        );
        self.link_rate_mbps = link_rate_mbps;
        self
    }

    /// Overrides the allocatable share of raw edge capacity. The remainder
    /// stays reserved for best-effort traffic.
    ///
    /// # Panics
    ///
    /// Panics if the value is not in `(0, 1]`.
    #[must_use]
    pub fn with_max_allocation_ratio(mut self, max_allocation_ratio: f64) -> Self {
        assert!(
            max_allocation_ratio > 0.0 && max_allocation_ratio <= 1.0,
            "called `EvaluatorParams::with_max_allocation_ratio` with a value outside (0, 1]: {}",
            max_allocation_ratio
        );
        self.max_allocation_ratio = max_allocation_ratio;
        self
    }

    /// Overrides the size of the largest interfering best-effort frame.
    ///
    /// # Panics
    ///
    /// Panics if the value is zero.
    #[must_use]
    pub fn with_max_best_effort_frame_bytes(mut self, max_best_effort_frame_bytes: u32) -> Self {
        assert!(
            max_best_effort_frame_bytes >= 1,
            "called `EvaluatorParams::with_max_best_effort_frame_bytes` with a zero frame size"
        );
        self.max_best_effort_frame_bytes = max_best_effort_frame_bytes;
        self
    }

    /// Returns the cost charged per distinct edge a flow uses.
    #[inline(always)]
    pub const fn hop_penalty(&self) -> f64 {
        self.hop_penalty
    }

    /// Returns the latency/deadline ratio above which headroom is charged.
    #[inline(always)]
    pub const fn penalty_threshold(&self) -> f64 {
        self.penalty_threshold
    }

    /// Returns the cost per percentage point of ratio over the threshold.
    #[inline(always)]
    pub const fn threshold_exceeded_penalty(&self) -> f64 {
        self.threshold_exceeded_penalty
    }

    /// Returns the physical link transmission rate in Mbps.
    #[inline(always)]
    pub const fn link_rate_mbps(&self) -> f64 {
        self.link_rate_mbps
    }

    /// Returns the allocatable share of raw edge capacity.
    #[inline(always)]
    pub const fn max_allocation_ratio(&self) -> f64 {
        self.max_allocation_ratio
    }

    /// Returns the size of the largest interfering best-effort frame.
    #[inline(always)]
    pub const fn max_best_effort_frame_bytes(&self) -> u32 {
        self.max_best_effort_frame_bytes
    }
}

impl std::fmt::Display for EvaluatorParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EvaluatorParams(hop: {}, threshold: {}, penalty: {}, rate: {} Mbps, margin: {}, best effort: {} B)",
            self.hop_penalty,
            self.penalty_threshold,
            self.threshold_exceeded_penalty,
            self.link_rate_mbps,
            self.max_allocation_ratio,
            self.max_best_effort_frame_bytes
        )
    }
}
