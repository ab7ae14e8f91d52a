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

//! # Edge Allocation Accounting
//!
//! The mode-scoped bandwidth accumulator. One evaluation pass scores each
//! operating mode independently, and every mode starts from zero allocation
//! on every edge; carrying totals across modes would double-count traffic
//! that is never active at the same time. The accumulator is a flat vector
//! addressed by `EdgeIndex`, reused across modes via [`EdgeAllocations::reset`]
//! so a full evaluation performs no allocation after setup.

use trellis_model::index::EdgeIndex;

/// Per-edge running bandwidth totals in Mbps for one mode's pass.
#[derive(Clone, Debug)]
pub struct EdgeAllocations {
    totals_mbps: Vec<f64>,
}

impl EdgeAllocations {
    /// Creates a zeroed accumulator covering `num_edges` edges.
    #[inline]
    pub fn new(num_edges: usize) -> Self {
        Self {
            totals_mbps: vec![0.0; num_edges],
        }
    }

    /// Returns the number of edges covered.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.totals_mbps.len()
    }

    /// Zeroes every total, preparing the accumulator for the next mode.
    #[inline]
    pub fn reset(&mut self) {
        self.totals_mbps.fill(0.0);
    }

    /// Adds `demand_mbps` to the given edge and returns the new total.
    ///
    /// # Panics
    ///
    /// Panics if `edge_index` is not in `0..num_edges()`.
    #[inline]
    pub fn accumulate(&mut self, edge_index: EdgeIndex, demand_mbps: f64) -> f64 {
        let index = edge_index.get();
        debug_assert!(
            index < self.totals_mbps.len(),
            "called `EdgeAllocations::accumulate` with edge index out of bounds: the len is {} but the index is {}",
            self.totals_mbps.len(),
            index
        );
        debug_assert!(
            demand_mbps.is_finite() && demand_mbps >= 0.0,
            "called `EdgeAllocations::accumulate` with a negative or non-finite demand: {}",
            demand_mbps
        );

        self.totals_mbps[index] += demand_mbps;
        self.totals_mbps[index]
    }

    /// Returns the current total on the given edge in Mbps.
    ///
    /// # Panics
    ///
    /// Panics if `edge_index` is not in `0..num_edges()`.
    #[inline(always)]
    pub fn total_mbps(&self, edge_index: EdgeIndex) -> f64 {
        let index = edge_index.get();
        debug_assert!(
            index < self.totals_mbps.len(),
            "called `EdgeAllocations::total_mbps` with edge index out of bounds: the len is {} but the index is {}",
            self.totals_mbps.len(),
            index
        );

        self.totals_mbps[index]
    }
}
