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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on a search. Reading the clock on every
//! polled command would waste cycles, so the monitor counts evaluated
//! candidates and only consults the clock at counter values where
//! `(candidates_seen & check_mask) == 0`. Once a check observes that the
//! budget is spent, the monitor requests termination.
//!
//! The default mask checks the clock every 256 candidates. A candidate
//! evaluation walks every flow and edge of the binding set, so 256 of them
//! dwarf one `Instant::now()` call and the budget overshoot stays small.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_search::monitor::time_limit::TimeLimitMonitor;
//! use trellis_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use trellis_model::cost::Cost;
//! use std::time::Duration;
//!
//! let mut monitor = TimeLimitMonitor::new(Duration::from_secs(5));
//! monitor.on_enter_search();
//! monitor.on_candidate_evaluated(Cost::finite(3.0));
//! if let SearchCommand::Terminate(reason) = monitor.search_command() {
//!     println!("stopping: {}", reason);
//! }
//! ```

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use std::time::{Duration, Instant};
use trellis_model::{cost::Cost, plan::RoutingPlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    check_mask: u64,
    candidates_seen: u64,
    budget: Duration,
    started_at: Instant,
}

impl TimeLimitMonitor {
    /// Default mask: consult the clock every 256 candidates (2^8).
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0xFF;

    /// Creates a monitor with the given budget and the default check mask.
    #[inline]
    pub fn new(budget: Duration) -> Self {
        Self::with_check_mask(budget, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    /// Creates a monitor with an explicit check mask. The mask must be a
    /// power of two minus one; a mask of zero consults the clock on every
    /// command.
    #[inline]
    pub fn with_check_mask(budget: Duration, check_mask: u64) -> Self {
        Self {
            check_mask,
            candidates_seen: 0,
            budget,
            started_at: Instant::now(),
        }
    }

    /// Returns `true` when the current counter value is a check point.
    #[inline(always)]
    fn at_check_point(&self) -> bool {
        (self.candidates_seen & self.check_mask) == 0
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self) {
        self.started_at = Instant::now();
        self.candidates_seen = 0;
    }

    fn on_exit_search(&mut self) {}

    #[inline(always)]
    fn on_candidate_evaluated(&mut self, _cost: Cost) {
        self.candidates_seen = self.candidates_seen.wrapping_add(1);
    }

    fn on_new_best(&mut self, _plan: &RoutingPlan) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.at_check_point() && self.started_at.elapsed() >= self.budget {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
