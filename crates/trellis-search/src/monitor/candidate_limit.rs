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

//! # Candidate Limit Monitor
//!
//! Caps the total number of evaluated routing candidates. The count lives in
//! a caller-owned `AtomicU64`, so several monitors (one per search worker)
//! can debit a single global budget, and the solver can read the final count
//! for its statistics without asking the monitors.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_search::monitor::candidate_limit::CandidateLimitMonitor;
//! use trellis_search::monitor::search_monitor::{SearchMonitor, SearchCommand};
//! use trellis_model::cost::Cost;
//! use std::sync::atomic::AtomicU64;
//!
//! let evaluated = AtomicU64::new(0);
//! let mut monitor = CandidateLimitMonitor::new(&evaluated, 2);
//!
//! monitor.on_candidate_evaluated(Cost::finite(4.0));
//! assert_eq!(monitor.search_command(), SearchCommand::Continue);
//!
//! monitor.on_candidate_evaluated(Cost::finite(3.0));
//! assert!(matches!(monitor.search_command(), SearchCommand::Terminate(_)));
//! ```

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use std::sync::atomic::{AtomicU64, Ordering};
use trellis_model::{cost::Cost, plan::RoutingPlan};

/// Terminates the search once a shared evaluation counter meets this
/// monitor's limit. The counter is borrowed rather than owned so the budget
/// can span every monitor wired to it.
#[derive(Debug)]
pub struct CandidateLimitMonitor<'a> {
    candidates_evaluated: &'a AtomicU64,
    candidate_limit: u64,
}

impl<'a> CandidateLimitMonitor<'a> {
    /// Creates a new `CandidateLimitMonitor`.
    #[inline]
    pub fn new(candidates_evaluated: &'a AtomicU64, candidate_limit: u64) -> Self {
        Self {
            candidates_evaluated,
            candidate_limit,
        }
    }

    #[inline]
    fn budget_spent(&self) -> bool {
        self.candidates_evaluated.load(Ordering::Relaxed) >= self.candidate_limit
    }
}

impl<'a> SearchMonitor for CandidateLimitMonitor<'a> {
    fn name(&self) -> &str {
        "CandidateLimitMonitor"
    }

    fn on_enter_search(&mut self) {}

    fn on_exit_search(&mut self) {}

    fn on_candidate_evaluated(&mut self, _cost: Cost) {
        self.candidates_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    fn on_new_best(&mut self, _plan: &RoutingPlan) {}

    fn search_command(&self) -> SearchCommand {
        if self.budget_spent() {
            SearchCommand::Terminate("global candidate limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
