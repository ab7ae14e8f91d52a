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

//! # Shared Incumbent (Best Plan Holder)
//!
//! A concurrent container for the best routing plan discovered so far during
//! a search. It exposes a fast, lock-free upper bound via an atomic and
//! stores the actual [`RoutingPlan`] behind a `Mutex` as the source of
//! truth, so a search loop can cheaply skip candidates that cannot improve
//! on the incumbent while abort handlers read a consistent snapshot.
//!
//! ## Motivation
//!
//! Most candidates a search produces are worse than the incumbent. The
//! atomic bound lets those be rejected with a single relaxed load; only
//! candidates that beat the bound take the lock. The bound starts at
//! [`Cost::INFEASIBLE`], which reads as "no incumbent yet" and at the same
//! time keeps infeasible candidates out, since nothing compares strictly
//! below the sentinel.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_model::cost::Cost;
//! use trellis_model::plan::RoutingPlan;
//! use trellis_search::incumbent::SharedIncumbent;
//!
//! let incumbent = SharedIncumbent::new();
//! let candidate = RoutingPlan::new(Cost::finite(4.0), Vec::new());
//!
//! assert!(incumbent.try_install(&candidate));
//! assert_eq!(incumbent.upper_bound(), Cost::finite(4.0));
//! assert!(incumbent.snapshot().is_some());
//! ```

use std::sync::{Mutex, atomic::AtomicU64};
use tracing::debug;
use trellis_model::cost::Cost;
use trellis_model::plan::RoutingPlan;

/// A concurrent holder for the best (incumbent) routing plan found so far.
///
/// Two pieces of state: an `AtomicU64` carrying the incumbent cost's bit
/// pattern as a fast upper bound, and a `Mutex<Option<RoutingPlan>>`
/// holding the plan itself as the source of truth.
///
/// All atomic accesses are `Ordering::Relaxed`. The bound is only a hint
/// for skipping work; every decision that matters re-checks under the
/// `Mutex`. Costs are non-negative, so [`Cost::to_bits`] is monotone and
/// bit comparison orders exactly like cost comparison. The bound starts at
/// the [`Cost::INFEASIBLE`] bit pattern.
#[derive(Debug)]
pub struct SharedIncumbent {
    upper_bound_bits: AtomicU64,
    plan: Mutex<Option<RoutingPlan>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl SharedIncumbent {
    /// Creates a new shared incumbent with no plan installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound_bits: AtomicU64::new(Cost::INFEASIBLE.to_bits()),
            plan: Mutex::new(None),
        }
    }

    /// Returns the current upper bound, [`Cost::INFEASIBLE`] while no plan
    /// is installed.
    #[inline]
    pub fn upper_bound(&self) -> Cost {
        Cost::from_bits(self.upper_bound_bits.load(std::sync::atomic::Ordering::Relaxed))
    }

    /// Returns a snapshot of the current incumbent plan, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<RoutingPlan> {
        let guard = self.plan.lock().unwrap();
        guard.clone()
    }

    /// Installs the candidate as the new incumbent when it is strictly
    /// cheaper than the current one, returning whether it was installed.
    /// Infeasible candidates never install.
    pub fn try_install(&self, candidate: &RoutingPlan) -> bool {
        let candidate_bits = candidate.cost().to_bits();
        let current_bits = self.upper_bound_bits.load(std::sync::atomic::Ordering::Relaxed);

        // We are minimizing, so lower is better. The infeasible sentinel can
        // never pass this check.
        if candidate_bits >= current_bits {
            return false;
        }

        let mut guard = self.plan.lock().unwrap();
        // Another thread might have installed a plan while we were waiting
        // for the lock. We must compare against the *actual* plan in the
        // mutex, not the atomic hint we read earlier.
        if let Some(current_plan) = guard.as_ref() {
            if candidate.cost() >= current_plan.cost() {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound_bits
            .store(candidate_bits, std::sync::atomic::Ordering::Relaxed);
        debug!(cost = %candidate.cost(), flows = candidate.num_flows(), "installed new incumbent");

        true
    }
}
