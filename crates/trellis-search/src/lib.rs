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

//! # Trellis Search
//!
//! The search side of the trellis TSN routing toolkit: the pluggable
//! [`solver::RoutingSolver`] contract, the thread-safe best-so-far store,
//! and the monitor machinery that bounds a run.
//!
//! ## Architecture
//!
//! - [`solver`]: the solver trait, its parameters, and the cooperative
//!   [`solver::AbortHandle`] an embedding application uses to stop a run
//!   from another thread.
//! - [`incumbent`]: [`incumbent::SharedIncumbent`], the lock-light store of
//!   the best feasible plan found so far.
//! - [`monitor`]: the [`monitor::search_monitor::SearchMonitor`] trait plus
//!   ready-made time, candidate, and interrupt limits, composable via
//!   [`monitor::composite::CompositeMonitor`].
//! - [`result`]: what a finished run reports, and why it stopped.
//! - [`stats`]: counters a run accumulates for reporting.
//!
//! ## Design Philosophy
//!
//! 1. **The algorithm is a plug-in**: the contract fixes only how a search
//!    is configured, driven, and stopped. Scoring belongs to the evaluator,
//!    never to the solver.
//! 2. **Stopping is cooperative**: aborts and limits are polled between
//!    candidate evaluations. A single evaluation always runs to completion,
//!    so no candidate is ever half-scored.
//! 3. **The best plan survives**: however a run ends, the lowest-cost
//!    feasible candidate seen so far is what it returns.

pub mod incumbent;
pub mod monitor;
pub mod result;
pub mod solver;
pub mod stats;
