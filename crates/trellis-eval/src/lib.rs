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

//! # Trellis Eval
//!
//! The feasibility and cost evaluation engine of the trellis TSN routing
//! toolkit. Given a candidate routing assignment and the topology it runs
//! on, the engine computes a single scalar cost: infinite when any operating
//! mode violates a capacity margin or a latency deadline, otherwise a finite
//! sum of hop and headroom penalties.
//!
//! ## Architecture
//!
//! - [`params`]: tunable constants of the cost model with their standard
//!   defaults.
//! - [`partition`]: splits a flow-binding set by operating mode and rejects
//!   unrecognized application variants.
//! - [`allocation`]: the mode-scoped per-edge bandwidth accumulator.
//! - [`latency`]: the closed-form worst-case latency formula for
//!   stream-reservation traffic, per IEEE 802.1BA.
//! - [`evaluator`]: ties the phases together behind the
//!   [`evaluator::RoutingEvaluator`] trait.
//!
//! ## Design Philosophy
//!
//! 1. **Purity**: evaluation is a pure function of the binding set and the
//!    topology. All accounting state is call-local, so independent
//!    candidates can be scored concurrently over the same shared inputs.
//! 2. **Infeasibility is a value**: capacity and deadline violations are
//!    data-driven outcomes and map to [`trellis_model::cost::Cost::INFEASIBLE`],
//!    not to errors. Only malformed input is an error.
//! 3. **Early exit**: the first violation in any mode settles the verdict,
//!    so the engine stops scoring the candidate immediately.

pub mod allocation;
pub mod evaluator;
pub mod latency;
pub mod params;
pub mod partition;
