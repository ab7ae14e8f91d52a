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

use crate::stats::SolverStatistics;
use trellis_model::plan::RoutingPlan;

#[derive(Debug, Clone, PartialEq)]
pub enum SolverResult {
    /// The search found at least one feasible plan; this is the best one.
    Feasible(RoutingPlan),
    /// The search terminated without ever scoring a feasible candidate.
    NoSolution,
}

impl SolverResult {
    /// Returns the best plan, if one was found.
    #[inline]
    pub fn plan(&self) -> Option<&RoutingPlan> {
        match self {
            SolverResult::Feasible(plan) => Some(plan),
            SolverResult::NoSolution => None,
        }
    }

    /// Consumes the result and returns the best plan, if one was found.
    #[inline]
    pub fn into_plan(self) -> Option<RoutingPlan> {
        match self {
            SolverResult::Feasible(plan) => Some(plan),
            SolverResult::NoSolution => None,
        }
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Feasible(plan) => write!(f, "Feasible(cost={})", plan.cost()),
            SolverResult::NoSolution => write!(f, "NoSolution"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver exhausted its own search plan.
    Completed,
    /// The solver stopped early, either by a monitor's limit or an abort
    /// request. The string names the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "Completed"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutcome {
    pub result: SolverResult,
    pub reason: TerminationReason,
    pub statistics: SolverStatistics,
}

impl SolverOutcome {
    #[inline]
    pub fn new(
        result: SolverResult,
        reason: TerminationReason,
        statistics: SolverStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    /// Returns `true` if the search found a feasible plan.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    /// Returns `true` if the search stopped before exhausting its plan.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }

    /// Returns the best plan, if one was found.
    #[inline]
    pub fn plan(&self) -> Option<&RoutingPlan> {
        self.result.plan()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.result, self.reason)
    }
}
