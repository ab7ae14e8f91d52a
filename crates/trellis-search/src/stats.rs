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

/// Counters a solver accumulates over one run.
///
/// The fields are deliberately public: a finished run hands them over as
/// plain data, and different solvers fill them from whatever bookkeeping
/// they already do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of candidate routing assignments scored.
    pub candidates_evaluated: u64,
    /// How many of the scored candidates were feasible.
    pub feasible_candidates: u64,
    /// How many candidates improved on the incumbent when scored.
    pub improvements: u64,
    /// Wall-clock time the run took.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverStatistics(candidates: {}, feasible: {}, improvements: {}, elapsed: {:.3}s)",
            self.candidates_evaluated,
            self.feasible_candidates,
            self.improvements,
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for [`SolverStatistics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    candidates_evaluated: u64,
    feasible_candidates: u64,
    improvements: u64,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a builder with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            candidates_evaluated: 0,
            feasible_candidates: 0,
            improvements: 0,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the number of candidates scored.
    #[inline]
    pub fn candidates_evaluated(mut self, candidates_evaluated: u64) -> Self {
        self.candidates_evaluated = candidates_evaluated;
        self
    }

    /// Sets the number of feasible candidates seen.
    #[inline]
    pub fn feasible_candidates(mut self, feasible_candidates: u64) -> Self {
        self.feasible_candidates = feasible_candidates;
        self
    }

    /// Sets the number of incumbent improvements.
    #[inline]
    pub fn improvements(mut self, improvements: u64) -> Self {
        self.improvements = improvements;
        self
    }

    /// Sets the wall-clock duration of the run.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the [`SolverStatistics`].
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            candidates_evaluated: self.candidates_evaluated,
            feasible_candidates: self.feasible_candidates,
            improvements: self.improvements,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverStatistics, SolverStatisticsBuilder};
    use std::time::Duration;

    #[test]
    fn builder_fills_every_counter() {
        let stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(120)
            .feasible_candidates(97)
            .improvements(6)
            .solve_duration(Duration::from_millis(2500))
            .build();

        assert_eq!(stats.candidates_evaluated, 120);
        assert_eq!(stats.feasible_candidates, 97);
        assert_eq!(stats.improvements, 6);
        assert_eq!(stats.solve_duration, Duration::from_millis(2500));
    }

    #[test]
    fn builder_defaults_are_zero() {
        let stats = SolverStatisticsBuilder::default().build();
        assert_eq!(
            stats,
            SolverStatistics {
                candidates_evaluated: 0,
                feasible_candidates: 0,
                improvements: 0,
                solve_duration: Duration::ZERO,
            }
        );
    }

    #[test]
    fn display_renders_counters_and_seconds() {
        let stats = SolverStatisticsBuilder::new()
            .candidates_evaluated(42)
            .feasible_candidates(40)
            .improvements(3)
            .solve_duration(Duration::from_millis(2500))
            .build();

        assert_eq!(
            format!("{}", stats),
            "SolverStatistics(candidates: 42, feasible: 40, improvements: 3, elapsed: 2.500s)"
        );
    }
}
