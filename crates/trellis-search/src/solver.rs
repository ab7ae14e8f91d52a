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

//! # Solver Contract
//!
//! The boundary between the evaluation engine and the search strategies that
//! drive it. A [`RoutingSolver`] repeatedly proposes candidate flow-binding
//! sets for a topology, scores them, and retains the best feasible plan it
//! has seen. The contract deliberately says nothing about *how* candidates
//! are generated; it only fixes how a search is configured, driven, and
//! stopped.
//!
//! ## Motivation
//!
//! `solve` is a long-running, synchronous call. The pieces around it make
//! that manageable:
//!
//! - [`AbortHandle`]: a cloneable flag that requests cooperative termination
//!   from another thread. A running solve polls it between evaluations and
//!   returns its best plan so far within a bounded number of evaluations.
//! - [`SolverParameters`]: time budget, candidate budget, and the evaluator
//!   parameters a solver should score candidates with.

use crate::monitor::{
    candidate_limit::CandidateLimitMonitor, composite::CompositeMonitor,
    interrupt::InterruptMonitor, time_limit::TimeLimitMonitor,
};
use crate::result::SolverOutcome;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::time::Duration;
use trellis_eval::params::EvaluatorParams;
use trellis_model::{topology::Topology, traffic::Application};

/// A cloneable, thread-safe handle used to request that a running solve
/// stops early. All clones observe the same flag, so the handle can be
/// passed to another thread, a signal handler, or a UI callback.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    /// Creates a new handle with the abort flag clear.
    #[inline]
    pub fn new() -> Self {
        Self {
            aborted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Requests termination. Safe to call from any thread and idempotent.
    #[inline]
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once an abort has been requested.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }
}

impl std::fmt::Display for AbortHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AbortHandle(aborted: {})", self.is_aborted())
    }
}

/// Configuration a [`RoutingSolver`] is expected to honor for its next solve.
///
/// All budgets are optional; an unset budget means the solver runs until its
/// own search plan is exhausted or an abort is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParameters {
    time_limit: Option<Duration>,
    candidate_limit: Option<u64>,
    evaluator: EvaluatorParams,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverParameters {
    /// Creates parameters with no budgets and default evaluator parameters.
    #[inline]
    pub fn new() -> Self {
        Self {
            time_limit: None,
            candidate_limit: None,
            evaluator: EvaluatorParams::default(),
        }
    }

    /// Sets a wall-clock budget for the solve.
    #[inline]
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Sets a budget on the number of candidates scored.
    #[inline]
    #[must_use]
    pub fn with_candidate_limit(mut self, candidate_limit: u64) -> Self {
        self.candidate_limit = Some(candidate_limit);
        self
    }

    /// Sets the evaluator parameters candidates are scored with.
    #[inline]
    #[must_use]
    pub fn with_evaluator_params(mut self, evaluator: EvaluatorParams) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Returns the wall-clock budget, if any.
    #[inline]
    pub const fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns the candidate budget, if any.
    #[inline]
    pub const fn candidate_limit(&self) -> Option<u64> {
        self.candidate_limit
    }

    /// Returns the evaluator parameters candidates are scored with.
    #[inline]
    pub const fn evaluator_params(&self) -> EvaluatorParams {
        self.evaluator
    }

    /// Assembles the monitor stack these parameters imply: an interrupt
    /// monitor watching `handle`, plus time and candidate budget monitors
    /// for the budgets that are set.
    ///
    /// `candidates_evaluated` must be incremented once per scored candidate;
    /// sharing it lets the caller read the count back for statistics.
    pub fn monitors<'a>(
        &self,
        handle: AbortHandle,
        candidates_evaluated: &'a AtomicU64,
    ) -> CompositeMonitor<'a> {
        let mut composite = CompositeMonitor::with_capacity(3);
        composite.add_monitor(InterruptMonitor::new(handle));
        if let Some(limit) = self.time_limit {
            composite.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(limit) = self.candidate_limit {
            composite.add_monitor(CandidateLimitMonitor::new(candidates_evaluated, limit));
        }
        composite
    }
}

impl std::fmt::Display for SolverParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolverParameters(time_limit: ")?;
        match self.time_limit {
            Some(limit) => write!(f, "{:.3}s", limit.as_secs_f64())?,
            None => write!(f, "unlimited")?,
        }
        write!(f, ", candidate_limit: ")?;
        match self.candidate_limit {
            Some(limit) => write!(f, "{}", limit)?,
            None => write!(f, "unlimited")?,
        }
        write!(f, ")")
    }
}

/// A search strategy that proposes routings for a set of applications on a
/// topology and returns the best plan it found.
pub trait RoutingSolver {
    /// Returns the human-readable name of this solver.
    fn name(&self) -> &str;

    /// Applies the given parameters to the next solve.
    fn configure(&mut self, parameters: &SolverParameters);

    /// Runs the search to completion, a configured budget, or an abort.
    ///
    /// The call is synchronous and may be long-running. Implementations must
    /// poll their monitors between candidate evaluations so that an abort
    /// requested through [`RoutingSolver::abort_handle`] is honored within a
    /// bounded number of evaluations, returning the best plan found so far.
    fn solve(&mut self, topology: &Topology, applications: &[Arc<Application>]) -> SolverOutcome;

    /// Returns a handle that aborts a running solve from another thread.
    fn abort_handle(&self) -> AbortHandle;
}

impl std::fmt::Debug for dyn RoutingSolver + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoutingSolver({})", self.name())
    }
}

impl std::fmt::Display for dyn RoutingSolver + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoutingSolver({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incumbent::SharedIncumbent;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use crate::result::{SolverResult, TerminationReason};
    use crate::stats::SolverStatisticsBuilder;
    use std::thread;
    use std::time::Instant;
    use trellis_eval::evaluator::{AvbWcrtEvaluator, RoutingEvaluator};
    use trellis_model::cost::Cost;
    use trellis_model::index::NodeIndex;
    use trellis_model::plan::RoutingPlan;
    use trellis_model::routing::{FlowBinding, RoutePath};
    use trellis_model::topology::TopologyBuilder;
    use trellis_model::traffic::SrClass;

    /// A solver that replays a fixed list of candidate binding sets, wired
    /// through the full machinery: evaluator, incumbent, and monitors.
    struct ScriptedSolver {
        parameters: SolverParameters,
        handle: AbortHandle,
        script: Vec<Vec<FlowBinding>>,
        repeat: bool,
    }

    impl ScriptedSolver {
        fn new(script: Vec<Vec<FlowBinding>>) -> Self {
            Self {
                parameters: SolverParameters::new(),
                handle: AbortHandle::new(),
                script,
                repeat: false,
            }
        }

        /// Replays the script over and over until a monitor terminates.
        fn repeating(mut self) -> Self {
            self.repeat = true;
            self
        }
    }

    impl RoutingSolver for ScriptedSolver {
        fn name(&self) -> &str {
            "ScriptedSolver"
        }

        fn configure(&mut self, parameters: &SolverParameters) {
            self.parameters = *parameters;
        }

        fn solve(
            &mut self,
            topology: &Topology,
            _applications: &[Arc<Application>],
        ) -> SolverOutcome {
            let start = Instant::now();
            let evaluator = AvbWcrtEvaluator::with_params(self.parameters.evaluator_params());
            let incumbent = SharedIncumbent::new();
            let candidate_counter = AtomicU64::new(0);
            let mut monitor = self
                .parameters
                .monitors(self.handle.clone(), &candidate_counter);

            let mut candidates = 0u64;
            let mut feasible = 0u64;
            let mut improvements = 0u64;
            let mut reason = TerminationReason::Completed;
            let mut next = 0usize;

            monitor.on_enter_search();
            loop {
                if self.script.is_empty() || (!self.repeat && next >= self.script.len()) {
                    break;
                }
                if let SearchCommand::Terminate(why) = monitor.search_command() {
                    reason = TerminationReason::Aborted(why);
                    break;
                }

                let bindings = &self.script[next % self.script.len()];
                next += 1;

                let cost = evaluator
                    .evaluate(bindings, topology)
                    .expect("script contains only supported application kinds");
                candidates += 1;
                monitor.on_candidate_evaluated(cost);

                if cost.is_feasible() {
                    feasible += 1;
                    let plan = RoutingPlan::new(cost, bindings.clone());
                    if incumbent.try_install(&plan) {
                        improvements += 1;
                        monitor.on_new_best(&plan);
                    }
                }
            }
            monitor.on_exit_search();

            let statistics = SolverStatisticsBuilder::new()
                .candidates_evaluated(candidates)
                .feasible_candidates(feasible)
                .improvements(improvements)
                .solve_duration(start.elapsed())
                .build();

            let result = match incumbent.snapshot() {
                Some(plan) => SolverResult::Feasible(plan),
                None => SolverResult::NoSolution,
            };

            SolverOutcome::new(result, reason, statistics)
        }

        fn abort_handle(&self) -> AbortHandle {
            self.handle.clone()
        }
    }

    /// Two end systems joined both directly and through a bridge, so a
    /// script can offer a one-hop and a two-hop route for the same flow.
    fn triangle() -> Topology {
        let mut builder = TopologyBuilder::new();
        let es0 = builder.add_end_system();
        let bridge = builder.add_bridge();
        let es2 = builder.add_end_system();
        builder.add_duplex_link(es0, bridge, 100.0);
        builder.add_duplex_link(bridge, es2, 100.0);
        builder.add_duplex_link(es0, es2, 100.0);
        builder.build()
    }

    fn stream(title: &str, max_frame_bytes: u32, frames_per_interval: u32) -> Arc<Application> {
        Arc::new(Application::stream_reservation(
            title,
            NodeIndex::new(0),
            vec![NodeIndex::new(2)],
            max_frame_bytes,
            frames_per_interval,
            125.0,
            1000.0,
            SrClass::A,
            vec!["normal".to_string()],
        ))
    }

    fn via_bridge_binding(topology: &Topology, application: Arc<Application>) -> FlowBinding {
        let path = RoutePath::new([
            topology
                .edge_between(NodeIndex::new(0), NodeIndex::new(1))
                .unwrap(),
            topology
                .edge_between(NodeIndex::new(1), NodeIndex::new(2))
                .unwrap(),
        ]);
        FlowBinding::new(application, vec![path])
    }

    fn direct_binding(topology: &Topology, application: Arc<Application>) -> FlowBinding {
        let path = RoutePath::new([topology
            .edge_between(NodeIndex::new(0), NodeIndex::new(2))
            .unwrap()]);
        FlowBinding::new(application, vec![path])
    }

    #[test]
    fn test_scripted_solve_keeps_best_plan_and_completes() {
        let topology = triangle();
        let app = stream("alpha", 250, 1);
        let script = vec![
            vec![via_bridge_binding(&topology, Arc::clone(&app))],
            vec![direct_binding(&topology, app)],
        ];

        let mut solver = ScriptedSolver::new(script);
        let outcome = solver.solve(&topology, &[]);

        assert!(outcome.has_solution());
        assert!(!outcome.is_aborted());
        assert_eq!(outcome.reason, TerminationReason::Completed);

        // The one-hop candidate wins over the two-hop candidate.
        let plan = outcome.plan().unwrap();
        assert_eq!(plan.cost(), Cost::finite(1.0));

        assert_eq!(outcome.statistics.candidates_evaluated, 2);
        assert_eq!(outcome.statistics.feasible_candidates, 2);
        assert_eq!(outcome.statistics.improvements, 2);
    }

    #[test]
    fn test_scripted_solve_without_feasible_candidate_reports_no_solution() {
        let topology = triangle();
        // 1522 bytes * 8 bits * 8 frames / 125 us = 779.264 Mbps of demand
        // on a 100 Mbps link.
        let app = stream("firehose", 1522, 8);
        let script = vec![vec![direct_binding(&topology, app)]];

        let mut solver = ScriptedSolver::new(script);
        let outcome = solver.solve(&topology, &[]);

        assert!(!outcome.has_solution());
        assert_eq!(outcome.result, SolverResult::NoSolution);
        assert_eq!(outcome.reason, TerminationReason::Completed);
        assert_eq!(outcome.statistics.candidates_evaluated, 1);
        assert_eq!(outcome.statistics.feasible_candidates, 0);
        assert_eq!(outcome.statistics.improvements, 0);
    }

    #[test]
    fn test_candidate_limit_stops_the_solve_early() {
        let topology = triangle();
        let app = stream("alpha", 250, 1);
        let script = vec![vec![direct_binding(&topology, app)]];

        let mut solver = ScriptedSolver::new(script).repeating();
        solver.configure(&SolverParameters::new().with_candidate_limit(3));
        let outcome = solver.solve(&topology, &[]);

        assert_eq!(outcome.statistics.candidates_evaluated, 3);
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("global candidate limit reached".to_string())
        );
        assert!(outcome.has_solution());
        // Replays of the same plan never improve on the incumbent.
        assert_eq!(outcome.statistics.improvements, 1);
    }

    #[test]
    fn test_abort_before_solve_returns_without_evaluating() {
        let topology = triangle();
        let app = stream("alpha", 250, 1);
        let script = vec![vec![direct_binding(&topology, app)]];

        let mut solver = ScriptedSolver::new(script).repeating();
        solver.abort_handle().abort();
        let outcome = solver.solve(&topology, &[]);

        assert!(!outcome.has_solution());
        assert_eq!(outcome.statistics.candidates_evaluated, 0);
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("abort signal received".to_string())
        );
    }

    #[test]
    fn test_abort_from_another_thread_returns_best_so_far() {
        let topology = triangle();
        let app = stream("alpha", 250, 1);
        let script = vec![vec![direct_binding(&topology, app)]];

        let mut solver = ScriptedSolver::new(script).repeating();
        let handle = solver.abort_handle();
        let aborter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            handle.abort();
        });

        let outcome = solver.solve(&topology, &[]);
        aborter.join().unwrap();

        assert!(outcome.is_aborted());
        assert_eq!(
            outcome.reason,
            TerminationReason::Aborted("abort signal received".to_string())
        );
        // The best plan seen before the abort survives.
        assert!(outcome.has_solution());
        assert_eq!(outcome.plan().unwrap().cost(), Cost::finite(1.0));
        assert!(outcome.statistics.candidates_evaluated >= 1);
    }

    #[test]
    fn test_abort_handle_clones_share_one_flag() {
        let handle = AbortHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_aborted());
        assert!(!clone.is_aborted());

        clone.abort();
        assert!(handle.is_aborted());
        assert_eq!(format!("{}", handle), "AbortHandle(aborted: true)");
    }

    #[test]
    fn test_parameters_defaults_and_setters() {
        let defaults = SolverParameters::new();
        assert_eq!(defaults.time_limit(), None);
        assert_eq!(defaults.candidate_limit(), None);
        assert_eq!(defaults.evaluator_params(), EvaluatorParams::default());

        let parameters = SolverParameters::new()
            .with_time_limit(Duration::from_secs(5))
            .with_candidate_limit(100)
            .with_evaluator_params(EvaluatorParams::new().with_hop_penalty(2.0));

        assert_eq!(parameters.time_limit(), Some(Duration::from_secs(5)));
        assert_eq!(parameters.candidate_limit(), Some(100));
        assert_eq!(parameters.evaluator_params().hop_penalty(), 2.0);
        assert_eq!(
            format!("{}", parameters),
            "SolverParameters(time_limit: 5.000s, candidate_limit: 100)"
        );
        assert_eq!(
            format!("{}", SolverParameters::new()),
            "SolverParameters(time_limit: unlimited, candidate_limit: unlimited)"
        );
    }

    #[test]
    fn test_parameters_assemble_monitor_stack() {
        let counter = AtomicU64::new(0);

        let bare = SolverParameters::new().monitors(AbortHandle::new(), &counter);
        assert_eq!(bare.len(), 1);

        let full = SolverParameters::new()
            .with_time_limit(Duration::from_secs(1))
            .with_candidate_limit(10)
            .monitors(AbortHandle::new(), &counter);
        assert_eq!(full.len(), 3);
        assert_eq!(
            format!("{}", full),
            "CompositeMonitor([InterruptMonitor, TimeLimitMonitor, CandidateLimitMonitor])"
        );
    }

    #[test]
    fn test_dyn_solver_debug_and_display_use_name() {
        let solver = ScriptedSolver::new(Vec::new());
        let dyn_solver: &dyn RoutingSolver = &solver;
        assert_eq!(format!("{:?}", dyn_solver), "RoutingSolver(ScriptedSolver)");
        assert_eq!(format!("{}", dyn_solver), "RoutingSolver(ScriptedSolver)");
    }
}
