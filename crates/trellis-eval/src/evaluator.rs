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

//! # Routing Evaluation
//!
//! The scoring engine behind the [`RoutingEvaluator`] trait. One call scores
//! one candidate: every operating mode is evaluated independently and the
//! finite contributions are summed, since modes model mutually exclusive
//! points of operation. Any single violation settles the verdict for the
//! whole candidate.
//!
//! ## Phases per mode
//!
//! 1. **Bandwidth and hops**: every flow active in the mode (its
//!    stream-reservation members plus all time-triggered flows) adds its
//!    average demand to each distinct edge it uses; crossing the allocatable
//!    margin of any edge is an immediate rejection. Each flow is also
//!    charged the hop penalty per distinct edge.
//! 2. **Latency**: every stream-reservation member is checked against its
//!    deadline using the worst of its per-destination path latencies.
//!    Exceeding the deadline rejects the candidate; running close to it
//!    (past the penalty threshold) costs headroom penalty instead.
//!
//! Rejections map to [`Cost::INFEASIBLE`], never to an error. The only
//! error is an application variant the engine does not recognize.

use crate::allocation::EdgeAllocations;
use crate::latency::edge_wcrt_micros;
use crate::params::EvaluatorParams;
use crate::partition::ModePartition;
use fixedbitset::FixedBitSet;
use tracing::debug;
use trellis_model::cost::Cost;
use trellis_model::routing::FlowBinding;
use trellis_model::topology::Topology;

/// The error of an evaluation call.
///
/// Data-driven infeasibility is not an error; it is the
/// [`Cost::INFEASIBLE`] value. An error means the input itself was
/// malformed and the run should stop.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EvaluateError {
    /// A flow binding carries an application variant the engine does not
    /// recognize.
    UnsupportedApplication {
        /// The title of the offending flow.
        title: String,
    },
}

impl std::fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluateError::UnsupportedApplication { title } => {
                write!(f, "unsupported application kind of flow \"{}\"", title)
            }
        }
    }
}

impl std::error::Error for EvaluateError {}

/// A scoring function over candidate routing assignments.
///
/// Implementations must be pure: the returned cost may depend only on the
/// bindings and the topology, and no state may persist between calls, so
/// independent candidates can be scored concurrently over the same shared
/// inputs.
pub trait RoutingEvaluator {
    /// Returns the name of the evaluator.
    fn name(&self) -> &str;

    /// Scores the given candidate against the given topology.
    ///
    /// Returns a finite non-negative cost for acceptable candidates and
    /// [`Cost::INFEASIBLE`] for candidates violating a capacity margin or a
    /// latency deadline.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::UnsupportedApplication`] if any binding
    /// carries an application variant the engine does not recognize.
    fn evaluate(
        &self,
        bindings: &[FlowBinding],
        topology: &Topology,
    ) -> Result<Cost, EvaluateError>;
}

impl std::fmt::Debug for dyn RoutingEvaluator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoutingEvaluator({})", self.name())
    }
}

impl std::fmt::Display for dyn RoutingEvaluator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The AVB worst-case response time evaluator.
///
/// Scores candidates with the per-hop latency bound of [`crate::latency`]
/// and the bandwidth, hop, and headroom policies described in the module
/// documentation.
///
/// # Examples
///
/// ```rust
/// use trellis_eval::evaluator::{AvbWcrtEvaluator, RoutingEvaluator};
/// use trellis_eval::params::EvaluatorParams;
/// use trellis_model::cost::Cost;
/// use trellis_model::topology::TopologyBuilder;
///
/// let mut builder = TopologyBuilder::new();
/// let a = builder.add_end_system();
/// let b = builder.add_end_system();
/// builder.add_edge(a, b, 100.0);
/// let topology = builder.build();
///
/// let evaluator = AvbWcrtEvaluator::new();
/// // An empty candidate declares no modes and costs nothing.
/// assert_eq!(evaluator.evaluate(&[], &topology), Ok(Cost::ZERO));
/// ```
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct AvbWcrtEvaluator {
    params: EvaluatorParams,
}

impl AvbWcrtEvaluator {
    /// Creates an evaluator with the standard parameter defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with the given parameters.
    #[inline]
    pub fn with_params(params: EvaluatorParams) -> Self {
        Self { params }
    }

    /// Returns the parameters this evaluator scores with.
    #[inline]
    pub fn params(&self) -> &EvaluatorParams {
        &self.params
    }
}

impl RoutingEvaluator for AvbWcrtEvaluator {
    fn name(&self) -> &str {
        "AvbWcrtEvaluator"
    }

    fn evaluate(
        &self,
        bindings: &[FlowBinding],
        topology: &Topology,
    ) -> Result<Cost, EvaluateError> {
        let partition = ModePartition::classify(bindings)?;
        if partition.is_empty() {
            // No stream-reservation flow declared a mode, so there is
            // nothing to constrain or charge.
            return Ok(Cost::ZERO);
        }

        let mut allocations = EdgeAllocations::new(topology.num_edges());
        let mut used_edges = FixedBitSet::with_capacity(topology.num_edges());
        let mut total = Cost::ZERO;

        for (mode, members) in partition.iter() {
            allocations.reset();
            let mut mode_cost = 0.0;

            // Phase 1: accumulate bandwidth and charge hops for the mode's
            // working set, stream-reservation members plus every
            // time-triggered flow.
            for &index in members.iter().chain(partition.always_active()) {
                let binding = &bindings[index];
                let application = binding.application();
                let demand_mbps = application.bandwidth_mbps();

                used_edges.clear();
                for path in binding.paths() {
                    for &edge in path.edges() {
                        // A multicast tree reusing an edge on two branches
                        // reserves it once.
                        if used_edges.put(edge.get()) {
                            continue;
                        }

                        let running_mbps = allocations.accumulate(edge, demand_mbps);
                        let margin_mbps =
                            topology.capacity_mbps(edge) * self.params.max_allocation_ratio();
                        if running_mbps > margin_mbps {
                            debug!(
                                mode,
                                flow = application.title(),
                                edge = %topology.edge(edge),
                                running_mbps,
                                margin_mbps,
                                "edge capacity exceeded, rejecting candidate"
                            );
                            return Ok(Cost::INFEASIBLE);
                        }
                    }
                }

                mode_cost += self.params.hop_penalty() * used_edges.count_ones(..) as f64;
            }

            // Phase 2: check stream-reservation members against their
            // deadlines. Time-triggered flows carry the zero sentinel and
            // are never members here.
            for &index in members {
                let binding = &bindings[index];
                let application = binding.application();
                let Some(class) = application.sr_class() else {
                    continue;
                };

                let own_mbps = application.bandwidth_mbps();
                let mut worst_micros: f64 = 0.0;
                for path in binding.paths() {
                    let mut path_micros = 0.0;
                    for &edge in path.edges() {
                        let other_mbps = allocations.total_mbps(edge) - own_mbps;
                        path_micros += edge_wcrt_micros(
                            &self.params,
                            class,
                            application.max_frame_bytes(),
                            own_mbps,
                            other_mbps,
                        );
                    }
                    // Multicast delivery is only as fast as its slowest
                    // branch.
                    if path_micros > worst_micros {
                        worst_micros = path_micros;
                    }
                }

                let deadline_micros = application.deadline_micros();
                if worst_micros > deadline_micros {
                    debug!(
                        mode,
                        flow = application.title(),
                        worst_micros,
                        deadline_micros,
                        "worst-case latency exceeds deadline, rejecting candidate"
                    );
                    return Ok(Cost::INFEASIBLE);
                }

                let ratio = worst_micros / deadline_micros;
                if ratio > self.params.penalty_threshold() {
                    mode_cost += (ratio - self.params.penalty_threshold())
                        * 100.0
                        * self.params.threshold_exceeded_penalty();
                }
            }

            total += Cost::finite(mode_cost);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trellis_model::index::{EdgeIndex, NodeIndex};
    use trellis_model::routing::RoutePath;
    use trellis_model::topology::TopologyBuilder;
    use trellis_model::traffic::{Application, ExplicitRoute, SrClass};

    /// Builds a chain of `num_edges + 1` nodes where edge `i` connects node
    /// `i` to node `i + 1` with the given capacity.
    fn line_topology(num_edges: usize, capacity_mbps: f64) -> Topology {
        let mut builder = TopologyBuilder::new();
        let mut previous = builder.add_end_system();
        for _ in 0..num_edges {
            let next = builder.add_bridge();
            builder.add_edge(previous, next, capacity_mbps);
            previous = next;
        }
        builder.build()
    }

    fn sr_application(
        title: &str,
        max_frame_bytes: u32,
        frames_per_interval: u32,
        interval_micros: f64,
        deadline_micros: f64,
        modes: &[&str],
        source: usize,
        destinations: &[usize],
    ) -> Arc<Application> {
        Arc::new(Application::stream_reservation(
            title,
            NodeIndex::new(source),
            destinations.iter().map(|&node| NodeIndex::new(node)).collect(),
            max_frame_bytes,
            frames_per_interval,
            interval_micros,
            deadline_micros,
            SrClass::A,
            modes.iter().map(|mode| mode.to_string()).collect(),
        ))
    }

    fn tt_application(title: &str, source: usize, destination: usize) -> Arc<Application> {
        Arc::new(Application::time_triggered(
            title,
            NodeIndex::new(source),
            vec![NodeIndex::new(destination)],
            1522,
            1,
            ExplicitRoute::new(vec![NodeIndex::new(source), NodeIndex::new(destination)]),
        ))
    }

    fn binding(application: Arc<Application>, paths: &[&[usize]]) -> FlowBinding {
        FlowBinding::new(
            application,
            paths
                .iter()
                .map(|edges| RoutePath::new(edges.iter().map(|&edge| EdgeIndex::new(edge))))
                .collect(),
        )
    }

    /// A 32 Mbps Class A flow over the first `num_edges` edges of a line
    /// topology, far from its 1000 us deadline when uncontended.
    fn comfortable_flow(num_edges: usize) -> FlowBinding {
        let edges: Vec<usize> = (0..num_edges).collect();
        binding(
            sr_application("camera", 250, 2, 125.0, 1000.0, &["normal"], 0, &[num_edges]),
            &[&edges],
        )
    }

    #[test]
    fn test_empty_bindings_cost_zero() {
        let topology = line_topology(1, 100.0);
        let evaluator = AvbWcrtEvaluator::new();
        assert_eq!(evaluator.evaluate(&[], &topology), Ok(Cost::ZERO));
    }

    #[test]
    fn test_single_flow_cost_is_hop_penalty_times_edges() {
        let topology = line_topology(2, 100.0);
        let evaluator = AvbWcrtEvaluator::new();
        // 32 Mbps on 100 Mbps edges, 163.24 us against a 1000 us deadline:
        // nothing to pay but two hops.
        let cost = evaluator.evaluate(&[comfortable_flow(2)], &topology).unwrap();
        assert_eq!(cost, Cost::finite(2.0));
    }

    #[test]
    fn test_hop_penalty_override_scales_cost() {
        let topology = line_topology(2, 100.0);
        let evaluator =
            AvbWcrtEvaluator::with_params(EvaluatorParams::new().with_hop_penalty(2.5));
        let cost = evaluator.evaluate(&[comfortable_flow(2)], &topology).unwrap();
        assert_eq!(cost, Cost::finite(5.0));
    }

    #[test]
    fn test_capacity_exceeded_is_infeasible() {
        // 32 Mbps demand against 40 * 0.75 = 30 Mbps allocatable.
        let topology = line_topology(2, 40.0);
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[comfortable_flow(2)], &topology).unwrap();
        assert!(cost.is_infeasible());
    }

    #[test]
    fn test_allocation_at_margin_is_feasible() {
        // 750 B * 8 * 1 / 125 us = 48 Mbps, exactly 64 * 0.75. The margin
        // check is strict, so sitting on it is still feasible.
        let topology = line_topology(1, 64.0);
        let flow = binding(
            sr_application("bulk", 750, 1, 125.0, 1000.0, &["normal"], 0, &[1]),
            &[&[0]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[flow], &topology).unwrap();
        assert!(cost.is_feasible());
    }

    #[test]
    fn test_deadline_exceeded_is_infeasible() {
        let topology = line_topology(1, 100.0);
        // One uncontended hop costs 81.62 us; an 80 us deadline cannot hold.
        let flow = binding(
            sr_application("tight", 250, 2, 125.0, 80.0, &["normal"], 0, &[1]),
            &[&[0]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[flow], &topology).unwrap();
        assert!(cost.is_infeasible());
    }

    #[test]
    fn test_threshold_penalty_exact() {
        let topology = line_topology(1, 100.0);
        // 81.62 us against a 100 us deadline: ratio 0.8162, penalty
        // (0.8162 - 0.8) * 100 * 0.1 = 0.162, plus one hop.
        let flow = binding(
            sr_application("snug", 250, 2, 125.0, 100.0, &["normal"], 0, &[1]),
            &[&[0]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[flow], &topology).unwrap();
        assert!((cost.value() - 1.162).abs() < 1e-9);
    }

    #[test]
    fn test_multicast_worst_path_dominates() {
        // source 0 feeds destination 1 directly (edge 0) and destination 3
        // through bridge 2 (edges 1 and 2).
        let mut builder = TopologyBuilder::new();
        let source = builder.add_end_system();
        let near = builder.add_end_system();
        let bridge = builder.add_bridge();
        let far = builder.add_end_system();
        builder.add_edge(source, near, 100.0);
        builder.add_edge(source, bridge, 100.0);
        builder.add_edge(bridge, far, 100.0);
        let topology = builder.build();

        let flow = binding(
            sr_application("multicast", 250, 2, 125.0, 200.0, &["normal"], 0, &[1, 3]),
            &[&[0], &[1, 2]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[flow], &topology).unwrap();

        // The near branch sits at 81.62 / 200 = 0.408, under the threshold.
        // The far branch sits at 163.24 / 200 = 0.8162 and must be the one
        // charged: 3 hops + (0.8162 - 0.8) * 100 * 0.1 = 3.162. Averaging
        // the branches would charge nothing; summing them would reject.
        assert!((cost.value() - 3.162).abs() < 1e-9);
    }

    #[test]
    fn test_modes_reset_allocation_and_charge_independently() {
        // 48 Mbps sits exactly on the 64 * 0.75 margin. Allocation leaking
        // from one mode's pass into the other would read 96 Mbps and reject.
        let topology = line_topology(1, 64.0);
        let flow = binding(
            sr_application("dual", 750, 1, 125.0, 1000.0, &["normal", "degraded"], 0, &[1]),
            &[&[0]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[flow], &topology).unwrap();

        // One hop charged once per mode the flow is active in.
        assert_eq!(cost, Cost::finite(2.0));
    }

    #[test]
    fn test_time_triggered_bandwidth_counts_against_capacity() {
        // SR alone: 32 Mbps under the 70 * 0.75 = 52.5 margin. With the
        // always-active TT flow's 24.352 Mbps on the same edge the total is
        // 56.352 and the candidate must be rejected.
        let topology = line_topology(1, 70.0);
        let sr = comfortable_flow(1);
        let tt = binding(tt_application("schedule", 0, 1), &[&[0]]);
        let evaluator = AvbWcrtEvaluator::new();

        assert!(evaluator.evaluate(&[sr.clone()], &topology).unwrap().is_feasible());
        assert!(evaluator.evaluate(&[sr, tt], &topology).unwrap().is_infeasible());
    }

    #[test]
    fn test_time_triggered_only_costs_zero() {
        let topology = line_topology(1, 100.0);
        let tt = binding(tt_application("schedule", 0, 1), &[&[0]]);
        let evaluator = AvbWcrtEvaluator::new();
        // No stream-reservation flow declares a mode, so no pass runs.
        assert_eq!(evaluator.evaluate(&[tt], &topology), Ok(Cost::ZERO));
    }

    #[test]
    fn test_time_triggered_skips_latency_check() {
        // The TT flow's zero-deadline sentinel would reject any candidate
        // if it were latency-checked. It is charged for hops and bandwidth
        // only.
        let topology = line_topology(1, 100.0);
        let sr = comfortable_flow(1);
        let tt = binding(tt_application("schedule", 0, 1), &[&[0]]);
        let evaluator = AvbWcrtEvaluator::new();

        let cost = evaluator.evaluate(&[sr, tt], &topology).unwrap();
        assert_eq!(cost, Cost::finite(2.0));
    }

    #[test]
    fn test_cost_is_monotone_in_hop_count() {
        // Node 0 reaches node 2 directly (edge 2) or through bridge 1
        // (edges 0 and 1).
        let mut builder = TopologyBuilder::new();
        let source = builder.add_end_system();
        let bridge = builder.add_bridge();
        let sink = builder.add_end_system();
        builder.add_edge(source, bridge, 100.0);
        builder.add_edge(bridge, sink, 100.0);
        builder.add_edge(source, sink, 100.0);
        let topology = builder.build();

        let application = sr_application("camera", 250, 2, 125.0, 1000.0, &["normal"], 0, &[2]);
        let short = binding(application.clone(), &[&[2]]);
        let long = binding(application, &[&[0, 1]]);
        let evaluator = AvbWcrtEvaluator::new();

        let short_cost = evaluator.evaluate(&[short], &topology).unwrap();
        let long_cost = evaluator.evaluate(&[long], &topology).unwrap();
        assert!(short_cost < long_cost);
    }

    #[test]
    fn test_shared_edge_contention_raises_latency_penalty() {
        // Two 32 Mbps flows share one edge: each sees the other as 32 Mbps
        // of competing traffic, 206.62 us against 250 us deadlines. Ratio
        // 0.82648 is over the threshold for both flows:
        // 2 hops + 2 * (0.82648 - 0.8) * 100 * 0.1 = 2.5296.
        let topology = line_topology(1, 100.0);
        let first = binding(
            sr_application("left", 250, 2, 125.0, 250.0, &["normal"], 0, &[1]),
            &[&[0]],
        );
        let second = binding(
            sr_application("right", 250, 2, 125.0, 250.0, &["normal"], 0, &[1]),
            &[&[0]],
        );
        let evaluator = AvbWcrtEvaluator::new();
        let cost = evaluator.evaluate(&[first, second], &topology).unwrap();
        assert!((cost.value() - 2.5296).abs() < 1e-9);
    }

    #[test]
    fn test_error_display() {
        let error = EvaluateError::UnsupportedApplication {
            title: "mystery".to_string(),
        };
        assert_eq!(format!("{}", error), "unsupported application kind of flow \"mystery\"");
    }

    #[test]
    fn test_dyn_evaluator_debug_and_display() {
        let evaluator: Box<dyn RoutingEvaluator> = Box::new(AvbWcrtEvaluator::new());
        assert_eq!(format!("{}", evaluator.as_ref()), "AvbWcrtEvaluator");
        assert_eq!(format!("{:?}", evaluator.as_ref()), "RoutingEvaluator(AvbWcrtEvaluator)");
    }
}
