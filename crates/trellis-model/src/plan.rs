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

//! # Routing Plans
//!
//! A [`RoutingPlan`] is a scored candidate: the full flow-binding set
//! together with the cost the evaluator assigned to it. The search retains
//! the best plan seen; everything else is discarded after scoring.

use crate::cost::Cost;
use crate::routing::FlowBinding;

/// A complete routing assignment together with its evaluated cost.
#[derive(Clone, PartialEq, Debug)]
pub struct RoutingPlan {
    cost: Cost,
    bindings: Vec<FlowBinding>,
}

impl RoutingPlan {
    /// Creates a plan from an evaluated cost and the bindings it scored.
    #[inline]
    pub fn new(cost: Cost, bindings: Vec<FlowBinding>) -> Self {
        Self { cost, bindings }
    }

    /// Returns the evaluated cost.
    #[inline(always)]
    pub const fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the flow bindings.
    #[inline]
    pub fn bindings(&self) -> &[FlowBinding] {
        &self.bindings
    }

    /// Returns the number of bound flows.
    #[inline]
    pub fn num_flows(&self) -> usize {
        self.bindings.len()
    }

    /// Consumes the plan and returns its bindings.
    #[inline]
    pub fn into_bindings(self) -> Vec<FlowBinding> {
        self.bindings
    }
}

impl std::fmt::Display for RoutingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoutingPlan(cost: {}, flows: {})", self.cost, self.num_flows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{EdgeIndex, NodeIndex};
    use crate::routing::RoutePath;
    use crate::traffic::{Application, SrClass};
    use std::sync::Arc;

    fn single_binding() -> FlowBinding {
        let application = Arc::new(Application::stream_reservation(
            "sensor",
            NodeIndex::new(0),
            vec![NodeIndex::new(2)],
            125,
            1,
            250.0,
            2000.0,
            SrClass::B,
            vec!["normal".to_string()],
        ));
        FlowBinding::new(
            application,
            vec![RoutePath::new([EdgeIndex::new(0), EdgeIndex::new(1)])],
        )
    }

    #[test]
    fn test_accessors() {
        let plan = RoutingPlan::new(Cost::finite(2.0), vec![single_binding()]);
        assert_eq!(plan.cost(), Cost::finite(2.0));
        assert_eq!(plan.num_flows(), 1);
        assert_eq!(plan.bindings().len(), 1);
    }

    #[test]
    fn test_into_bindings() {
        let plan = RoutingPlan::new(Cost::ZERO, vec![single_binding(), single_binding()]);
        let bindings = plan.into_bindings();
        assert_eq!(bindings.len(), 2);
    }

    #[test]
    fn test_display() {
        let plan = RoutingPlan::new(Cost::finite(2.0), vec![single_binding()]);
        assert_eq!(format!("{}", plan), "RoutingPlan(cost: 2.000, flows: 1)");

        let infeasible = RoutingPlan::new(Cost::INFEASIBLE, Vec::new());
        assert_eq!(format!("{}", infeasible), "RoutingPlan(cost: infeasible, flows: 0)");
    }
}
