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

//! # Mode Partitioning
//!
//! Splits one candidate's flow bindings by operating mode. Stream-reservation
//! flows join every mode their label set names; time-triggered flows are
//! mode-agnostic and collected into an always-active set that every mode's
//! working set unions in, since they occupy the physical links at all times.
//! An application variant the engine does not recognize is a fatal input
//! error, never a silently skipped flow.
//!
//! The partition borrows mode labels from the bindings it classifies, so
//! building it allocates only the member vectors.

use crate::evaluator::EvaluateError;
use rustc_hash::FxHashMap;
use trellis_model::routing::FlowBinding;
use trellis_model::traffic::ApplicationKind;

/// The flow bindings of one candidate, grouped by operating mode.
///
/// Members are stored as indices into the binding slice the partition was
/// built from.
#[derive(Clone, Debug)]
pub struct ModePartition<'a> {
    modes: FxHashMap<&'a str, Vec<usize>>,
    always_active: Vec<usize>,
}

impl<'a> ModePartition<'a> {
    /// Classifies the given bindings by application variant.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::UnsupportedApplication`] if any binding
    /// carries an application variant the engine does not recognize.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use trellis_eval::partition::ModePartition;
    /// use trellis_model::index::{EdgeIndex, NodeIndex};
    /// use trellis_model::routing::{FlowBinding, RoutePath};
    /// use trellis_model::traffic::{Application, SrClass};
    ///
    /// let flow = Arc::new(Application::stream_reservation(
    ///     "sensor",
    ///     NodeIndex::new(0),
    ///     vec![NodeIndex::new(1)],
    ///     125,
    ///     1,
    ///     250.0,
    ///     2000.0,
    ///     SrClass::B,
    ///     vec!["normal".to_string()],
    /// ));
    /// let bindings = vec![FlowBinding::new(flow, vec![RoutePath::new([EdgeIndex::new(0)])])];
    ///
    /// let partition = ModePartition::classify(&bindings).unwrap();
    /// assert_eq!(partition.num_modes(), 1);
    /// assert_eq!(partition.members("normal"), Some(&[0_usize][..]));
    /// ```
    pub fn classify(bindings: &'a [FlowBinding]) -> Result<Self, EvaluateError> {
        let mut modes: FxHashMap<&'a str, Vec<usize>> = FxHashMap::default();
        let mut always_active = Vec::new();

        for (index, binding) in bindings.iter().enumerate() {
            match binding.application().kind() {
                ApplicationKind::TimeTriggered { .. } => always_active.push(index),
                ApplicationKind::StreamReservation { modes: labels, .. } => {
                    for label in labels {
                        modes.entry(label.as_str()).or_default().push(index);
                    }
                }
                _ => {
                    return Err(EvaluateError::UnsupportedApplication {
                        title: binding.application().title().to_string(),
                    });
                }
            }
        }

        Ok(Self { modes, always_active })
    }

    /// Returns the number of declared modes.
    #[inline]
    pub fn num_modes(&self) -> usize {
        self.modes.len()
    }

    /// Returns `true` if no stream-reservation flow declared any mode.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Iterates over `(mode label, member indices)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[usize])> {
        self.modes.iter().map(|(label, members)| (*label, members.as_slice()))
    }

    /// Returns the member indices of the given mode, if it is declared.
    #[inline]
    pub fn members(&self, label: &str) -> Option<&[usize]> {
        self.modes.get(label).map(Vec::as_slice)
    }

    /// Returns the indices of the mode-agnostic, always-active flows.
    #[inline]
    pub fn always_active(&self) -> &[usize] {
        &self.always_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use trellis_model::index::{EdgeIndex, NodeIndex};
    use trellis_model::routing::RoutePath;
    use trellis_model::traffic::{Application, ExplicitRoute, SrClass};

    fn sr_binding(title: &str, modes: &[&str]) -> FlowBinding {
        let application = Arc::new(Application::stream_reservation(
            title,
            NodeIndex::new(0),
            vec![NodeIndex::new(1)],
            250,
            1,
            125.0,
            1000.0,
            SrClass::A,
            modes.iter().map(|label| label.to_string()).collect(),
        ));
        FlowBinding::new(application, vec![RoutePath::new([EdgeIndex::new(0)])])
    }

    fn tt_binding(title: &str) -> FlowBinding {
        let application = Arc::new(Application::time_triggered(
            title,
            NodeIndex::new(0),
            vec![NodeIndex::new(1)],
            1522,
            1,
            ExplicitRoute::new(vec![NodeIndex::new(0), NodeIndex::new(1)]),
        ));
        FlowBinding::new(application, vec![RoutePath::new([EdgeIndex::new(0)])])
    }

    #[test]
    fn test_stream_reservation_joins_each_named_mode() {
        let bindings = vec![
            sr_binding("solo", &["normal"]),
            sr_binding("shared", &["normal", "degraded"]),
        ];
        let partition = ModePartition::classify(&bindings).unwrap();

        assert_eq!(partition.num_modes(), 2);
        assert_eq!(partition.members("normal"), Some(&[0_usize, 1][..]));
        assert_eq!(partition.members("degraded"), Some(&[1_usize][..]));
        assert_eq!(partition.members("unknown"), None);
        assert!(partition.always_active().is_empty());
    }

    #[test]
    fn test_time_triggered_is_always_active_and_declares_no_mode() {
        let bindings = vec![tt_binding("control"), sr_binding("camera", &["normal"])];
        let partition = ModePartition::classify(&bindings).unwrap();

        assert_eq!(partition.num_modes(), 1);
        assert_eq!(partition.always_active(), &[0]);
        assert_eq!(partition.members("normal"), Some(&[1_usize][..]));
    }

    #[test]
    fn test_time_triggered_only_yields_no_modes() {
        let bindings = vec![tt_binding("control-a"), tt_binding("control-b")];
        let partition = ModePartition::classify(&bindings).unwrap();

        assert!(partition.is_empty());
        assert_eq!(partition.num_modes(), 0);
        assert_eq!(partition.always_active(), &[0, 1]);
    }

    #[test]
    fn test_empty_bindings_yield_empty_partition() {
        let partition = ModePartition::classify(&[]).unwrap();
        assert!(partition.is_empty());
        assert!(partition.always_active().is_empty());
        assert_eq!(partition.iter().count(), 0);
    }

    #[test]
    fn test_iter_visits_every_mode_once() {
        let bindings = vec![sr_binding("shared", &["normal", "degraded", "limp"])];
        let partition = ModePartition::classify(&bindings).unwrap();

        let mut labels: Vec<&str> = partition.iter().map(|(label, _)| label).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["degraded", "limp", "normal"]);
        for (_, members) in partition.iter() {
            assert_eq!(members, &[0]);
        }
    }
}
