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

//! # Traffic Flows
//!
//! The application model: every real-time flow that competes for fabric
//! capacity, in one of two variants.
//!
//! ## Motivation
//!
//! TSN fabrics carry two kinds of guaranteed traffic. Time-triggered flows
//! are scheduled offline on a fixed cycle and arrive with an externally
//! computed route; the scoring engine only accounts for their bandwidth.
//! Stream-reservation (AVB) flows are routed by the search itself and must
//! additionally meet a worst-case latency deadline in every operating mode
//! they are active in. Both variants share the framing parameters, so they
//! live in one [`Application`] type with the variant-specific data in
//! [`ApplicationKind`].
//!
//! ## Highlights
//!
//! - [`SrClass`] fixes the measurement interval the latency model uses per
//!   AVB class (125 us for Class A, 250 us for Class B).
//! - A deadline of zero is the sentinel for "no latency constraint"; it is
//!   what time-triggered flows carry.
//! - [`ApplicationKind`] is `#[non_exhaustive]`: downstream consumers must
//!   handle unknown variants explicitly instead of silently skipping them.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_model::index::NodeIndex;
//! use trellis_model::traffic::{Application, SrClass};
//!
//! let flow = Application::stream_reservation(
//!     "camera-front",
//!     NodeIndex::new(0),
//!     vec![NodeIndex::new(4)],
//!     250,
//!     2,
//!     125.0,
//!     1000.0,
//!     SrClass::A,
//!     vec!["normal".to_string()],
//! );
//!
//! assert_eq!(flow.bandwidth_mbps(), 32.0);
//! assert_eq!(flow.sr_class(), Some(SrClass::A));
//! ```

use crate::index::NodeIndex;

/// The stream-reservation traffic class of an AVB flow.
///
/// The class determines the measurement interval over which competing
/// same-class traffic is accumulated in the worst-case latency formula.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SrClass {
    /// SR Class A, measured over 125 us.
    A,
    /// SR Class B, measured over 250 us.
    B,
}

impl SrClass {
    /// Returns the class measurement interval in microseconds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_model::traffic::SrClass;
    ///
    /// assert_eq!(SrClass::A.interval_micros(), 125.0);
    /// assert_eq!(SrClass::B.interval_micros(), 250.0);
    /// ```
    #[inline(always)]
    pub const fn interval_micros(self) -> f64 {
        match self {
            SrClass::A => 125.0,
            SrClass::B => 250.0,
        }
    }
}

impl std::fmt::Display for SrClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SrClass::A => write!(f, "Class A"),
            SrClass::B => write!(f, "Class B"),
        }
    }
}

/// The externally computed node sequence of a time-triggered flow.
///
/// Informational only: the cost model takes the concrete per-destination
/// paths from the flow binding, never from this descriptor.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ExplicitRoute {
    hops: Vec<NodeIndex>,
}

impl ExplicitRoute {
    /// Creates a route from the given node sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence has fewer than two hops.
    pub fn new(hops: Vec<NodeIndex>) -> Self {
        assert!(
            hops.len() >= 2,
            "called `ExplicitRoute::new` with fewer than two hops: the len is {}",
            hops.len()
        );

        Self { hops }
    }

    /// Returns the node sequence.
    #[inline]
    pub fn hops(&self) -> &[NodeIndex] {
        &self.hops
    }

    /// Returns the number of hops in the sequence.
    #[inline]
    pub fn num_hops(&self) -> usize {
        self.hops.len()
    }
}

impl std::fmt::Display for ExplicitRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, hop) in self.hops.iter().enumerate() {
            if position > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", hop.get())?;
        }
        Ok(())
    }
}

/// The variant-specific half of an [`Application`].
///
/// Marked `#[non_exhaustive]` so that crates consuming the model are forced
/// to write an explicit rejection arm for variants they do not recognize.
#[non_exhaustive]
#[derive(Clone, PartialEq, Debug)]
pub enum ApplicationKind {
    /// Offline-scheduled traffic on a fixed cycle with a precomputed route.
    TimeTriggered {
        /// The externally supplied route descriptor.
        route: ExplicitRoute,
    },
    /// AVB traffic routed by the search, active in one or more modes.
    StreamReservation {
        /// The stream-reservation traffic class.
        class: SrClass,
        /// The operating modes this flow is active in. Never empty.
        modes: Vec<String>,
    },
}

/// A real-time traffic flow from one source to one or more destinations.
///
/// Framing parameters are shared across variants; everything
/// variant-specific lives in [`ApplicationKind`]. Applications are loaded
/// once per run and shared read-only afterwards.
#[derive(Clone, PartialEq, Debug)]
pub struct Application {
    title: String,
    max_frame_bytes: u32,
    frames_per_interval: u32,
    interval_micros: f64,
    deadline_micros: f64,
    source: NodeIndex,
    destinations: Vec<NodeIndex>,
    kind: ApplicationKind,
}

impl Application {
    /// The fixed cycle length of time-triggered flows in microseconds.
    pub const TT_INTERVAL_MICROS: f64 = 500.0;

    /// The deadline sentinel meaning "no latency constraint is enforced".
    pub const NO_DEADLINE_MICROS: f64 = 0.0;

    /// Creates a time-triggered flow.
    ///
    /// The interval is fixed to [`Application::TT_INTERVAL_MICROS`] and the
    /// deadline to the zero sentinel: the flow's own schedule is computed
    /// offline, so no latency constraint is enforced by the cost model.
    ///
    /// # Panics
    ///
    /// Panics if the title is empty, if `max_frame_bytes` or
    /// `frames_per_interval` is zero, or if `destinations` is empty.
    pub fn time_triggered(
        title: impl Into<String>,
        source: NodeIndex,
        destinations: Vec<NodeIndex>,
        max_frame_bytes: u32,
        frames_per_interval: u32,
        route: ExplicitRoute,
    ) -> Self {
        let title = title.into();
        Self::validate_common(
            "Application::time_triggered",
            &title,
            max_frame_bytes,
            frames_per_interval,
            &destinations,
        );

        Self {
            title,
            max_frame_bytes,
            frames_per_interval,
            interval_micros: Self::TT_INTERVAL_MICROS,
            deadline_micros: Self::NO_DEADLINE_MICROS,
            source,
            destinations,
            kind: ApplicationKind::TimeTriggered { route },
        }
    }

    /// Creates a stream-reservation flow.
    ///
    /// # Panics
    ///
    /// Panics if the title is empty, if `max_frame_bytes` or
    /// `frames_per_interval` is zero, if `destinations` is empty, if
    /// `interval_micros` or `deadline_micros` is not a positive finite
    /// number, or if `modes` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn stream_reservation(
        title: impl Into<String>,
        source: NodeIndex,
        destinations: Vec<NodeIndex>,
        max_frame_bytes: u32,
        frames_per_interval: u32,
        interval_micros: f64,
        deadline_micros: f64,
        class: SrClass,
        modes: Vec<String>,
    ) -> Self {
        let title = title.into();
        Self::validate_common(
            "Application::stream_reservation",
            &title,
            max_frame_bytes,
            frames_per_interval,
            &destinations,
        );
        assert!(
            interval_micros.is_finite() && interval_micros > 0.0,
            "called `Application::stream_reservation` with a non-positive interval: {}",
            interval_micros
        );
        assert!(
            deadline_micros.is_finite() && deadline_micros > 0.0,
            "called `Application::stream_reservation` with a non-positive deadline: {}",
            deadline_micros
        );
        assert!(
            !modes.is_empty(),
            "called `Application::stream_reservation` with an empty mode set"
        );

        Self {
            title,
            max_frame_bytes,
            frames_per_interval,
            interval_micros,
            deadline_micros,
            source,
            destinations,
            kind: ApplicationKind::StreamReservation { class, modes },
        }
    }

    fn validate_common(
        operation: &str,
        title: &str,
        max_frame_bytes: u32,
        frames_per_interval: u32,
        destinations: &[NodeIndex],
    ) {
        assert!(!title.is_empty(), "called `{}` with an empty title", operation);
        assert!(
            max_frame_bytes >= 1,
            "called `{}` with a zero maximum frame size",
            operation
        );
        assert!(
            frames_per_interval >= 1,
            "called `{}` with a zero frame count",
            operation
        );
        assert!(
            !destinations.is_empty(),
            "called `{}` with no destinations",
            operation
        );
    }

    /// Returns the flow title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the maximum frame payload size in bytes.
    #[inline(always)]
    pub const fn max_frame_bytes(&self) -> u32 {
        self.max_frame_bytes
    }

    /// Returns the number of frames sent per interval.
    #[inline(always)]
    pub const fn frames_per_interval(&self) -> u32 {
        self.frames_per_interval
    }

    /// Returns the sending interval in microseconds.
    #[inline(always)]
    pub const fn interval_micros(&self) -> f64 {
        self.interval_micros
    }

    /// Returns the end-to-end deadline in microseconds, or the zero sentinel
    /// if the flow has no latency constraint.
    #[inline(always)]
    pub const fn deadline_micros(&self) -> f64 {
        self.deadline_micros
    }

    /// Returns `true` if the flow carries a real latency constraint.
    #[inline]
    pub fn has_deadline(&self) -> bool {
        self.deadline_micros > 0.0
    }

    /// Returns the source node.
    #[inline(always)]
    pub const fn source(&self) -> NodeIndex {
        self.source
    }

    /// Returns the destination nodes. Never empty.
    #[inline]
    pub fn destinations(&self) -> &[NodeIndex] {
        &self.destinations
    }

    /// Returns the number of destinations.
    #[inline]
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Returns the variant-specific data.
    #[inline]
    pub fn kind(&self) -> &ApplicationKind {
        &self.kind
    }

    /// Returns `true` if this is a time-triggered flow.
    #[inline]
    pub fn is_time_triggered(&self) -> bool {
        matches!(self.kind, ApplicationKind::TimeTriggered { .. })
    }

    /// Returns `true` if this is a stream-reservation flow.
    #[inline]
    pub fn is_stream_reservation(&self) -> bool {
        matches!(self.kind, ApplicationKind::StreamReservation { .. })
    }

    /// Returns the stream-reservation class, or `None` for flows that have
    /// no class.
    #[inline]
    pub fn sr_class(&self) -> Option<SrClass> {
        match &self.kind {
            ApplicationKind::StreamReservation { class, .. } => Some(*class),
            ApplicationKind::TimeTriggered { .. } => None,
        }
    }

    /// Returns the mode labels this flow is active in. Time-triggered flows
    /// are mode-agnostic and return an empty slice.
    #[inline]
    pub fn mode_labels(&self) -> &[String] {
        match &self.kind {
            ApplicationKind::StreamReservation { modes, .. } => modes,
            ApplicationKind::TimeTriggered { .. } => &[],
        }
    }

    /// Returns the average bandwidth demand of this flow in Mbps.
    ///
    /// Frame bytes are converted to bits and spread over the sending
    /// interval; with the interval in microseconds the quotient is exactly
    /// megabits per second.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_model::index::NodeIndex;
    /// # use trellis_model::traffic::{Application, SrClass};
    ///
    /// let flow = Application::stream_reservation(
    ///     "sensor",
    ///     NodeIndex::new(0),
    ///     vec![NodeIndex::new(1)],
    ///     125,
    ///     1,
    ///     250.0,
    ///     2000.0,
    ///     SrClass::B,
    ///     vec!["normal".to_string()],
    /// );
    ///
    /// // 125 bytes * 8 bits * 1 frame / 250 us = 4 Mbps.
    /// assert_eq!(flow.bandwidth_mbps(), 4.0);
    /// ```
    #[inline]
    pub fn bandwidth_mbps(&self) -> f64 {
        let frame_bits = self.max_frame_bytes as f64 * 8.0;
        frame_bits * self.frames_per_interval as f64 / self.interval_micros
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ApplicationKind::TimeTriggered { route } => {
                write!(
                    f,
                    "TT \"{}\" ({} x {} B / {} us) route {}",
                    self.title,
                    self.frames_per_interval,
                    self.max_frame_bytes,
                    self.interval_micros,
                    route
                )
            }
            ApplicationKind::StreamReservation { class, modes } => {
                write!(
                    f,
                    "SR \"{}\" {} ({} x {} B / {} us) deadline {} us modes [{}]",
                    self.title,
                    class,
                    self.frames_per_interval,
                    self.max_frame_bytes,
                    self.interval_micros,
                    self.deadline_micros,
                    modes.join(", ")
                )
            }
        }
    }
}
