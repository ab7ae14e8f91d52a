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

//! # Worst-Case Latency Model
//!
//! The closed-form per-hop worst-case latency bound for stream-reservation
//! traffic, after the formulas in IEEE 802.1BA Draft 2.5. The bound has been
//! shown to be optimistic, so it screens candidates rather than certifying
//! them.
//!
//! ## Terms
//!
//! Per edge, with all times in microseconds and rates in Mbps:
//!
//! | Term             | Meaning                                                  |
//! |------------------|----------------------------------------------------------|
//! | `tDevice`        | Fixed device-internal forwarding latency                 |
//! | `tMaxPacket`     | Transmission time of one maximum-size best-effort frame  |
//! | `tStreamPacket`  | Transmission time of one frame of this stream            |
//! | `tIFG`           | One inter-frame gap                                      |
//! | `tAllStreams`    | Transmission time of competing same-class traffic over   |
//! |                  | the stream's class measurement interval                  |
//! | `tTT`            | Interference from the time-triggered schedule            |
//!
//! ```text
//! latency = tDevice + tMaxPacket + tIFG
//!         + (tAllStreams - (tStreamPacket + tIFG)) * (rate / ownMbps)
//!         + tStreamPacket
//!         + tTT
//! ```
//!
//! The time-triggered interference term is an explicit zero: the TT
//! schedule's real blocking effect on AVB frames is not modeled yet. On a
//! lightly loaded edge the bracketed term can undershoot and drive the
//! per-hop value negative; the evaluator clamps at the path level by folding
//! a flow's worst path latency from zero.

use crate::params::EvaluatorParams;
use trellis_model::traffic::SrClass;

/// Fixed device-internal forwarding latency in microseconds.
pub const DEVICE_LATENCY_MICROS: f64 = 5.12;

/// Preamble and start-of-frame delimiter carried by every frame on the wire.
pub const FRAME_OVERHEAD_BYTES: f64 = 8.0;

/// Minimum idle time between frames, expressed in byte times.
pub const INTERFRAME_GAP_BYTES: f64 = 12.0;

/// Interference budget of the time-triggered schedule. An explicit zero:
/// TT blocking of AVB frames is not modeled.
pub const TT_INTERFERENCE_MICROS: f64 = 0.0;

/// Computes the worst-case latency bound of one stream crossing one edge,
/// in microseconds.
///
/// `own_mbps` is the stream's own allocation on the edge, `other_mbps` the
/// remaining same-class allocation (the edge total minus `own_mbps`). The
/// competing traffic is accumulated over the measurement interval of the
/// stream's own class.
///
/// # Panics
///
/// Panics if `own_mbps` is not a positive finite number or if `other_mbps`
/// is negative or not finite.
///
/// # Examples
///
/// ```rust
/// use trellis_eval::latency::edge_wcrt_micros;
/// use trellis_eval::params::EvaluatorParams;
/// use trellis_model::traffic::SrClass;
///
/// let params = EvaluatorParams::new();
/// // A 250 B stream at 32 Mbps alone on a 100 Mbps edge.
/// let latency = edge_wcrt_micros(&params, SrClass::A, 250, 32.0, 0.0);
/// assert!((latency - 81.62).abs() < 1e-9);
/// ```
pub fn edge_wcrt_micros(
    params: &EvaluatorParams,
    class: SrClass,
    frame_bytes: u32,
    own_mbps: f64,
    other_mbps: f64,
) -> f64 {
    debug_assert!(
        own_mbps.is_finite() && own_mbps > 0.0,
        "called `edge_wcrt_micros` with a non-positive own allocation: {}",
        own_mbps
    );
    debug_assert!(
        other_mbps.is_finite() && other_mbps >= 0.0,
        "called `edge_wcrt_micros` with a negative or non-finite competing allocation: {}",
        other_mbps
    );

    let rate = params.link_rate_mbps();
    let t_max_packet =
        (params.max_best_effort_frame_bytes() as f64 + FRAME_OVERHEAD_BYTES) * 8.0 / rate;
    let t_stream_packet = (frame_bytes as f64 + FRAME_OVERHEAD_BYTES) * 8.0 / rate;
    let t_ifg = INTERFRAME_GAP_BYTES * 8.0 / rate;
    let t_all_streams = other_mbps * class.interval_micros() / rate;

    DEVICE_LATENCY_MICROS
        + t_max_packet
        + t_ifg
        + (t_all_streams - (t_stream_packet + t_ifg)) * (rate / own_mbps)
        + t_stream_packet
        + TT_INTERFERENCE_MICROS
}
