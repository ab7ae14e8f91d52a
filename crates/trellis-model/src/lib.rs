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

//! # Trellis Model
//!
//! **The domain model of the trellis TSN routing toolkit.**
//!
//! Everything a candidate routing is made of lives here: the switched
//! Ethernet fabric, the time-triggered and stream-reservation applications
//! that run over it, and the path assignments that bind the two together.
//! The evaluation and search crates consume these types; none of the scoring
//! logic does.
//!
//! ## Architecture
//!
//! * **`index`**: phantom-tagged index types (`NodeIndex`, `EdgeIndex`) so a
//!   position in one table cannot silently address another.
//! * **`topology`**: the immutable `Topology` the scoring loops read, and
//!   the `TopologyBuilder` that validates a fabric while it is assembled.
//! * **`traffic`**: applications, AVB stream classes, operating modes, and
//!   the fixed routes of time-triggered traffic.
//! * **`routing`**: `RoutePath` and `FlowBinding`, one path per destination
//!   of a flow.
//! * **`cost`**: the scalar score with its infeasibility sentinel.
//! * **`plan`**: a scored binding set, the artifact a search hands back.
//!
//! ## Design Philosophy
//!
//! 1.  **Construction is checked, scoring is not**: builders and
//!     constructors reject malformed input up front, so the hot loops over
//!     a finished `Topology` can index without re-validating.
//! 2.  **Flat storage**: nodes, edges, and adjacency are index-addressed
//!     vectors rather than a pointer-linked graph, keeping candidate
//!     scoring cache-friendly.
//! 3.  **Plain data**: the model carries no interior mutability and no
//!     scoring state, so topologies and applications can be shared across
//!     search threads as-is.

pub mod cost;
pub mod index;
pub mod plan;
pub mod routing;
pub mod topology;
pub mod traffic;
