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

//! # Routing Assignments
//!
//! A [`RoutePath`] is the ordered edge sequence from a flow's source to one
//! destination. A [`FlowBinding`] pairs an application with exactly one path
//! per destination, in destination order; it is the unit the scoring engine
//! consumes. Candidates are produced in bulk by the search, so paths keep
//! their edges inline for typical hop counts and the application is shared
//! behind an [`std::sync::Arc`] instead of being cloned per candidate.

use crate::index::EdgeIndex;
use crate::traffic::Application;
use smallvec::SmallVec;
use std::sync::Arc;

/// Most fabric paths stay well under this; longer ones spill to the heap.
const INLINE_PATH_EDGES: usize = 8;

/// An ordered, contiguous sequence of directed edges.
///
/// Contiguity (each edge starting where the previous one ends, the first
/// departing the flow's source) is the producer's responsibility and is not
/// re-validated here.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RoutePath {
    edges: SmallVec<[EdgeIndex; INLINE_PATH_EDGES]>,
}

impl RoutePath {
    /// Creates a path from the given edge sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trellis_model::index::EdgeIndex;
    /// use trellis_model::routing::RoutePath;
    ///
    /// let path = RoutePath::new([EdgeIndex::new(0), EdgeIndex::new(3)]);
    /// assert_eq!(path.num_hops(), 2);
    /// ```
    pub fn new(edges: impl IntoIterator<Item = EdgeIndex>) -> Self {
        let edges: SmallVec<[EdgeIndex; INLINE_PATH_EDGES]> = edges.into_iter().collect();
        assert!(!edges.is_empty(), "called `RoutePath::new` with no edges");

        Self { edges }
    }

    /// Returns the edge sequence.
    #[inline]
    pub fn edges(&self) -> &[EdgeIndex] {
        &self.edges
    }

    /// Returns the number of edges on the path.
    #[inline]
    pub fn num_hops(&self) -> usize {
        self.edges.len()
    }

    /// Returns the first edge, the one departing the flow's source.
    #[inline]
    pub fn first_edge(&self) -> EdgeIndex {
        self.edges[0]
    }

    /// Returns the last edge, the one arriving at the destination.
    #[inline]
    pub fn last_edge(&self) -> EdgeIndex {
        self.edges[self.edges.len() - 1]
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoutePath([")?;
        for (position, edge) in self.edges.iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", edge.get())?;
        }
        write!(f, "])")
    }
}

/// One application bound to concrete routing, one path per destination.
///
/// Paths are stored in destination order: `paths()[i]` routes to
/// `application().destinations()[i]`.
#[derive(Clone, PartialEq, Debug)]
pub struct FlowBinding {
    application: Arc<Application>,
    paths: Vec<RoutePath>,
}

impl FlowBinding {
    /// Creates a binding of the given application to the given paths.
    ///
    /// # Panics
    ///
    /// Panics if the number of paths differs from the number of the
    /// application's destinations.
    pub fn new(application: Arc<Application>, paths: Vec<RoutePath>) -> Self {
        assert_eq!(
            paths.len(),
            application.num_destinations(),
            "called `FlowBinding::new` with inconsistent path count: the application has {} destinations but {} paths were given",
            application.num_destinations(),
            paths.len()
        );

        Self { application, paths }
    }

    /// Returns the bound application.
    #[inline]
    pub fn application(&self) -> &Application {
        &self.application
    }

    /// Returns the shared handle to the bound application.
    #[inline]
    pub fn application_arc(&self) -> &Arc<Application> {
        &self.application
    }

    /// Returns the routing paths in destination order.
    #[inline]
    pub fn paths(&self) -> &[RoutePath] {
        &self.paths
    }

    /// Returns the number of paths, which equals the destination count.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }
}

impl std::fmt::Display for FlowBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FlowBinding(\"{}\", paths: {})",
            self.application.title(),
            self.paths.len()
        )
    }
}
