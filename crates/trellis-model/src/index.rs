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

//! # Typed Indices
//!
//! The topology hands out positions into two unrelated arrays: one for
//! nodes, one for directed edges. Passing both around as bare `usize`
//! makes it far too easy to look up a node with an edge position and get
//! a silently wrong answer. `TypedIndex<T>` brands the `usize` with a
//! phantom tag so the compiler rejects such mix-ups, while
//! `#[repr(transparent)]` keeps the wrapper free at runtime.
//!
//! Each tag supplies a `NAME` that `Display` and `Debug` print, so log
//! lines and panic messages name the index space they refer to.
//!
//! ## Usage
//!
//! ```rust
//! use trellis_model::index::{EdgeIndex, NodeIndex};
//!
//! let bridge = NodeIndex::new(2);
//! let uplink = EdgeIndex::new(4);
//! assert_eq!(bridge.get(), 2);
//! assert_eq!(format!("{}", uplink), "EdgeIndex(4)");
//! ```

/// Marker trait for index tags. `NAME` labels the index space in
/// `Display` and `Debug` output.
///
/// ```rust
/// # use trellis_model::index::TypedIndexTag;
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// struct QueueTag;
///
/// impl TypedIndexTag for QueueTag {
///     const NAME: &'static str = "QueueIndex";
/// }
/// ```
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` position branded with the index space it belongs to.
///
/// Two `TypedIndex` values with different tags never compare, assign, or
/// convert into one another, so a node position cannot stray into an edge
/// lookup. The layout is exactly that of the wrapped `usize`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Wraps a raw position.
    ///
    /// ```rust
    /// # use trellis_model::index::NodeIndex;
    /// let node = NodeIndex::new(9);
    /// assert_eq!(node.get(), 9);
    /// ```
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Unwraps the raw position for use as an array subscript.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(typed: TypedIndex<T>) -> Self {
        typed.index
    }
}

/// Tag for positions in the topology's node table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndexTag;

impl TypedIndexTag for NodeIndexTag {
    const NAME: &'static str = "NodeIndex";
}

/// Index of a node (end system or bridge) in a topology.
pub type NodeIndex = TypedIndex<NodeIndexTag>;

/// Tag for positions in the topology's directed edge table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeIndexTag;

impl TypedIndexTag for EdgeIndexTag {
    const NAME: &'static str = "EdgeIndex";
}

/// Index of a directed edge in a topology.
pub type EdgeIndex = TypedIndex<EdgeIndexTag>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct SlotTag;

    impl TypedIndexTag for SlotTag {
        const NAME: &'static str = "Slot";
    }

    type SlotIndex = TypedIndex<SlotTag>;

    #[test]
    fn test_wraps_and_unwraps_the_raw_position() {
        assert_eq!(SlotIndex::new(31).get(), 31);
    }

    #[test]
    fn test_formats_with_the_tag_name() {
        let slot = SlotIndex::new(6);
        assert_eq!(format!("{}", slot), "Slot(6)");
        assert_eq!(format!("{:?}", slot), "Slot(6)");
    }

    #[test]
    fn test_round_trips_through_usize() {
        let slot = SlotIndex::from(13usize);
        assert_eq!(usize::from(slot), 13);
    }

    #[test]
    fn test_node_and_edge_spaces_print_their_own_names() {
        assert_eq!(format!("{}", NodeIndex::new(1)), "NodeIndex(1)");
        assert_eq!(format!("{}", EdgeIndex::new(1)), "EdgeIndex(1)");
    }

    #[test]
    fn test_orders_by_raw_position() {
        let low = SlotIndex::new(2);
        let high = SlotIndex::new(11);
        assert!(low < high);
        assert_eq!(low.min(high), low);
    }
}
