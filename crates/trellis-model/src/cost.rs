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

//! # Routing Cost
//!
//! The scalar score assigned to a routing candidate. A cost is either a
//! non-negative finite number (lower is better) or the dedicated
//! `Cost::INFEASIBLE` sentinel meaning the candidate violates a hard
//! constraint (link capacity or a latency deadline).
//!
//! Instead of `Option<f64>` or a two-variant enum, this type uses a sentinel
//! encoding: `f64::INFINITY` marks infeasibility. The encoding keeps the value
//! to a single machine word, makes accumulation saturate naturally (adding
//! anything to the sentinel stays the sentinel), and admits a total order.
//!
//! Encoding invariants, enforced by the constructors:
//! - Finite values are non-negative (negative zero is normalized away).
//! - `NaN` is unrepresentable.
//!
//! Because of these invariants the IEEE-754 bit pattern of a `Cost` is
//! monotone in its value, which `to_bits`/`from_bits` exploit to store a cost
//! in an atomic integer (see the search crate's incumbent).

/// The scalar score of a routing candidate.
///
/// # Examples
///
/// ```rust
/// # use trellis_model::cost::Cost;
///
/// let a = Cost::finite(2.0);
/// let b = Cost::finite(3.5);
/// assert!(a < b);
/// assert!(b < Cost::INFEASIBLE);
/// assert_eq!((a + b).value(), 5.5);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq)]
pub struct Cost(f64);

impl Cost {
    /// The zero cost. Also the score of an empty candidate set.
    pub const ZERO: Cost = Cost(0.0);

    /// The infeasibility sentinel. Sorts after every finite cost.
    pub const INFEASIBLE: Cost = Cost(f64::INFINITY);

    /// Creates a finite cost.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative, `NaN`, or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_model::cost::Cost;
    ///
    /// let cost = Cost::finite(12.5);
    /// assert_eq!(cost.value(), 12.5);
    /// assert!(cost.is_feasible());
    /// ```
    #[inline]
    pub fn finite(value: f64) -> Self {
        assert!(
            value.is_finite() && value >= 0.0,
            "called `Cost::finite` with a non-finite or negative value: {}",
            value
        );
        // Normalize negative zero so the total order agrees with equality.
        Cost(value.max(0.0))
    }

    /// Returns the raw value. `f64::INFINITY` for the infeasibility sentinel.
    #[inline(always)]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Checks whether this cost is finite, i.e. the candidate is feasible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use trellis_model::cost::Cost;
    ///
    /// assert!(Cost::ZERO.is_feasible());
    /// assert!(!Cost::INFEASIBLE.is_feasible());
    /// ```
    #[inline(always)]
    pub fn is_feasible(self) -> bool {
        self.0.is_finite()
    }

    /// Checks whether this cost is the infeasibility sentinel.
    #[inline(always)]
    pub fn is_infeasible(self) -> bool {
        self.0.is_infinite()
    }

    /// Returns the bit encoding of this cost.
    ///
    /// Bit patterns of non-negative IEEE-754 doubles are monotone in their
    /// values, so comparing encodings as `u64` is equivalent to comparing the
    /// costs themselves. Used to store a cost in an atomic integer.
    #[inline(always)]
    pub fn to_bits(self) -> u64 {
        self.0.to_bits()
    }

    /// Reconstructs a cost from the encoding produced by [`Cost::to_bits`].
    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        let value = f64::from_bits(bits);
        debug_assert!(
            !value.is_nan() && value >= 0.0,
            "called `Cost::from_bits` with an encoding outside the cost domain: {}",
            value
        );
        Cost(value)
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Total ordering is sound: NaN is unrepresentable and negative zero
        // is normalized at construction.
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        // Saturates at the sentinel: infinity plus anything stays infinity.
        Cost(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Cost {
    #[inline]
    fn add_assign(&mut self, rhs: Cost) {
        self.0 += rhs.0;
    }
}

impl std::fmt::Debug for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_infeasible() {
            write!(f, "infeasible")
        } else {
            write!(f, "{:.3}", self.0)
        }
    }
}
