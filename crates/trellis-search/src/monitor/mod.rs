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

//! # Search Monitors
//!
//! A solver polls its monitors between candidate evaluations and stops as
//! soon as one of them requests termination. Budgets (wall-clock time,
//! candidate counts) and external aborts all plug in through the same
//! [`search_monitor::SearchMonitor`] trait, which keeps the solve loop free
//! of any budget-specific branching.
//!
//! `search_monitor` defines the trait and the [`search_monitor::SearchCommand`]
//! verdict. `time_limit`, `candidate_limit`, and `interrupt` are the three
//! stock termination sources, and `composite` fans hooks out to any number
//! of monitors while `index` gives composite positions their own typed
//! index space.

pub mod candidate_limit;
pub mod composite;
pub mod index;
pub mod interrupt;
pub mod search_monitor;
pub mod time_limit;
