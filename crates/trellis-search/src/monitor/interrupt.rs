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

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    solver::AbortHandle,
};
use trellis_model::{cost::Cost, plan::RoutingPlan};

/// Turns an [`AbortHandle`] into a termination source: the monitor requests
/// termination as soon as the handle reports an abort.
#[derive(Debug, Clone)]
pub struct InterruptMonitor {
    handle: AbortHandle,
}

impl InterruptMonitor {
    /// Creates a monitor watching the given handle. Any clone of the handle
    /// can raise the abort.
    #[inline(always)]
    pub fn new(handle: AbortHandle) -> Self {
        Self { handle }
    }
}

impl SearchMonitor for InterruptMonitor {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self) {}
    fn on_exit_search(&mut self) {}
    fn on_candidate_evaluated(&mut self, _cost: Cost) {}
    fn on_new_best(&mut self, _plan: &RoutingPlan) {}

    fn search_command(&self) -> SearchCommand {
        if self.handle.is_aborted() {
            SearchCommand::Terminate("abort signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use crate::solver::AbortHandle;

    #[test]
    fn test_interrupt_monitor_continues_when_handle_is_clear() {
        let handle = AbortHandle::new();
        let monitor = InterruptMonitor::new(handle);

        match monitor.search_command() {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_handle_is_aborted() {
        let handle = AbortHandle::new();
        let monitor = InterruptMonitor::new(handle.clone());

        handle.abort();

        match monitor.search_command() {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "abort signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_observes_abort_through_any_clone() {
        let handle = AbortHandle::new();
        let monitor = InterruptMonitor::new(handle.clone());

        // Aborting through a distant clone must be visible to the monitor.
        let remote = handle.clone();
        remote.abort();

        match monitor.search_command() {
            SearchCommand::Terminate(_) => {}
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
