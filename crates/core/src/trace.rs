//! Diagnostic hook for the hierarchy engine
//!
//! The engine never logs on its own. Callers that want to see what the
//! suggester looked at pass a [`HierarchyTrace`]; the default does nothing.

use crate::account::Account;

/// Observer of suggester internals
pub trait HierarchyTrace: Send + Sync {
    /// A direct child of `parent_code` was considered for numbering
    fn child_scanned(&self, _parent_code: &str, _child: &Account, _number: Option<u32>) {}

    /// Numbering for one level is done
    fn level_counted(&self, _parent_code: &str, _children: usize, _next: u32) {}

    /// `parent_code` is saturated; `ancestor` is where the suggester goes next
    fn level_overflow(&self, _parent_code: &str, _ancestor: Option<&str>) {}
}

/// Does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl HierarchyTrace for NoopTrace {}

/// Forwards engine events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTrace;

impl HierarchyTrace for TracingTrace {
    fn child_scanned(&self, parent_code: &str, child: &Account, number: Option<u32>) {
        tracing::trace!(
            parent = parent_code,
            child = %child.code,
            number = ?number,
            "Scanned child account"
        );
    }

    fn level_counted(&self, parent_code: &str, children: usize, next: u32) {
        tracing::debug!(parent = parent_code, children, next, "Counted level");
    }

    fn level_overflow(&self, parent_code: &str, ancestor: Option<&str>) {
        tracing::debug!(parent = parent_code, ancestor = ?ancestor, "Level saturated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::NewAccount;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl HierarchyTrace for Recorder {
        fn level_overflow(&self, parent_code: &str, ancestor: Option<&str>) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}->{:?}", parent_code, ancestor));
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        let acc = Account::from_new(1, NewAccount::group("1.1", "x", "Asset"));
        let trace = NoopTrace;
        trace.child_scanned("1", &acc, Some(1));
        trace.level_counted("1", 1, 2);
        trace.level_overflow("1", None);

        TracingTrace.child_scanned("1", &acc, Some(1));
    }

    #[test]
    fn test_custom_trace_receives_events() {
        let recorder = Recorder::default();
        recorder.level_overflow("1.2", Some("1"));
        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(events, vec!["1.2->Some(\"1\")".to_string()]);
    }
}
