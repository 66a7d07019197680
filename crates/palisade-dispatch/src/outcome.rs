//! Reduction of per-task outcomes into the dispatch-wide result

use std::collections::BTreeSet;

use crate::task::TaskReport;

/// The single result of a dispatch call.
///
/// Derived once from the joined task reports and never mutated after
/// construction. The process exit status is the only failure signal that
/// crosses the agent boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    /// True iff every dispatched task succeeded
    pub overall_success: bool,
    /// Names of the nodes whose task failed to launch or exited nonzero
    pub failed_nodes: BTreeSet<String>,
}

impl DispatchResult {
    /// Process exit code for the cluster manager
    pub fn exit_code(&self) -> i32 {
        if self.overall_success {
            0
        } else {
            1
        }
    }
}

/// Reduce joined task reports into the dispatch result.
///
/// Commutative: any permutation of the reports yields the same result.
pub fn reduce<I>(reports: I) -> DispatchResult
where
    I: IntoIterator<Item = TaskReport>,
{
    let mut failed_nodes = BTreeSet::new();
    for report in reports {
        if !report.success() {
            failed_nodes.insert(report.node);
        }
    }

    DispatchResult {
        overall_success: failed_nodes.is_empty(),
        failed_nodes,
    }
}
