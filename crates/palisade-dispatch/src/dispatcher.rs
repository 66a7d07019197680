//! Target selection, concurrent fan-out, and join accounting

use std::sync::Arc;

use palisade_bmc::{ChassisControl, PowerCommand, PowerState};
use palisade_common::{FenceRequest, NodeEntry, NodeTable};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::outcome::{reduce, DispatchResult};
use crate::task::{ChildTask, TaskReport};

/// Runs one power-control task per affected node and reduces the
/// outcomes into a single [`DispatchResult`].
pub struct Dispatcher<C> {
    control: Arc<C>,
}

impl<C> Dispatcher<C>
where
    C: ChassisControl + 'static,
{
    pub fn new(control: C) -> Self {
        Self {
            control: Arc::new(control),
        }
    }

    /// Dispatch a validated request against the node table.
    ///
    /// A status sweep selects every node; anything else selects exactly
    /// the named target. `UnknownNode` and `MissingTarget` abort before a
    /// single task is spawned. Per-node failures never abort the batch:
    /// all selected tasks run, all are joined, and only then is the
    /// aggregate computed.
    pub async fn dispatch(
        &self,
        request: &FenceRequest,
        nodes: &NodeTable,
    ) -> Result<DispatchResult, DispatchError> {
        let command = PowerCommand::from(request.action);
        let selected = select_targets(request, nodes)?;
        debug!(action = %request.action, nodes = selected.len(), "dispatching power tasks");

        let reports = self.run_all(selected, command).await;

        for report in reports.iter().filter(|report| !report.success()) {
            warn!("{}", report.diagnostic);
        }
        if command == PowerCommand::Status {
            for report in reports.iter().filter(|report| report.success()) {
                let state = PowerState::from_output(&report.diagnostic);
                debug!(node = %report.node, %state, "chassis status");
            }
        }

        Ok(reduce(reports))
    }

    /// Launch every task before joining any, then join them all.
    ///
    /// The sweep therefore finishes in roughly the slowest node's time,
    /// and because each task is joined by its own handle an outcome can
    /// never be attributed to the wrong node.
    async fn run_all(&self, selected: Vec<NodeEntry>, command: PowerCommand) -> Vec<TaskReport> {
        let mut handles: Vec<(String, JoinHandle<TaskReport>)> =
            Vec::with_capacity(selected.len());
        for node in selected {
            let name = node.name.clone();
            let control = Arc::clone(&self.control);
            handles.push((name, tokio::spawn(ChildTask::new(node).run(control, command))));
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let report = match handle.await {
                Ok(report) => report,
                Err(err) => TaskReport::aborted(name, &err.to_string()),
            };
            reports.push(report);
        }
        reports
    }
}

/// Resolve the request to the exact set of nodes it acts on
fn select_targets(
    request: &FenceRequest,
    nodes: &NodeTable,
) -> Result<Vec<NodeEntry>, DispatchError> {
    if request.is_sweep() {
        return Ok(nodes.iter().cloned().collect());
    }

    let name = request
        .target
        .as_deref()
        .ok_or(DispatchError::MissingTarget(request.action))?;
    let entry = nodes
        .lookup(name)
        .ok_or_else(|| DispatchError::UnknownNode(name.to_string()))?;
    Ok(vec![entry.clone()])
}
