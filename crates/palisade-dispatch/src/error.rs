//! Errors that abort a dispatch before any task is spawned

use palisade_common::FenceAction;
use thiserror::Error;

/// Global dispatch failures.
///
/// Per-node failures are never errors at this level; they are carried in
/// the [`DispatchResult`](crate::DispatchResult) so the remaining nodes
/// still run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The requested target is not in the node table
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A targeted action arrived without a target node
    #[error("no target node specified for {0} action")]
    MissingTarget(FenceAction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::UnknownNode("nodeC".to_string());
        assert_eq!(err.to_string(), "unknown node: nodeC");

        let err = DispatchError::MissingTarget(FenceAction::Off);
        assert_eq!(err.to_string(), "no target node specified for off action");
    }
}
