//! Concurrent fencing action dispatcher
//!
//! Given a validated [`FenceRequest`](palisade_common::FenceRequest) and a
//! node table, the [`Dispatcher`] runs one power-tool invocation per
//! affected node — every node at once for a status sweep, a single node
//! otherwise — and reduces the per-node outcomes into one
//! [`DispatchResult`].
//!
//! The dispatch is a single stateless batch: every task is launched
//! before any is joined, every task is joined by its own handle, and the
//! aggregate is not computed until all of them have reached a terminal
//! state. One node's failure never keeps another node's task from
//! running. There is no cancellation and no timeout; a hung power tool
//! hangs the dispatch.
//!
//! Diagnostic text captured from a failed task is emitted on the logging
//! channel as a `Node: <name> <output>` line; output from successful
//! tasks is discarded.

pub mod dispatcher;
pub mod error;
pub mod outcome;
pub mod task;

pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use outcome::{reduce, DispatchResult};
pub use task::{ChildTask, TaskReport, TaskState, CAPTURE_LIMIT};
