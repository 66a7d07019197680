//! Chassis control trait seam
//!
//! The dispatcher talks to the power tool through these traits so that
//! tests can substitute a scripted implementation for the real
//! [`IpmiTool`](crate::IpmiTool).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExitOutcome, PowerCommand};

/// Launches one power-tool invocation against one BMC.
///
/// A single implementation is shared across every node in a dispatch;
/// `open` takes the per-node BMC address.
#[async_trait]
pub trait ChassisControl: Send + Sync {
    type Session: ChassisSession + 'static;

    /// Launch the power tool against `host` and hand back the running
    /// invocation. A spawn failure is local to this invocation.
    async fn open(&self, host: &str, command: PowerCommand) -> Result<Self::Session>;
}

/// One running power-tool invocation.
///
/// The caller drains the combined diagnostic output first, then waits for
/// the terminal status. Dropping a session releases the parent's handles
/// on every exit path; the child itself is never killed.
#[async_trait]
pub trait ChassisSession: Send {
    /// Read the child's combined stdout/stderr until end-of-stream,
    /// appending at most `limit - buf.len()` bytes to `buf`. Overflow is
    /// discarded silently; capture is best-effort and never fails the
    /// invocation.
    async fn drain(&mut self, buf: &mut Vec<u8>, limit: usize);

    /// Wait for the invocation to terminate and report its outcome
    async fn finish(&mut self) -> Result<ExitOutcome>;
}
