//! IPMI-over-LAN power control via the external `ipmitool` binary
//!
//! Each invocation runs
//! `ipmitool -I lanplus -H <ip> -U <user> -P <pass> -p <port> chassis power <command>`
//! and reports the tool's exit status. The tool's combined stdout/stderr
//! is captured through pipes so the dispatcher can surface it when the
//! invocation fails; with capture disabled the child inherits the
//! agent's own descriptors instead.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::controller::{ChassisControl, ChassisSession};
use crate::error::{BmcError, Result};
use crate::types::{ExitOutcome, IpmiConfig, PowerCommand};

/// Default power-control executable, resolved on `PATH`
const DEFAULT_PROGRAM: &str = "ipmitool";

/// Spawns `ipmitool` invocations with a fixed argument vector
#[derive(Debug, Clone)]
pub struct IpmiTool {
    config: IpmiConfig,
    program: String,
    capture_output: bool,
}

impl IpmiTool {
    /// Create an invoker for `ipmitool` on `PATH`, with output capture on
    pub fn new(config: IpmiConfig) -> Self {
        Self {
            config,
            program: DEFAULT_PROGRAM.to_string(),
            capture_output: true,
        }
    }

    /// Substitute a different executable (tests point this at a stub)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Toggle diagnostic capture; with capture off the child writes
    /// straight to the agent's own stdout/stderr
    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    /// Build the connection arguments preceding the `chassis power` verb
    fn base_args(&self, host: &str) -> Vec<String> {
        vec![
            "-I".to_string(),
            "lanplus".to_string(),
            "-H".to_string(),
            host.to_string(),
            "-U".to_string(),
            self.config.username.clone(),
            "-P".to_string(),
            self.config.password.clone(),
            "-p".to_string(),
            self.config.port.clone(),
        ]
    }
}

#[async_trait]
impl ChassisControl for IpmiTool {
    type Session = IpmiSession;

    async fn open(&self, host: &str, command: PowerCommand) -> Result<IpmiSession> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.base_args(host))
            .args(["chassis", "power", command.token()])
            .stdin(Stdio::null());

        if self.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let mut child = cmd.spawn().map_err(|source| BmcError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        Ok(IpmiSession {
            child,
            stdout,
            stderr,
        })
    }
}

/// A running `ipmitool` process
#[derive(Debug)]
pub struct IpmiSession {
    child: Child,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
}

#[async_trait]
impl ChassisSession for IpmiSession {
    async fn drain(&mut self, buf: &mut Vec<u8>, limit: usize) {
        let budget = limit.saturating_sub(buf.len());
        let stdout = self.stdout.take();
        let stderr = self.stderr.take();

        let (out, err) = tokio::join!(slurp(stdout, budget), slurp(stderr, budget));
        append_bounded(buf, &out, limit);
        append_bounded(buf, &err, limit);
    }

    async fn finish(&mut self) -> Result<ExitOutcome> {
        let status = self.child.wait().await.map_err(BmcError::Wait)?;
        Ok(ExitOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Read a stream to end-of-stream, keeping at most `budget` bytes.
///
/// Reading continues past the budget so a chatty child never blocks on a
/// full pipe; the excess is discarded. Read errors end the capture, they
/// do not fail the invocation.
async fn slurp<R: AsyncRead + Unpin>(stream: Option<R>, budget: usize) -> Vec<u8> {
    let Some(mut stream) = stream else {
        return Vec::new();
    };

    let mut kept = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let room = budget.saturating_sub(kept.len());
                kept.extend_from_slice(&chunk[..room.min(n)]);
            }
        }
    }
    kept
}

fn append_bounded(buf: &mut Vec<u8>, bytes: &[u8], limit: usize) {
    let room = limit.saturating_sub(buf.len());
    buf.extend_from_slice(&bytes[..room.min(bytes.len())]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tool() -> IpmiTool {
        IpmiTool::new(IpmiConfig::new("admin", "password"))
    }

    #[test]
    fn test_base_args_shape() {
        let args = test_tool().base_args("192.168.1.100");
        assert_eq!(
            args,
            vec![
                "-I",
                "lanplus",
                "-H",
                "192.168.1.100",
                "-U",
                "admin",
                "-P",
                "password",
                "-p",
                "623",
            ]
        );
    }

    #[test]
    fn test_base_args_custom_port() {
        let tool = IpmiTool::new(IpmiConfig::new("admin", "password").with_port("6230"));
        let args = tool.base_args("10.0.0.9");
        assert!(args.windows(2).any(|w| w[0] == "-p" && w[1] == "6230"));
    }

    #[tokio::test]
    async fn test_slurp_bounded() {
        let data: &[u8] = b"0123456789";
        let kept = slurp(Some(data), 4).await;
        assert_eq!(kept, b"0123");

        let data: &[u8] = b"0123456789";
        let kept = slurp(Some(data), 64).await;
        assert_eq!(kept, b"0123456789");

        let kept = slurp(None::<&[u8]>, 64).await;
        assert!(kept.is_empty());
    }

    #[test]
    fn test_append_bounded() {
        let mut buf = b"Node: a ".to_vec();
        append_bounded(&mut buf, b"too much output", 12);
        assert_eq!(buf, b"Node: a too ");

        append_bounded(&mut buf, b"more", 12);
        assert_eq!(buf.len(), 12);
    }

    // The stub invocations below exercise the real spawn/drain/wait path
    // with harmless standard utilities in place of ipmitool.

    #[tokio::test]
    async fn test_echo_invocation_succeeds_and_captures() {
        let tool = test_tool().with_program("echo");
        let mut session = tool.open("10.0.0.1", PowerCommand::Status).await.unwrap();

        let mut buf = Vec::new();
        session.drain(&mut buf, 256).await;
        let outcome = session.finish().await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.code, Some(0));
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("lanplus"));
        assert!(text.contains("10.0.0.1"));
        assert!(text.contains("status"));
    }

    #[tokio::test]
    async fn test_false_invocation_fails() {
        let tool = test_tool().with_program("false");
        let mut session = tool.open("10.0.0.1", PowerCommand::Off).await.unwrap();

        let mut buf = Vec::new();
        session.drain(&mut buf, 256).await;
        let outcome = session.finish().await.unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.code, Some(1));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let tool = test_tool().with_program("palisade-no-such-tool");
        let err = tool.open("10.0.0.1", PowerCommand::On).await.unwrap_err();
        assert!(matches!(err, BmcError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_capture_disabled_drains_nothing() {
        let tool = test_tool().with_program("echo").with_capture(false);
        let mut session = tool.open("10.0.0.1", PowerCommand::Status).await.unwrap();

        let mut buf = Vec::new();
        session.drain(&mut buf, 256).await;
        let outcome = session.finish().await.unwrap();

        assert!(outcome.success);
        assert!(buf.is_empty());
    }
}
