//! Request assembly: command line, stdin protocol, and defaults
//!
//! Pacemaker hands fence agents their request either as command-line
//! options or as `key=value` lines on stdin. Both sources fill the same
//! [`RawRequest`]; whatever is still missing afterwards is filled from
//! the stock defaults, and the raw action string is then mapped onto an
//! [`AgentOp`].

use std::io::BufRead;

use palisade_common::{FenceAction, FenceRequest, NodeTable};

/// Node list consulted when neither source names one
pub const DEFAULT_NODELIST: &str = "/etc/pacemaker/bmclist.conf";

/// A partially specified request, as one source provided it
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RawRequest {
    pub action: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub port: Option<String>,
    pub nodelist: Option<String>,
    pub target: Option<String>,
}

impl RawRequest {
    /// True when this source provided any request field at all
    pub fn is_set(&self) -> bool {
        self.action.is_some()
            || self.user.is_some()
            || self.pass.is_some()
            || self.port.is_some()
            || self.nodelist.is_some()
            || self.target.is_some()
    }

    /// Parse the Pacemaker stdin line protocol until end-of-input.
    ///
    /// Recognized keys: `action`, `nodename`, `user`, `pass`,
    /// `nodelist`. Unknown keys are ignored; a repeated key keeps the
    /// last value.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut raw = RawRequest::default();

        for line in reader.lines() {
            let line = line?;
            if let Some(value) = line.strip_prefix("action=") {
                raw.action = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("nodename=") {
                raw.target = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("user=") {
                raw.user = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("pass=") {
                raw.pass = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("nodelist=") {
                raw.nodelist = Some(value.to_string());
            }
        }

        Ok(raw)
    }

    /// Fill every missing field from the stock defaults
    pub fn resolve(self) -> ResolvedRequest {
        ResolvedRequest {
            action: self.action.unwrap_or_else(|| "metadata".to_string()),
            user: self.user.unwrap_or_else(|| "USERID".to_string()),
            pass: self.pass.unwrap_or_else(|| "PASSW0RD".to_string()),
            port: self.port.unwrap_or_else(|| "623".to_string()),
            nodelist: self.nodelist.unwrap_or_else(|| DEFAULT_NODELIST.to_string()),
            target: self.target,
        }
    }
}

/// A fully defaulted request, action still a raw string
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub action: String,
    pub user: String,
    pub pass: String,
    pub port: String,
    pub nodelist: String,
    pub target: Option<String>,
}

/// What the agent should do for this invocation
#[derive(Debug, PartialEq, Eq)]
pub enum AgentOp {
    /// Run a power action through the dispatcher
    Fence(FenceRequest),
    /// Print the capability document and exit
    Metadata,
    /// Pacemaker start/stop lifecycle call, nothing to do
    Lifecycle,
}

/// Map the raw action string onto an operation.
///
/// `reboot` is the cluster-facing alias for a power cycle, and `monitor`
/// is an untargeted status sweep regardless of any node option. Returns
/// `None` for an action outside the supported set; nothing is dispatched
/// for those.
pub fn plan(resolved: &ResolvedRequest) -> Option<AgentOp> {
    let op = match resolved.action.as_str() {
        "metadata" => AgentOp::Metadata,
        "start" | "stop" => AgentOp::Lifecycle,
        "monitor" => AgentOp::Fence(fence(resolved, FenceAction::Status, None)),
        "status" => AgentOp::Fence(fence(resolved, FenceAction::Status, resolved.target.clone())),
        "on" => AgentOp::Fence(fence(resolved, FenceAction::On, resolved.target.clone())),
        "off" => AgentOp::Fence(fence(resolved, FenceAction::Off, resolved.target.clone())),
        "reboot" => AgentOp::Fence(fence(resolved, FenceAction::Cycle, resolved.target.clone())),
        "soft" => AgentOp::Fence(fence(resolved, FenceAction::Soft, resolved.target.clone())),
        _ => return None,
    };
    Some(op)
}

fn fence(resolved: &ResolvedRequest, action: FenceAction, target: Option<String>) -> FenceRequest {
    FenceRequest {
        action,
        user: resolved.user.clone(),
        pass: resolved.pass.clone(),
        port: resolved.port.clone(),
        target,
    }
}

/// Print the resolved options block for `--echo`
pub fn echo_args(resolved: &ResolvedRequest) {
    println!("User Name: {}", resolved.user);
    println!("Password: {}", resolved.pass);
    println!("Node Name: {}", resolved.target.as_deref().unwrap_or(""));
    println!("Port: {}", resolved.port);
    println!("Node List: {}", resolved.nodelist);
    println!("Action: {}", resolved.action);
}

/// Print the loaded node table for `--echo`
pub fn echo_nodes(table: &NodeTable) {
    for entry in table.iter() {
        println!("BMC: {:>16}, ip: {}", entry.name, entry.ip);
    }
}
