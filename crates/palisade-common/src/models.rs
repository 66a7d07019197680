//! Node inventory and fencing request types

use std::fmt;

/// One managed node: the cluster node name and its BMC address.
///
/// Entries are immutable once loaded from the node list; every other
/// component holds a read-only view of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntry {
    /// Cluster node name, unique within a table
    pub name: String,
    /// BMC address the power tool connects to
    pub ip: String,
}

impl NodeEntry {
    pub fn new(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip: ip.into(),
        }
    }
}

/// Ordered collection of managed nodes.
///
/// Node names are unique; the node-list parser enforces this when a table
/// is loaded from disk. Lookups are a linear scan, tables hold tens of
/// nodes at most.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    entries: Vec<NodeEntry>,
}

impl NodeTable {
    pub fn new(entries: Vec<NodeEntry>) -> Self {
        Self { entries }
    }

    /// Find a node by its cluster name
    pub fn lookup(&self, name: &str) -> Option<&NodeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Logical fencing verb requested by the cluster manager
///
/// This is the action as the request layer understands it, independent of
/// the concrete token handed to the power-control tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceAction {
    /// Power the node on
    On,
    /// Hard power-off
    Off,
    /// Power cycle (off then on)
    Cycle,
    /// ACPI soft shutdown
    Soft,
    /// Query power status; with no target this sweeps every node
    Status,
}

impl fmt::Display for FenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceAction::On => write!(f, "on"),
            FenceAction::Off => write!(f, "off"),
            FenceAction::Cycle => write!(f, "cycle"),
            FenceAction::Soft => write!(f, "soft"),
            FenceAction::Status => write!(f, "status"),
        }
    }
}

/// A validated fencing request, ready for dispatch.
///
/// `target == None` selects sweep mode, which is only meaningful for
/// [`FenceAction::Status`]; the dispatcher rejects a missing target for
/// every other action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceRequest {
    pub action: FenceAction,
    /// BMC login name
    pub user: String,
    /// BMC password
    pub pass: String,
    /// BMC UDP port, passed through to the power tool verbatim
    pub port: String,
    /// Node name to act on; `None` means every node in the table
    pub target: Option<String>,
}

impl FenceRequest {
    /// True when this request fans out over the whole node table
    pub fn is_sweep(&self) -> bool {
        self.action == FenceAction::Status && self.target.is_none()
    }
}
