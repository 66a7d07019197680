//! Common types for power-tool invocations

use palisade_common::FenceAction;
use std::fmt;

/// The concrete `chassis power` token handed to the power tool.
///
/// Every logical [`FenceAction`] maps onto exactly one token; the mapping
/// is fixed and exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCommand {
    On,
    Off,
    Cycle,
    Soft,
    Status,
}

impl PowerCommand {
    /// The literal argument passed to `ipmitool chassis power`
    pub fn token(&self) -> &'static str {
        match self {
            PowerCommand::On => "on",
            PowerCommand::Off => "off",
            PowerCommand::Cycle => "cycle",
            PowerCommand::Soft => "soft",
            PowerCommand::Status => "status",
        }
    }
}

impl From<FenceAction> for PowerCommand {
    fn from(action: FenceAction) -> Self {
        match action {
            FenceAction::On => PowerCommand::On,
            FenceAction::Off => PowerCommand::Off,
            FenceAction::Cycle => PowerCommand::Cycle,
            FenceAction::Soft => PowerCommand::Soft,
            FenceAction::Status => PowerCommand::Status,
        }
    }
}

impl fmt::Display for PowerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Power state of a machine, as reported by a status query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Machine is powered on
    On,
    /// Machine is powered off
    Off,
    /// Power state is unknown
    Unknown,
}

impl PowerState {
    /// Parse the power state out of `ipmitool chassis power status` output
    pub fn from_output(output: &str) -> Self {
        if output.contains("is on") {
            PowerState::On
        } else if output.contains("is off") {
            PowerState::Off
        } else {
            PowerState::Unknown
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => write!(f, "on"),
            PowerState::Off => write!(f, "off"),
            PowerState::Unknown => write!(f, "unknown"),
        }
    }
}

/// IPMI connection parameters shared by every invocation
///
/// The BMC address itself is per-node and supplied at invocation time;
/// credentials and the port are fixed for a whole dispatch.
#[derive(Debug, Clone)]
pub struct IpmiConfig {
    /// Login name
    pub username: String,
    /// Login password
    pub password: String,
    /// BMC UDP port, passed through verbatim (default 623)
    pub port: String,
}

impl IpmiConfig {
    /// Create a new IPMI config with the default port
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            port: "623".to_string(),
        }
    }

    /// Set a custom port
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }
}

/// Terminal status of one power-tool invocation
///
/// `code` is `None` when the process was killed by a signal, which is
/// never a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tokens() {
        assert_eq!(PowerCommand::On.token(), "on");
        assert_eq!(PowerCommand::Off.token(), "off");
        assert_eq!(PowerCommand::Cycle.token(), "cycle");
        assert_eq!(PowerCommand::Soft.token(), "soft");
        assert_eq!(PowerCommand::Status.token(), "status");
    }

    #[test]
    fn test_action_to_command_mapping() {
        assert_eq!(PowerCommand::from(FenceAction::On), PowerCommand::On);
        assert_eq!(PowerCommand::from(FenceAction::Off), PowerCommand::Off);
        assert_eq!(PowerCommand::from(FenceAction::Cycle), PowerCommand::Cycle);
        assert_eq!(PowerCommand::from(FenceAction::Soft), PowerCommand::Soft);
        assert_eq!(PowerCommand::from(FenceAction::Status), PowerCommand::Status);
    }

    #[test]
    fn test_power_state_from_output() {
        assert_eq!(
            PowerState::from_output("Chassis Power is on"),
            PowerState::On
        );
        assert_eq!(
            PowerState::from_output("Chassis Power is off"),
            PowerState::Off
        );
        assert_eq!(
            PowerState::from_output("Unable to establish IPMI v2 / RMCP+ session"),
            PowerState::Unknown
        );
    }

    #[test]
    fn test_ipmi_config() {
        let config = IpmiConfig::new("admin", "password");
        assert_eq!(config.port, "623");
        assert_eq!(config.username, "admin");

        let config = config.with_port("6230");
        assert_eq!(config.port, "6230");
    }
}
