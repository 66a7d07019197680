//! IPMI chassis power control
//!
//! This crate drives a node's BMC over IPMI-on-LAN by invoking the
//! external `ipmitool` executable. It provides:
//!
//! - [`PowerCommand`]: the concrete `chassis power` token for each logical
//!   fencing verb
//! - [`ChassisControl`] / [`ChassisSession`]: the seam between the
//!   dispatcher and the power tool, so tests can substitute a scripted
//!   implementation
//! - [`IpmiTool`]: the real implementation, which spawns `ipmitool` with
//!   a fixed argument vector and captures its combined output
//!
//! Authentication is delegated entirely to `ipmitool`; this crate only
//! carries the credentials into its argument vector.

pub mod controller;
pub mod error;
pub mod ipmi;
pub mod types;

pub use controller::{ChassisControl, ChassisSession};
pub use error::{BmcError, Result};
pub use ipmi::{IpmiSession, IpmiTool};
pub use types::{ExitOutcome, IpmiConfig, PowerCommand, PowerState};
