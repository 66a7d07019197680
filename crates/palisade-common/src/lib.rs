//! Shared data model for the palisade fencing agent
//!
//! This crate holds the types every other palisade crate agrees on:
//! the BMC node inventory ([`NodeEntry`], [`NodeTable`]), the logical
//! fencing request ([`FenceAction`], [`FenceRequest`]), and the node-list
//! file parser.
//!
//! The node-list file maps cluster node names to their BMC addresses,
//! one node per line:
//!
//! ```text
//! # ip          node name
//! 10.1.0.11     compute-01
//! 10.1.0.12     compute-02
//! ```

pub mod error;
pub mod models;
pub mod nodelist;

pub use error::Error;
pub use models::{FenceAction, FenceRequest, NodeEntry, NodeTable};
