//! Common infrastructure for netmgr configuration daemons.
//!
//! This crate provides the pieces shared by the per-device-type
//! configuration models (bridge, bond, vlan, ...):
//!
//! - [`error`]: the recoverable error taxonomy used by every model
//! - [`registry`]: the canonical interface registry and the non-owning
//!   [`DeviceRef`] handle that configuration records hold
//!
//! # Architecture
//!
//! The daemon keeps exactly one registry per network namespace. Device
//! models never reach for a process-wide global; the registry (or a
//! reference acquired from it) is passed in explicitly by the caller.

pub mod error;
pub mod registry;

// Re-export commonly used items at crate root
pub use error::{CfgError, CfgResult};
pub use registry::{DeviceRef, DeviceRegistry, NetDevice};
