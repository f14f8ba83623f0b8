//! In-memory configuration and status model for Linux bridge devices.
//!
//! A bridge is modeled purely as configuration plus externally populated
//! status: the spanning-tree tunables (priority, forward delay, ageing
//! time, hello time, max age), an ordered port membership collection, and
//! generic get/set dispatch by symbolic option id. Every tunable is
//! tri-state when exchanged as text: unset round-trips to and from the
//! empty string, and a malformed non-empty string is an error distinct
//! from "absent".
//!
//! This crate performs no I/O. Creating or deleting the kernel device,
//! attaching ports, and running the spanning-tree protocol all live in
//! lower layers; the remote object layer that exposes bridges to clients
//! sits above.

mod bridge;
mod port;
mod ports;
mod value;

pub use bridge::{Bridge, BridgeOption, BridgeStatus, PortOption, StpMode};
pub use port::{BridgePort, PortStatus};
pub use ports::BridgePorts;
pub use value::{format_count, format_duration, parse_count, parse_duration};
