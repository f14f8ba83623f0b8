//! Bridge port configuration and status records.

use netmgr_common::DeviceRef;
use serde::{Deserialize, Serialize};

/// Spanning-tree status of one port.
///
/// Opaque at this level: a lower layer fills it in from the kernel, the
/// model only stores and clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortStatus {
    /// STP port state as reported by the kernel.
    pub state: u32,
    /// Port identifier within the bridge.
    pub port_id: u32,
    /// Port number within the bridge.
    pub port_no: u32,
    /// Designated root bridge id.
    pub designated_root: String,
    /// Designated bridge id.
    pub designated_bridge: String,
}

impl PortStatus {
    /// Resets the status to its zeroed state.
    pub fn clear(&mut self) {
        *self = PortStatus::default();
    }
}

/// Configuration record for one bridge port.
///
/// A port is keyed by its interface name until it is bound to a device;
/// once bound, its identity is the device identity. The device reference
/// is a non-owning share of a registry-owned record, so dropping a port
/// never tears down the interface itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct BridgePort {
    name: String,
    #[serde(skip)]
    device: Option<DeviceRef>,
    /// STP port priority. Unset means "kernel default".
    pub priority: Option<u32>,
    /// STP path cost. Unset means "kernel default".
    pub path_cost: Option<u32>,
    /// Read-only status snapshot, populated by a lower layer.
    pub status: PortStatus,
}

impl BridgePort {
    /// Creates an unbound port with all tunables unset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device: None,
            priority: None,
            path_cost: None,
            status: PortStatus::default(),
        }
    }

    /// Interface name of this port.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound device, if any.
    pub fn device(&self) -> Option<&DeviceRef> {
        self.device.as_ref()
    }

    /// Kernel interface index of the bound device, if any.
    pub fn ifindex(&self) -> Option<u32> {
        self.device.as_ref().map(DeviceRef::ifindex)
    }

    /// Binds this port to a registry-owned interface.
    pub fn bind(&mut self, device: DeviceRef) {
        self.device = Some(device);
    }

    /// Releases the device binding, leaving the port keyed by name again.
    pub fn unbind(&mut self) -> Option<DeviceRef> {
        self.device.take()
    }

    /// Copies the configuration only: name, priority and path cost.
    ///
    /// The device binding and the status snapshot deliberately stay
    /// behind; the result is an unbound template with zeroed status.
    pub fn clone_config(&self) -> BridgePort {
        let mut port = BridgePort::new(self.name.clone());
        port.priority = self.priority;
        port.path_cost = self.path_cost;
        port
    }
}
