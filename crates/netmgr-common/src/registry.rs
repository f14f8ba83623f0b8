//! Interface registry and non-owning device references.
//!
//! The daemon keeps one canonical [`NetDevice`] record per kernel
//! interface. Everything else (bridge ports, bond slaves, ...) refers to
//! an interface through a [`DeviceRef`]: the identity captured at acquire
//! time plus a weak handle for liveness checks. Only the registry holds
//! strong ownership, which keeps the registry → interface → bridge → port
//! chain free of reference cycles.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

use crate::error::{CfgError, CfgResult};

/// Identity record for one kernel network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDevice {
    /// Interface name (e.g. "eth0").
    pub name: String,
    /// Kernel interface index.
    pub ifindex: u32,
}

impl NetDevice {
    /// Creates a new interface record.
    pub fn new(name: impl Into<String>, ifindex: u32) -> Self {
        Self {
            name: name.into(),
            ifindex,
        }
    }
}

/// Non-owning reference to a registry-owned [`NetDevice`].
///
/// Cloning a `DeviceRef` shares the same underlying registry entry.
/// Equality is device identity, not field equality: two references are
/// equal exactly when they point at the same registry entry.
#[derive(Debug, Clone)]
pub struct DeviceRef {
    name: String,
    ifindex: u32,
    handle: Weak<NetDevice>,
}

impl DeviceRef {
    fn acquire(device: &Arc<NetDevice>) -> Self {
        Self {
            name: device.name.clone(),
            ifindex: device.ifindex,
            handle: Arc::downgrade(device),
        }
    }

    /// Interface name captured when the reference was acquired.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kernel interface index captured when the reference was acquired.
    pub fn ifindex(&self) -> u32 {
        self.ifindex
    }

    /// Upgrades to the registry-owned record, if it still exists.
    pub fn upgrade(&self) -> Option<Arc<NetDevice>> {
        self.handle.upgrade()
    }

    /// Returns true if the referenced interface is still registered.
    pub fn is_live(&self) -> bool {
        self.handle.strong_count() > 0
    }

    /// Returns true if both references denote the same registry entry.
    pub fn same_device(&self, other: &DeviceRef) -> bool {
        Weak::ptr_eq(&self.handle, &other.handle)
    }
}

impl PartialEq for DeviceRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_device(other)
    }
}

impl Eq for DeviceRef {}

/// Canonical owner of interface records.
///
/// Lookups are linear scans; the registry is sized by the interface count
/// of one host, not by external input.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Arc<NetDevice>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an interface and hands back a reference to it.
    ///
    /// Fails with `DuplicateEntry` if the kernel index is already taken.
    pub fn register(&mut self, device: NetDevice) -> CfgResult<DeviceRef> {
        if self.devices.iter().any(|d| d.ifindex == device.ifindex) {
            return Err(CfgError::duplicate_entry("device", device.name));
        }
        let device = Arc::new(device);
        let handle = DeviceRef::acquire(&device);
        self.devices.push(device);
        Ok(handle)
    }

    /// Looks up an interface by kernel index.
    pub fn lookup_by_index(&self, ifindex: u32) -> Option<DeviceRef> {
        self.devices
            .iter()
            .find(|d| d.ifindex == ifindex)
            .map(DeviceRef::acquire)
    }

    /// Looks up an interface by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<DeviceRef> {
        self.devices
            .iter()
            .find(|d| d.name == name)
            .map(DeviceRef::acquire)
    }

    /// Removes an interface record; outstanding references go dead.
    pub fn deregister(&mut self, ifindex: u32) -> CfgResult<()> {
        match self.devices.iter().position(|d| d.ifindex == ifindex) {
            Some(pos) => {
                self.devices.remove(pos);
                Ok(())
            }
            None => Err(CfgError::not_found("device", ifindex.to_string())),
        }
    }

    /// Number of registered interfaces.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns true if no interfaces are registered.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
