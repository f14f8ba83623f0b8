//! Ordered bridge port collection.

use netmgr_common::{CfgError, CfgResult, DeviceRef};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::port::BridgePort;

/// Ordered, growable set of bridge ports.
///
/// Insertion order is preserved; removing a port shifts the later ports
/// left so the collection never has gaps. No two ports share a name and
/// no two ports share a bound device identity. Lookups are linear scans:
/// the collection is sized by operator-configured port counts.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BridgePorts {
    ports: Vec<BridgePort>,
}

impl BridgePorts {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of member ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns true if the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Iterates the ports in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, BridgePort> {
        self.ports.iter()
    }

    /// Port at the given position.
    pub fn get(&self, index: usize) -> Option<&BridgePort> {
        self.ports.get(index)
    }

    /// Position of the first port with the given name.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name() == name)
    }

    /// First port with the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&BridgePort> {
        self.ports.iter().find(|p| p.name() == name)
    }

    /// Mutable access to the first port with the given name.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut BridgePort> {
        self.ports.iter_mut().find(|p| p.name() == name)
    }

    /// Appends a freshly constructed, unbound port.
    ///
    /// An empty name or a name that is already a member is rejected with
    /// `DuplicateEntry` and leaves the collection unchanged.
    pub fn add_by_name(&mut self, name: &str) -> CfgResult<()> {
        if name.is_empty() || self.position_by_name(name).is_some() {
            return Err(CfgError::duplicate_entry("port", name));
        }
        self.ports.push(BridgePort::new(name));
        debug!(port = name, "added bridge port");
        Ok(())
    }

    /// Appends a configuration clone of `template`.
    ///
    /// Rejected with `DuplicateEntry` when the template's device identity
    /// is already a member; two unbound references count as the same
    /// identity. Only the configuration is carried over, so the appended
    /// port starts unbound with zeroed status.
    pub fn add_port(&mut self, template: &BridgePort) -> CfgResult<()> {
        if self
            .ports
            .iter()
            .any(|p| same_device_slot(p.device(), template.device()))
        {
            return Err(CfgError::duplicate_entry("port device", template.name()));
        }
        self.ports.push(template.clone_config());
        debug!(port = template.name(), "added bridge port from template");
        Ok(())
    }

    /// Removes the first port with the given name.
    ///
    /// Later ports shift left; relative order is preserved. At most one
    /// port is removed per call.
    pub fn remove_by_name(&mut self, name: &str) -> CfgResult<()> {
        match self.position_by_name(name) {
            Some(pos) => {
                self.ports.remove(pos);
                debug!(port = name, "removed bridge port");
                Ok(())
            }
            None => Err(CfgError::not_found("port", name)),
        }
    }

    /// Removes the first port bound to the given kernel interface index.
    ///
    /// Unbound ports never match. Later ports shift left; at most one
    /// port is removed per call.
    pub fn remove_by_ifindex(&mut self, ifindex: u32) -> CfgResult<()> {
        match self.ports.iter().position(|p| p.ifindex() == Some(ifindex)) {
            Some(pos) => {
                let port = self.ports.remove(pos);
                debug!(port = port.name(), ifindex, "removed bridge port");
                Ok(())
            }
            None => Err(CfgError::not_found("port device", ifindex.to_string())),
        }
    }

    /// Appends every member port name, in collection order, to `names`.
    pub fn export_names(&self, names: &mut Vec<String>) {
        for port in &self.ports {
            names.push(port.name().to_string());
        }
    }

    /// Deep-copies the configuration of every port.
    ///
    /// Device bindings and status snapshots are not carried over.
    pub fn clone_config(&self) -> BridgePorts {
        BridgePorts {
            ports: self.ports.iter().map(BridgePort::clone_config).collect(),
        }
    }

    /// Removes all ports.
    pub fn clear(&mut self) {
        self.ports.clear();
    }
}

impl<'a> IntoIterator for &'a BridgePorts {
    type Item = &'a BridgePort;
    type IntoIter = std::slice::Iter<'a, BridgePort>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// A bound and an unbound port never collide; two unbound ports do.
fn same_device_slot(a: Option<&DeviceRef>, b: Option<&DeviceRef>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_device(b),
        _ => false,
    }
}
