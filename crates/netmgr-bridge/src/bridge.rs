//! Bridge device aggregate: tunables, status and port membership, with
//! generic option dispatch by symbolic id.

use std::fmt;
use std::str::FromStr;

use netmgr_common::{CfgError, CfgResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::port::BridgePort;
use crate::ports::BridgePorts;
use crate::value;

/// Administrative spanning-tree mode.
///
/// This is the configured on/off flag only; live protocol state is part
/// of the opaque status populated by the kernel-facing layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StpMode {
    /// Spanning tree disabled (default).
    #[default]
    Disabled,
    /// Spanning tree enabled.
    Enabled,
}

impl StpMode {
    /// Parses the administrative flag from text.
    ///
    /// Accepts "on"/"off" as well as "yes"/"no", like brctl does; empty
    /// input disables rather than erroring.
    pub fn parse(text: &str) -> CfgResult<Self> {
        match text {
            "" | "off" | "no" => Ok(StpMode::Disabled),
            "on" | "yes" => Ok(StpMode::Enabled),
            _ => Err(CfgError::parse_error("stp", text)),
        }
    }

    /// Returns true if spanning tree is administratively enabled.
    pub const fn is_enabled(&self) -> bool {
        matches!(self, StpMode::Enabled)
    }

    /// Canonical textual form ("on"/"off").
    pub const fn as_str(&self) -> &'static str {
        match self {
            StpMode::Enabled => "on",
            StpMode::Disabled => "off",
        }
    }
}

impl fmt::Display for StpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bridge-level option ids for generic get/set dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeOption {
    /// Bridge priority (count).
    Priority,
    /// Administrative STP flag.
    StpEnabled,
    /// Forward delay (duration).
    ForwardDelay,
    /// Ageing time (duration).
    AgeingTime,
    /// Hello time (duration).
    HelloTime,
    /// Max age (duration).
    MaxAge,
}

impl BridgeOption {
    /// Symbolic id used by the remote object layer.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BridgeOption::Priority => "priority",
            BridgeOption::StpEnabled => "stp",
            BridgeOption::ForwardDelay => "forward-delay",
            BridgeOption::AgeingTime => "ageing-time",
            BridgeOption::HelloTime => "hello-time",
            BridgeOption::MaxAge => "max-age",
        }
    }
}

impl fmt::Display for BridgeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeOption {
    type Err = CfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(BridgeOption::Priority),
            "stp" => Ok(BridgeOption::StpEnabled),
            "forward-delay" => Ok(BridgeOption::ForwardDelay),
            "ageing-time" => Ok(BridgeOption::AgeingTime),
            "hello-time" => Ok(BridgeOption::HelloTime),
            "max-age" => Ok(BridgeOption::MaxAge),
            _ => Err(CfgError::unsupported_option(s)),
        }
    }
}

/// Port-level option ids for generic get/set dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortOption {
    /// STP port priority (count).
    Priority,
    /// STP path cost (count).
    PathCost,
}

impl PortOption {
    /// Symbolic id used by the remote object layer.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PortOption::Priority => "priority",
            PortOption::PathCost => "path-cost",
        }
    }
}

impl fmt::Display for PortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortOption {
    type Err = CfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(PortOption::Priority),
            "path-cost" => Ok(PortOption::PathCost),
            _ => Err(CfgError::unsupported_option(s)),
        }
    }
}

/// Read-only bridge status snapshot, populated by a lower layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeStatus {
    /// Root bridge id.
    pub root_id: String,
    /// This bridge's id.
    pub bridge_id: String,
    /// Bridge group address.
    pub group_addr: String,
}

impl BridgeStatus {
    /// Resets the status to its zeroed state.
    pub fn clear(&mut self) {
        *self = BridgeStatus::default();
    }
}

/// In-memory configuration and status of one Linux bridge device.
///
/// Durations are stored as hundredths of a second; all tunables default
/// to unset, which a lower layer interprets as "leave the kernel default
/// alone".
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Bridge {
    /// Bridge priority. Unset means "kernel default".
    pub priority: Option<u32>,
    /// Administrative STP mode.
    pub stp: StpMode,
    /// Forward delay in hundredths of a second.
    pub forward_delay: Option<u32>,
    /// Ageing time in hundredths of a second.
    pub ageing_time: Option<u32>,
    /// Hello time in hundredths of a second.
    pub hello_time: Option<u32>,
    /// Max age in hundredths of a second.
    pub max_age: Option<u32>,
    ports: BridgePorts,
    /// Read-only status snapshot, populated by a lower layer.
    pub status: BridgeStatus,
}

impl Bridge {
    /// Creates a bridge with every tunable unset and no ports.
    pub fn new() -> Self {
        Self::default()
    }

    /// The member port collection.
    pub fn ports(&self) -> &BridgePorts {
        &self.ports
    }

    /// Mutable access to the member port collection.
    pub fn ports_mut(&mut self) -> &mut BridgePorts {
        &mut self.ports
    }

    /// Sets the administrative STP mode from text.
    pub fn set_stp(&mut self, value: &str) -> CfgResult<()> {
        self.stp = StpMode::parse(value)?;
        Ok(())
    }

    /// Reads one bridge-level option as text.
    ///
    /// `Ok(None)` means the tunable is unset. The STP flag is always
    /// present and reads back as "on"/"off".
    pub fn get_option(&self, option: BridgeOption) -> CfgResult<Option<String>> {
        let text = match option {
            BridgeOption::Priority => value::format_count(self.priority),
            BridgeOption::StpEnabled => return Ok(Some(self.stp.as_str().to_string())),
            BridgeOption::ForwardDelay => value::format_duration(self.forward_delay),
            BridgeOption::AgeingTime => value::format_duration(self.ageing_time),
            BridgeOption::HelloTime => value::format_duration(self.hello_time),
            BridgeOption::MaxAge => value::format_duration(self.max_age),
        };
        Ok(non_empty(text))
    }

    /// Sets one bridge-level option from text.
    ///
    /// An empty string clears the tunable back to unset (for the STP
    /// flag, back to disabled); malformed non-empty input is rejected and
    /// leaves the current value untouched.
    pub fn set_option(&mut self, option: BridgeOption, text: &str) -> CfgResult<()> {
        match option {
            BridgeOption::Priority => self.priority = value::parse_count(text)?,
            BridgeOption::StpEnabled => self.stp = StpMode::parse(text)?,
            BridgeOption::ForwardDelay => self.forward_delay = value::parse_duration(text)?,
            BridgeOption::AgeingTime => self.ageing_time = value::parse_duration(text)?,
            BridgeOption::HelloTime => self.hello_time = value::parse_duration(text)?,
            BridgeOption::MaxAge => self.max_age = value::parse_duration(text)?,
        }
        debug!(option = %option, value = text, "set bridge option");
        Ok(())
    }

    /// Reads one port-level option as text, keyed by port name.
    pub fn port_get_option(&self, port: &str, option: PortOption) -> CfgResult<Option<String>> {
        let member = self
            .ports
            .get_by_name(port)
            .ok_or_else(|| CfgError::not_found("port", port))?;
        let text = match option {
            PortOption::Priority => value::format_count(member.priority),
            PortOption::PathCost => value::format_count(member.path_cost),
        };
        Ok(non_empty(text))
    }

    /// Sets one port-level option from text, keyed by port name.
    pub fn port_set_option(
        &mut self,
        port: &str,
        option: PortOption,
        text: &str,
    ) -> CfgResult<()> {
        let member = self
            .ports
            .get_by_name_mut(port)
            .ok_or_else(|| CfgError::not_found("port", port))?;
        match option {
            PortOption::Priority => member.priority = value::parse_count(text)?,
            PortOption::PathCost => member.path_cost = value::parse_count(text)?,
        }
        debug!(port, option = %option, value = text, "set bridge port option");
        Ok(())
    }

    /// Adds a new unbound member port by interface name.
    pub fn add_port_by_name(&mut self, name: &str) -> CfgResult<()> {
        self.ports.add_by_name(name)
    }

    /// Adds a member port cloned from a configuration template.
    pub fn add_port(&mut self, template: &BridgePort) -> CfgResult<()> {
        self.ports.add_port(template)
    }

    /// Removes the member port with the given interface name.
    pub fn remove_port_by_name(&mut self, name: &str) -> CfgResult<()> {
        self.ports.remove_by_name(name)
    }

    /// Removes the member port bound to the given kernel interface index.
    pub fn remove_port_by_ifindex(&mut self, ifindex: u32) -> CfgResult<()> {
        self.ports.remove_by_ifindex(ifindex)
    }

    /// Appends every member port name, in order, to `names`.
    pub fn export_port_names(&self, names: &mut Vec<String>) {
        self.ports.export_names(names)
    }

    /// Produces a detached configuration template.
    ///
    /// Tunables are copied verbatim (unset stays unset) and ports are
    /// deep-cloned; neither the bridge status nor any port status or
    /// device binding is carried over, so the clone describes desired
    /// configuration, never running state.
    pub fn clone_config(&self) -> Bridge {
        Bridge {
            priority: self.priority,
            stp: self.stp,
            forward_delay: self.forward_delay,
            ageing_time: self.ageing_time,
            hello_time: self.hello_time,
            max_age: self.max_age,
            ports: self.ports.clone_config(),
            status: BridgeStatus::default(),
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_bridge_is_unset() {
        let bridge = Bridge::new();
        assert_eq!(bridge.priority, None);
        assert_eq!(bridge.stp, StpMode::Disabled);
        assert_eq!(bridge.forward_delay, None);
        assert!(bridge.ports().is_empty());
        assert_eq!(bridge.status, BridgeStatus::default());
    }

    #[test]
    fn test_set_stp_text_forms() {
        let mut bridge = Bridge::new();

        bridge.set_stp("yes").unwrap();
        assert!(bridge.stp.is_enabled());
        bridge.set_stp("on").unwrap();
        assert!(bridge.stp.is_enabled());

        bridge.set_stp("no").unwrap();
        assert!(!bridge.stp.is_enabled());
        bridge.set_stp("off").unwrap();
        assert!(!bridge.stp.is_enabled());

        // empty input disables, it is not an error
        bridge.set_stp("on").unwrap();
        bridge.set_stp("").unwrap();
        assert!(!bridge.stp.is_enabled());

        let err = bridge.set_stp("maybe").unwrap_err();
        assert!(matches!(err, CfgError::ParseError { .. }));
    }

    #[test]
    fn test_option_round_trip() {
        let mut bridge = Bridge::new();

        bridge.set_option(BridgeOption::Priority, "32768").unwrap();
        assert_eq!(
            bridge.get_option(BridgeOption::Priority).unwrap(),
            Some("32768".to_string())
        );

        bridge
            .set_option(BridgeOption::ForwardDelay, "1.5")
            .unwrap();
        assert_eq!(bridge.forward_delay, Some(150));
        assert_eq!(
            bridge.get_option(BridgeOption::ForwardDelay).unwrap(),
            Some("1.50".to_string())
        );
    }

    #[test]
    fn test_option_unset_reads_absent() {
        let bridge = Bridge::new();
        assert_eq!(bridge.get_option(BridgeOption::Priority).unwrap(), None);
        assert_eq!(bridge.get_option(BridgeOption::MaxAge).unwrap(), None);
        // the stp flag is always present
        assert_eq!(
            bridge.get_option(BridgeOption::StpEnabled).unwrap(),
            Some("off".to_string())
        );
    }

    #[test]
    fn test_option_clear_with_empty_string() {
        let mut bridge = Bridge::new();
        bridge.set_option(BridgeOption::AgeingTime, "300").unwrap();
        assert_eq!(bridge.ageing_time, Some(30000));

        bridge.set_option(BridgeOption::AgeingTime, "").unwrap();
        assert_eq!(bridge.ageing_time, None);
    }

    #[test]
    fn test_option_parse_failure_keeps_value() {
        let mut bridge = Bridge::new();
        bridge.set_option(BridgeOption::HelloTime, "2").unwrap();

        assert!(bridge.set_option(BridgeOption::HelloTime, "soon").is_err());
        assert_eq!(bridge.hello_time, Some(200));
    }

    #[test]
    fn test_option_id_parsing() {
        assert_eq!(
            "forward-delay".parse::<BridgeOption>().unwrap(),
            BridgeOption::ForwardDelay
        );
        assert_eq!("stp".parse::<BridgeOption>().unwrap(), BridgeOption::StpEnabled);
        assert_eq!(
            "path-cost".parse::<PortOption>().unwrap(),
            PortOption::PathCost
        );

        let err = "mcast-snooping".parse::<BridgeOption>().unwrap_err();
        assert!(matches!(err, CfgError::UnsupportedOption { .. }));
        assert!("forward-delay".parse::<PortOption>().is_err());
    }

    #[test]
    fn test_port_options() {
        let mut bridge = Bridge::new();
        bridge.add_port_by_name("eth0").unwrap();

        bridge
            .port_set_option("eth0", PortOption::Priority, "16")
            .unwrap();
        bridge
            .port_set_option("eth0", PortOption::PathCost, "0x64")
            .unwrap();

        assert_eq!(
            bridge.port_get_option("eth0", PortOption::Priority).unwrap(),
            Some("16".to_string())
        );
        assert_eq!(
            bridge.port_get_option("eth0", PortOption::PathCost).unwrap(),
            Some("100".to_string())
        );

        // unset reads back as absent
        bridge
            .port_set_option("eth0", PortOption::Priority, "")
            .unwrap();
        assert_eq!(
            bridge.port_get_option("eth0", PortOption::Priority).unwrap(),
            None
        );
    }

    #[test]
    fn test_port_options_unknown_port() {
        let mut bridge = Bridge::new();
        assert!(matches!(
            bridge.port_get_option("eth9", PortOption::Priority).unwrap_err(),
            CfgError::NotFound { .. }
        ));
        assert!(bridge
            .port_set_option("eth9", PortOption::PathCost, "4")
            .is_err());
    }

    #[test]
    fn test_clone_config_detaches() {
        let mut bridge = Bridge::new();
        bridge.priority = Some(100);
        bridge.stp = StpMode::Enabled;
        bridge.max_age = Some(2000);
        bridge.add_port_by_name("eth0").unwrap();
        bridge.add_port_by_name("eth1").unwrap();
        bridge.ports_mut().get_by_name_mut("eth0").unwrap().priority = Some(8);
        bridge.status.bridge_id = "8000.001122334455".to_string();

        let mut copy = bridge.clone_config();
        assert_eq!(copy.priority, Some(100));
        assert!(copy.stp.is_enabled());
        assert_eq!(copy.max_age, Some(2000));
        assert_eq!(copy.forward_delay, None);
        assert_eq!(copy.ports().len(), 2);
        assert_eq!(copy.ports().get_by_name("eth0").unwrap().priority, Some(8));
        // the clone's own status starts zeroed
        assert_eq!(copy.status, BridgeStatus::default());

        // mutating the clone never touches the source
        copy.ports_mut().get_by_name_mut("eth0").unwrap().priority = Some(99);
        copy.remove_port_by_name("eth1").unwrap();
        assert_eq!(bridge.ports().get_by_name("eth0").unwrap().priority, Some(8));
        assert_eq!(bridge.ports().len(), 2);
    }

    #[test]
    fn test_port_membership_wrappers() {
        let mut bridge = Bridge::new();
        bridge.add_port_by_name("eth0").unwrap();
        bridge.add_port_by_name("eth1").unwrap();

        assert!(bridge.add_port_by_name("eth0").is_err());

        bridge.remove_port_by_name("eth0").unwrap();
        let mut names = Vec::new();
        bridge.export_port_names(&mut names);
        assert_eq!(names, vec!["eth1"]);
    }
}
