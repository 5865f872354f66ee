// VendorCfg: Vendor configuration extraction written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module containing the interface representation.

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::{
    decode,
    types::{SubRange, Vendor, MANAGEMENT_VRF_NAME, MASTER_VRF_NAME},
};

/// Default MTU of every interface.
pub const DEFAULT_MTU: u32 = 1500;

/// Layer 2 mode of a switchport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchportMode {
    /// Not a switchport (routed interface)
    None,
    /// Access port
    Access,
    /// Trunk port
    Trunk,
    /// Dynamic trunking, passively waiting for the peer
    DynamicAuto,
    /// Dynamic trunking, actively negotiating with the peer
    DynamicDesirable,
    /// 802.1Q tunnel port
    Dot1qTunnel,
    /// Fabric extender uplink
    FexFabric,
    /// Tap aggregation port
    Tap,
    /// Tool port
    Tool,
}

impl SwitchportMode {
    /// Decode the words following `switchport mode`.
    pub fn from_words(words: &[&str]) -> Option<Self> {
        match words {
            ["access"] => Some(Self::Access),
            ["trunk"] => Some(Self::Trunk),
            ["dynamic", "auto"] => Some(Self::DynamicAuto),
            ["dynamic", "desirable"] => Some(Self::DynamicDesirable),
            ["dot1q-tunnel"] => Some(Self::Dot1qTunnel),
            ["fex-fabric"] => Some(Self::FexFabric),
            ["tap"] => Some(Self::Tap),
            ["tool"] => Some(Self::Tool),
            _ => None,
        }
    }
}

/// Trunk encapsulation of a switchport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwitchportEncapsulation {
    /// IEEE 802.1Q
    Dot1q,
    /// Cisco ISL
    Isl,
    /// Negotiated with the peer
    Negotiate,
}

impl SwitchportEncapsulation {
    /// Decode the word following `switchport trunk encapsulation`.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "dot1q" => Some(Self::Dot1q),
            "isl" => Some(Self::Isl),
            "negotiate" => Some(Self::Negotiate),
            _ => None,
        }
    }
}

/// A physical or logical interface (one member of a declared range).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Canonical name
    pub name: String,
    /// VRF the interface belongs to
    pub vrf: String,
    /// Bandwidth in bits per second
    pub bandwidth: Option<f64>,
    /// MTU in bytes
    pub mtu: u32,
    /// Primary address
    pub prefix: Option<Ipv4Net>,
    /// Secondary addresses, in declaration order
    pub secondary_prefixes: Vec<Ipv4Net>,
    /// Whether the interface is a layer 2 port
    pub switchport: bool,
    /// Mode of the layer 2 port
    pub switchport_mode: SwitchportMode,
    /// `switchport access vlan dynamic`
    pub switchport_access_dynamic: bool,
    /// Access VLAN
    pub access_vlan: Option<u32>,
    /// Native VLAN of a trunk
    pub native_vlan: Option<u32>,
    /// VLANs allowed on a trunk
    pub allowed_vlans: Vec<SubRange>,
    /// Trunk encapsulation
    pub trunk_encapsulation: Option<SwitchportEncapsulation>,
    /// OSPF cost
    pub ospf_cost: Option<u32>,
    /// OSPF dead interval in seconds
    pub ospf_dead_interval: Option<u32>,
    /// OSPF hello multiplier (with `dead-interval minimal`)
    pub ospf_hello_multiplier: Option<u32>,
    /// Name of the policy route-map
    pub routing_policy: Option<String>,
    /// Name of the inbound access list
    pub incoming_filter: Option<String>,
    /// Name of the outbound access list
    pub outgoing_filter: Option<String>,
    /// `false` if the interface is shut down
    pub active: bool,
    /// Description
    pub description: Option<String>,
    /// Cumulus alias
    pub alias: Option<String>,
    /// Cumulus link speed in Mbit/s
    pub speed: Option<u32>,
}

impl Interface {
    /// Create a new interface with the defaults of its vendor and type. `name` must already be
    /// canonical.
    pub fn new(name: impl Into<String>, vendor: Vendor) -> Self {
        let name = name.into();
        let prefix = decode::split_interface_name(&name)
            .map(|(p, _)| p)
            .unwrap_or_default();
        let vrf = if prefix == decode::NXOS_MANAGEMENT_INTERFACE_PREFIX {
            MANAGEMENT_VRF_NAME
        } else {
            MASTER_VRF_NAME
        };
        let bandwidth = match vendor {
            Vendor::Cisco => decode::default_bandwidth(prefix),
            Vendor::CumulusNclu => None,
        };
        Self {
            vrf: vrf.to_string(),
            bandwidth,
            mtu: DEFAULT_MTU,
            prefix: None,
            secondary_prefixes: Vec::new(),
            switchport: false,
            switchport_mode: SwitchportMode::None,
            switchport_access_dynamic: false,
            access_vlan: None,
            native_vlan: None,
            allowed_vlans: Vec::new(),
            trunk_encapsulation: None,
            ospf_cost: None,
            ospf_dead_interval: None,
            ospf_hello_multiplier: None,
            routing_policy: None,
            incoming_filter: None,
            outgoing_filter: None,
            active: true,
            description: None,
            alias: None,
            speed: None,
            name,
        }
    }
}
