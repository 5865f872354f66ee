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

//! Module containing the OSPF process.

use std::net::Ipv4Addr;

use indexmap::{IndexMap, IndexSet};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use super::interface::Interface;
use crate::{
    decode,
    types::{OspfMetricType, RoutingProtocol},
};

/// A `network IP WILDCARD area A` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OspfWildcardNetwork {
    /// Address of the network
    pub ip: Ipv4Addr,
    /// Wildcard mask (bits set are ignored)
    pub wildcard: u32,
    /// Area
    pub area: u32,
}

/// An interface prefix placed into an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OspfNetwork {
    /// Network prefix of the interface
    pub prefix: Ipv4Net,
    /// Area
    pub area: u32,
}

/// Redistribution of another protocol into OSPF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OspfRedistributionPolicy {
    /// Source protocol
    pub protocol: RoutingProtocol,
    /// Route-map filtering the redistributed routes
    pub map: Option<String>,
    /// Metric of the redistributed routes
    pub metric: Option<u32>,
    /// External metric type
    pub metric_type: OspfMetricType,
    /// Also redistribute subnets of classful networks
    pub subnets: bool,
    /// Tag of the redistributed routes
    pub tag: Option<u32>,
    /// Source BGP process (AS number)
    pub bgp_as: Option<u32>,
}

impl OspfRedistributionPolicy {
    /// Create a policy with the default metric type.
    pub fn new(protocol: RoutingProtocol) -> Self {
        Self {
            protocol,
            map: None,
            metric: None,
            metric_type: OspfMetricType::DEFAULT,
            subnets: false,
            tag: None,
            bgp_as: None,
        }
    }
}

/// An OSPF process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OspfProcess {
    /// Process id
    pub process_id: u32,
    /// Router id
    pub router_id: Option<Ipv4Addr>,
    /// NSSA areas, with their `no-summary` flag
    pub nssas: IndexMap<u32, bool>,
    /// `network` statements, in order
    pub wildcard_networks: Vec<OspfWildcardNetwork>,
    /// Interface networks, computed from `wildcard_networks`
    pub networks: IndexSet<OspfNetwork>,
    /// Interfaces are passive unless listed in `non_passive_interfaces`
    pub passive_interface_default: bool,
    /// Interfaces explicitly made passive
    pub passive_interfaces: IndexSet<String>,
    /// Interfaces explicitly made non-passive
    pub non_passive_interfaces: IndexSet<String>,
    /// Originate a default route
    pub default_information_originate: bool,
    /// Originate the default route even without one in the RIB
    pub default_information_originate_always: bool,
    /// Metric of the default route
    pub default_information_metric: Option<u32>,
    /// Metric type of the default route
    pub default_information_metric_type: Option<OspfMetricType>,
    /// Route-map guarding the default route
    pub default_information_originate_map: Option<String>,
    /// Redistribution policies
    pub redistribution_policies: IndexMap<RoutingProtocol, OspfRedistributionPolicy>,
}

impl OspfProcess {
    /// Create an empty process.
    pub fn new(process_id: u32) -> Self {
        Self {
            process_id,
            router_id: None,
            nssas: IndexMap::new(),
            wildcard_networks: Vec::new(),
            networks: IndexSet::new(),
            passive_interface_default: false,
            passive_interfaces: IndexSet::new(),
            non_passive_interfaces: IndexSet::new(),
            default_information_originate: false,
            default_information_originate_always: false,
            default_information_metric: None,
            default_information_metric_type: None,
            default_information_originate_map: None,
            redistribution_policies: IndexMap::new(),
        }
    }

    /// Place every interface whose primary address matches a wildcard network into the area of
    /// that network. Only the interfaces passed in are considered.
    pub fn compute_networks<'a>(&mut self, interfaces: impl IntoIterator<Item = &'a Interface>) {
        let prefixes: Vec<Ipv4Net> = interfaces.into_iter().filter_map(|i| i.prefix).collect();
        for network in self.wildcard_networks.iter() {
            let mask = !network.wildcard;
            let ip = decode::ip_to_u32(network.ip) & mask;
            for p in prefixes.iter() {
                if decode::ip_to_u32(p.addr()) & mask == ip {
                    self.networks.insert(OspfNetwork {
                        prefix: p.trunc(),
                        area: network.area,
                    });
                }
            }
        }
    }
}
