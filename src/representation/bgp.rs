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

//! # BGP processes and peer groups
//!
//! A [`BgpProcess`] exists once per VRF. Its peers live in separate keyspaces: IP peers, named
//! peer groups, dynamic (listen range) peer groups, peer-session templates and (for Cumulus)
//! unnumbered interface peers. All of them share the capabilities in [`PeerGroupCommon`].
//! Inheritance between peer groups is only recorded by name.

use std::net::Ipv4Addr;

use indexmap::{IndexMap, IndexSet};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::types::RoutingProtocol;

/// Remote AS of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteAs {
    /// An explicit AS number
    Explicit(u32),
    /// Any AS different from the local one (Cumulus `external`)
    External,
    /// The local AS (Cumulus `internal`)
    Internal,
}

/// Identity of a peer group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerGroupKind {
    /// Process-wide settings
    Master,
    /// A peer identified by its IPv4 address
    Ip(Ipv4Addr),
    /// A peer identified by its IPv6 address
    Ipv6(String),
    /// A named peer group or template
    Named(String),
    /// Peers accepted from a listen range
    Dynamic(Ipv4Net),
    /// A peer-session template
    PeerSession(String),
    /// An unnumbered peer, identified by its interface
    Interface(String),
}

/// Capabilities shared by all kinds of peer groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerGroupCommon {
    /// Remote AS
    pub remote_as: Option<RemoteAs>,
    /// Whether the peer is activated
    pub active: bool,
    /// Whether the peer is administratively down
    pub shutdown: bool,
    /// Send communities to the peer
    pub send_community: bool,
    /// The peer is a route reflector client
    pub route_reflector_client: bool,
    /// Remove private AS numbers before sending routes to the peer
    pub remove_private_as: bool,
    /// Originate a default route to the peer
    pub default_originate: bool,
    /// Route-map guarding the default route
    pub default_originate_map: Option<String>,
    /// Name of the route-map applied to received routes
    pub inbound_route_map: Option<String>,
    /// Name of the route-map applied to sent routes
    pub outbound_route_map: Option<String>,
    /// Name of the prefix-list applied to received routes
    pub inbound_prefix_list: Option<String>,
    /// Name of the prefix-list applied to sent routes
    pub outbound_prefix_list: Option<String>,
    /// Interface the session is sourced from
    pub update_source: Option<String>,
    /// Cluster id, if set per neighbor
    pub cluster_id: Option<Ipv4Addr>,
    /// Accept routes containing the local AS
    pub allow_as_in: bool,
    /// Do not check the first AS of received routes
    pub disable_peer_as_check: bool,
    /// Description
    pub description: Option<String>,
    /// Name of the peer group or policy template this group inherits from
    pub group_name: Option<String>,
    /// Name of the peer-session template this group inherits from
    pub peer_session: Option<String>,
    /// IP peers assigned to this (named) group, in order
    pub members: Vec<Ipv4Addr>,
    /// Listen ranges referring to this (named) group
    pub listen_prefixes: Vec<Ipv4Net>,
}

impl PeerGroupCommon {
    /// Set the remote AS.
    pub fn set_remote_as(&mut self, remote_as: RemoteAs) {
        self.remote_as = Some(remote_as);
    }

    /// Set the route-map of one direction.
    pub fn set_route_map(&mut self, name: impl Into<String>, inbound: bool) {
        if inbound {
            self.inbound_route_map = Some(name.into());
        } else {
            self.outbound_route_map = Some(name.into());
        }
    }

    /// Set the prefix-list of one direction.
    pub fn set_prefix_list(&mut self, name: impl Into<String>, inbound: bool) {
        if inbound {
            self.inbound_prefix_list = Some(name.into());
        } else {
            self.outbound_prefix_list = Some(name.into());
        }
    }

    /// Route-maps referenced by this group (default-originate, inbound and outbound).
    pub fn route_maps(&self) -> impl Iterator<Item = &str> {
        [
            &self.default_originate_map,
            &self.inbound_route_map,
            &self.outbound_route_map,
        ]
        .into_iter()
        .flatten()
        .map(|x| x.as_str())
    }
}

/// A peer group of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerGroup {
    /// Identity
    pub kind: PeerGroupKind,
    /// Shared capabilities
    pub common: PeerGroupCommon,
}

impl PeerGroup {
    /// Create a new peer group of the given kind. Peers start out active.
    pub fn new(kind: PeerGroupKind) -> Self {
        Self {
            kind,
            common: PeerGroupCommon {
                active: true,
                ..Default::default()
            },
        }
    }

    /// Check whether this is the master peer group of a process.
    pub fn is_master(&self) -> bool {
        self.kind == PeerGroupKind::Master
    }
}

/// An `aggregate-address` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpAggregateNetwork {
    /// Aggregated prefix
    pub prefix: Ipv4Net,
    /// Keep the AS set of the contributing routes
    pub as_set: bool,
    /// Only advertise the aggregate
    pub summary_only: bool,
    /// Route-map setting the attributes of the aggregate
    pub attribute_map: Option<String>,
}

/// Redistribution of another protocol into BGP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpRedistributionPolicy {
    /// Source protocol
    pub protocol: RoutingProtocol,
    /// Route-map filtering the redistributed routes
    pub map: Option<String>,
    /// Metric of the redistributed routes
    pub metric: Option<u32>,
    /// Source OSPF process
    pub ospf_process: Option<u32>,
}

impl BgpRedistributionPolicy {
    /// Create a policy without map and metric.
    pub fn new(protocol: RoutingProtocol) -> Self {
        Self {
            protocol,
            map: None,
            metric: None,
            ospf_process: None,
        }
    }
}

/// A BGP process of one VRF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BgpProcess {
    /// Local AS number (0 when omitted)
    pub as_number: u32,
    /// Router id
    pub router_id: Option<Ipv4Addr>,
    /// Cluster id for route reflection
    pub cluster_id: Option<Ipv4Addr>,
    /// Always compare the MED, even between different neighboring ASes
    pub always_compare_med: bool,
    /// Peers keyed by their address
    pub ip_peer_groups: IndexMap<Ipv4Addr, PeerGroup>,
    /// Named peer groups and templates
    pub named_peer_groups: IndexMap<String, PeerGroup>,
    /// Listen ranges
    pub dynamic_peer_groups: IndexMap<Ipv4Net, PeerGroup>,
    /// Peer-session templates
    pub peer_sessions: IndexMap<String, PeerGroup>,
    /// Unnumbered peers keyed by their interface
    pub interface_peer_groups: IndexMap<String, PeerGroup>,
    /// Process-wide settings
    pub master: PeerGroup,
    /// Originated networks
    pub networks: IndexSet<Ipv4Net>,
    /// Aggregates
    pub aggregate_networks: IndexMap<Ipv4Net, BgpAggregateNetwork>,
    /// Redistribution policies
    pub redistribution_policies: IndexMap<RoutingProtocol, BgpRedistributionPolicy>,
}

impl BgpProcess {
    /// Create an empty process.
    pub fn new(as_number: u32) -> Self {
        Self {
            as_number,
            router_id: None,
            cluster_id: None,
            always_compare_med: false,
            ip_peer_groups: IndexMap::new(),
            named_peer_groups: IndexMap::new(),
            dynamic_peer_groups: IndexMap::new(),
            peer_sessions: IndexMap::new(),
            interface_peer_groups: IndexMap::new(),
            master: PeerGroup::new(PeerGroupKind::Master),
            networks: IndexSet::new(),
            aggregate_networks: IndexMap::new(),
            redistribution_policies: IndexMap::new(),
        }
    }

    /// Get the IP peer, creating it if it does not exist yet.
    pub fn ip_peer_group(&mut self, ip: Ipv4Addr) -> &mut PeerGroup {
        self.ip_peer_groups
            .entry(ip)
            .or_insert_with(|| PeerGroup::new(PeerGroupKind::Ip(ip)))
    }

    /// Get the named peer group, creating it if it does not exist yet.
    pub fn named_peer_group(&mut self, name: &str) -> &mut PeerGroup {
        self.named_peer_groups
            .entry(name.to_string())
            .or_insert_with(|| PeerGroup::new(PeerGroupKind::Named(name.to_string())))
    }

    /// Get the dynamic peer group, creating it if it does not exist yet.
    pub fn dynamic_peer_group(&mut self, prefix: Ipv4Net) -> &mut PeerGroup {
        self.dynamic_peer_groups
            .entry(prefix)
            .or_insert_with(|| PeerGroup::new(PeerGroupKind::Dynamic(prefix)))
    }

    /// Get the peer-session template, creating it if it does not exist yet.
    pub fn peer_session(&mut self, name: &str) -> &mut PeerGroup {
        self.peer_sessions
            .entry(name.to_string())
            .or_insert_with(|| PeerGroup::new(PeerGroupKind::PeerSession(name.to_string())))
    }

    /// Get the unnumbered interface peer, creating it if it does not exist yet.
    pub fn interface_peer_group(&mut self, name: &str) -> &mut PeerGroup {
        self.interface_peer_groups
            .entry(name.to_string())
            .or_insert_with(|| PeerGroup::new(PeerGroupKind::Interface(name.to_string())))
    }

    /// Iterate over all peer groups of the process, starting with the master.
    pub fn all_peer_groups(&self) -> impl Iterator<Item = &PeerGroup> {
        std::iter::once(&self.master)
            .chain(self.ip_peer_groups.values())
            .chain(self.named_peer_groups.values())
            .chain(self.dynamic_peer_groups.values())
            .chain(self.peer_sessions.values())
            .chain(self.interface_peer_groups.values())
    }
}
