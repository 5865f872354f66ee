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

//! # Context registers
//!
//! The mutable cursor of a single file walk. Peer groups are not borrowed from the configuration;
//! the context stores a [`PeerRef`] that is resolved on every access.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::{
    representation::{OspfProcess, PeerGroup, PeerGroupKind},
    types::MASTER_VRF_NAME,
};

/// Reference to a peer group of some BGP process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerRef {
    /// The master peer group of the process of the VRF
    Master(String),
    /// An IP peer of the process of the VRF
    Ip(String, Ipv4Addr),
    /// The shared IPv6 peer. Writes are discarded.
    Ipv6,
    /// A named peer group of the process of the VRF
    Named(String, String),
    /// A listen range of the process of the VRF
    Dynamic(String, Ipv4Net),
    /// A peer-session template of the process of the VRF
    PeerSession(String, String),
    /// An unnumbered interface peer of the process of the VRF
    Interface(String, String),
    /// The scratch peer group of unsupported contexts. Writes are discarded.
    Dummy,
}

impl PeerRef {
    /// Check whether writes through this reference reach the configuration.
    pub fn is_scratch(&self) -> bool {
        matches!(self, PeerRef::Dummy | PeerRef::Ipv6)
    }

    /// Check whether this refers to a master peer group.
    pub fn is_master(&self) -> bool {
        matches!(self, PeerRef::Master(_))
    }
}

/// State of the walk over one file.
#[derive(Debug)]
pub struct ExtractionContext {
    /// Names of the interfaces the current block applies to
    pub current_interfaces: Vec<String>,
    /// VRF of the current block
    pub current_vrf: String,
    /// The peer group statements currently apply to (`None` outside of `router bgp`)
    pub current_peer_group: Option<PeerRef>,
    /// Set while inside an IP neighbor
    pub current_ip_peer_group: Option<Ipv4Addr>,
    /// Set while inside an IPv6 neighbor
    pub current_ipv6_peer_group: Option<String>,
    /// Set while inside a named peer group or template
    pub current_named_peer_group: Option<String>,
    /// Set while inside a listen range neighbor
    pub current_dynamic_peer_group: Option<Ipv4Net>,
    /// Set while inside a peer-session template
    pub current_peer_session: Option<String>,
    /// Peer group that was current when the address family was entered
    pub pre_address_family_peer_group: Option<PeerRef>,
    /// Scratch peer group
    pub dummy_peer_group: PeerGroup,
    /// OSPF process under construction
    pub current_ospf_process: Option<OspfProcess>,
    /// Whether the current OSPF process belongs to a non-master VRF
    pub current_ospf_vrf: bool,
    /// Name of the current route-map
    pub current_route_map: Option<String>,
    /// Number of the current route-map clause
    pub current_route_map_clause: Option<u32>,
    /// Name of the current standard access list
    pub current_standard_acl: Option<String>,
    /// Name of the current extended access list (`None` for IPv6 lists)
    pub current_extended_acl: Option<String>,
    /// Name of the current prefix list (`None` for IPv6 lists)
    pub current_prefix_list: Option<String>,
    /// Name of the current standard community list
    pub current_standard_community_list: Option<String>,
    /// Name of the current expanded community list
    pub current_expanded_community_list: Option<String>,
    /// Name of the current AS-path access list
    pub current_as_path_acl: Option<String>,
    /// Whether the walk is inside an NX-OS neighbor block
    pub in_nexus_neighbor: bool,
    /// Address families configured in the current NX-OS neighbor block
    pub nexus_neighbor_address_families: Vec<String>,
    peer_group_stack: Vec<Option<PeerRef>>,
}

impl Default for ExtractionContext {
    fn default() -> Self {
        Self {
            current_interfaces: Vec::new(),
            current_vrf: MASTER_VRF_NAME.to_string(),
            current_peer_group: None,
            current_ip_peer_group: None,
            current_ipv6_peer_group: None,
            current_named_peer_group: None,
            current_dynamic_peer_group: None,
            current_peer_session: None,
            pre_address_family_peer_group: None,
            dummy_peer_group: dummy(),
            current_ospf_process: None,
            current_ospf_vrf: false,
            current_route_map: None,
            current_route_map_clause: None,
            current_standard_acl: None,
            current_extended_acl: None,
            current_prefix_list: None,
            current_standard_community_list: None,
            current_expanded_community_list: None,
            current_as_path_acl: None,
            in_nexus_neighbor: false,
            nexus_neighbor_address_families: Vec::new(),
            peer_group_stack: Vec::new(),
        }
    }
}

fn dummy() -> PeerGroup {
    PeerGroup::new(PeerGroupKind::Master)
}

impl ExtractionContext {
    /// Make `peer` the current peer group, remembering the previous one.
    pub fn push_peer(&mut self, peer: PeerRef) {
        let previous = self.current_peer_group.replace(peer);
        self.peer_group_stack.push(previous);
    }

    /// Restore the peer group that was current before the last [`Self::push_peer`].
    pub fn pop_peer(&mut self) {
        self.current_peer_group = self.peer_group_stack.pop().flatten();
    }

    /// Check whether the current peer group is the scratch group.
    pub fn in_dummy(&self) -> bool {
        self.current_peer_group == Some(PeerRef::Dummy)
    }

    /// Check whether the current peer group is a master peer group.
    pub fn in_master(&self) -> bool {
        self.current_peer_group
            .as_ref()
            .map_or(false, PeerRef::is_master)
    }

    /// Clear all typed aliases of the current peer group.
    pub fn clear_peer_aliases(&mut self) {
        self.current_ip_peer_group = None;
        self.current_ipv6_peer_group = None;
        self.current_named_peer_group = None;
        self.current_dynamic_peer_group = None;
        self.current_peer_session = None;
    }

    /// Start a new `router bgp` block: the scratch group is reset.
    pub fn reset_dummy(&mut self) {
        self.dummy_peer_group = dummy();
    }
}
