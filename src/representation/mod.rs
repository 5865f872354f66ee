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

//! # Vendor configuration
//!
//! The normalized representation of one configuration file. Every entity is owned by the
//! [`VendorConfiguration`], stored in insertion-ordered maps keyed by its name. Entities refer to
//! each other only by name; whether a referenced object exists is not checked.

use std::net::Ipv4Addr;

use indexmap::{IndexMap, IndexSet};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::types::{Vendor, MASTER_VRF_NAME};

pub mod acl;
pub mod bgp;
pub mod interface;
pub mod ospf;
pub mod route_map;

pub use acl::*;
pub use bgp::*;
pub use interface::*;
pub use ospf::*;
pub use route_map::*;

/// Default administrative distance of static routes.
pub const DEFAULT_STATIC_ROUTE_DISTANCE: u32 = 1;

/// A static route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    /// Destination
    pub prefix: Ipv4Net,
    /// Next hop address
    pub next_hop_ip: Option<Ipv4Addr>,
    /// Next hop interface
    pub next_hop_interface: Option<String>,
    /// Administrative distance
    pub distance: u32,
    /// Route tag
    pub tag: Option<u32>,
    /// Tracking object
    pub track: Option<u32>,
    /// Keep the route even if the interface goes down
    pub permanent: bool,
    /// VRF of the route
    pub vrf: String,
}

impl StaticRoute {
    /// Create a route in the master VRF with the default distance.
    pub fn new(prefix: Ipv4Net) -> Self {
        Self {
            prefix,
            next_hop_ip: None,
            next_hop_interface: None,
            distance: DEFAULT_STATIC_ROUTE_DISTANCE,
            tag: None,
            track: None,
            permanent: false,
            vrf: MASTER_VRF_NAME.to_string(),
        }
    }
}

/// The vendor-specific representation of one configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorConfiguration {
    /// Dialect the file was written in
    pub vendor: Vendor,
    /// Hostname
    pub hostname: Option<String>,
    /// Interfaces keyed by their canonical name
    pub interfaces: IndexMap<String, Interface>,
    /// BGP processes keyed by VRF
    pub bgp_processes: IndexMap<String, BgpProcess>,
    /// The OSPF process of the master VRF
    pub ospf_process: Option<OspfProcess>,
    /// Static routes, in order
    pub static_routes: Vec<StaticRoute>,
    /// Standard access lists
    pub standard_acls: IndexMap<String, StandardAccessList>,
    /// Extended access lists
    pub extended_acls: IndexMap<String, ExtendedAccessList>,
    /// Prefix lists
    pub prefix_lists: IndexMap<String, PrefixList>,
    /// Standard community lists
    pub standard_community_lists: IndexMap<String, StandardCommunityList>,
    /// Expanded community lists
    pub expanded_community_lists: IndexMap<String, ExpandedCommunityList>,
    /// AS-path access lists
    pub as_path_access_lists: IndexMap<String, IpAsPathAccessList>,
    /// Route-maps
    pub route_maps: IndexMap<String, RouteMap>,
    /// Route-maps referenced from BGP neighbors
    pub referenced_route_maps: IndexSet<String>,
    /// VRFs
    pub vrfs: IndexSet<String>,
    /// Features used in the file that are not represented
    pub unimplemented_features: IndexSet<String>,
}

impl VendorConfiguration {
    /// Create an empty configuration containing only the master VRF.
    pub fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            hostname: None,
            interfaces: IndexMap::new(),
            bgp_processes: IndexMap::new(),
            ospf_process: None,
            static_routes: Vec::new(),
            standard_acls: IndexMap::new(),
            extended_acls: IndexMap::new(),
            prefix_lists: IndexMap::new(),
            standard_community_lists: IndexMap::new(),
            expanded_community_lists: IndexMap::new(),
            as_path_access_lists: IndexMap::new(),
            route_maps: IndexMap::new(),
            referenced_route_maps: IndexSet::new(),
            vrfs: IndexSet::from([MASTER_VRF_NAME.to_string()]),
            unimplemented_features: IndexSet::new(),
        }
    }

    /// The BGP process of the master VRF.
    pub fn master_bgp_process(&self) -> Option<&BgpProcess> {
        self.bgp_processes.get(MASTER_VRF_NAME)
    }

    /// Get the BGP process of a VRF, creating it (with AS 0) if it does not exist yet.
    pub fn bgp_process(&mut self, vrf: &str) -> &mut BgpProcess {
        self.bgp_processes
            .entry(vrf.to_string())
            .or_insert_with(|| BgpProcess::new(0))
    }
}
