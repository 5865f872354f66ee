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

//! Module containing the small value types shared by the decoders and the representation.

use serde::{Deserialize, Serialize};

/// Name of the VRF that always exists.
pub const MASTER_VRF_NAME: &str = "default";
/// Name of the VRF NX-OS management interfaces are placed in.
pub const MANAGEMENT_VRF_NAME: &str = "management";

/// The vendor dialect a configuration was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    /// Cisco IOS style configuration (including the NX-OS and IOS-XR forms).
    Cisco,
    /// Cumulus NCLU `net add` command files.
    CumulusNclu,
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vendor::Cisco => write!(f, "Cisco"),
            Vendor::CumulusNclu => write!(f, "CumulusNclu"),
        }
    }
}

/// Closed integer range `[start, end]`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubRange {
    /// First value contained in the range
    pub start: u32,
    /// Last value contained in the range
    pub end: u32,
}

impl SubRange {
    /// Create a new range `[start, end]`.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create the range containing only `x`.
    pub fn singleton(x: u32) -> Self {
        Self { start: x, end: x }
    }

    /// Check if `x` lies in the range.
    pub fn contains(&self, x: u32) -> bool {
        self.start <= x && x <= self.end
    }
}

impl std::fmt::Display for SubRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Action of an access-list, prefix-list or route-map line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineAction {
    /// Matching routes or packets are accepted.
    Permit,
    /// Matching routes or packets are rejected.
    Deny,
}

/// IP protocol number, as used in extended access lists.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IpProtocol(pub u8);

impl IpProtocol {
    /// Any IP packet
    pub const IP: IpProtocol = IpProtocol(0);
    /// ICMP
    pub const ICMP: IpProtocol = IpProtocol(1);
    /// TCP
    pub const TCP: IpProtocol = IpProtocol(6);
    /// UDP
    pub const UDP: IpProtocol = IpProtocol(17);
}

/// Source protocol of a redistribution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoutingProtocol {
    /// BGP routes
    Bgp,
    /// Directly connected networks
    Connected,
    /// OSPF routes
    Ospf,
    /// Static routes
    Static,
    /// Aggregate routes
    Aggregate,
    /// RIP routes
    Rip,
}

/// OSPF external metric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OspfMetricType {
    /// Type 1 external metric
    E1,
    /// Type 2 external metric
    E2,
}

impl OspfMetricType {
    /// Default metric type of redistributed routes.
    pub const DEFAULT: OspfMetricType = OspfMetricType::E2;

    /// Get the metric type from its number
    pub fn from_number(x: u32) -> Option<Self> {
        match x {
            1 => Some(Self::E1),
            2 => Some(Self::E2),
            _ => None,
        }
    }
}
