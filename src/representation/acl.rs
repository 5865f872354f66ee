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

//! # Filter lists
//!
//! Access lists, prefix lists, community lists and AS-path access lists. Every list is a name
//! with an ordered sequence of lines; the first matching line decides.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::types::{IpProtocol, LineAction, SubRange};

/// Line of a standard (source address only) access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardAccessListLine {
    /// Action
    pub action: LineAction,
    /// Source address
    pub ip: Ipv4Addr,
    /// Wildcard of the source address
    pub wildcard: u32,
    /// DSCP values
    pub dscps: Vec<u32>,
    /// ECN values
    pub ecns: Vec<u32>,
}

/// A standard access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardAccessList {
    /// Name (or number)
    pub name: String,
    /// Lines
    pub lines: Vec<StandardAccessListLine>,
}

/// Line of an extended access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedAccessListLine {
    /// Action
    pub action: LineAction,
    /// IP protocol
    pub protocol: IpProtocol,
    /// Source address
    pub src_ip: Ipv4Addr,
    /// Wildcard of the source address
    pub src_wildcard: u32,
    /// Destination address
    pub dst_ip: Ipv4Addr,
    /// Wildcard of the destination address
    pub dst_wildcard: u32,
    /// Source ports (empty means any)
    pub src_ports: Vec<SubRange>,
    /// Destination ports (empty means any)
    pub dst_ports: Vec<SubRange>,
    /// DSCP values
    pub dscps: Vec<u32>,
    /// ECN values
    pub ecns: Vec<u32>,
    /// Only match established TCP connections
    pub established: bool,
}

/// An extended access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedAccessList {
    /// Name (or number)
    pub name: String,
    /// Lines
    pub lines: Vec<ExtendedAccessListLine>,
}

/// Line of a prefix list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixListLine {
    /// Action
    pub action: LineAction,
    /// Prefix
    pub prefix: Ipv4Net,
    /// Accepted prefix lengths
    pub length_range: SubRange,
}

/// A prefix list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixList {
    /// Name
    pub name: String,
    /// Lines
    pub lines: Vec<PrefixListLine>,
}

/// Line of a standard community list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardCommunityListLine {
    /// Action
    pub action: LineAction,
    /// Communities that must all be present
    pub communities: Vec<u32>,
}

/// A standard community list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardCommunityList {
    /// Name (or number)
    pub name: String,
    /// Lines
    pub lines: Vec<StandardCommunityListLine>,
}

/// Line of an expanded community list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCommunityListLine {
    /// Action
    pub action: LineAction,
    /// Regex over the community string
    pub regex: String,
}

/// An expanded community list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCommunityList {
    /// Name (or number)
    pub name: String,
    /// Lines
    pub lines: Vec<ExpandedCommunityListLine>,
}

/// Line of an AS-path access list. Only regexes with at most two AS terms are represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAsPathAccessListLine {
    /// Action
    pub action: LineAction,
    /// The regex is anchored at the beginning of the path (`^`)
    pub at_beginning: bool,
    /// The regex also matches the empty path
    pub match_empty: bool,
    /// Range of the first AS
    pub as1_range: Option<SubRange>,
    /// Range of the second AS
    pub as2_range: Option<SubRange>,
}

/// An AS-path access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpAsPathAccessList {
    /// Name
    pub name: String,
    /// Lines
    pub lines: Vec<IpAsPathAccessListLine>,
}

macro_rules! impl_named_list {
    ($($t:ty),*) => {
        $(
            impl $t {
                /// Create an empty list.
                pub fn new(name: impl Into<String>) -> Self {
                    Self {
                        name: name.into(),
                        lines: Vec::new(),
                    }
                }
            }
        )*
    };
}

impl_named_list!(
    StandardAccessList,
    ExtendedAccessList,
    PrefixList,
    StandardCommunityList,
    ExpandedCommunityList,
    IpAsPathAccessList
);
