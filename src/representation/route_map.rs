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

//! Module containing route-maps. Match and set lines keep the names of the lists they refer to.

use std::net::Ipv4Addr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::LineAction;

/// Origin attribute set by a route-map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginType {
    /// Learned from an IGP
    Igp,
    /// Learned from EGP
    Egp,
    /// Unknown origin
    Incomplete,
}

impl OriginType {
    /// Decode the origin keyword.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "igp" => Some(Self::Igp),
            "egp" => Some(Self::Egp),
            "incomplete" => Some(Self::Incomplete),
            _ => None,
        }
    }
}

/// A `match` line of a route-map clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteMapMatch {
    /// Match any of the AS-path access lists
    AsPath(Vec<String>),
    /// Match any of the community lists
    Community(Vec<String>),
    /// Match any of the IP access lists
    IpAccessList(Vec<String>),
    /// Match any of the prefix lists
    IpPrefixList(Vec<String>),
    /// Match any of the tags
    Tag(Vec<u32>),
    /// Match any of the interfaces
    Interface(Vec<String>),
}

/// A `set` line of a route-map clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteMapSet {
    /// Prepend the AS numbers to the AS path
    AsPathPrepend(Vec<u32>),
    /// Replace all communities
    Community(Vec<u32>),
    /// Add communities
    AdditiveCommunity(Vec<u32>),
    /// Remove all communities
    CommunityNone,
    /// Remove the communities matched by the named community list
    DeleteCommunity(String),
    /// Set the local preference
    LocalPreference(u32),
    /// Set the MED
    Metric(u32),
    /// Set the next hop
    NextHop(Vec<Ipv4Addr>),
    /// Set the next hop to the address of the peer
    NextHopPeerAddress,
    /// Set the origin (with the AS for `egp`)
    Origin(OriginType, Option<u32>),
}

/// One numbered clause of a route-map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMapClause {
    /// Action applied to matching routes
    pub action: LineAction,
    /// Sequence number
    pub number: u32,
    /// Match lines (all must match)
    pub match_lines: Vec<RouteMapMatch>,
    /// Set lines
    pub set_lines: Vec<RouteMapSet>,
}

impl RouteMapClause {
    /// Create an empty clause.
    pub fn new(action: LineAction, number: u32) -> Self {
        Self {
            action,
            number,
            match_lines: Vec::new(),
            set_lines: Vec::new(),
        }
    }
}

/// A route-map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMap {
    /// Name
    pub name: String,
    /// Whether any clause refers to IPv6
    pub ipv6: bool,
    /// Clauses keyed by their sequence number, in declaration order
    pub clauses: IndexMap<u32, RouteMapClause>,
}

impl RouteMap {
    /// Create an empty route-map.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ipv6: false,
            clauses: IndexMap::new(),
        }
    }
}
