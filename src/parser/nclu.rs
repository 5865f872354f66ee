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

//! # Cumulus NCLU grammar
//!
//! Every line is a single `net add ...` command. Each command becomes a stanza node (the object the
//! command applies to) with exactly one child: the setting applied to it.

use super::{Node, NodeKind, ParseError};
use crate::{
    lexer::{Line, Token, TokenKind},
    settings::Settings,
};

/// Top-level objects that are accepted but not modeled.
const UNIMPLEMENTED: &[&str] = &[
    "bond", "bridge", "clag", "dns", "snmp-server", "time", "vlan", "vxlan",
];

/// Build the parse tree of a Cumulus NCLU command file.
pub fn parse(lines: &[Line], settings: &Settings) -> Result<Node, ParseError> {
    let mut children = Vec::with_capacity(lines.len());
    for line in lines {
        match command(line) {
            Some(node) => children.push(node),
            None if settings.unrecognized_as_red_flag => {
                children.push(Node::new(NodeKind::Unrecognized, line))
            }
            None => {
                return Err(ParseError::Unrecognized {
                    line: line.number,
                    text: line.text.clone(),
                })
            }
        }
    }
    log::trace!("parsed {} nclu commands", children.len());
    Ok(Node::root(NodeKind::NcluConfiguration, children))
}

/// Classify a single command line.
fn command(line: &Line) -> Option<Node> {
    use NodeKind::*;
    let t = &line.tokens;
    let w = line.words();
    Some(match w.as_slice() {
        ["net", "commit", ..] | ["net", "pending", ..] | ["net", "abort"] => Node::new(Null, line),
        ["net", "del", ..] => Node::new(NcluDel, line),
        ["net", "add", "hostname", _] => Node::new(NcluHostname, line).with("name", &t[3]),
        ["net", "add", "interface", _, ..] => Node::new(NcluInterface, line)
            .with("names", &t[3])
            .child(interface_setting(line, 4)?),
        ["net", "add", "loopback", _, ..] => Node::new(NcluLoopback, line)
            .with("name", &t[3])
            .child(interface_setting(line, 4)?),
        ["net", "add", "vrf", _, "vrf-table", ..] => Node::new(NcluVrf, line)
            .with("name", &t[3])
            .child(Node::new(NcluVrfTable, line).with_opt("table", t.get(5))),
        ["net", "add", "vrf", _, ..] => Node::new(NcluVrf, line)
            .with("name", &t[3])
            .child(interface_setting(line, 4)?),
        ["net", "add", "bgp", "vrf", _, ..] => Node::new(NcluBgp, line)
            .with("vrf", &t[4])
            .child(bgp_setting(line, 5)?),
        ["net", "add", "bgp", ..] => Node::new(NcluBgp, line).child(bgp_setting(line, 3)?),
        ["net", "add", "routing", "route", _, _, ..] => {
            let mut node = Node::new(NcluRoutingRoute, line).with("prefix", &t[4]);
            node = match t[5].kind {
                TokenKind::Ip => node.with("nexthop_ip", &t[5]),
                _ => node.with("nexthop_iface", &t[5]),
            };
            match &w[6..] {
                [] => node,
                ["vrf", _] => node.with("vrf", &t[7]),
                _ => return None,
            }
        }
        ["net", "add", "routing", "route-map", _, "permit" | "deny", _, "match", "interface", _] => {
            Node::new(NcluRouteMap, line)
                .with("name", &t[4])
                .with("action", &t[5])
                .with("num", &t[6])
                .child(Node::new(NcluRouteMapMatchInterface, line).with("name", &t[9]))
        }
        ["net", "add", first, ..] if UNIMPLEMENTED.contains(first) => {
            Node::new(NcluUnimplemented, line).with("feature", &t[2])
        }
        _ => return None,
    })
}

/// Setting of an interface, loopback or VRF, starting at token `i`.
fn interface_setting(line: &Line, i: usize) -> Option<Node> {
    use NodeKind::*;
    let t = line.tokens.get(i..)?;
    let w: Vec<&str> = t.iter().map(|x| x.text.as_str()).collect();
    Some(match w.as_slice() {
        ["ip", "address", _] => Node::new(NcluIfIpAddress, line).with("prefix", &t[2]),
        ["ipv6", "address", _] => Node::new(Null, line),
        ["alias", ..] => {
            Node::new(NcluIfAlias, line).with_text("text", line.rest_from(i + 1), line.number)
        }
        ["vrf", _] => Node::new(NcluIfVrf, line).with("name", &t[1]),
        ["link", "speed", _] => Node::new(NcluIfLinkSpeed, line).with("speed", &t[2]),
        ["link", ..] | ["mtu", _] | ["ip", "forward", ..] => Node::new(Null, line),
        ["bridge", "access", _] => Node::new(NcluIfBridgeAccess, line).with("vlan", &t[2]),
        ["bridge", "vids", _] => Node::new(NcluIfBridgeVids, line).with("vids", &t[2]),
        _ => return None,
    })
}

/// Setting of a BGP process, starting at token `i` (after `bgp [vrf NAME]`).
fn bgp_setting(line: &Line, i: usize) -> Option<Node> {
    use NodeKind::*;
    let t = line.tokens.get(i..)?;
    let w: Vec<&str> = t.iter().map(|x| x.text.as_str()).collect();
    Some(match w.as_slice() {
        ["autonomous-system", _] => Node::new(NcluBgpAutonomousSystem, line).with("as", &t[1]),
        ["router-id", _] => Node::new(NcluBgpRouterId, line).with("id", &t[1]),
        ["neighbor", _, ..] => Node::new(NcluBgpNeighbor, line)
            .with("key", &t[1])
            .child(neighbor_setting(line, &t[2..], i + 2)?),
        ["ipv4", "unicast", "network", _] => Node::new(NcluBgpIpv4Unicast, line)
            .child(Node::new(NcluBgpNetwork, line).with("prefix", &t[3])),
        ["ipv4", "unicast", "redistribute", _, rest @ ..] => {
            let map = match rest {
                [] => None,
                ["route-map", _] => t.get(5),
                _ => return None,
            };
            Node::new(NcluBgpIpv4Unicast, line).child(
                Node::new(NcluBgpRedistribute, line)
                    .with("protocol", &t[3])
                    .with_opt("map", map),
            )
        }
        ["ipv4", "unicast", "neighbor", _, _, ..] => Node::new(NcluBgpIpv4Unicast, line).child(
            Node::new(NcluBgpNeighbor, line)
                .with("key", &t[3])
                .child(neighbor_setting(line, &t[4..], i + 4)?),
        ),
        ["l2vpn", "evpn", ..] => Node::new(NcluBgpL2vpnEvpn, line),
        ["bestpath", ..] | ["timers", ..] => Node::new(Null, line),
        _ => return None,
    })
}

/// Setting of a BGP neighbor. `t` starts after the neighbor key, at token index `i` of the line.
fn neighbor_setting(line: &Line, t: &[Token], i: usize) -> Option<Node> {
    use NodeKind::*;
    let w: Vec<&str> = t.iter().map(|x| x.text.as_str()).collect();
    Some(match w.as_slice() {
        ["remote-as", _] => Node::new(NcluNeighborRemoteAs, line).with("as", &t[1]),
        ["interface", "remote-as", _] => Node::new(NcluNeighborRemoteAs, line)
            .with("interface", &t[0])
            .with("as", &t[2]),
        ["peer-group"] => Node::new(NcluNeighborPeerGroup, line),
        ["peer-group", _] => Node::new(NcluNeighborPeerGroup, line).with("name", &t[1]),
        ["interface", "peer-group", _] => Node::new(NcluNeighborPeerGroup, line)
            .with("interface", &t[0])
            .with("name", &t[2]),
        ["description", ..] => Node::new(NcluNeighborDescription, line).with_text(
            "text",
            line.rest_from(i + 1),
            line.number,
        ),
        ["activate"] => Node::new(NcluNeighborActivate, line),
        ["route-reflector-client"] => Node::new(NcluNeighborRouteReflectorClient, line),
        ["bfd", ..] | ["capability", ..] | ["timers", ..] | ["password", ..] => {
            Node::new(Null, line)
        }
        _ => return None,
    })
}
