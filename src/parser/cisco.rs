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

//! # Cisco grammar
//!
//! Cisco configurations are organized in blocks: a statement opens a block, and all lines indented
//! deeper belong to it. Each block is classified by the context it appears in (top level,
//! interface, `router bgp`, ...). Statements that are known but carry no meaning for the
//! representation become [`NodeKind::Null`]; everything else is [`NodeKind::Unrecognized`].

use super::{blocks, Block, Node, NodeKind, ParseError};
use crate::{
    decode,
    lexer::{Line, Token, TokenKind},
    settings::Settings,
};

/// Top-level commands without meaning for the representation.
const IGNORED_TOP: &[&str] = &[
    "Building", "Current", "aaa", "alias", "archive", "banner", "boot", "call-home", "cdp",
    "class-map", "clock", "configuration", "control-plane", "crypto", "diagnostic", "dial-peer",
    "dot11", "enable", "end", "errdisable", "event", "exit", "feature", "file", "hardware",
    "hw-module", "install", "ipv6", "key", "license", "line", "lldp", "logging", "mac",
    "management", "memory", "monitor", "mpls", "multilink", "no", "ntp", "object-group",
    "policy-map", "power", "privilege", "process", "radius-server", "redundancy", "scheduler",
    "service", "snmp-server", "spanning-tree", "system", "tacacs-server", "track", "transceiver",
    "udld", "username", "version", "vlan", "vpc", "vtp",
];

/// Top-level `ip` commands without meaning for the representation.
const IGNORED_TOP_IP: &[&str] = &[
    "accounting-threshold", "arp", "bgp-community", "bootp", "cef", "classless", "dhcp", "domain",
    "domain-list", "domain-lookup", "domain-name", "explicit-path", "finger", "flow-cache",
    "flow-export", "forward-protocol", "ftp", "host", "http", "icmp", "igmp", "load-sharing",
    "local", "multicast-routing", "name-server", "nat", "options", "ospf", "pim", "radius",
    "routing", "scp", "sla", "source-route", "ssh", "subnet-zero", "tacacs", "tcp", "telnet",
    "tftp", "wccp",
];

/// Interface commands without meaning for the representation.
const IGNORED_IF: &[&str] = &[
    "arp", "auto", "autostate", "bfd", "carrier-delay", "cdp", "channel-group", "channel-protocol",
    "crypto", "dampening", "delay", "duplex", "encapsulation", "exit", "fabric", "flowcontrol",
    "hold-queue", "hsrp", "isis", "keepalive", "link", "lldp", "load-interval", "logging", "mac",
    "mac-address", "macsec", "management", "media-type", "medium", "mls", "mpls", "negotiation",
    "no", "ntp", "peer", "platform", "power", "ppp", "priority-queue", "pvc", "qos",
    "rate-limit", "rcv-queue", "service-policy", "snmp", "spanning-tree", "speed", "srr-queue",
    "standby", "storm-control", "transmit-interface", "tunnel", "udld", "vpc", "vrrp",
    "wrr-queue",
];

/// Interface `ip` commands without meaning for the representation.
const IGNORED_IF_IP: &[&str] = &[
    "accounting", "arp", "authentication", "cef", "dhcp", "directed-broadcast", "flow",
    "hello-interval", "helper-address", "igmp", "igrp", "irdp", "mask-reply", "mroute-cache",
    "mtu", "multicast", "nat", "nbar", "ospf", "pim", "port", "proxy-arp", "redirects", "rip",
    "route-cache", "router", "sap", "split-horizon", "summary-address", "tcp", "unreachables",
    "verify", "virtual-reassembly", "wccp",
];

/// `router bgp` commands without meaning for the representation.
const IGNORED_BGP: &[&str] = &[
    "bestpath", "bgp", "dampening", "default", "default-information", "default-metric",
    "distance", "distribute-list", "event-history", "exit", "exit-address-family", "exit-vrf",
    "graceful-restart", "graceful-restart-helper", "log-neighbor-changes", "maximum-paths", "no",
    "nsr", "rd", "route-target", "suppress-inactive", "table-map", "timers",
];

/// Neighbor settings without meaning for the representation.
const IGNORED_TAIL: &[&str] = &[
    "additional-paths", "advertise", "advertisement-interval", "as-override", "bfd",
    "capability", "dont-capability-negotiate", "dynamic-capability", "fall-over", "filter-list",
    "ha-mode", "local-as", "log-neighbor-changes", "low-memory", "maximum-prefix",
    "next-hop-unchanged", "password", "send-label", "soft-reconfiguration", "soo",
    "suppress-inactive", "timers", "translate-update", "transport", "ttl-security",
    "unsuppress-map", "version", "weight",
];

/// `router ospf` commands without meaning for the representation.
const IGNORED_OSPF: &[&str] = &[
    "auto-cost", "bfd", "capability", "compatible", "default-metric", "discard-route", "distance",
    "distribute-list", "exit", "graceful-restart", "ispf", "log-adjacency-changes", "max-lsa",
    "max-metric", "mpls", "no", "nsf", "prefix-suppression", "summary-address", "timers",
];

/// The context a block is classified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    Interface,
    Bgp,
    NeighborBody,
    Ospf,
    VrfContext,
    StandardAcl,
    ExtendedAcl,
    RouteMap,
}

/// Replace the body of multi-line banners by empty lines, keeping the line numbers intact.
///
/// A banner starts with `banner <kind> <delimiter>` and ends at the next occurrence of the
/// delimiter, which is either `^C` or the first character of the third word.
pub fn strip_banners(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut delimiter: Option<String> = None;
    for raw in text.lines() {
        if let Some(d) = delimiter.as_deref() {
            if raw.contains(d) {
                delimiter = None;
            }
            out.push('\n');
            continue;
        }
        out.push_str(raw);
        out.push('\n');
        if !raw.starts_with("banner") {
            continue;
        }
        // skip the first two words
        let mut rest = raw;
        for _ in 0..2 {
            rest = rest.trim_start();
            rest = &rest[rest.find(char::is_whitespace).unwrap_or(rest.len())..];
        }
        let rest = rest.trim_start();
        let d = if rest.starts_with("^C") {
            "^C".to_string()
        } else {
            match rest.chars().next() {
                Some(c) => c.to_string(),
                None => continue,
            }
        };
        if !rest[d.len()..].contains(d.as_str()) {
            delimiter = Some(d);
        }
    }
    out
}

/// Build the parse tree of a Cisco configuration.
pub fn parse(lines: &[Line], settings: &Settings) -> Result<Node, ParseError> {
    let parser = Parser { settings };
    let children = parser.children(Context::Top, &blocks(lines), 1)?;
    log::trace!("parsed {} top-level cisco statements", children.len());
    Ok(Node::root(NodeKind::CiscoConfiguration, children))
}

/// Classifier of blocks.
#[derive(Debug)]
struct Parser<'s> {
    settings: &'s Settings,
}

impl Parser<'_> {
    fn children(
        &self,
        ctx: Context,
        blocks: &[Block<'_>],
        depth: usize,
    ) -> Result<Vec<Node>, ParseError> {
        blocks.iter().map(|b| self.block(ctx, b, depth)).collect()
    }

    fn block(&self, ctx: Context, b: &Block<'_>, depth: usize) -> Result<Node, ParseError> {
        if depth > self.settings.max_parse_tree_depth {
            return Err(ParseError::TooDeep {
                line: b.line.number,
                max_depth: self.settings.max_parse_tree_depth,
            });
        }
        match ctx {
            Context::Top => self.top(b, depth),
            Context::Interface => self.interface(b),
            Context::Bgp => self.bgp(b, depth),
            Context::NeighborBody => self.neighbor_body(b, depth),
            Context::Ospf => self.ospf(b),
            Context::VrfContext => self.vrf_context(b),
            Context::StandardAcl => self.standard_acl(b),
            Context::ExtendedAcl => self.extended_acl(b),
            Context::RouteMap => self.route_map(b),
        }
    }

    /// Either an [`NodeKind::Unrecognized`] node or an error, depending on the settings.
    fn unrecognized(&self, line: &Line) -> Result<Node, ParseError> {
        if self.settings.unrecognized_as_red_flag {
            Ok(Node::new(NodeKind::Unrecognized, line))
        } else {
            Err(ParseError::Unrecognized {
                line: line.number,
                text: line.text.clone(),
            })
        }
    }

    fn or_unrecognized(&self, line: &Line, node: Option<Node>) -> Result<Node, ParseError> {
        match node {
            Some(node) => Ok(node),
            None => self.unrecognized(line),
        }
    }

    fn top(&self, b: &Block<'_>, depth: usize) -> Result<Node, ParseError> {
        use NodeKind::*;
        let line = b.line;
        let t = b.tokens();
        let w = b.words();
        Ok(match w.as_slice() {
            ["hostname", _] => Node::new(Hostname, line).with("name", &t[1]),
            ["interface", _, rest @ ..] => Node::new(InterfaceStanza, line)
                .with("name", &t[1])
                .flag("multipoint", &t[t.len() - 1], rest.contains(&"multipoint"))
                .with_children(self.children(Context::Interface, &b.children, depth + 1)?),
            ["router", "bgp", ..] => Node::new(RouterBgpStanza, line)
                .with_opt("procnum", t.get(2))
                .with_children(self.children(Context::Bgp, &b.children, depth + 1)?),
            ["router", "ospf", _, rest @ ..] => {
                let vrf = match rest {
                    ["vrf", _] => t.get(4),
                    _ => None,
                };
                Node::new(RouterOspfStanza, line)
                    .with("procnum", &t[2])
                    .with_opt("vrf", vrf)
                    .with_children(self.children(Context::Ospf, &b.children, depth + 1)?)
            }
            ["router", "rip", ..] => Node::new(RouterRipStanza, line),
            ["vrf", "context", _] => Node::new(VrfContextStanza, line)
                .with("name", &t[2])
                .with_children(self.children(Context::VrfContext, &b.children, depth + 1)?),
            ["vrf", "definition", ..] | ["ip", "vrf", ..] => Node::new(Null, line),
            ["ip", "route", ..] => return self.or_unrecognized(line, ip_route(line, t, 2)),
            ["ip", "default-gateway", _] => Node::new(IpDefaultGateway, line).with("ip", &t[2]),
            ["ip", "prefix-list", "sequence-number"] => Node::new(Null, line),
            ["ip" | "ipv6", "prefix-list", _, "description", ..] => Node::new(Null, line),
            ["ip" | "ipv6", "prefix-list", _, ..] => {
                let tail = prefix_list_tail(line, t);
                let tail = self.or_unrecognized(line, tail)?;
                if tail.kind == Unrecognized {
                    tail
                } else {
                    Node::new(IpPrefixListStanza, line)
                        .with("name", &t[2])
                        .flag("ipv6", &t[0], t[0].is("ipv6"))
                        .child(tail)
                }
            }
            ["no", "ip", "prefix-list", _, ..] => Node::new(NoIpPrefixList, line).with("name", &t[3]),
            ["access-list", _, "remark", ..] => Node::new(Null, line),
            ["access-list", num, ..] => {
                let tail = match num.parse::<u32>() {
                    Ok(1..=99 | 1300..=1999) => standard_acl_tail(line, t, 2)
                        .map(|tail| (StandardAccessListStanza, tail)),
                    Ok(100..=199 | 2000..=2699) => extended_acl_tail(line, t, 2)
                        .map(|tail| (ExtendedAccessListStanza, tail)),
                    _ => None,
                };
                match tail {
                    Some((kind, tail)) => Node::new(kind, line).with("name", &t[1]).child(tail),
                    None => return self.unrecognized(line),
                }
            }
            ["ip", "access-list", "standard", _] => Node::new(StandardAccessListStanza, line)
                .with("name", &t[3])
                .with_children(self.children(Context::StandardAcl, &b.children, depth + 1)?),
            ["ip", "access-list", "extended", _] => Node::new(ExtendedAccessListStanza, line)
                .with("name", &t[3])
                .with_children(self.children(Context::ExtendedAcl, &b.children, depth + 1)?),
            ["ip", "access-list", _] => Node::new(ExtendedAccessListStanza, line)
                .with("name", &t[2])
                .with_children(self.children(Context::ExtendedAcl, &b.children, depth + 1)?),
            ["ipv6", "access-list", .., _] => Node::new(ExtendedAccessListStanza, line)
                .with("name", &t[t.len() - 1])
                .with("ipv6", &t[0]),
            ["ip", "community-list", ..] => {
                return self.or_unrecognized(line, community_list(line, t));
            }
            ["ip", "as-path", "access-list", _, _, _, ..] => {
                return self.or_unrecognized(line, as_path_access_list(line, t));
            }
            ["route-map", _, ..] => {
                let mut node = Node::new(RouteMapStanza, line).with("name", &t[1]);
                let mut i = 2;
                if let Some(action) = t.get(i).filter(|x| is_action(x)) {
                    node = node.with("action", action);
                    i += 1;
                }
                node.with_opt("num", t.get(i).filter(|x| x.kind == TokenKind::Dec))
                    .with_children(self.children(Context::RouteMap, &b.children, depth + 1)?)
            }
            ["no", "route-map", _, ..] => Node::new(NoRouteMap, line).with("name", &t[2]),
            ["switching-mode", ..] => Node::new(SwitchingMode, line),
            ["ip", sub, ..] if IGNORED_TOP_IP.contains(sub) => Node::new(Null, line),
            [first, ..] if IGNORED_TOP.contains(first) => Node::new(Null, line),
            _ => return self.unrecognized(line),
        })
    }

    fn interface(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        use NodeKind::*;
        let line = b.line;
        let t = b.tokens();
        let w = b.words();
        Ok(match w.as_slice() {
            ["description", ..] => {
                Node::new(DescriptionIf, line).with_text("text", line.rest_from(1), line.number)
            }
            ["ip", "address", .., "secondary"] => {
                return self.or_unrecognized(line, address(IpAddressSecondaryIf, line, t, 2))
            }
            ["ip", "address", ..] => {
                address(IpAddressIf, line, t, 2).unwrap_or_else(|| Node::new(Null, line))
            }
            ["no", "ip", "address", ..] => Node::new(Null, line),
            ["shutdown"] => Node::new(ShutdownIf, line),
            ["no", "shutdown"] => Node::new(ShutdownIf, line).with("no", &t[0]),
            ["bandwidth", _] => Node::new(BandwidthIf, line).with("value", &t[1]),
            ["mtu", _] => Node::new(MtuIf, line).with("value", &t[1]),
            ["vrf", "forwarding", _] => Node::new(VrfForwardingIf, line).with("name", &t[2]),
            ["ip", "vrf", "forwarding", _] => Node::new(VrfForwardingIf, line).with("name", &t[3]),
            ["vrf", "member", _] => Node::new(VrfMemberIf, line).with("name", &t[2]),
            ["ip", "access-group", _, "in" | "out"] => Node::new(IpAccessGroupIf, line)
                .with("name", &t[2])
                .with("direction", &t[3]),
            ["ip", "policy", "route-map", _] => Node::new(IpPolicyIf, line).with("name", &t[3]),
            ["ip", "ospf", "cost", _] => Node::new(IpOspfCostIf, line).with("cost", &t[3]),
            ["ip", "ospf", "dead-interval", "minimal", "hello-multiplier", _] => {
                Node::new(IpOspfDeadIntervalMinimalIf, line).with("multiplier", &t[5])
            }
            ["ip", "ospf", "dead-interval", _] => {
                Node::new(IpOspfDeadIntervalIf, line).with("seconds", &t[3])
            }
            ["switchport"] => Node::new(SwitchportIf, line),
            ["no", "switchport"] => Node::new(SwitchportIf, line).with("no", &t[0]),
            ["switchport", "access", "vlan", "dynamic"] => {
                Node::new(SwitchportAccessIf, line).with("dynamic", &t[3])
            }
            ["switchport", "access", "vlan", _] => {
                Node::new(SwitchportAccessIf, line).with("vlan", &t[3])
            }
            ["switchport", "mode", _, ..] => {
                Node::new(SwitchportModeIf, line).with_all("mode", &t[2..])
            }
            ["switchport", "trunk", "allowed", "vlan", "add", _] => {
                Node::new(SwitchportTrunkAllowedIf, line).with("ranges", &t[5])
            }
            ["switchport", "trunk", "allowed", "vlan", r]
                if r.starts_with(|c: char| c.is_ascii_digit()) =>
            {
                Node::new(SwitchportTrunkAllowedIf, line).with("ranges", &t[4])
            }
            ["switchport", "trunk", "encapsulation", _] => {
                Node::new(SwitchportTrunkEncapsulationIf, line).with("encapsulation", &t[3])
            }
            ["switchport", "trunk", "native", "vlan", _] => {
                Node::new(SwitchportTrunkNativeIf, line).with("vlan", &t[4])
            }
            ["switchport", ..] => Node::new(Null, line),
            ["ipv6", ..] => Node::new(Ipv6If, line),
            ["ip", sub, ..] if IGNORED_IF_IP.contains(sub) => Node::new(Null, line),
            [first, ..] if IGNORED_IF.contains(first) => Node::new(Null, line),
            _ => return self.unrecognized(line),
        })
    }

    fn bgp(&self, b: &Block<'_>, depth: usize) -> Result<Node, ParseError> {
        use NodeKind::*;
        let line = b.line;
        let t = b.tokens();
        let w = b.words();
        Ok(match w.as_slice() {
            ["bgp", "router-id", _] => Node::new(RouterIdBgp, line).with("id", &t[2]),
            ["router-id", _] => Node::new(RouterIdBgp, line).with("id", &t[1]),
            ["bgp", "cluster-id", _] => Node::new(ClusterIdBgp, line).with("id", &t[2]),
            ["bgp", "always-compare-med"] => Node::new(AlwaysCompareMedBgp, line),
            ["bgp", "listen", "range", _, "peer-group", _, rest @ ..] => {
                let remote_as = match rest {
                    ["remote-as", _] => t.get(7),
                    _ => None,
                };
                Node::new(BgpListenRange, line)
                    .with("prefix", &t[3])
                    .with("name", &t[5])
                    .with_opt("as", remote_as)
            }
            ["auto-summary"] => Node::new(AutoSummaryBgp, line),
            ["no", "auto-summary" | "synchronization"] | ["synchronization"] => {
                Node::new(Null, line)
            }
            ["network", ..] => return self.or_unrecognized(line, bgp_network(line, t)),
            ["aggregate-address", ..] => {
                let node = address(AggregateAddressBgp, line, t, 1).map(|mut node| {
                    for (i, tok) in t.iter().enumerate().skip(2) {
                        match tok.text.as_str() {
                            "as-set" => node = node.with("as_set", tok),
                            "summary-only" => node = node.with("summary_only", tok),
                            "attribute-map" => node = node.with_opt("attribute_map", t.get(i + 1)),
                            _ => {}
                        }
                    }
                    node
                });
                return self.or_unrecognized(line, node);
            }
            ["redistribute", _, ..] => redistribute(RedistributeBgp, line, t),
            ["no", "redistribute", "connected", ..] => Node::new(NoRedistributeConnectedBgp, line),
            ["maximum-peers", _] => Node::new(MaximumPeersBgp, line).with("value", &t[1]),
            ["neighbor", _, "peer-group"] if t[1].kind == TokenKind::Word => {
                Node::new(PeerGroupCreation, line).with("name", &t[1])
            }
            ["neighbor", _, rest @ ..] if rest.is_empty() || !b.children.is_empty() => {
                let remote_as = match rest {
                    ["remote-as", _] => t.get(3),
                    _ => None,
                };
                neighbor_key(Node::new(NexusNeighbor, line), &t[1])
                    .with_opt("as", remote_as)
                    .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?)
            }
            ["neighbor", _, _, ..] => match neighbor_tail(line, t, 2) {
                Some(tail) => neighbor_key(Node::new(NeighborStanza, line), &t[1]).child(tail),
                None => return self.unrecognized(line),
            },
            ["no", "neighbor", _, "activate"] => {
                neighbor_key(Node::new(NoNeighborActivate, line), &t[2])
            }
            ["no", "neighbor", _, "shutdown"] => {
                neighbor_key(Node::new(NoNeighborShutdown, line), &t[2])
            }
            ["no", "neighbor", ..] => Node::new(Null, line),
            ["no", "shutdown"] => Node::new(NoShutdownBgp, line),
            ["address-family", _, ..] => Node::new(AddressFamily, line)
                .with_all("af", &t[1..])
                .with_children(self.children(Context::Bgp, &b.children, depth + 1)?),
            ["template", "peer-policy", _] => Node::new(TemplatePeerPolicy, line)
                .with("name", &t[2])
                .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?),
            ["template", "peer-session", _] => Node::new(TemplatePeerSession, line)
                .with("name", &t[2])
                .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?),
            ["template", "peer", _] => Node::new(TemplatePeer, line)
                .with("name", &t[2])
                .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?),
            ["neighbor-group", _] => Node::new(NeighborGroup, line)
                .with("name", &t[1])
                .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?),
            ["vrf", _] => Node::new(NexusVrf, line)
                .with("name", &t[1])
                .with_children(self.children(Context::Bgp, &b.children, depth + 1)?),
            [first, ..] if IGNORED_BGP.contains(first) => Node::new(Null, line),
            _ => return self.unrecognized(line),
        })
    }

    /// Body of templates, neighbor groups and NX-OS neighbor blocks: neighbor tails without the
    /// `neighbor X` prefix.
    fn neighbor_body(&self, b: &Block<'_>, depth: usize) -> Result<Node, ParseError> {
        let line = b.line;
        let w = b.words();
        Ok(match w.as_slice() {
            ["address-family", _, ..] => Node::new(NodeKind::AddressFamily, line)
                .with_all("af", &b.tokens()[1..])
                .with_children(self.children(Context::NeighborBody, &b.children, depth + 1)?),
            ["no", "shutdown"] => Node::new(NodeKind::NoShutdownBgp, line),
            ["exit-peer-policy" | "exit-peer-session" | "exit-address-family" | "exit"] => {
                Node::new(NodeKind::Null, line)
            }
            _ => return self.or_unrecognized(line, neighbor_tail(line, b.tokens(), 0)),
        })
    }

    fn ospf(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        use NodeKind::*;
        let line = b.line;
        let t = b.tokens();
        let w = b.words();
        Ok(match w.as_slice() {
            ["router-id", _] => Node::new(RouterIdOspf, line).with("id", &t[1]),
            ["network", _, "area", _] if t[1].kind == TokenKind::IpPrefix => {
                Node::new(NetworkOspf, line).with("prefix", &t[1]).with("area", &t[3])
            }
            ["network", _, _, "area", _] => Node::new(NetworkOspf, line)
                .with("address", &t[1])
                .with("wildcard", &t[2])
                .with("area", &t[4]),
            ["area", _, "nssa", rest @ ..] => Node::new(AreaNssaOspf, line)
                .with("area", &t[1])
                .flag("no_summary", &t[2], rest.contains(&"no-summary"))
                .flag(
                    "default_information_originate",
                    &t[2],
                    rest.contains(&"default-information-originate"),
                ),
            ["area", ..] => Node::new(Null, line),
            ["default-information", "originate", ..] => {
                let mut node = Node::new(DefaultInformationOspf, line);
                for (i, tok) in t.iter().enumerate().skip(2) {
                    match tok.text.as_str() {
                        "always" => node = node.with("always", tok),
                        "metric" => node = node.with_opt("metric", t.get(i + 1)),
                        "metric-type" => node = node.with_opt("metric_type", t.get(i + 1)),
                        "route-map" => node = node.with_opt("map", t.get(i + 1)),
                        _ => {}
                    }
                }
                node
            }
            ["passive-interface", "default"] => Node::new(PassiveInterfaceDefaultOspf, line),
            ["no", "passive-interface", "default"] => {
                Node::new(PassiveInterfaceDefaultOspf, line).with("no", &t[0])
            }
            ["passive-interface", _] => {
                Node::new(PassiveInterfaceOspf, line).with("interface", &t[1])
            }
            ["no", "passive-interface", _] => Node::new(PassiveInterfaceOspf, line)
                .with("no", &t[0])
                .with("interface", &t[2]),
            ["redistribute", _, ..] => redistribute(RedistributeOspf, line, t),
            ["maximum-paths", ..] => Node::new(MaximumPathsOspf, line),
            [first, ..] if IGNORED_OSPF.contains(first) => Node::new(Null, line),
            _ => return self.unrecognized(line),
        })
    }

    fn vrf_context(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        match b.words().as_slice() {
            ["ip", "route", ..] => self.or_unrecognized(b.line, ip_route(b.line, b.tokens(), 2)),
            _ => Ok(Node::new(NodeKind::Null, b.line)),
        }
    }

    fn standard_acl(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        match b.words().as_slice() {
            ["remark", ..] | ["statistics", ..] => Ok(Node::new(NodeKind::Null, b.line)),
            _ => self.or_unrecognized(b.line, standard_acl_tail(b.line, b.tokens(), 0)),
        }
    }

    fn extended_acl(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        match b.words().as_slice() {
            ["remark", ..] | ["statistics", ..] => Ok(Node::new(NodeKind::Null, b.line)),
            [_, "remark", ..] => Ok(Node::new(NodeKind::Null, b.line)),
            _ => self.or_unrecognized(b.line, extended_acl_tail(b.line, b.tokens(), 0)),
        }
    }

    fn route_map(&self, b: &Block<'_>) -> Result<Node, ParseError> {
        use NodeKind::*;
        let line = b.line;
        let t = b.tokens();
        let w = b.words();
        Ok(match w.as_slice() {
            ["match", "as-path", _, ..] => Node::new(MatchAsPathRm, line).with_all("names", &t[2..]),
            ["match", "community", _, ..] => Node::new(MatchCommunityRm, line).with_all(
                "names",
                &t[2..]
                    .iter()
                    .filter(|x| !x.is("exact-match"))
                    .cloned()
                    .collect::<Vec<_>>(),
            ),
            ["match", "ip", "address", "prefix-list", _, ..] => {
                Node::new(MatchIpPrefixListRm, line).with_all("names", &t[4..])
            }
            ["match", "ip", "address", _, ..] => {
                Node::new(MatchIpAccessListRm, line).with_all("names", &t[3..])
            }
            ["match", "tag", _, ..] => Node::new(MatchTagRm, line).with_all("tags", &t[2..]),
            ["match", "interface", _, ..] => {
                Node::new(MatchInterfaceRm, line).with_all("names", &t[2..])
            }
            ["match", "ipv6", ..] => Node::new(MatchIpv6Rm, line),
            ["set", "as-path", "prepend", _, ..] => {
                Node::new(SetAsPathPrependRm, line).with_all("ases", &t[3..])
            }
            ["set", "comm-list", _, "delete"] => Node::new(SetCommListDeleteRm, line).with("name", &t[2]),
            ["set", "community", "none"] => Node::new(SetCommunityNoneRm, line),
            ["set", "community", .., "additive"] => {
                Node::new(SetCommunityAdditiveRm, line).with_all("communities", &t[2..t.len() - 1])
            }
            ["set", "community", _, ..] => {
                Node::new(SetCommunityRm, line).with_all("communities", &t[2..])
            }
            ["set", "local-preference", _] => Node::new(SetLocalPreferenceRm, line).with("value", &t[2]),
            ["set", "metric", _] => Node::new(SetMetricRm, line).with("value", &t[2]),
            ["set", "metric-type", ..] => Node::new(SetMetricTypeRm, line),
            ["set", "ip", "next-hop", "peer-address"] => Node::new(SetNextHopPeerAddressRm, line),
            ["set", "ip", "next-hop", _, ..] => Node::new(SetNextHopRm, line).with_all("ips", &t[3..]),
            ["set", "origin", _, ..] => Node::new(SetOriginRm, line)
                .with("origin", &t[2])
                .with_opt("as", t.get(3)),
            ["set", "ipv6", ..] => Node::new(SetIpv6Rm, line),
            ["set", "weight" | "tag" | "dampening", ..] => Node::new(Null, line),
            ["description" | "continue" | "exit", ..] => Node::new(Null, line),
            _ => return self.unrecognized(line),
        })
    }
}

fn is_action(t: &Token) -> bool {
    t.is("permit") || t.is("deny")
}

/// Capture the key of a neighbor statement, named after the kind of key.
fn neighbor_key(node: Node, key: &Token) -> Node {
    match key.kind {
        TokenKind::Ip => node.with("ip", key),
        TokenKind::IpPrefix => node.with("prefix", key),
        TokenKind::Ipv6 => node.with("ip6", key),
        _ => node.with("peergroup", key),
    }
}

/// An address given either as prefix (`10.0.0.0/24`) or as address and mask, starting at `i`.
fn address(kind: NodeKind, line: &Line, t: &[Token], i: usize) -> Option<Node> {
    match (t.get(i).map(|x| x.kind), t.get(i + 1).map(|x| x.kind)) {
        (Some(TokenKind::IpPrefix), _) => Some(Node::new(kind, line).with("prefix", &t[i])),
        (Some(TokenKind::Ip), Some(TokenKind::Ip)) => Some(
            Node::new(kind, line)
                .with("address", &t[i])
                .with("mask", &t[i + 1]),
        ),
        _ => None,
    }
}

/// `network PREFIX`, `network IP mask MASK` or the classful `network IP`, each with an optional
/// `route-map NAME`.
fn bgp_network(line: &Line, t: &[Token]) -> Option<Node> {
    let first = t.get(1)?;
    let mut node = Node::new(NodeKind::NetworkBgp, line);
    let mut i = match first.kind {
        TokenKind::IpPrefix => {
            node = node.with("prefix", first);
            2
        }
        TokenKind::Ip if t.get(2).map_or(false, |x| x.is("mask")) => {
            node = node.with("address", first).with("mask", t.get(3)?);
            4
        }
        TokenKind::Ip => {
            node = node.with("address", first);
            2
        }
        _ => return None,
    };
    while i < t.len() {
        match t[i].text.as_str() {
            "route-map" => {
                node = node.with("map", t.get(i + 1)?);
                i += 2;
            }
            "backdoor" => i += 1,
            _ => return None,
        }
    }
    Some(node)
}

/// `redistribute PROTOCOL [PROCESS] [metric N] [metric-type N] [route-map NAME] [tag N] [subnets]`
fn redistribute(kind: NodeKind, line: &Line, t: &[Token]) -> Node {
    let mut node = Node::new(kind, line).with("protocol", &t[1]);
    let mut i = 2;
    if t.get(i).map_or(false, |x| x.kind == TokenKind::Dec) {
        node = node.with("procnum", &t[i]);
        i += 1;
    }
    while i < t.len() {
        let key = match t[i].text.as_str() {
            "metric" => "metric",
            "metric-type" => "metric_type",
            "route-map" => "map",
            "tag" => "tag",
            "subnets" => {
                node = node.with("subnets", &t[i]);
                i += 1;
                continue;
            }
            _ => {
                i += 1;
                continue;
            }
        };
        node = node.with_opt(key, t.get(i + 1));
        i += 2;
    }
    node
}

/// `ip route [vrf NAME] DEST (NEXTHOP | IFACE [NEXTHOP]) [DISTANCE] [tag N] [track N] [name X]
/// [permanent]`, with the tokens after `ip route` starting at `i`.
fn ip_route(line: &Line, t: &[Token], mut i: usize) -> Option<Node> {
    let mut node = Node::new(NodeKind::IpRouteStanza, line);
    if t.get(i)?.is("vrf") {
        node = node.with("vrf", t.get(i + 1)?);
        i += 2;
    }
    match t.get(i)?.kind {
        TokenKind::IpPrefix => {
            node = node.with("prefix", &t[i]);
            i += 1;
        }
        TokenKind::Ip => {
            let mask = t.get(i + 1).filter(|x| x.kind == TokenKind::Ip)?;
            node = node.with("address", &t[i]).with("mask", mask);
            i += 2;
        }
        _ => return None,
    }
    let next_hop = t.get(i)?;
    match next_hop.kind {
        TokenKind::Ip => {
            node = node.with("nexthop_ip", next_hop);
            i += 1;
        }
        TokenKind::Word => {
            node = node.with("nexthop_iface", next_hop);
            i += 1;
            if let Some(ip) = t.get(i).filter(|x| x.kind == TokenKind::Ip) {
                node = node.with("nexthop_ip", ip);
                i += 1;
            }
        }
        _ => return None,
    }
    while i < t.len() {
        let key = match t[i].text.as_str() {
            "tag" => "tag",
            "track" => "track",
            "name" => "name",
            "permanent" => {
                node = node.with("permanent", &t[i]);
                i += 1;
                continue;
            }
            _ if t[i].kind == TokenKind::Dec => {
                node = node.with("distance", &t[i]);
                i += 1;
                continue;
            }
            _ => return None,
        };
        node = node.with(key, t.get(i + 1)?);
        i += 2;
    }
    Some(node)
}

/// `ip prefix-list NAME [seq N] ACTION PREFIX [ge N] [le N] [eq N]`
fn prefix_list_tail(line: &Line, t: &[Token]) -> Option<Node> {
    let mut i = 3;
    if t.get(i)?.is("seq") {
        i += 2;
    }
    let action = t.get(i).filter(|x| is_action(x))?;
    let mut node = Node::new(NodeKind::IpPrefixListTail, line)
        .with("action", action)
        .with("prefix", t.get(i + 1)?);
    i += 2;
    while i < t.len() {
        let key = match t[i].text.as_str() {
            "ge" => "ge",
            "le" => "le",
            "eq" => "eq",
            _ => return None,
        };
        node = node.with(key, t.get(i + 1)?);
        i += 2;
    }
    Some(node)
}

/// Address specification of an access-list line: `any`, `host IP`, `IP WILDCARD`, `PREFIX` or a
/// bare `IP`. Returns the tokens and the index after them.
fn address_spec(t: &[Token], i: usize) -> Option<(&[Token], usize)> {
    let first = t.get(i)?;
    if first.is("any") {
        return Some((&t[i..i + 1], i + 1));
    }
    if first.is("host") {
        t.get(i + 1).filter(|x| x.kind == TokenKind::Ip)?;
        return Some((&t[i..i + 2], i + 2));
    }
    match first.kind {
        TokenKind::IpPrefix => Some((&t[i..i + 1], i + 1)),
        TokenKind::Ip if t.get(i + 1).map_or(false, |x| x.kind == TokenKind::Ip) => {
            Some((&t[i..i + 2], i + 2))
        }
        TokenKind::Ip => Some((&t[i..i + 1], i + 1)),
        _ => None,
    }
}

/// Port specification of an extended access-list line. Returns the operator, the operands and the
/// index after them.
fn port_spec(t: &[Token], i: usize) -> Option<(&Token, &[Token], usize)> {
    let op = t.get(i)?;
    let n = match op.text.as_str() {
        "eq" => t[i + 1..]
            .iter()
            .take_while(|x| decode::port(&x.text).is_ok())
            .count(),
        "gt" | "lt" | "neq" => 1,
        "range" => 2,
        _ => return None,
    };
    if n == 0 || i + 1 + n > t.len() {
        return None;
    }
    Some((op, &t[i + 1..i + 1 + n], i + 1 + n))
}

/// `[SEQ] ACTION ADDRESS [dscp X] [ecn N] [log]`, starting at `i`.
fn standard_acl_tail(line: &Line, t: &[Token], mut i: usize) -> Option<Node> {
    if t.get(i)?.kind == TokenKind::Dec {
        i += 1;
    }
    let action = t.get(i).filter(|x| is_action(x))?;
    let (addr, mut i) = address_spec(t, i + 1)?;
    let mut node = Node::new(NodeKind::StandardAccessListTail, line)
        .with("action", action)
        .with_all("addr", addr);
    while i < t.len() {
        match t[i].text.as_str() {
            "dscp" => {
                node = node.with("dscp", t.get(i + 1)?);
                i += 2;
            }
            "ecn" => {
                node = node.with("ecn", t.get(i + 1)?);
                i += 2;
            }
            "log" | "log-input" => i += 1,
            _ => return None,
        }
    }
    Some(node)
}

/// `[SEQ] ACTION PROTOCOL SRC [PORTS] DST [PORTS] [FEATURES...]`, starting at `i`.
fn extended_acl_tail(line: &Line, t: &[Token], mut i: usize) -> Option<Node> {
    if t.get(i)?.kind == TokenKind::Dec {
        i += 1;
    }
    let action = t.get(i).filter(|x| is_action(x))?;
    let mut node = Node::new(NodeKind::ExtendedAccessListTail, line)
        .with("action", action)
        .with("protocol", t.get(i + 1)?);
    let (src, mut i) = address_spec(t, i + 2)?;
    node = node.with_all("src", src);
    if let Some((op, ports, j)) = port_spec(t, i) {
        node = node.with("src_op", op).with_all("src_ports", ports);
        i = j;
    }
    let (dst, mut i) = address_spec(t, i)?;
    node = node.with_all("dst", dst);
    if let Some((op, ports, j)) = port_spec(t, i) {
        node = node.with("dst_op", op).with_all("dst_ports", ports);
        i = j;
    }
    Some(node.with_all("features", &t[i..]))
}

/// `ip community-list (standard|expanded) NAME ACTION ...` or the numbered form.
fn community_list(line: &Line, t: &[Token]) -> Option<Node> {
    let (expanded, name_idx) = match t.get(2)?.text.as_str() {
        "standard" => (false, 3),
        "expanded" => (true, 3),
        n => match n.parse::<u32>() {
            Ok(1..=99) => (false, 2),
            Ok(100..=500) => (true, 2),
            _ => return None,
        },
    };
    let name = t.get(name_idx)?;
    let action = t.get(name_idx + 1).filter(|x| is_action(x))?;
    Some(if expanded {
        Node::new(NodeKind::IpCommunityListExpandedStanza, line)
            .with("name", name)
            .child(
                Node::new(NodeKind::IpCommunityListExpandedTail, line)
                    .with("action", action)
                    .with_text("regex", line.rest_from(name_idx + 2), line.number),
            )
    } else {
        Node::new(NodeKind::IpCommunityListStandardStanza, line)
            .with("name", name)
            .child(
                Node::new(NodeKind::IpCommunityListStandardTail, line)
                    .with("action", action)
                    .with_all("communities", &t[name_idx + 2..]),
            )
    })
}

/// `ip as-path access-list NAME ACTION REGEX`
fn as_path_access_list(line: &Line, t: &[Token]) -> Option<Node> {
    let action = t.get(4).filter(|x| is_action(x))?;
    let regex = line.rest_from(5);
    let mut tail = Node::new(NodeKind::IpAsPathAccessListTail, line)
        .with("action", action)
        .with_text("regex", regex, line.number);
    match as_path_terms(regex) {
        Some((caret, ranges, asterisks)) => {
            if caret {
                tail = tail.with_text("caret", "^", line.number);
            }
            for range in ranges {
                tail = tail.with_text("ranges", range, line.number);
            }
            tail = tail.with_text("asterisks", &asterisks.to_string(), line.number);
        }
        None => tail = tail.with_text("unsupported", regex, line.number),
    }
    Some(
        Node::new(NodeKind::IpAsPathAccessListStanza, line)
            .with("name", &t[3])
            .child(tail),
    )
}

/// Split a simple AS-path regex (`^65000_.*$`) into its anchor, its AS terms and the number of
/// terms followed by `*`. Returns `None` for regexes with any other operator.
fn as_path_terms(regex: &str) -> Option<(bool, Vec<&str>, usize)> {
    let regex = regex.trim().trim_matches('"');
    let (caret, rest) = match regex.strip_prefix('^') {
        Some(rest) => (true, rest),
        None => (false, regex),
    };
    let rest = rest.strip_suffix('$').unwrap_or(rest);
    let mut ranges = Vec::new();
    let mut asterisks = 0;
    for term in rest.split('_').filter(|x| !x.is_empty()) {
        let base = match term.strip_suffix('*') {
            Some(base) => {
                asterisks += 1;
                base
            }
            None => term,
        };
        if base == "." || (!base.is_empty() && base.bytes().all(|c| c.is_ascii_digit())) {
            ranges.push(base);
        } else {
            return None;
        }
    }
    Some((caret, ranges, asterisks))
}

/// A neighbor setting, starting at token `i`.
fn neighbor_tail(line: &Line, t: &[Token], i: usize) -> Option<Node> {
    use NodeKind::*;
    let t = t.get(i..)?;
    let w: Vec<&str> = t.iter().map(|x| x.text.as_str()).collect();
    Some(match w.as_slice() {
        ["remote-as", _, ..] => Node::new(RemoteAsTail, line).with("as", &t[1]),
        ["activate"] => Node::new(ActivateTail, line),
        ["route-map", _, "in" | "out"] => Node::new(RouteMapTail, line)
            .with("name", &t[1])
            .with("direction", &t[2]),
        ["prefix-list", _, "in" | "out"] => Node::new(PrefixListTail, line)
            .with("name", &t[1])
            .with("direction", &t[2]),
        ["send-community", ..] => Node::new(SendCommunityTail, line),
        ["route-reflector-client"] => Node::new(RouteReflectorClientTail, line),
        ["remove-private-as", ..] => Node::new(RemovePrivateAsTail, line),
        ["next-hop-self", ..] => Node::new(NextHopSelfTail, line),
        ["update-source", _] => Node::new(UpdateSourceTail, line).with("interface", &t[1]),
        ["default-originate"] => Node::new(DefaultOriginateTail, line),
        ["default-originate", "route-map", _] => {
            Node::new(DefaultOriginateTail, line).with("map", &t[2])
        }
        ["description", ..] => {
            Node::new(DescriptionTail, line).with_text("text", line.rest_from(i + 1), line.number)
        }
        ["shutdown", ..] => Node::new(ShutdownTail, line),
        ["ebgp-multihop", ..] => Node::new(EbgpMultihopTail, line),
        ["allowas-in"] => Node::new(AllowasInTail, line),
        ["allowas-in", _] => Node::new(AllowasInTail, line).with("num", &t[1]),
        ["disable-peer-as-check"] => Node::new(DisablePeerAsCheckTail, line),
        ["distribute-list", ..] => Node::new(DistributeListTail, line),
        ["peer-group", _] => Node::new(PeerGroupAssignmentTail, line).with("name", &t[1]),
        ["inherit", "peer-session", _] => {
            Node::new(InheritPeerSessionTail, line).with("name", &t[2])
        }
        ["inherit", "peer-policy" | "peer", _, ..] => {
            Node::new(InheritPeerPolicyTail, line).with("name", &t[2])
        }
        ["use", "neighbor-group", _] => Node::new(UseNeighborGroupTail, line).with("name", &t[2]),
        ["cluster-id", _] => Node::new(ClusterIdTail, line).with("id", &t[1]),
        [first, ..] if IGNORED_TAIL.contains(first) => Node::new(Null, line),
        _ => return None,
    })
}
