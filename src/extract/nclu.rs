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

//! Extraction rules of the Cumulus NCLU grammar. Every command is a stanza with a single setting
//! child, so the stanza sets up the context and the child applies the setting.

use crate::{
    decode,
    lexer::TokenKind,
    parser::{Node, NodeKind},
    representation::*,
    types::{LineAction, RoutingProtocol, Vendor, MASTER_VRF_NAME},
};

use super::{ExtractionError, Extractor, PeerRef};

const F_L2VPN_EVPN: &str = "bgp l2vpn evpn";
const F_NET_DEL: &str = "net del";
const F_IPV6: &str = "ipv6 - other";

impl Extractor {
    pub(super) fn enter_nclu(&mut self, node: &Node) -> Result<(), ExtractionError> {
        use NodeKind::*;
        match node.kind {
            NcluHostname => self.config.hostname = Some(node.req("name")?.to_string()),
            NcluInterface => {
                let names = decode::expand_interface_glob(node.req("names")?)?;
                self.enter_interfaces(names);
            }
            NcluLoopback => self.enter_interfaces(vec![node.req("name")?.to_string()]),
            NcluVrf => {
                let name = node.req("name")?.to_string();
                self.config.vrfs.insert(name.clone());
                self.enter_interfaces(vec![name]);
            }
            NcluIfIpAddress => {
                let prefix = decode::prefix(node.req("prefix")?)?;
                self.each_interface(|i| match i.prefix {
                    Some(_) => i.secondary_prefixes.push(prefix),
                    None => i.prefix = Some(prefix),
                });
            }
            NcluIfAlias => {
                let alias = node.str("text").unwrap_or_default().trim().to_string();
                self.each_interface(|i| i.alias = Some(alias.clone()));
            }
            NcluIfVrf => {
                let vrf = node.req("name")?.to_string();
                self.each_interface(|i| i.vrf = vrf.clone());
                self.config.vrfs.insert(vrf);
            }
            NcluIfLinkSpeed => {
                // configured in Mbit/s
                let speed = decode::uint(node.req("speed")?)?;
                self.each_interface(|i| {
                    i.speed = Some(speed);
                    i.bandwidth = Some(speed as f64 * 1e6);
                });
            }
            NcluIfBridgeAccess => {
                let vlan = decode::uint(node.req("vlan")?)?;
                self.each_interface(|i| {
                    i.switchport = true;
                    i.switchport_mode = SwitchportMode::Access;
                    i.access_vlan = Some(vlan);
                });
            }
            NcluIfBridgeVids => {
                let vids = decode::subrange_list(node.req("vids")?)?;
                self.each_interface(|i| {
                    i.switchport = true;
                    i.switchport_mode = SwitchportMode::Trunk;
                    i.allowed_vlans.extend(vids.iter().copied());
                });
            }
            NcluVrfTable => {}

            NcluBgp => {
                let vrf = node.str("vrf").unwrap_or(MASTER_VRF_NAME).to_string();
                if vrf != MASTER_VRF_NAME {
                    self.config.vrfs.insert(vrf.clone());
                }
                self.config.bgp_process(&vrf);
                self.ctx.current_vrf = vrf.clone();
                self.ctx.push_peer(PeerRef::Master(vrf));
            }
            NcluBgpAutonomousSystem => {
                let as_number = decode::uint(node.req("as")?)?;
                self.config.bgp_process(&self.ctx.current_vrf).as_number = as_number;
            }
            NcluBgpRouterId => {
                let id = decode::ip(node.req("id")?)?;
                self.config.bgp_process(&self.ctx.current_vrf).router_id = Some(id);
            }
            NcluBgpIpv4Unicast => {}
            NcluBgpNeighbor => self.enter_nclu_neighbor(node)?,
            NcluNeighborRemoteAs => {
                let remote_as = match node.req("as")? {
                    "external" => RemoteAs::External,
                    "internal" => RemoteAs::Internal,
                    x => RemoteAs::Explicit(decode::uint(x)?),
                };
                self.current_peer()?.common.set_remote_as(remote_as);
            }
            NcluNeighborPeerGroup => {
                // without a name, the neighbor itself is the peer group being declared
                if let Some(name) = node.str("name") {
                    self.nclu_peer_group_assignment(name)?;
                }
            }
            NcluNeighborDescription => {
                let text = node.str("text").unwrap_or_default().trim().to_string();
                self.current_peer()?.common.description = Some(text);
            }
            NcluNeighborActivate => self.current_peer()?.common.active = true,
            NcluNeighborRouteReflectorClient => {
                self.current_peer()?.common.route_reflector_client = true
            }
            NcluBgpNetwork => {
                let prefix = decode::prefix(node.req("prefix")?)?;
                self.config
                    .bgp_process(&self.ctx.current_vrf)
                    .networks
                    .insert(prefix);
            }
            NcluBgpRedistribute => {
                let protocol = match node.req("protocol")? {
                    "connected" => RoutingProtocol::Connected,
                    "static" => RoutingProtocol::Static,
                    "ospf" => RoutingProtocol::Ospf,
                    p => {
                        return self
                            .red_flag(format!("unsupported redistribution protocol: {p}"), node)
                    }
                };
                let mut policy = BgpRedistributionPolicy::new(protocol);
                policy.map = node.str("map").map(String::from);
                self.config
                    .bgp_process(&self.ctx.current_vrf)
                    .redistribution_policies
                    .insert(protocol, policy);
            }
            NcluBgpL2vpnEvpn => self.todo(F_L2VPN_EVPN, node)?,

            NcluRoutingRoute => {
                let mut route = StaticRoute::new(decode::prefix(node.req("prefix")?)?);
                route.next_hop_ip = node.str("nexthop_ip").map(decode::ip).transpose()?;
                route.next_hop_interface = node.str("nexthop_iface").map(String::from);
                if let Some(vrf) = node.str("vrf") {
                    route.vrf = vrf.to_string();
                }
                self.config.static_routes.push(route);
            }
            NcluRouteMap => {
                let name = node.req("name")?.to_string();
                let action = decode::line_action(node.req("action")?)?;
                let number = decode::uint(node.req("num")?)?;
                let map = self
                    .config
                    .route_maps
                    .entry(name.clone())
                    .or_insert_with(|| RouteMap::new(name.as_str()));
                let clause = map
                    .clauses
                    .entry(number)
                    .or_insert_with(|| RouteMapClause::new(action, number));
                if clause.action != action {
                    let text = format!(
                        "route-map {name} {number}: action changed to {}",
                        if action == LineAction::Permit { "permit" } else { "deny" }
                    );
                    clause.action = action;
                    self.pedantic(text, node);
                }
                self.ctx.current_route_map = Some(name);
                self.ctx.current_route_map_clause = Some(number);
            }
            NcluRouteMapMatchInterface => {
                let iface = node.req("name")?.to_string();
                let name = self
                    .ctx
                    .current_route_map
                    .as_deref()
                    .ok_or(ExtractionError::MissingContext("route-map"))?;
                let number = self
                    .ctx
                    .current_route_map_clause
                    .ok_or(ExtractionError::MissingContext("route-map"))?;
                if let Some(clause) = self
                    .config
                    .route_maps
                    .get_mut(name)
                    .and_then(|m| m.clauses.get_mut(&number))
                {
                    clause.match_lines.push(RouteMapMatch::Interface(vec![iface]));
                }
            }

            NcluUnimplemented => {
                let feature = node.req("feature")?.to_string();
                self.todo(&feature, node)?;
            }
            NcluDel => self.todo(F_NET_DEL, node)?,
            _ => {}
        }
        Ok(())
    }

    pub(super) fn exit_nclu(&mut self, node: &Node) -> Result<(), ExtractionError> {
        use NodeKind::*;
        match node.kind {
            NcluInterface | NcluLoopback | NcluVrf => self.ctx.current_interfaces.clear(),
            NcluBgp => {
                self.ctx.pop_peer();
                self.ctx.current_vrf = MASTER_VRF_NAME.to_string();
            }
            NcluBgpNeighbor => {
                self.ctx.clear_peer_aliases();
                self.ctx.pop_peer();
            }
            NcluRouteMap => {
                self.ctx.current_route_map = None;
                self.ctx.current_route_map_clause = None;
            }
            _ => {}
        }
        Ok(())
    }

    /// Make `names` the current interfaces, creating them if necessary.
    fn enter_interfaces(&mut self, names: Vec<String>) {
        for name in names.iter() {
            if !self.config.interfaces.contains_key(name) {
                self.config.interfaces.insert(
                    name.clone(),
                    Interface::new(name.as_str(), Vendor::CumulusNclu),
                );
            }
        }
        self.ctx.current_interfaces = names;
    }

    /// Resolve the key of a neighbor command: an address, an unnumbered interface, or the name of
    /// a peer group. The peer group is created on first use. IPv6 neighbors only reach the scratch
    /// peer group.
    fn enter_nclu_neighbor(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let key = node.req("key")?;
        let kind = node.get("key").map(|t| t.kind);
        if kind == Some(TokenKind::Ipv6) {
            self.todo(F_IPV6, node)?;
            self.ctx.current_ipv6_peer_group = Some(key.to_string());
            self.ctx.push_peer(PeerRef::Ipv6);
            return Ok(());
        }
        let is_ip = kind == Some(TokenKind::Ip);
        let vrf = self.ctx.current_vrf.clone();
        let unnumbered = node.children.iter().any(|c| c.has("interface"));
        let proc = self.config.bgp_process(&vrf);
        let peer = if is_ip {
            let ip = decode::ip(key)?;
            proc.ip_peer_group(ip);
            self.ctx.current_ip_peer_group = Some(ip);
            PeerRef::Ip(vrf, ip)
        } else if unnumbered || proc.interface_peer_groups.contains_key(key) {
            proc.interface_peer_group(key);
            PeerRef::Interface(vrf, key.to_string())
        } else {
            proc.named_peer_group(key);
            self.ctx.current_named_peer_group = Some(key.to_string());
            PeerRef::Named(vrf, key.to_string())
        };
        self.ctx.push_peer(peer);
        Ok(())
    }

    /// Put the current neighbor into the peer group `name`, creating the group if necessary.
    fn nclu_peer_group_assignment(&mut self, name: &str) -> Result<(), ExtractionError> {
        let proc = self.config.bgp_process(&self.ctx.current_vrf);
        let group = proc.named_peer_group(name);
        if let Some(PeerRef::Ip(_, ip)) = self.ctx.current_peer_group {
            if !group.common.members.contains(&ip) {
                group.common.members.push(ip);
            }
        }
        self.current_peer()?.common.group_name = Some(name.to_string());
        Ok(())
    }
}
