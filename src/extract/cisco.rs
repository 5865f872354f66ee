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

//! Extraction rules of the Cisco grammar.

use ipnet::Ipv4Net;

use super::{process, ExtractionError, Extractor, PeerRef};
use crate::{
    decode,
    parser::{Node, NodeKind},
    representation::*,
    types::{LineAction, OspfMetricType, RoutingProtocol, SubRange, Vendor, MASTER_VRF_NAME},
};

const F_ALLOWAS_IN_NUMBER: &str =
    "bgp -  allowas-in with number - ignored and effectively infinite for now";
const F_BGP_AUTO_SUMMARY: &str = "bgp - auto-summary";
const F_BGP_EBGP_MULTIHOP: &str = "bgp - ebgp-multihop";
const F_BGP_INHERIT_OTHER: &str = "bgp - inherit other";
const F_BGP_INHERIT_PEER_SESSION_OTHER: &str = "bgp - inherit peer-session other";
const F_BGP_MAXIMUM_PEERS: &str = "bgp - maximum-peers";
const F_BGP_NEIGHBOR_DISTRIBUTE_LIST: &str = "bgp - neighbor distribute-list";
const F_BGP_NETWORK_ROUTE_MAP: &str = "bgp - network with route-map";
const F_BGP_NEXT_HOP_SELF: &str = "bgp - (no) next-hop-self";
const F_BGP_REDISTRIBUTE_AGGREGATE: &str = "bgp - redistribute aggregate";
const F_FRAGMENTS: &str = "acl fragments";
const F_INTERFACE_MULTIPOINT: &str = "interface multipoint";
const F_IP_DEFAULT_GATEWAY: &str = "ip default-gateway";
const F_IP_ROUTE_VRF: &str = "ip route vrf / vrf - ip route";
const F_IPV6: &str = "ipv6 - other";
const F_OSPF_AREA_NSSA: &str = "ospf - area nssa default-information-originate";
const F_OSPF_MAXIMUM_PATHS: &str = "ospf - maximum-paths";
const F_OSPF_REDISTRIBUTE_RIP: &str = "ospf - redistribute rip";
const F_OSPF_VRF: &str = "router ospf vrf";
const F_RIP: &str = "rip";
const F_ROUTE_MAP_SET_METRIC_TYPE: &str = "route-map - set metric-type";
const F_SWITCHING_MODE: &str = "switching-mode";
const F_TTL: &str = "acl ttl eq number";

/// Address families whose statements are not represented.
const IGNORED_ADDRESS_FAMILIES: &[&str] = &["vpnv4", "vpnv6", "ipv6", "l2vpn"];

/// Default sequence number of a route-map clause.
const DEFAULT_ROUTE_MAP_CLAUSE: u32 = 10;

impl Extractor {
    pub(super) fn enter_cisco(&mut self, node: &Node) -> Result<(), ExtractionError> {
        use NodeKind::*;
        match node.kind {
            Hostname => self.config.hostname = Some(node.req("name")?.to_string()),

            // interfaces
            InterfaceStanza => self.enter_interface(node)?,
            DescriptionIf => {
                let text = node.str("text").unwrap_or_default().trim().to_string();
                self.each_interface(|i| i.description = Some(text.clone()));
            }
            IpAddressIf => {
                let prefix = node_prefix(node)?;
                self.each_interface(|i| i.prefix = Some(prefix));
            }
            IpAddressSecondaryIf => {
                let prefix = node_prefix(node)?;
                self.each_interface(|i| i.secondary_prefixes.push(prefix));
            }
            ShutdownIf => {
                if !node.has("no") {
                    self.each_interface(|i| i.active = false);
                }
            }
            BandwidthIf => {
                // configured in kbit/s
                let bandwidth = num(node, "value")? as f64 * 1000.0;
                self.each_interface(|i| i.bandwidth = Some(bandwidth));
            }
            MtuIf => {
                let mtu = num(node, "value")?;
                self.each_interface(|i| i.mtu = mtu);
            }
            VrfForwardingIf | VrfMemberIf => {
                let vrf = node.req("name")?.to_string();
                // IOS drops the address when moving the interface into a VRF
                let clear = node.kind == VrfForwardingIf;
                self.each_interface(|i| {
                    i.vrf = vrf.clone();
                    if clear {
                        i.prefix = None;
                    }
                });
                self.config.vrfs.insert(vrf);
            }
            IpAccessGroupIf => {
                let name = node.req("name")?.to_string();
                let inbound = node.req("direction")? == "in";
                self.each_interface(|i| {
                    if inbound {
                        i.incoming_filter = Some(name.clone());
                    } else {
                        i.outgoing_filter = Some(name.clone());
                    }
                });
            }
            IpPolicyIf => {
                let name = node.req("name")?.to_string();
                self.each_interface(|i| i.routing_policy = Some(name.clone()));
            }
            IpOspfCostIf => {
                let cost = num(node, "cost")?;
                self.each_interface(|i| i.ospf_cost = Some(cost));
            }
            IpOspfDeadIntervalIf => {
                let seconds = num(node, "seconds")?;
                self.each_interface(|i| {
                    i.ospf_dead_interval = Some(seconds);
                    i.ospf_hello_multiplier = None;
                });
            }
            IpOspfDeadIntervalMinimalIf => {
                let multiplier = num(node, "multiplier")?;
                self.each_interface(|i| {
                    i.ospf_dead_interval = Some(1);
                    i.ospf_hello_multiplier = Some(multiplier);
                });
            }
            SwitchportIf => {
                let enabled = !node.has("no");
                self.each_interface(|i| {
                    i.switchport = enabled;
                    if !enabled {
                        i.switchport_mode = SwitchportMode::None;
                    }
                });
            }
            SwitchportAccessIf => {
                let vlan = opt_num(node, "vlan")?;
                self.each_interface(|i| {
                    i.switchport_mode = SwitchportMode::Access;
                    match vlan {
                        Some(vlan) => i.access_vlan = Some(vlan),
                        None => i.switchport_access_dynamic = true,
                    }
                });
            }
            SwitchportModeIf => {
                let words = node.all_str("mode");
                match SwitchportMode::from_words(&words) {
                    Some(mode) => self.each_interface(|i| i.switchport_mode = mode),
                    None => {
                        self.red_flag(format!("unsupported switchport mode: {}", words.join(" ")), node)?
                    }
                }
            }
            SwitchportTrunkAllowedIf => {
                let ranges = decode::subrange_list(node.req("ranges")?)?;
                self.each_interface(|i| i.allowed_vlans.extend(ranges.iter().copied()));
            }
            SwitchportTrunkEncapsulationIf => {
                let word = node.req("encapsulation")?;
                match SwitchportEncapsulation::from_word(word) {
                    Some(e) => self.each_interface(|i| i.trunk_encapsulation = Some(e)),
                    None => self.red_flag(format!("unsupported trunk encapsulation: {word}"), node)?,
                }
            }
            SwitchportTrunkNativeIf => {
                let vlan = num(node, "vlan")?;
                self.each_interface(|i| i.native_vlan = Some(vlan));
            }
            Ipv6If => self.todo(F_IPV6, node)?,

            // router bgp
            RouterBgpStanza => {
                let as_number = opt_num(node, "procnum")?.unwrap_or(0);
                let vrf = self.ctx.current_vrf.clone();
                self.config
                    .bgp_processes
                    .insert(vrf.clone(), BgpProcess::new(as_number));
                self.ctx.reset_dummy();
                self.ctx.push_peer(PeerRef::Master(vrf));
            }
            RouterIdBgp => {
                let id = decode::ip(node.req("id")?)?;
                if let Some(proc) = self.bgp_process()? {
                    proc.router_id = Some(id);
                }
            }
            ClusterIdBgp => {
                let id = cluster_id(node.req("id")?)?;
                if let Some(proc) = self.bgp_process()? {
                    proc.cluster_id = Some(id);
                }
            }
            AlwaysCompareMedBgp => {
                if let Some(proc) = self.bgp_process()? {
                    proc.always_compare_med = true;
                }
            }
            BgpListenRange => self.bgp_listen_range(node)?,
            AutoSummaryBgp => self.todo(F_BGP_AUTO_SUMMARY, node)?,
            NetworkBgp => {
                if node.has("map") {
                    self.todo(F_BGP_NETWORK_ROUTE_MAP, node)?;
                } else {
                    let prefix = match (node.str("prefix"), node.str("mask")) {
                        (Some(p), _) => decode::prefix(p)?,
                        (None, Some(mask)) => decode::prefix_from_mask(node.req("address")?, mask)?,
                        (None, None) => decode::classful_prefix(node.req("address")?)?,
                    };
                    if let Some(proc) = self.bgp_process()? {
                        proc.networks.insert(prefix);
                    }
                }
            }
            AggregateAddressBgp => self.aggregate_address(node)?,
            RedistributeBgp => self.bgp_redistribute(node)?,
            NoRedistributeConnectedBgp => {
                if self.process_level_statement()? {
                    self.vrf_process()?
                        .redistribution_policies
                        .shift_remove(&RoutingProtocol::Connected);
                }
            }
            MaximumPeersBgp => self.todo(F_BGP_MAXIMUM_PEERS, node)?,
            PeerGroupCreation => {
                let name = node.req("name")?;
                if !self.ctx.in_dummy() {
                    self.vrf_process()?.named_peer_group(name);
                }
            }
            NeighborStanza => self.enter_neighbor(node)?,
            NexusNeighbor => self.enter_nexus_neighbor(node)?,
            NoNeighborActivate => self.no_neighbor_activate(node)?,
            NoNeighborShutdown => self.no_neighbor_shutdown(node)?,
            NoShutdownBgp => {
                let pg = self.current_peer()?;
                pg.common.shutdown = false;
                pg.common.active = true;
            }
            AddressFamily => self.enter_address_family(node)?,
            TemplatePeer | TemplatePeerPolicy | NeighborGroup => {
                let name = node.req("name")?.to_string();
                let vrf = self.ctx.current_vrf.clone();
                self.vrf_process()?.named_peer_group(&name);
                self.ctx.current_named_peer_group = Some(name.clone());
                self.ctx.push_peer(PeerRef::Named(vrf, name));
            }
            TemplatePeerSession => {
                let name = node.req("name")?.to_string();
                let vrf = self.ctx.current_vrf.clone();
                self.vrf_process()?.peer_session(&name);
                self.ctx.current_peer_session = Some(name.clone());
                self.ctx.push_peer(PeerRef::PeerSession(vrf, name));
            }
            NexusVrf => {
                let vrf = node.req("name")?.to_string();
                let as_number = self
                    .config
                    .master_bgp_process()
                    .map(|p| p.as_number)
                    .unwrap_or(0);
                self.config
                    .bgp_processes
                    .insert(vrf.clone(), BgpProcess::new(as_number));
                self.config.vrfs.insert(vrf.clone());
                self.ctx.current_vrf = vrf.clone();
                self.ctx.in_nexus_neighbor = false;
                self.ctx.nexus_neighbor_address_families.clear();
                self.ctx.push_peer(PeerRef::Master(vrf));
            }

            // neighbor tails
            RemoteAsTail => {
                if self.ctx.in_master() {
                    return Err(ExtractionError::RemoteAsWithoutPeer);
                }
                let remote_as = num(node, "as")?;
                self.current_peer()?
                    .common
                    .set_remote_as(RemoteAs::Explicit(remote_as));
            }
            ActivateTail => {
                if self.ctx.current_peer_group.is_none() {
                    return Ok(());
                }
                if self.ctx.in_master() {
                    return Err(ExtractionError::NoPeerToActivate);
                }
                self.current_peer()?.common.active = true;
            }
            RouteMapTail => {
                let name = node.req("name")?.to_string();
                let inbound = node.req("direction")? == "in";
                self.config.referenced_route_maps.insert(name.clone());
                self.current_peer()?.common.set_route_map(name, inbound);
            }
            PrefixListTail => {
                if self.ctx.current_ipv6_peer_group.is_some() {
                    self.todo(F_IPV6, node)?;
                } else {
                    let name = node.req("name")?.to_string();
                    let inbound = node.req("direction")? == "in";
                    self.current_peer()?.common.set_prefix_list(name, inbound);
                }
            }
            SendCommunityTail => self.current_peer()?.common.send_community = true,
            RouteReflectorClientTail => self.current_peer()?.common.route_reflector_client = true,
            RemovePrivateAsTail => self.current_peer()?.common.remove_private_as = true,
            NextHopSelfTail => self.todo(F_BGP_NEXT_HOP_SELF, node)?,
            UpdateSourceTail => {
                if self.ctx.current_ipv6_peer_group.is_some() {
                    self.todo(F_IPV6, node)?;
                } else {
                    let source = decode::canonical_interface_name(node.req("interface")?)?;
                    self.current_peer()?.common.update_source = Some(source);
                }
            }
            DefaultOriginateTail => {
                if self.ctx.current_ipv6_peer_group.is_some() {
                    self.todo(F_IPV6, node)?;
                } else {
                    let map = node.str("map").map(String::from);
                    let pg = self.current_peer()?;
                    pg.common.default_originate = true;
                    pg.common.default_originate_map = map;
                }
            }
            DescriptionTail => {
                let text = node.str("text").unwrap_or_default().trim().to_string();
                self.current_peer()?.common.description = Some(text);
            }
            ShutdownTail => self.current_peer()?.common.shutdown = true,
            EbgpMultihopTail => self.todo(F_BGP_EBGP_MULTIHOP, node)?,
            AllowasInTail => {
                self.current_peer()?.common.allow_as_in = true;
                if node.has("num") {
                    self.todo(F_ALLOWAS_IN_NUMBER, node)?;
                }
            }
            DisablePeerAsCheckTail => self.current_peer()?.common.disable_peer_as_check = true,
            DistributeListTail => self.todo(F_BGP_NEIGHBOR_DISTRIBUTE_LIST, node)?,
            PeerGroupAssignmentTail => self.peer_group_assignment(node)?,
            InheritPeerSessionTail => {
                let name = node.req("name")?.to_string();
                match self.ctx.current_peer_group {
                    Some(PeerRef::Ip(..) | PeerRef::Named(..)) => {
                        self.current_peer()?.common.peer_session = Some(name)
                    }
                    Some(PeerRef::Master(_)) => {
                        return Err(ExtractionError::InvalidInheritanceContext)
                    }
                    _ => self.todo(F_BGP_INHERIT_PEER_SESSION_OTHER, node)?,
                }
            }
            InheritPeerPolicyTail => {
                let name = node.req("name")?.to_string();
                match self.ctx.current_peer_group {
                    Some(PeerRef::Ip(..) | PeerRef::Named(..)) => {
                        self.current_peer()?.common.group_name = Some(name)
                    }
                    Some(PeerRef::Master(_)) => {
                        return Err(ExtractionError::InvalidInheritanceContext)
                    }
                    _ => self.todo(F_BGP_INHERIT_OTHER, node)?,
                }
            }
            UseNeighborGroupTail => {
                let name = node.req("name")?.to_string();
                match self.ctx.current_peer_group {
                    Some(PeerRef::Ip(..)) => self.current_peer()?.common.group_name = Some(name),
                    Some(PeerRef::Ipv6) => self.todo(F_IPV6, node)?,
                    _ => return Err(ExtractionError::InvalidInheritanceContext),
                }
            }
            ClusterIdTail => {
                let id = cluster_id(node.req("id")?)?;
                self.current_peer()?.common.cluster_id = Some(id);
            }

            // router ospf
            RouterOspfStanza => {
                let id = num(node, "procnum")?;
                self.ctx.current_ospf_vrf = node.has("vrf");
                if self.ctx.current_ospf_vrf {
                    self.todo(F_OSPF_VRF, node)?;
                }
                self.ctx.current_ospf_process = Some(OspfProcess::new(id));
            }
            RouterIdOspf => {
                let id = decode::ip(node.req("id")?)?;
                self.ospf()?.router_id = Some(id);
            }
            NetworkOspf => {
                let (ip, wildcard) = match node.str("prefix") {
                    Some(p) => {
                        let p = decode::prefix(p)?;
                        (p.addr(), decode::wildcard_of_length(p.prefix_len()))
                    }
                    None => (
                        decode::ip(node.req("address")?)?,
                        decode::ip_to_u32(decode::ip(node.req("wildcard")?)?),
                    ),
                };
                let area = area(node.req("area")?)?;
                self.ospf()?
                    .wildcard_networks
                    .push(OspfWildcardNetwork { ip, wildcard, area });
            }
            AreaNssaOspf => {
                let area = area(node.req("area")?)?;
                if node.has("default_information_originate") {
                    self.todo(F_OSPF_AREA_NSSA, node)?;
                }
                let no_summary = node.has("no_summary");
                self.ospf()?.nssas.insert(area, no_summary);
            }
            DefaultInformationOspf => {
                let metric = opt_num(node, "metric")?;
                let metric_type = opt_num(node, "metric_type")?
                    .map(|x| metric_type(node, x))
                    .transpose()?;
                let map = node.str("map").map(String::from);
                let always = node.has("always");
                let proc = self.ospf()?;
                proc.default_information_originate = true;
                proc.default_information_originate_always = always;
                proc.default_information_metric = metric.or(proc.default_information_metric);
                proc.default_information_metric_type =
                    metric_type.or(proc.default_information_metric_type);
                proc.default_information_originate_map =
                    map.or(proc.default_information_originate_map.take());
            }
            PassiveInterfaceDefaultOspf => {
                let passive = !node.has("no");
                self.ospf()?.passive_interface_default = passive;
            }
            PassiveInterfaceOspf => {
                let name = node.req("interface")?.to_string();
                let passive = !node.has("no");
                let proc = self.ospf()?;
                if passive {
                    proc.passive_interfaces.insert(name);
                } else {
                    proc.non_passive_interfaces.insert(name);
                }
            }
            RedistributeOspf => self.ospf_redistribute(node)?,
            MaximumPathsOspf => self.todo(F_OSPF_MAXIMUM_PATHS, node)?,

            // other top-level statements
            RouterRipStanza => self.todo(F_RIP, node)?,
            VrfContextStanza => {
                let vrf = node.req("name")?.to_string();
                self.config.vrfs.insert(vrf.clone());
                self.ctx.current_vrf = vrf;
            }
            IpRouteStanza => self.ip_route(node)?,
            IpDefaultGateway => self.todo(F_IP_DEFAULT_GATEWAY, node)?,
            SwitchingMode => self.todo(F_SWITCHING_MODE, node)?,

            // filter lists
            IpPrefixListStanza => {
                if node.has("ipv6") {
                    self.ctx.current_prefix_list = None;
                    self.todo(F_IPV6, node)?;
                } else {
                    let name = node.req("name")?.to_string();
                    self.config
                        .prefix_lists
                        .entry(name.clone())
                        .or_insert_with(|| PrefixList::new(name.as_str()));
                    self.ctx.current_prefix_list = Some(name);
                }
            }
            IpPrefixListTail => self.prefix_list_line(node)?,
            NoIpPrefixList => {
                self.config.prefix_lists.shift_remove(node.req("name")?);
            }
            StandardAccessListStanza => {
                let name = node.req("name")?.to_string();
                self.config
                    .standard_acls
                    .entry(name.clone())
                    .or_insert_with(|| StandardAccessList::new(name.as_str()));
                self.ctx.current_standard_acl = Some(name);
            }
            StandardAccessListTail => self.standard_acl_line(node)?,
            ExtendedAccessListStanza => {
                if node.has("ipv6") {
                    self.ctx.current_extended_acl = None;
                    self.todo(F_IPV6, node)?;
                } else {
                    let name = node.req("name")?.to_string();
                    self.config
                        .extended_acls
                        .entry(name.clone())
                        .or_insert_with(|| ExtendedAccessList::new(name.as_str()));
                    self.ctx.current_extended_acl = Some(name);
                }
            }
            ExtendedAccessListTail => self.extended_acl_line(node)?,
            IpCommunityListStandardStanza => {
                let name = node.req("name")?.to_string();
                self.config
                    .standard_community_lists
                    .entry(name.clone())
                    .or_insert_with(|| StandardCommunityList::new(name.as_str()));
                self.ctx.current_standard_community_list = Some(name);
            }
            IpCommunityListStandardTail => {
                let action = decode::line_action(node.req("action")?)?;
                let communities = node
                    .all_str("communities")
                    .into_iter()
                    .map(decode::community)
                    .collect::<Result<Vec<_>, _>>()?;
                let name = current(&self.ctx.current_standard_community_list, "community-list")?;
                if let Some(list) = self.config.standard_community_lists.get_mut(name) {
                    list.lines.push(StandardCommunityListLine {
                        action,
                        communities,
                    });
                }
            }
            IpCommunityListExpandedStanza => {
                let name = node.req("name")?.to_string();
                self.config
                    .expanded_community_lists
                    .entry(name.clone())
                    .or_insert_with(|| ExpandedCommunityList::new(name.as_str()));
                self.ctx.current_expanded_community_list = Some(name);
            }
            IpCommunityListExpandedTail => {
                let action = decode::line_action(node.req("action")?)?;
                let regex = node.str("regex").unwrap_or_default().trim().to_string();
                let name = current(&self.ctx.current_expanded_community_list, "community-list")?;
                if let Some(list) = self.config.expanded_community_lists.get_mut(name) {
                    list.lines.push(ExpandedCommunityListLine { action, regex });
                }
            }
            IpAsPathAccessListStanza => {
                let name = node.req("name")?.to_string();
                self.config
                    .as_path_access_lists
                    .entry(name.clone())
                    .or_insert_with(|| IpAsPathAccessList::new(name.as_str()));
                self.ctx.current_as_path_acl = Some(name);
            }
            IpAsPathAccessListTail => self.as_path_line(node)?,

            // route-maps
            RouteMapStanza => self.enter_route_map(node)?,
            NoRouteMap => {
                self.config.route_maps.shift_remove(node.req("name")?);
            }
            MatchAsPathRm => {
                let names = names(node, "names");
                self.clause()?.match_lines.push(RouteMapMatch::AsPath(names));
            }
            MatchCommunityRm => {
                let names = names(node, "names");
                self.clause()?.match_lines.push(RouteMapMatch::Community(names));
            }
            MatchIpAccessListRm => {
                let names = names(node, "names");
                self.clause()?
                    .match_lines
                    .push(RouteMapMatch::IpAccessList(names));
            }
            MatchIpPrefixListRm => {
                let names = names(node, "names");
                self.clause()?
                    .match_lines
                    .push(RouteMapMatch::IpPrefixList(names));
            }
            MatchTagRm => {
                let tags = nums(node, "tags")?;
                self.clause()?.match_lines.push(RouteMapMatch::Tag(tags));
            }
            MatchInterfaceRm => {
                let names = names(node, "names");
                self.clause()?.match_lines.push(RouteMapMatch::Interface(names));
            }
            MatchIpv6Rm | SetIpv6Rm => self.route_map()?.ipv6 = true,
            SetAsPathPrependRm => {
                let ases = nums(node, "ases")?;
                self.clause()?
                    .set_lines
                    .push(RouteMapSet::AsPathPrepend(ases));
            }
            SetCommListDeleteRm => {
                let name = node.req("name")?.to_string();
                self.clause()?
                    .set_lines
                    .push(RouteMapSet::DeleteCommunity(name));
            }
            SetCommunityRm | SetCommunityAdditiveRm => {
                let communities = node
                    .all_str("communities")
                    .into_iter()
                    .map(decode::community)
                    .collect::<Result<Vec<_>, _>>()?;
                let line = if node.kind == SetCommunityRm {
                    RouteMapSet::Community(communities)
                } else {
                    RouteMapSet::AdditiveCommunity(communities)
                };
                self.clause()?.set_lines.push(line);
            }
            SetCommunityNoneRm => self.clause()?.set_lines.push(RouteMapSet::CommunityNone),
            SetLocalPreferenceRm => {
                let value = num(node, "value")?;
                self.clause()?
                    .set_lines
                    .push(RouteMapSet::LocalPreference(value));
            }
            SetMetricRm => {
                let value = num(node, "value")?;
                self.clause()?.set_lines.push(RouteMapSet::Metric(value));
            }
            SetMetricTypeRm => self.todo(F_ROUTE_MAP_SET_METRIC_TYPE, node)?,
            SetNextHopRm => {
                let ips = node
                    .all_str("ips")
                    .into_iter()
                    .map(decode::ip)
                    .collect::<Result<Vec<_>, _>>()?;
                self.clause()?.set_lines.push(RouteMapSet::NextHop(ips));
            }
            SetNextHopPeerAddressRm => {
                self.clause()?
                    .set_lines
                    .push(RouteMapSet::NextHopPeerAddress)
            }
            SetOriginRm => {
                let word = node.req("origin")?;
                match OriginType::from_word(word) {
                    Some(origin) => {
                        let remote_as = opt_num(node, "as")?;
                        self.clause()?
                            .set_lines
                            .push(RouteMapSet::Origin(origin, remote_as));
                    }
                    None => self.red_flag(format!("unsupported origin type: {word}"), node)?,
                }
            }

            _ => {}
        }
        Ok(())
    }

    pub(super) fn exit_cisco(&mut self, node: &Node) -> Result<(), ExtractionError> {
        use NodeKind::*;
        match node.kind {
            InterfaceStanza => self.ctx.current_interfaces.clear(),
            RouterBgpStanza => self.ctx.pop_peer(),
            NeighborStanza | TemplatePeer | TemplatePeerPolicy | TemplatePeerSession
            | NeighborGroup => {
                self.ctx.clear_peer_aliases();
                self.ctx.pop_peer();
            }
            NexusNeighbor => {
                self.ctx.clear_peer_aliases();
                self.ctx.in_nexus_neighbor = false;
                self.ctx.nexus_neighbor_address_families.clear();
                self.ctx.pop_peer();
            }
            AddressFamily => {
                self.ctx.pop_peer();
                self.ctx.pre_address_family_peer_group = None;
            }
            NexusVrf => {
                self.ctx.current_vrf = MASTER_VRF_NAME.to_string();
                self.ctx.pop_peer();
            }
            RouterOspfStanza => {
                let mut proc = self
                    .ctx
                    .current_ospf_process
                    .take()
                    .ok_or(ExtractionError::MissingContext("router ospf"))?;
                proc.compute_networks(self.config.interfaces.values());
                log::trace!(
                    "ospf process {}: {} networks",
                    proc.process_id,
                    proc.networks.len()
                );
                if !std::mem::take(&mut self.ctx.current_ospf_vrf) {
                    self.config.ospf_process = Some(proc);
                }
            }
            VrfContextStanza => self.ctx.current_vrf = MASTER_VRF_NAME.to_string(),
            IpPrefixListStanza => self.ctx.current_prefix_list = None,
            StandardAccessListStanza => self.ctx.current_standard_acl = None,
            ExtendedAccessListStanza => self.ctx.current_extended_acl = None,
            IpCommunityListStandardStanza => self.ctx.current_standard_community_list = None,
            IpCommunityListExpandedStanza => self.ctx.current_expanded_community_list = None,
            IpAsPathAccessListStanza => self.ctx.current_as_path_acl = None,
            RouteMapStanza => {
                self.ctx.current_route_map = None;
                self.ctx.current_route_map_clause = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn enter_interface(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let names = decode::expand_interface_range(node.req("name")?)?;
        for name in names.iter() {
            match self.config.interfaces.get_mut(name) {
                Some(iface) => {
                    // re-entering resets the defaults derived from the name
                    let fresh = Interface::new(name.as_str(), Vendor::Cisco);
                    iface.bandwidth = fresh.bandwidth;
                    iface.vrf = fresh.vrf;
                    iface.mtu = fresh.mtu;
                    self.pedantic(format!("Interface: '{name}' altered more than once"), node);
                }
                None => {
                    self.config
                        .interfaces
                        .insert(name.clone(), Interface::new(name.as_str(), Vendor::Cisco));
                }
            }
        }
        self.ctx.current_interfaces = names;
        if node.has("multipoint") {
            self.todo(F_INTERFACE_MULTIPOINT, node)?;
        }
        Ok(())
    }

    /// The BGP process of the current VRF, or `None` while inside an ignored address family.
    fn bgp_process(&mut self) -> Result<Option<&mut BgpProcess>, ExtractionError> {
        if self.ctx.in_dummy() {
            return Ok(None);
        }
        self.vrf_process().map(Some)
    }

    /// The BGP process of the current VRF.
    fn vrf_process(&mut self) -> Result<&mut BgpProcess, ExtractionError> {
        process(&mut self.config, &self.ctx.current_vrf)
    }

    /// Check whether a process-wide statement (`redistribute`, `aggregate-address`) applies.
    /// Inside a neighbor it is an error, inside any other container it is ignored.
    fn process_level_statement(&self) -> Result<bool, ExtractionError> {
        match self.ctx.current_peer_group {
            Some(PeerRef::Master(_)) => Ok(true),
            Some(PeerRef::Ip(..) | PeerRef::Named(..)) => {
                Err(ExtractionError::PerNeighborRedistribution)
            }
            _ => Ok(false),
        }
    }

    fn bgp_listen_range(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let text = node.req("prefix")?;
        if text.contains(':') {
            return self.todo(F_IPV6, node);
        }
        let prefix = decode::prefix(text)?;
        let name = node.req("name")?;
        let remote_as = opt_num(node, "as")?;
        let proc = self.vrf_process()?;
        let dynamic = proc.dynamic_peer_group(prefix);
        dynamic.common.group_name = Some(name.to_string());
        if let Some(remote_as) = remote_as {
            dynamic.common.set_remote_as(RemoteAs::Explicit(remote_as));
        }
        proc.named_peer_group(name).common.listen_prefixes.push(prefix);
        Ok(())
    }

    fn aggregate_address(&mut self, node: &Node) -> Result<(), ExtractionError> {
        match self.ctx.current_peer_group {
            Some(PeerRef::Master(_)) => {}
            Some(PeerRef::Ip(..) | PeerRef::Named(..)) => {
                return Err(ExtractionError::MissingContext(
                    "aggregate-address inside a neighbor",
                ))
            }
            _ => return Ok(()),
        }
        let prefix = node_prefix(node)?;
        let aggregate = BgpAggregateNetwork {
            prefix,
            as_set: node.has("as_set"),
            summary_only: node.has("summary_only"),
            attribute_map: node.str("attribute_map").map(String::from),
        };
        self.vrf_process()?
            .aggregate_networks
            .insert(prefix, aggregate);
        Ok(())
    }

    fn bgp_redistribute(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let protocol = match node.req("protocol")? {
            "connected" => RoutingProtocol::Connected,
            "static" => RoutingProtocol::Static,
            "ospf" => RoutingProtocol::Ospf,
            "aggregate" => return self.todo(F_BGP_REDISTRIBUTE_AGGREGATE, node),
            "rip" => return self.todo(F_RIP, node),
            p => return self.red_flag(format!("unsupported redistribution protocol: {p}"), node),
        };
        if !self.process_level_statement()? {
            return Ok(());
        }
        let mut policy = BgpRedistributionPolicy::new(protocol);
        policy.metric = opt_num(node, "metric")?;
        policy.map = node.str("map").map(String::from);
        if protocol == RoutingProtocol::Ospf {
            policy.ospf_process = Some(num(node, "procnum")?);
        }
        self.vrf_process()?
            .redistribution_policies
            .insert(protocol, policy);
        Ok(())
    }

    fn enter_neighbor(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if self.ctx.in_dummy() {
            self.ctx.push_peer(PeerRef::Dummy);
            return Ok(());
        }
        let create = node.children.iter().any(|c| {
            matches!(
                c.kind,
                NodeKind::RemoteAsTail
                    | NodeKind::InheritPeerSessionTail
                    | NodeKind::PeerGroupAssignmentTail
            )
        });
        let vrf = self.ctx.current_vrf.clone();
        if let Some(ip) = node.str("ip") {
            let ip = decode::ip(ip)?;
            let proc = self.vrf_process()?;
            if proc.ip_peer_groups.contains_key(&ip) || create {
                proc.ip_peer_group(ip);
                self.ctx.current_ip_peer_group = Some(ip);
                self.ctx.push_peer(PeerRef::Ip(vrf, ip));
            } else {
                self.red_flag(format!("reference to undeclared peer group: '{ip}'"), node)?;
                self.ctx.push_peer(PeerRef::Dummy);
            }
        } else if let Some(ip6) = node.str("ip6") {
            self.todo(F_IPV6, node)?;
            self.ctx.current_ipv6_peer_group = Some(ip6.to_string());
            self.ctx.push_peer(PeerRef::Ipv6);
        } else if let Some(prefix) = node.str("prefix") {
            let prefix = decode::prefix(prefix)?;
            self.vrf_process()?.dynamic_peer_group(prefix);
            self.ctx.current_dynamic_peer_group = Some(prefix);
            self.ctx.push_peer(PeerRef::Dynamic(vrf, prefix));
        } else {
            let name = node.req("peergroup")?.to_string();
            let proc = self.vrf_process()?;
            if proc.named_peer_groups.contains_key(&name) || create {
                proc.named_peer_group(&name);
                self.ctx.current_named_peer_group = Some(name.clone());
                self.ctx.push_peer(PeerRef::Named(vrf, name));
            } else {
                self.red_flag(format!("reference to undeclared peer group: '{name}'"), node)?;
                self.ctx.push_peer(PeerRef::Dummy);
            }
        }
        Ok(())
    }

    fn enter_nexus_neighbor(&mut self, node: &Node) -> Result<(), ExtractionError> {
        self.ctx.nexus_neighbor_address_families.clear();
        self.ctx.in_nexus_neighbor = true;
        if self.ctx.in_dummy() {
            self.ctx.push_peer(PeerRef::Dummy);
            return Ok(());
        }
        let vrf = self.ctx.current_vrf.clone();
        let peer = if let Some(ip6) = node.str("ip6") {
            self.todo(F_IPV6, node)?;
            self.ctx.current_ipv6_peer_group = Some(ip6.to_string());
            PeerRef::Ipv6
        } else if let Some(ip) = node.str("ip") {
            let ip = decode::ip(ip)?;
            let proc = self.vrf_process()?;
            let existed = proc.ip_peer_groups.contains_key(&ip);
            proc.ip_peer_group(ip);
            if existed {
                self.red_flag(
                    format!("Duplicate IP peer group in neighbor config (line:{})", node.line),
                    node,
                )?;
            }
            self.ctx.current_ip_peer_group = Some(ip);
            PeerRef::Ip(vrf, ip)
        } else if let Some(prefix) = node.str("prefix") {
            let prefix = decode::prefix(prefix)?;
            let proc = self.vrf_process()?;
            let existed = proc.dynamic_peer_groups.contains_key(&prefix);
            proc.dynamic_peer_group(prefix);
            if existed {
                self.red_flag(
                    format!("Duplicate DynamicIP peer group neighbor config (line:{})", node.line),
                    node,
                )?;
            }
            self.ctx.current_dynamic_peer_group = Some(prefix);
            PeerRef::Dynamic(vrf, prefix)
        } else {
            let name = node.req("peergroup")?;
            self.red_flag(format!("unsupported neighbor block: '{name}'"), node)?;
            PeerRef::Dummy
        };
        self.ctx.push_peer(peer);
        let remote_as = opt_num(node, "as")?;
        let pg = self.current_peer()?;
        if let Some(remote_as) = remote_as {
            pg.common.set_remote_as(RemoteAs::Explicit(remote_as));
        }
        pg.common.active = true;
        pg.common.shutdown = false;
        Ok(())
    }

    fn no_neighbor_activate(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if node.has("ip6") {
            return self.todo(F_IPV6, node);
        }
        if let Some(ip) = node.str("ip") {
            let ip = decode::ip(ip)?;
            match self.vrf_process()?.ip_peer_groups.get_mut(&ip) {
                Some(pg) => pg.common.active = false,
                None => self.red_flag(format!("reference to undefined ip peer group: {ip}"), node)?,
            }
        } else if let Some(name) = node.str("peergroup") {
            let proc = self.vrf_process()?;
            match proc.named_peer_groups.get_mut(name) {
                Some(pg) => {
                    pg.common.active = false;
                    proc.ip_peer_groups
                        .values_mut()
                        .filter(|pg| pg.common.group_name.as_deref() == Some(name))
                        .for_each(|pg| pg.common.active = false);
                }
                None => self.red_flag(format!("reference to undefined peer group: {name}"), node)?,
            }
        }
        Ok(())
    }

    fn no_neighbor_shutdown(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if node.has("ip6") {
            return self.todo(F_IPV6, node);
        }
        if let Some(ip) = node.str("ip") {
            let ip = decode::ip(ip)?;
            match self.vrf_process()?.ip_peer_groups.get_mut(&ip) {
                Some(pg) => {
                    pg.common.active = true;
                    pg.common.shutdown = false;
                }
                None => self.red_flag(format!("reference to undefined ip peer group: {ip}"), node)?,
            }
        } else if node.has("peergroup") {
            self.red_flag("'no shutdown' of  peer group unsupported", node)?;
        }
        Ok(())
    }

    fn enter_address_family(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if self.ctx.pre_address_family_peer_group.is_some() {
            return Err(ExtractionError::NestedAddressFamily);
        }
        let af = node.all_str("af");
        if self.ctx.in_nexus_neighbor {
            self.ctx.nexus_neighbor_address_families.push(af.join(" "));
        }
        let ignored = af
            .first()
            .map_or(false, |x| IGNORED_ADDRESS_FAMILIES.contains(x))
            || af
                .iter()
                .any(|x| matches!(*x, "mdt" | "multicast" | "vrf"));
        self.ctx.pre_address_family_peer_group = self.ctx.current_peer_group.clone();
        let peer = match (ignored, self.ctx.current_peer_group.clone()) {
            (false, Some(peer)) => peer,
            _ => PeerRef::Dummy,
        };
        self.ctx.push_peer(peer);
        Ok(())
    }

    fn peer_group_assignment(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let name = node.req("name")?.to_string();
        if self.ctx.current_ipv6_peer_group.is_some() {
            return self.todo(F_IPV6, node);
        }
        let ip = match self.ctx.current_peer_group {
            Some(PeerRef::Ip(_, ip)) => ip,
            _ => {
                self.current_peer()?.common.group_name = Some(name);
                return Ok(());
            }
        };
        let proc = self.vrf_process()?;
        match proc.named_peer_groups.get_mut(&name) {
            Some(group) => {
                if !group.common.members.contains(&ip) {
                    group.common.members.push(ip);
                }
                proc.ip_peer_group(ip).common.group_name = Some(name);
            }
            None => self.red_flag(format!("reference to undefined peer group: {name}"), node)?,
        }
        Ok(())
    }

    fn ospf(&mut self) -> Result<&mut OspfProcess, ExtractionError> {
        self.ctx
            .current_ospf_process
            .as_mut()
            .ok_or(ExtractionError::MissingContext("router ospf"))
    }

    fn ospf_redistribute(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let protocol = match node.req("protocol")? {
            "connected" => RoutingProtocol::Connected,
            "static" => RoutingProtocol::Static,
            "bgp" => RoutingProtocol::Bgp,
            "rip" => return self.todo(F_OSPF_REDISTRIBUTE_RIP, node),
            p => return self.red_flag(format!("unsupported redistribution protocol: {p}"), node),
        };
        let mut policy = OspfRedistributionPolicy::new(protocol);
        policy.metric = opt_num(node, "metric")?;
        policy.map = node.str("map").map(String::from);
        if let Some(x) = opt_num(node, "metric_type")? {
            policy.metric_type = metric_type(node, x)?;
        }
        policy.tag = opt_num(node, "tag")?;
        policy.subnets = node.has("subnets");
        if protocol == RoutingProtocol::Bgp {
            policy.bgp_as = Some(num(node, "procnum")?);
        }
        self.ospf()?.redistribution_policies.insert(protocol, policy);
        Ok(())
    }

    fn ip_route(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if node.has("vrf") || self.ctx.current_vrf != MASTER_VRF_NAME {
            return self.todo(F_IP_ROUTE_VRF, node);
        }
        let mut route = StaticRoute::new(node_prefix(node)?);
        route.next_hop_ip = node.str("nexthop_ip").map(decode::ip).transpose()?;
        route.next_hop_interface = node.str("nexthop_iface").map(String::from);
        if let Some(distance) = opt_num(node, "distance")? {
            route.distance = distance;
        }
        route.tag = opt_num(node, "tag")?;
        route.track = opt_num(node, "track")?;
        route.permanent = node.has("permanent");
        self.config.static_routes.push(route);
        Ok(())
    }

    fn prefix_list_line(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let Some(name) = self.ctx.current_prefix_list.as_ref() else {
            return Ok(());
        };
        let action = decode::line_action(node.req("action")?)?;
        let prefix = decode::prefix(node.req("prefix")?)?;
        let len = prefix.prefix_len() as u32;
        let (mut min, mut max) = (len, len);
        if let Some(ge) = opt_num(node, "ge")? {
            min = ge;
            max = 32;
        }
        if let Some(le) = opt_num(node, "le")? {
            max = le;
        }
        if let Some(eq) = opt_num(node, "eq")? {
            min = eq;
            max = eq;
        }
        if let Some(list) = self.config.prefix_lists.get_mut(name) {
            list.lines.push(PrefixListLine {
                action,
                prefix,
                length_range: SubRange::new(min, max),
            });
        }
        Ok(())
    }

    fn standard_acl_line(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let action = decode::line_action(node.req("action")?)?;
        let (ip, wildcard) = decode::wildcard(&node.all_str("addr"))?;
        let dscps = node
            .all_str("dscp")
            .into_iter()
            .map(decode::dscp)
            .collect::<Result<Vec<_>, _>>()?;
        let ecns = nums(node, "ecn")?;
        let name = current(&self.ctx.current_standard_acl, "access-list")?;
        if let Some(acl) = self.config.standard_acls.get_mut(name) {
            acl.lines.push(StandardAccessListLine {
                action,
                ip,
                wildcard,
                dscps,
                ecns,
            });
        }
        Ok(())
    }

    fn extended_acl_line(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if self.ctx.current_extended_acl.is_none() {
            return Ok(());
        }
        let action = decode::line_action(node.req("action")?)?;
        let protocol = decode::protocol(node.req("protocol")?)?;
        let (src_ip, src_wildcard) = decode::wildcard(&node.all_str("src"))?;
        let (dst_ip, dst_wildcard) = decode::wildcard(&node.all_str("dst"))?;
        let src_ports = match node.str("src_op") {
            Some(op) => decode::port_ranges(op, &node.all_str("src_ports"))?,
            None => Vec::new(),
        };
        let dst_ports = match node.str("dst_op") {
            Some(op) => decode::port_ranges(op, &node.all_str("dst_ports"))?,
            None => Vec::new(),
        };
        let mut dscps = Vec::new();
        let mut ecns = Vec::new();
        let mut established = false;
        let features = node.all_str("features");
        let mut i = 0;
        while i < features.len() {
            match features[i] {
                "established" => established = true,
                "dscp" => {
                    if let Some(x) = features.get(i + 1) {
                        dscps.push(decode::dscp(x)?);
                        i += 1;
                    }
                }
                "ecn" => {
                    if let Some(x) = features.get(i + 1) {
                        ecns.push(decode::uint(x)?);
                        i += 1;
                    }
                }
                "fragments" => self.todo(F_FRAGMENTS, node)?,
                "ttl" => self.todo(F_TTL, node)?,
                _ => {}
            }
            i += 1;
        }
        let name = current(&self.ctx.current_extended_acl, "access-list")?;
        if let Some(acl) = self.config.extended_acls.get_mut(name) {
            acl.lines.push(ExtendedAccessListLine {
                action,
                protocol,
                src_ip,
                src_wildcard,
                dst_ip,
                dst_wildcard,
                src_ports,
                dst_ports,
                dscps,
                ecns,
                established,
            });
        }
        Ok(())
    }

    fn as_path_line(&mut self, node: &Node) -> Result<(), ExtractionError> {
        if node.has("unsupported") {
            log::debug!("ignoring as-path regex '{}'", node.str("regex").unwrap_or_default());
            return Ok(());
        }
        let action = decode::line_action(node.req("action")?)?;
        let ranges = node
            .all_str("ranges")
            .into_iter()
            .map(decode::as_path_regex_range)
            .collect::<Result<Vec<_>, _>>()?;
        let asterisks = opt_num(node, "asterisks")?.unwrap_or(0) as usize;
        let mut line = IpAsPathAccessListLine {
            action,
            at_beginning: node.has("caret"),
            match_empty: ranges.len() == asterisks,
            as1_range: None,
            as2_range: None,
        };
        if ranges.len() > 2 {
            // the line is kept without any AS ranges
            self.red_flag(
                "Do not currently support more than two AS'es in Cisco as-path regexes",
                node,
            )?;
        } else {
            line.as1_range = ranges.first().copied();
            line.as2_range = ranges.get(1).copied();
        }
        let name = current(&self.ctx.current_as_path_acl, "as-path access-list")?;
        if let Some(list) = self.config.as_path_access_lists.get_mut(name) {
            list.lines.push(line);
        }
        Ok(())
    }

    fn enter_route_map(&mut self, node: &Node) -> Result<(), ExtractionError> {
        let name = node.req("name")?.to_string();
        let action = node
            .str("action")
            .map(decode::line_action)
            .transpose()?
            .unwrap_or(LineAction::Permit);
        let number = opt_num(node, "num")?.unwrap_or(DEFAULT_ROUTE_MAP_CLAUSE);
        let map = self
            .config
            .route_maps
            .entry(name.clone())
            .or_insert_with(|| RouteMap::new(name.as_str()));
        if map.clauses.contains_key(&number) {
            return Err(ExtractionError::DuplicateRouteMapClause { map: name, number });
        }
        map.clauses
            .insert(number, RouteMapClause::new(action, number));
        self.ctx.current_route_map = Some(name);
        self.ctx.current_route_map_clause = Some(number);
        Ok(())
    }

    fn route_map(&mut self) -> Result<&mut RouteMap, ExtractionError> {
        let name = current(&self.ctx.current_route_map, "route-map")?;
        self.config
            .route_maps
            .get_mut(name)
            .ok_or(ExtractionError::MissingContext("route-map"))
    }

    fn clause(&mut self) -> Result<&mut RouteMapClause, ExtractionError> {
        let number = self
            .ctx
            .current_route_map_clause
            .ok_or(ExtractionError::MissingContext("route-map"))?;
        self.route_map()?
            .clauses
            .get_mut(&number)
            .ok_or(ExtractionError::MissingContext("route-map"))
    }
}

/// Name stored in a context register, which must be set.
fn current<'a>(
    register: &'a Option<String>,
    context: &'static str,
) -> Result<&'a str, ExtractionError> {
    register
        .as_deref()
        .ok_or(ExtractionError::MissingContext(context))
}

/// Required number captured under `name`.
fn num(node: &Node, name: &'static str) -> Result<u32, ExtractionError> {
    Ok(decode::uint(node.req(name)?)?)
}

/// Optional number captured under `name`.
fn opt_num(node: &Node, name: &str) -> Result<Option<u32>, ExtractionError> {
    Ok(node.str(name).map(decode::uint).transpose()?)
}

/// All numbers captured under `name`.
fn nums(node: &Node, name: &str) -> Result<Vec<u32>, ExtractionError> {
    Ok(node
        .all_str(name)
        .into_iter()
        .map(decode::uint)
        .collect::<Result<Vec<_>, _>>()?)
}

fn names(node: &Node, name: &str) -> Vec<String> {
    node.all_str(name).into_iter().map(String::from).collect()
}

/// Address given as `prefix` or as `address` and `mask`.
fn node_prefix(node: &Node) -> Result<Ipv4Net, ExtractionError> {
    Ok(match node.str("prefix") {
        Some(p) => decode::prefix(p)?,
        None => decode::prefix_from_mask(node.req("address")?, node.req("mask")?)?,
    })
}

/// OSPF area, either a number or in dotted-quad notation.
fn area(s: &str) -> Result<u32, ExtractionError> {
    Ok(if s.contains('.') {
        decode::ip_to_u32(decode::ip(s)?)
    } else {
        decode::uint(s)?
    })
}

/// Cluster id, either an address or its numeric value.
fn cluster_id(s: &str) -> Result<std::net::Ipv4Addr, ExtractionError> {
    Ok(if s.contains('.') {
        decode::ip(s)?
    } else {
        decode::u32_to_ip(decode::uint(s)?)
    })
}

fn metric_type(node: &Node, x: u32) -> Result<OspfMetricType, ExtractionError> {
    OspfMetricType::from_number(x).ok_or_else(|| {
        decode::DecodeError::InvalidNumber(node.str("metric_type").unwrap_or_default().to_string())
            .into()
    })
}
