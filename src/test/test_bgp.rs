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

use pretty_assertions::assert_eq;
use test_log::test;

use super::{cisco, ip, net, try_cisco};
use crate::{
    representation::*,
    settings::Settings,
    types::{RoutingProtocol, MASTER_VRF_NAME},
    ExtractionError, VendorConfigError,
};

/// Extract a Cisco file that must fail, and return the error without its location.
fn cisco_err(text: &str) -> ExtractionError {
    match try_cisco(text, &Settings::default()) {
        Err(VendorConfigError::Extraction(e)) => e.root_cause().clone(),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("extraction succeeded"),
    }
}

#[test]
fn neighbor_statements_refer_to_the_same_peer() {
    let e = cisco(
        "router bgp 65000
 bgp router-id 1.1.1.1
 neighbor 10.0.0.2 remote-as 65001
 neighbor 10.0.0.2 route-map IN in
 neighbor 10.0.0.2 description upstream provider
 neighbor 10.0.0.2 send-community both
 neighbor 10.0.0.2 default-originate route-map DEFAULT
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    assert_eq!(proc.router_id, Some(ip("1.1.1.1")));
    assert_eq!(proc.ip_peer_groups.len(), 1);
    let peer = &proc.ip_peer_groups[&ip("10.0.0.2")];
    assert_eq!(peer.kind, PeerGroupKind::Ip(ip("10.0.0.2")));
    assert_eq!(peer.common.remote_as, Some(RemoteAs::Explicit(65001)));
    assert_eq!(peer.common.inbound_route_map.as_deref(), Some("IN"));
    assert_eq!(peer.common.description.as_deref(), Some("upstream provider"));
    assert!(peer.common.send_community);
    assert!(peer.common.default_originate);
    assert_eq!(
        peer.common.route_maps().collect::<Vec<_>>(),
        vec!["DEFAULT", "IN"]
    );
    assert_eq!(
        e.config.referenced_route_maps.iter().collect::<Vec<_>>(),
        vec!["IN"]
    );
    assert!(e.warnings.is_empty());
}

#[test]
fn undeclared_neighbor() {
    let e = cisco(
        "router bgp 65000
 neighbor 10.0.0.9 route-map X in
 neighbor GHOST send-community
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    assert!(proc.ip_peer_groups.is_empty());
    assert!(proc.named_peer_groups.is_empty());
    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec![
            "reference to undeclared peer group: '10.0.0.9'",
            "reference to undeclared peer group: 'GHOST'",
        ]
    );
    assert_eq!(e.warnings.red_flags["reference to undeclared peer group: 'GHOST'"], Some(3));
}

#[test]
fn peer_keyspaces_are_separate() {
    let c = cisco(
        "router bgp 65000
 neighbor 10.0.0.1 remote-as 1
 neighbor GROUP peer-group
 neighbor GROUP remote-as 2
 neighbor 10.0.0.0/24 remote-as 3
",
    )
    .config;
    let proc = c.master_bgp_process().unwrap();
    assert_eq!(
        proc.ip_peer_groups[&ip("10.0.0.1")].common.remote_as,
        Some(RemoteAs::Explicit(1))
    );
    assert_eq!(
        proc.named_peer_groups["GROUP"].common.remote_as,
        Some(RemoteAs::Explicit(2))
    );
    assert_eq!(
        proc.dynamic_peer_groups[&net("10.0.0.0/24")].common.remote_as,
        Some(RemoteAs::Explicit(3))
    );
    assert_eq!(proc.all_peer_groups().count(), 4);
    assert!(proc.master.common.remote_as.is_none());
}

#[test]
fn peer_group_membership() {
    let e = cisco(
        "router bgp 65000
 neighbor RR peer-group
 neighbor RR remote-as 65000
 neighbor RR route-reflector-client
 neighbor 10.0.0.1 peer-group RR
 neighbor 10.0.0.2 peer-group RR
 neighbor 10.0.0.1 peer-group RR
 neighbor 10.0.0.3 peer-group MISSING
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    let rr = &proc.named_peer_groups["RR"];
    assert!(rr.common.route_reflector_client);
    assert_eq!(rr.common.members, vec![ip("10.0.0.1"), ip("10.0.0.2")]);
    assert_eq!(
        proc.ip_peer_groups[&ip("10.0.0.1")].common.group_name.as_deref(),
        Some("RR")
    );
    assert_eq!(
        proc.ip_peer_groups[&ip("10.0.0.2")].common.group_name.as_deref(),
        Some("RR")
    );
    assert_eq!(proc.ip_peer_groups[&ip("10.0.0.3")].common.group_name, None);
    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec!["reference to undefined peer group: MISSING"]
    );
}

#[test]
fn listen_range() {
    let c = cisco(
        "router bgp 65000
 bgp listen range 10.1.0.0/16 peer-group DYN remote-as 65100
",
    )
    .config;
    let proc = c.master_bgp_process().unwrap();
    let dynamic = &proc.dynamic_peer_groups[&net("10.1.0.0/16")];
    assert_eq!(dynamic.common.group_name.as_deref(), Some("DYN"));
    assert_eq!(dynamic.common.remote_as, Some(RemoteAs::Explicit(65100)));
    assert_eq!(
        proc.named_peer_groups["DYN"].common.listen_prefixes,
        vec![net("10.1.0.0/16")]
    );
}

#[test]
fn ignored_address_families() {
    let e = cisco(
        "router bgp 65000
 neighbor 10.0.0.1 remote-as 65001
 address-family vpnv4
  neighbor 10.0.0.2 activate
  neighbor 10.0.0.1 route-reflector-client
  network 10.9.0.0/16
 exit-address-family
 address-family ipv4 unicast
  neighbor 10.0.0.1 activate
  neighbor 10.0.0.1 send-community
  network 10.0.0.0/8
 exit-address-family
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    assert_eq!(
        proc.ip_peer_groups.keys().copied().collect::<Vec<_>>(),
        vec![ip("10.0.0.1")]
    );
    let peer = &proc.ip_peer_groups[&ip("10.0.0.1")];
    assert!(!peer.common.route_reflector_client);
    assert!(peer.common.send_community);
    assert_eq!(
        proc.networks.iter().copied().collect::<Vec<_>>(),
        vec![net("10.0.0.0/8")]
    );
    assert!(e.warnings.red_flags.is_empty());
}

#[test]
fn nested_address_family() {
    assert_eq!(
        cisco_err(
            "router bgp 65000
 address-family ipv4 unicast
  address-family ipv4 multicast
"
        ),
        ExtractionError::NestedAddressFamily
    );
}

#[test]
fn nexus_neighbor_blocks() {
    let c = cisco(
        "router bgp 65000
  router-id 1.1.1.1
  neighbor 10.0.0.2
    remote-as 65002
    description core
    address-family ipv4 unicast
      route-map IMPORT in
      send-community
  vrf BLUE
    neighbor 10.1.0.2 remote-as 65003
",
    )
    .config;
    let master = c.master_bgp_process().unwrap();
    assert_eq!(master.router_id, Some(ip("1.1.1.1")));
    assert_eq!(master.ip_peer_groups.len(), 1);
    let peer = &master.ip_peer_groups[&ip("10.0.0.2")];
    assert_eq!(peer.common.remote_as, Some(RemoteAs::Explicit(65002)));
    assert_eq!(peer.common.description.as_deref(), Some("core"));
    assert_eq!(peer.common.inbound_route_map.as_deref(), Some("IMPORT"));
    assert!(peer.common.send_community);
    assert!(peer.common.active);

    assert!(c.vrfs.contains("BLUE"));
    let blue = &c.bgp_processes["BLUE"];
    assert_eq!(blue.as_number, 65000);
    assert_eq!(
        blue.ip_peer_groups[&ip("10.1.0.2")].common.remote_as,
        Some(RemoteAs::Explicit(65003))
    );
    assert_eq!(
        c.bgp_processes.keys().cloned().collect::<Vec<_>>(),
        vec![MASTER_VRF_NAME.to_string(), "BLUE".to_string()]
    );
}

#[test]
fn nexus_neighbor_declared_twice() {
    let e = cisco(
        "router bgp 65000
  neighbor 10.0.0.2 remote-as 65002
    description first
  neighbor 10.0.0.2
    description second
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    let peer = &proc.ip_peer_groups[&ip("10.0.0.2")];
    assert_eq!(peer.common.remote_as, Some(RemoteAs::Explicit(65002)));
    assert_eq!(peer.common.description.as_deref(), Some("second"));
    assert_eq!(e.warnings.red_flags.len(), 1);
}

#[test]
fn redistribution_and_networks() {
    let e = cisco(
        "router bgp 65000
 redistribute connected route-map CONN
 redistribute ospf 1 metric 100
 redistribute static
 redistribute eigrp 10
 redistribute rip
 network 10.0.0.0 mask 255.255.0.0
 network 192.168.1.0
 network 10.5.0.0/16 route-map NET
 aggregate-address 10.0.0.0 255.0.0.0 as-set summary-only
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    assert_eq!(
        proc.redistribution_policies.keys().copied().collect::<Vec<_>>(),
        vec![
            RoutingProtocol::Connected,
            RoutingProtocol::Ospf,
            RoutingProtocol::Static
        ]
    );
    let connected = &proc.redistribution_policies[&RoutingProtocol::Connected];
    assert_eq!(connected.map.as_deref(), Some("CONN"));
    let ospf = &proc.redistribution_policies[&RoutingProtocol::Ospf];
    assert_eq!(ospf.ospf_process, Some(1));
    assert_eq!(ospf.metric, Some(100));

    assert_eq!(
        proc.networks.iter().copied().collect::<Vec<_>>(),
        vec![net("10.0.0.0/16"), net("192.168.1.0/24")]
    );
    let aggregate = &proc.aggregate_networks[&net("10.0.0.0/8")];
    assert!(aggregate.as_set);
    assert!(aggregate.summary_only);
    assert_eq!(aggregate.attribute_map, None);

    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec!["unsupported redistribution protocol: eigrp"]
    );
    assert_eq!(
        e.config.unimplemented_features.iter().collect::<Vec<_>>(),
        vec!["Cisco: rip", "Cisco: bgp - network with route-map"]
    );
}

#[test]
fn no_redistribute_connected() {
    let c = cisco(
        "router bgp 65000
 redistribute connected
 redistribute static
 no redistribute connected
",
    )
    .config;
    assert_eq!(
        c.master_bgp_process()
            .unwrap()
            .redistribution_policies
            .keys()
            .copied()
            .collect::<Vec<_>>(),
        vec![RoutingProtocol::Static]
    );
}

#[test]
fn templates_and_inheritance() {
    let c = cisco(
        "router bgp 65000
 template peer-session BASE
  remote-as 65001
  description template
 template peer-policy POL
  route-map OUT out
 neighbor 10.0.0.1 inherit peer-session BASE
 neighbor 10.0.0.1 inherit peer-policy POL 10
",
    )
    .config;
    let proc = c.master_bgp_process().unwrap();
    let base = &proc.peer_sessions["BASE"];
    assert_eq!(base.common.remote_as, Some(RemoteAs::Explicit(65001)));
    assert_eq!(base.common.description.as_deref(), Some("template"));
    assert_eq!(
        proc.named_peer_groups["POL"].common.outbound_route_map.as_deref(),
        Some("OUT")
    );
    let peer = &proc.ip_peer_groups[&ip("10.0.0.1")];
    assert_eq!(peer.common.peer_session.as_deref(), Some("BASE"));
    assert_eq!(peer.common.group_name.as_deref(), Some("POL"));
    assert_eq!(peer.common.remote_as, None);
}

#[test]
fn neighbor_group_inheritance() {
    let c = cisco(
        "router bgp 65000
 neighbor-group CLIENTS
  remote-as 65000
 neighbor 10.0.0.1
  use neighbor-group CLIENTS
",
    )
    .config;
    let proc = c.master_bgp_process().unwrap();
    assert_eq!(
        proc.ip_peer_groups[&ip("10.0.0.1")].common.group_name.as_deref(),
        Some("CLIENTS")
    );
    assert_eq!(
        proc.named_peer_groups["CLIENTS"].common.remote_as,
        Some(RemoteAs::Explicit(65000))
    );

    assert_eq!(
        cisco_err(
            "router bgp 65000
 neighbor-group A
  use neighbor-group B
"
        ),
        ExtractionError::InvalidInheritanceContext
    );
}

#[test]
fn no_neighbor_activate() {
    let e = cisco(
        "router bgp 65000
 neighbor PG peer-group
 neighbor 10.0.0.1 remote-as 65001
 neighbor 10.0.0.2 peer-group PG
 address-family ipv4
  no neighbor 10.0.0.1 activate
  no neighbor PG activate
  no neighbor 10.0.0.7 activate
",
    );
    let proc = e.config.master_bgp_process().unwrap();
    assert!(!proc.ip_peer_groups[&ip("10.0.0.1")].common.active);
    assert!(!proc.ip_peer_groups[&ip("10.0.0.2")].common.active);
    assert!(!proc.named_peer_groups["PG"].common.active);
    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec!["reference to undefined ip peer group: 10.0.0.7"]
    );
}

#[test]
fn router_bgp_replaces_the_process() {
    let c = cisco(
        "router bgp 1
 neighbor 10.0.0.1 remote-as 2
router bgp 3
",
    )
    .config;
    assert_eq!(c.bgp_processes.len(), 1);
    let proc = c.master_bgp_process().unwrap();
    assert_eq!(proc.as_number, 3);
    assert!(proc.ip_peer_groups.is_empty());
}

#[test]
fn per_neighbor_unimplemented_features() {
    let e = cisco(
        "router bgp 65000
 neighbor 10.0.0.1 remote-as 65001
 neighbor 10.0.0.1 ebgp-multihop 2
 neighbor 10.0.0.1 allowas-in 3
 neighbor 10.0.0.1 next-hop-self
 maximum-peers 10
",
    );
    let peer = &e.config.master_bgp_process().unwrap().ip_peer_groups[&ip("10.0.0.1")];
    assert!(peer.common.allow_as_in);
    assert_eq!(
        e.warnings.unimplemented.keys().collect::<Vec<_>>(),
        vec![
            "Cisco: bgp - ebgp-multihop",
            "Cisco: bgp -  allowas-in with number - ignored and effectively infinite for now",
            "Cisco: bgp - (no) next-hop-self",
            "Cisco: bgp - maximum-peers",
        ]
    );
}
