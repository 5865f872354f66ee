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

use maplit::hashset;
use pretty_assertions::assert_eq;
use test_log::test;

use super::{cisco, ip, net, try_cisco};
use crate::{
    decode::COMMUNITY_NO_EXPORT,
    representation::*,
    settings::Settings,
    types::{IpProtocol, LineAction, SubRange, Vendor},
    warnings::WarningError,
    ExtractionError, VendorConfigError,
};

#[test]
fn end_to_end() {
    let e = cisco(
        "hostname R1
interface Ethernet0
 ip address 10.0.0.1/24
router bgp 65000
 neighbor 10.0.0.2 remote-as 65001
 network 10.0.0.0/24
",
    );
    let c = &e.config;
    assert_eq!(c.vendor, Vendor::Cisco);
    assert_eq!(c.hostname.as_deref(), Some("R1"));
    assert_eq!(c.interfaces.len(), 1);
    assert_eq!(c.interfaces["Ethernet0"].prefix, Some(net("10.0.0.1/24")));

    assert_eq!(c.bgp_processes.len(), 1);
    let proc = c.master_bgp_process().unwrap();
    assert_eq!(proc.as_number, 65000);
    assert_eq!(proc.ip_peer_groups.len(), 1);
    assert_eq!(
        proc.ip_peer_groups[&ip("10.0.0.2")].common.remote_as,
        Some(RemoteAs::Explicit(65001))
    );
    assert_eq!(
        proc.networks.iter().copied().collect::<Vec<_>>(),
        vec![net("10.0.0.0/24")]
    );
    assert!(e.warnings.is_empty());
}

#[test]
fn interface_defaults() {
    let c = cisco(
        "interface GigabitEthernet0/0
interface FastEthernet0/1
interface Loopback0
interface Port-channel1
interface mgmt0
",
    )
    .config;
    assert_eq!(c.interfaces["GigabitEthernet0/0"].bandwidth, Some(1e9));
    assert_eq!(c.interfaces["FastEthernet0/1"].bandwidth, Some(100e6));
    assert_eq!(c.interfaces["Loopback0"].bandwidth, Some(8e9));
    assert_eq!(c.interfaces["Port-channel1"].bandwidth, None);
    assert_eq!(c.interfaces["mgmt0"].vrf, "management");
    assert_eq!(c.interfaces["Loopback0"].vrf, "default");
    assert_eq!(c.interfaces["Loopback0"].mtu, DEFAULT_MTU);
    assert!(c.interfaces.values().all(|i| i.active));
}

#[test]
fn interface_aliases_are_canonical() {
    let c = cisco("interface Gi0/1\n ip address 10.0.0.1 255.255.255.252\n").config;
    assert_eq!(
        c.interfaces.keys().collect::<Vec<_>>(),
        vec!["GigabitEthernet0/1"]
    );
    assert_eq!(
        c.interfaces["GigabitEthernet0/1"].prefix,
        Some(net("10.0.0.1/30"))
    );
}

#[test]
fn interface_declared_twice() {
    let e = cisco(
        "interface Ethernet1
 description first
 bandwidth 5000
interface Ethernet1
 mtu 9000
",
    );
    assert_eq!(e.config.interfaces.len(), 1);
    let iface = &e.config.interfaces["Ethernet1"];
    assert_eq!(iface.description.as_deref(), Some("first"));
    assert_eq!(iface.mtu, 9000);
    // re-entering resets the bandwidth to the default of the type
    assert_eq!(iface.bandwidth, Some(1e7));
    assert_eq!(e.warnings.pedantic.len(), 1);
    assert_eq!(
        e.warnings
            .pedantic
            .get("Interface: 'Ethernet1' altered more than once"),
        Some(&Some(4))
    );
}

#[test]
fn interface_range() {
    let c = cisco(
        "interface Ethernet1-3
 description access
interface Ethernet2
 shutdown
",
    )
    .config;
    assert_eq!(
        c.interfaces.keys().cloned().collect::<Vec<_>>(),
        vec!["Ethernet1", "Ethernet2", "Ethernet3"]
    );
    assert!(c
        .interfaces
        .values()
        .all(|i| i.description.as_deref() == Some("access")));
    assert!(c.interfaces["Ethernet1"].active);
    assert!(!c.interfaces["Ethernet2"].active);
    assert!(c.interfaces["Ethernet3"].active);
}

#[test]
fn interface_settings() {
    let e = cisco(
        "interface GigabitEthernet0/1
 ip address 10.0.0.1 255.255.255.0
 ip address 10.0.1.1 255.255.255.0 secondary
 bandwidth 100000
 ip access-group IN in
 ip access-group OUT out
 ip policy route-map PBR
 ip ospf cost 10
 ip ospf dead-interval minimal hello-multiplier 4
interface GigabitEthernet0/2
 vrf forwarding BLUE
 ip address 10.1.0.1 255.255.255.0
interface GigabitEthernet0/3
 switchport
 switchport mode trunk
 switchport trunk encapsulation dot1q
 switchport trunk native vlan 99
 switchport trunk allowed vlan 10-20,30
interface GigabitEthernet0/4
 switchport access vlan 5
 switchport mode frobnicate
",
    );
    let c = &e.config;
    let g1 = &c.interfaces["GigabitEthernet0/1"];
    assert_eq!(g1.prefix, Some(net("10.0.0.1/24")));
    assert_eq!(g1.secondary_prefixes, vec![net("10.0.1.1/24")]);
    assert_eq!(g1.bandwidth, Some(100e6));
    assert_eq!(g1.incoming_filter.as_deref(), Some("IN"));
    assert_eq!(g1.outgoing_filter.as_deref(), Some("OUT"));
    assert_eq!(g1.routing_policy.as_deref(), Some("PBR"));
    assert_eq!(g1.ospf_cost, Some(10));
    assert_eq!(g1.ospf_dead_interval, Some(1));
    assert_eq!(g1.ospf_hello_multiplier, Some(4));

    let g2 = &c.interfaces["GigabitEthernet0/2"];
    assert_eq!(g2.vrf, "BLUE");
    assert_eq!(g2.prefix, Some(net("10.1.0.1/24")));
    assert!(c.vrfs.contains("BLUE"));

    let g3 = &c.interfaces["GigabitEthernet0/3"];
    assert!(g3.switchport);
    assert_eq!(g3.switchport_mode, SwitchportMode::Trunk);
    assert_eq!(g3.trunk_encapsulation, Some(SwitchportEncapsulation::Dot1q));
    assert_eq!(g3.native_vlan, Some(99));
    assert_eq!(
        g3.allowed_vlans,
        vec![SubRange::new(10, 20), SubRange::singleton(30)]
    );

    let g4 = &c.interfaces["GigabitEthernet0/4"];
    assert_eq!(g4.switchport_mode, SwitchportMode::Access);
    assert_eq!(g4.access_vlan, Some(5));
    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec!["unsupported switchport mode: frobnicate"]
    );
}

#[test]
fn static_routes() {
    let e = cisco(
        "ip route 0.0.0.0 0.0.0.0 10.0.0.254 250 tag 5
ip route 10.9.0.0 255.255.0.0 Null0
ip route 10.8.0.0/16 GigabitEthernet0/1 10.0.0.2 permanent
ip route vrf BLUE 10.7.0.0 255.255.0.0 10.0.0.1
",
    );
    let routes = &e.config.static_routes;
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0].prefix, net("0.0.0.0/0"));
    assert_eq!(routes[0].next_hop_ip, Some(ip("10.0.0.254")));
    assert_eq!(routes[0].distance, 250);
    assert_eq!(routes[0].tag, Some(5));
    assert_eq!(routes[1].next_hop_interface.as_deref(), Some("Null0"));
    assert_eq!(routes[1].next_hop_ip, None);
    assert_eq!(routes[1].distance, DEFAULT_STATIC_ROUTE_DISTANCE);
    assert_eq!(routes[2].next_hop_interface.as_deref(), Some("GigabitEthernet0/1"));
    assert_eq!(routes[2].next_hop_ip, Some(ip("10.0.0.2")));
    assert!(routes[2].permanent);
    assert_eq!(
        e.config.unimplemented_features.iter().collect::<Vec<_>>(),
        vec!["Cisco: ip route vrf / vrf - ip route"]
    );
}

#[test]
fn access_lists() {
    let c = cisco(
        "access-list 10 permit 10.0.0.0 0.0.0.255
access-list 10 deny any
ip access-list extended WEB
 permit tcp any host 10.0.0.80 eq www 443
 deny udp 10.0.0.0 0.0.0.255 any neq 53
 permit tcp any any established
 remark the end
",
    )
    .config;
    let std = &c.standard_acls["10"];
    assert_eq!(std.lines.len(), 2);
    assert_eq!(std.lines[0].action, LineAction::Permit);
    assert_eq!(std.lines[0].ip, ip("10.0.0.0"));
    assert_eq!(std.lines[0].wildcard, 255);
    assert_eq!(std.lines[1].action, LineAction::Deny);
    assert_eq!(std.lines[1].wildcard, u32::MAX);

    let web = &c.extended_acls["WEB"];
    assert_eq!(web.lines.len(), 3);
    assert_eq!(web.lines[0].protocol, IpProtocol::TCP);
    assert_eq!(web.lines[0].dst_ip, ip("10.0.0.80"));
    assert_eq!(web.lines[0].dst_wildcard, 0);
    assert_eq!(
        web.lines[0].dst_ports,
        vec![SubRange::singleton(80), SubRange::singleton(443)]
    );
    assert_eq!(web.lines[1].protocol, IpProtocol::UDP);
    assert_eq!(web.lines[1].src_wildcard, 255);
    assert_eq!(
        web.lines[1].dst_ports,
        vec![SubRange::new(0, 52), SubRange::new(54, 65535)]
    );
    assert!(web.lines[2].established);
    assert!(!web.lines[1].established);
}

#[test]
fn prefix_lists() {
    let c = cisco(
        "ip prefix-list PL seq 5 permit 10.0.0.0/8 ge 16 le 24
ip prefix-list PL permit 0.0.0.0/0
ip prefix-list PL seq 15 deny 192.168.0.0/16 ge 20
ip prefix-list GONE permit 10.0.0.0/8
no ip prefix-list GONE
",
    )
    .config;
    assert_eq!(c.prefix_lists.keys().collect::<Vec<_>>(), vec!["PL"]);
    let lines = &c.prefix_lists["PL"].lines;
    assert_eq!(
        lines
            .iter()
            .map(|l| (l.action, l.prefix, l.length_range))
            .collect::<Vec<_>>(),
        vec![
            (LineAction::Permit, net("10.0.0.0/8"), SubRange::new(16, 24)),
            (LineAction::Permit, net("0.0.0.0/0"), SubRange::new(0, 0)),
            (LineAction::Deny, net("192.168.0.0/16"), SubRange::new(20, 32)),
        ]
    );
}

#[test]
fn community_and_as_path_lists() {
    let c = cisco(
        "ip community-list standard CL permit 65000:1 no-export
ip community-list expanded EX deny _65000:.*_
ip as-path access-list 1 permit ^65000_.*$
ip as-path access-list 2 permit ^$
ip as-path access-list 3 permit (65000|65001)
",
    )
    .config;
    let cl = &c.standard_community_lists["CL"];
    assert_eq!(cl.lines[0].action, LineAction::Permit);
    assert_eq!(
        cl.lines[0].communities,
        vec![(65000 << 16) | 1, COMMUNITY_NO_EXPORT]
    );
    assert_eq!(c.expanded_community_lists["EX"].lines[0].regex, "_65000:.*_");

    let first = &c.as_path_access_lists["1"].lines[0];
    assert!(first.at_beginning);
    assert!(!first.match_empty);
    assert_eq!(first.as1_range, Some(SubRange::singleton(65000)));
    assert_eq!(first.as2_range, Some(SubRange::new(0, 65535)));

    let empty = &c.as_path_access_lists["2"].lines[0];
    assert!(empty.match_empty);
    assert_eq!(empty.as1_range, None);

    assert!(c.as_path_access_lists["3"].lines.is_empty());
}

#[test]
fn as_path_with_three_terms() {
    let e = cisco("ip as-path access-list 9 permit ^1_2_3$\n");
    assert_eq!(
        e.warnings.red_flags.iter().collect::<Vec<_>>(),
        vec![(
            &"Do not currently support more than two AS'es in Cisco as-path regexes".to_string(),
            &Some(1)
        )]
    );
    let lines = &e.config.as_path_access_lists["9"].lines;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].action, LineAction::Permit);
    assert!(lines[0].at_beginning);
    assert!(!lines[0].match_empty);
    assert_eq!(lines[0].as1_range, None);
    assert_eq!(lines[0].as2_range, None);

    match try_cisco("ip as-path access-list 9 permit ^1_2_3$\n", &Settings::strict()) {
        Err(VendorConfigError::Extraction(e)) => {
            assert_eq!(
                e.root_cause(),
                &ExtractionError::Warning(WarningError::RedFlag(
                    "Do not currently support more than two AS'es in Cisco as-path regexes"
                        .to_string()
                ))
            );
            assert!(matches!(e, ExtractionError::AtLine { line: 1, .. }));
        }
        r => panic!("unexpected result: {r:?}"),
    }
}

#[test]
fn route_maps() {
    let e = cisco(
        "route-map RM permit 10
 match ip address prefix-list PL
 match community CL
 set local-preference 200
 set community 65000:1 no-export additive
route-map RM deny 20
route-map OTHER
 set ip next-hop 10.0.0.1
 set origin igp
 set metric-type type-1
",
    );
    let c = &e.config;
    let rm = &c.route_maps["RM"];
    assert_eq!(rm.clauses.keys().copied().collect::<Vec<_>>(), vec![10, 20]);
    let clause = &rm.clauses[&10];
    assert_eq!(clause.action, LineAction::Permit);
    assert_eq!(
        clause.match_lines,
        vec![
            RouteMapMatch::IpPrefixList(vec!["PL".to_string()]),
            RouteMapMatch::Community(vec!["CL".to_string()]),
        ]
    );
    assert_eq!(
        clause.set_lines,
        vec![
            RouteMapSet::LocalPreference(200),
            RouteMapSet::AdditiveCommunity(vec![(65000 << 16) | 1, COMMUNITY_NO_EXPORT]),
        ]
    );
    assert_eq!(rm.clauses[&20].action, LineAction::Deny);

    let other = &c.route_maps["OTHER"].clauses[&10];
    assert_eq!(other.action, LineAction::Permit);
    assert_eq!(
        other.set_lines,
        vec![
            RouteMapSet::NextHop(vec![ip("10.0.0.1")]),
            RouteMapSet::Origin(OriginType::Igp, None),
        ]
    );
    assert_eq!(
        c.unimplemented_features.iter().cloned().collect::<Vec<_>>(),
        vec!["Cisco: route-map - set metric-type".to_string()]
    );
}

#[test]
fn route_map_clause_uniqueness() {
    let ok = cisco("route-map A permit 10\nroute-map B permit 10\n").config;
    assert_eq!(ok.route_maps.len(), 2);

    let err = try_cisco(
        "route-map A permit 10\n set metric 5\nroute-map A deny 10\n",
        &Settings::default(),
    )
    .unwrap_err();
    match err {
        VendorConfigError::Extraction(e) => {
            assert_eq!(
                e.root_cause(),
                &ExtractionError::DuplicateRouteMapClause {
                    map: "A".to_string(),
                    number: 10
                }
            );
            assert!(matches!(e, ExtractionError::AtLine { line: 3, .. }));
        }
        e => panic!("unexpected error: {e}"),
    }
}

#[test]
fn deleted_route_map() {
    let c = cisco("route-map A permit 10\nno route-map A\nroute-map A deny 10\n").config;
    assert_eq!(c.route_maps["A"].clauses[&10].action, LineAction::Deny);
}

#[test]
fn vrfs() {
    let c = cisco(
        "vrf context BLUE
  ip route 10.0.0.0/8 10.1.1.1
interface Ethernet1/1
 vrf member RED
",
    )
    .config;
    assert_eq!(
        c.vrfs.iter().cloned().collect::<std::collections::HashSet<_>>(),
        hashset! {"default".to_string(), "BLUE".to_string(), "RED".to_string()}
    );
    assert!(c.static_routes.is_empty());
    assert_eq!(c.interfaces["Ethernet1/1"].vrf, "RED");
}
