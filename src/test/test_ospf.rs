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

use super::{cisco, ip, net};
use crate::{
    representation::*,
    types::{OspfMetricType, RoutingProtocol},
};

#[test]
fn networks_use_interfaces_declared_before_the_process() {
    let c = cisco(
        "interface Ethernet0
 ip address 10.0.0.1 255.255.255.0
interface Ethernet1
 ip address 10.0.1.1 255.255.255.0
interface Loopback0
 ip address 192.168.0.1 255.255.255.255
router ospf 1
 router-id 1.1.1.1
 network 10.0.0.0 0.0.255.255 area 0
 network 192.168.0.1/32 area 0.0.0.1
interface Ethernet2
 ip address 10.0.2.1 255.255.255.0
",
    )
    .config;
    let ospf = c.ospf_process.as_ref().unwrap();
    assert_eq!(ospf.process_id, 1);
    assert_eq!(ospf.router_id, Some(ip("1.1.1.1")));
    assert_eq!(
        ospf.wildcard_networks,
        vec![
            OspfWildcardNetwork {
                ip: ip("10.0.0.0"),
                wildcard: 0xFFFF,
                area: 0
            },
            OspfWildcardNetwork {
                ip: ip("192.168.0.1"),
                wildcard: 0,
                area: 1
            },
        ]
    );
    assert_eq!(
        ospf.networks.iter().copied().collect::<Vec<_>>(),
        vec![
            OspfNetwork {
                prefix: net("10.0.0.0/24"),
                area: 0
            },
            OspfNetwork {
                prefix: net("10.0.1.0/24"),
                area: 0
            },
            OspfNetwork {
                prefix: net("192.168.0.1/32"),
                area: 1
            },
        ]
    );
    // the interface exists, it was just declared too late
    assert!(c.interfaces.contains_key("Ethernet2"));
}

#[test]
fn compute_networks_ignores_interfaces_without_address() {
    let mut proc = OspfProcess::new(1);
    proc.wildcard_networks.push(OspfWildcardNetwork {
        ip: ip("0.0.0.0"),
        wildcard: u32::MAX,
        area: 5,
    });
    let mut with_address = Interface::new("Ethernet0", crate::types::Vendor::Cisco);
    with_address.prefix = Some(net("172.16.3.4/22"));
    let without_address = Interface::new("Ethernet1", crate::types::Vendor::Cisco);
    proc.compute_networks([&with_address, &without_address]);
    assert_eq!(
        proc.networks.into_iter().collect::<Vec<_>>(),
        vec![OspfNetwork {
            prefix: net("172.16.0.0/22"),
            area: 5
        }]
    );
}

#[test]
fn nssa_areas() {
    let e = cisco(
        "router ospf 1
 area 1 nssa no-summary
 area 2 nssa
 area 0.0.0.3 nssa default-information-originate
 area 4 authentication message-digest
",
    );
    let ospf = e.config.ospf_process.as_ref().unwrap();
    assert_eq!(
        ospf.nssas.iter().map(|(a, s)| (*a, *s)).collect::<Vec<_>>(),
        vec![(1, true), (2, false), (3, false)]
    );
    assert_eq!(
        e.warnings.unimplemented.keys().collect::<Vec<_>>(),
        vec!["Cisco: ospf - area nssa default-information-originate"]
    );
}

#[test]
fn passive_interfaces() {
    let c = cisco(
        "router ospf 1
 passive-interface default
 no passive-interface GigabitEthernet0/1
 passive-interface Loopback0
",
    )
    .config;
    let ospf = c.ospf_process.unwrap();
    assert!(ospf.passive_interface_default);
    assert_eq!(
        ospf.non_passive_interfaces.into_iter().collect::<Vec<_>>(),
        vec!["GigabitEthernet0/1".to_string()]
    );
    assert_eq!(
        ospf.passive_interfaces.into_iter().collect::<Vec<_>>(),
        vec!["Loopback0".to_string()]
    );
}

#[test]
fn redistribution() {
    let e = cisco(
        "router ospf 1
 redistribute connected subnets
 redistribute static metric 20 metric-type 1 tag 7
 redistribute bgp 65000 subnets route-map B2O
 redistribute rip
 redistribute isis
",
    );
    let ospf = e.config.ospf_process.as_ref().unwrap();
    assert_eq!(
        ospf.redistribution_policies.keys().copied().collect::<Vec<_>>(),
        vec![
            RoutingProtocol::Connected,
            RoutingProtocol::Static,
            RoutingProtocol::Bgp
        ]
    );

    let connected = &ospf.redistribution_policies[&RoutingProtocol::Connected];
    assert!(connected.subnets);
    assert_eq!(connected.metric_type, OspfMetricType::E2);

    let static_ = &ospf.redistribution_policies[&RoutingProtocol::Static];
    assert!(!static_.subnets);
    assert_eq!(static_.metric, Some(20));
    assert_eq!(static_.metric_type, OspfMetricType::E1);
    assert_eq!(static_.tag, Some(7));

    let bgp = &ospf.redistribution_policies[&RoutingProtocol::Bgp];
    assert_eq!(bgp.bgp_as, Some(65000));
    assert_eq!(bgp.map.as_deref(), Some("B2O"));
    assert!(bgp.subnets);

    assert_eq!(
        e.warnings.unimplemented.keys().collect::<Vec<_>>(),
        vec!["Cisco: ospf - redistribute rip"]
    );
    assert_eq!(
        e.warnings.red_flags.keys().collect::<Vec<_>>(),
        vec!["unsupported redistribution protocol: isis"]
    );
}

#[test]
fn default_information() {
    let c = cisco(
        "router ospf 1
 default-information originate always metric 10 metric-type 1 route-map DEF
",
    )
    .config;
    let ospf = c.ospf_process.unwrap();
    assert!(ospf.default_information_originate);
    assert!(ospf.default_information_originate_always);
    assert_eq!(ospf.default_information_metric, Some(10));
    assert_eq!(ospf.default_information_metric_type, Some(OspfMetricType::E1));
    assert_eq!(ospf.default_information_originate_map.as_deref(), Some("DEF"));

    let c = cisco("router ospf 1\n default-information originate\n").config;
    let ospf = c.ospf_process.unwrap();
    assert!(ospf.default_information_originate);
    assert!(!ospf.default_information_originate_always);
    assert_eq!(ospf.default_information_metric_type, None);
}

#[test]
fn vrf_processes_are_not_stored() {
    let e = cisco(
        "interface Ethernet0
 ip address 10.0.0.1 255.255.255.0
router ospf 2 vrf RED
 network 10.0.0.0 0.255.255.255 area 0
 maximum-paths 4
",
    );
    assert_eq!(e.config.ospf_process, None);
    assert_eq!(
        e.config.unimplemented_features.iter().collect::<Vec<_>>(),
        vec!["Cisco: router ospf vrf", "Cisco: ospf - maximum-paths"]
    );
}
