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

use super::{ip, net};
use crate::{
    decode::{self, DecodeError},
    types::{IpProtocol, LineAction, SubRange},
};

#[test]
fn addresses_and_prefixes() {
    assert_eq!(decode::ip("10.0.0.1").unwrap(), ip("10.0.0.1"));
    assert_eq!(
        decode::ip("10.0.0.256"),
        Err(DecodeError::InvalidIp("10.0.0.256".to_string()))
    );
    assert_eq!(decode::prefix("10.0.0.1/24").unwrap(), net("10.0.0.1/24"));
    assert!(decode::prefix("10.0.0.1/33").is_err());
    assert!(decode::prefix("10.0.0.1").is_err());
    assert_eq!(
        decode::prefix_from_mask("10.0.0.1", "255.255.255.0").unwrap(),
        net("10.0.0.1/24")
    );
    assert_eq!(decode::classful_prefix("10.1.0.0").unwrap(), net("10.1.0.0/8"));
    assert_eq!(decode::classful_prefix("172.16.0.0").unwrap(), net("172.16.0.0/16"));
    assert_eq!(decode::classful_prefix("192.168.1.0").unwrap(), net("192.168.1.0/24"));
    assert_eq!(decode::ip_to_u32(ip("1.2.3.4")), 0x01020304);
    assert_eq!(decode::u32_to_ip(0x0a000001), ip("10.0.0.1"));
}

#[test]
fn wildcard_round_trip() {
    for len in 0..=32u8 {
        let wildcard = decode::wildcard_of_length(len);
        let mask = decode::u32_to_ip(!wildcard);
        assert_eq!(decode::num_subnet_bits(mask), len);

        let prefix = format!("10.0.0.0/{len}");
        let (_, w) = decode::wildcard(&[prefix.as_str()]).unwrap();
        assert_eq!(decode::num_subnet_bits(decode::u32_to_ip(!w)), len);

        let explicit = decode::u32_to_ip(wildcard).to_string();
        let (_, w) = decode::wildcard(&["10.0.0.0", explicit.as_str()]).unwrap();
        assert_eq!(decode::num_subnet_bits(decode::u32_to_ip(!w)), len);
    }

    let (addr, w) = decode::wildcard(&["host", "10.0.0.1"]).unwrap();
    assert_eq!(addr, ip("10.0.0.1"));
    assert_eq!(decode::num_subnet_bits(decode::u32_to_ip(!w)), 32);

    let (addr, w) = decode::wildcard(&["any"]).unwrap();
    assert_eq!(addr, ip("0.0.0.0"));
    assert_eq!(decode::num_subnet_bits(decode::u32_to_ip(!w)), 0);
}

#[test]
fn numbers() {
    assert_eq!(decode::number("63", 63), Ok(63));
    assert_eq!(
        decode::number("64", 63),
        Err(DecodeError::InvalidNumber("64".to_string()))
    );
    assert!(decode::uint("-1").is_err());
    assert!(decode::uint("4294967296").is_err());
    assert_eq!(decode::uint("4294967295"), Ok(u32::MAX));
}

#[test]
fn ports_and_protocols() {
    assert_eq!(decode::port("www"), Ok(80));
    assert_eq!(decode::port("bgp"), Ok(179));
    assert_eq!(decode::port("8080"), Ok(8080));
    assert_eq!(
        decode::port("65536"),
        Err(DecodeError::InvalidPort("65536".to_string()))
    );
    assert_eq!(decode::protocol("tcp"), Ok(IpProtocol::TCP));
    assert_eq!(decode::protocol("udp"), Ok(IpProtocol::UDP));
    assert_eq!(decode::protocol("89"), Ok(IpProtocol(89)));
    assert!(decode::protocol("banana").is_err());
}

#[test]
fn dscp_values() {
    assert_eq!(decode::dscp("ef"), Ok(46));
    assert_eq!(decode::dscp("af21"), Ok(18));
    assert_eq!(decode::dscp("cs3"), Ok(24));
    assert_eq!(decode::dscp("default"), Ok(0));
    assert_eq!(decode::dscp("12"), Ok(12));
    assert!(decode::dscp("af51").is_err());
    assert!(decode::dscp("64").is_err());
}

#[test]
fn port_ranges() {
    assert_eq!(
        decode::port_ranges("gt", &["1023"]).unwrap(),
        vec![SubRange::new(1024, 65535)]
    );
    assert_eq!(
        decode::port_ranges("lt", &["1024"]).unwrap(),
        vec![SubRange::new(0, 1023)]
    );
    assert_eq!(
        decode::port_ranges("neq", &["53"]).unwrap(),
        vec![SubRange::new(0, 52), SubRange::new(54, 65535)]
    );
    assert_eq!(
        decode::port_ranges("range", &["20", "21"]).unwrap(),
        vec![SubRange::new(20, 21)]
    );
    assert_eq!(
        decode::port_ranges("eq", &["www", "443"]).unwrap(),
        vec![SubRange::singleton(80), SubRange::singleton(443)]
    );
    assert_eq!(
        decode::port_ranges("neq", &["0"]).unwrap(),
        vec![SubRange::new(1, 65535)]
    );
    assert!(decode::port_ranges("gt", &["65535"]).is_err());
    assert!(decode::port_ranges("lt", &["0"]).is_err());
    assert!(decode::port_ranges("range", &["30", "20"]).is_err());
    assert!(decode::port_ranges("between", &["1"]).is_err());
}

#[test]
fn communities() {
    assert_eq!(decode::community("65000:100"), Ok((65000 << 16) | 100));
    assert_eq!(decode::community("no-export"), Ok(0xFFFF_FF01));
    assert_eq!(decode::community("no-advertise"), Ok(0xFFFF_FF02));
    assert_eq!(decode::community("local-AS"), Ok(0xFFFF_FF03));
    assert_eq!(decode::community("internet"), Ok(0));
    assert_eq!(decode::community("4259840100"), Ok(4259840100));
    assert_eq!(
        decode::community("70000:1"),
        Err(DecodeError::InvalidCommunity("70000:1".to_string()))
    );
}

#[test]
fn subranges() {
    assert_eq!(decode::subrange("7"), Ok(SubRange::singleton(7)));
    assert_eq!(decode::subrange("10-20"), Ok(SubRange::new(10, 20)));
    assert!(decode::subrange("20-10").is_err());
    assert_eq!(
        decode::subrange_list("1-4,7,10-12").unwrap(),
        vec![
            SubRange::new(1, 4),
            SubRange::singleton(7),
            SubRange::new(10, 12)
        ]
    );
    assert_eq!(decode::as_path_regex_range("."), Ok(SubRange::new(0, 65535)));
    assert_eq!(decode::as_path_regex_range("65000"), Ok(SubRange::singleton(65000)));
    assert_eq!(decode::line_action("permit"), Ok(LineAction::Permit));
    assert_eq!(decode::line_action("deny"), Ok(LineAction::Deny));
    assert!(decode::line_action("allow").is_err());
}

#[test]
fn interface_names() {
    assert_eq!(
        decode::canonical_interface_name("Gi0/1").unwrap(),
        "GigabitEthernet0/1"
    );
    assert_eq!(
        decode::canonical_interface_name("fe0/1").unwrap(),
        "FastEthernet0/1"
    );
    assert_eq!(decode::canonical_interface_name("Po10").unwrap(), "Port-channel10");
    assert_eq!(decode::canonical_interface_name("te1/1").unwrap(), "TenGigabitEthernet1/1");
    assert_eq!(decode::canonical_interface_name("mgmt0").unwrap(), "mgmt0");
    assert_eq!(
        decode::canonical_interface_name("Foo1"),
        Err(DecodeError::UnknownInterfacePrefix("Foo".to_string()))
    );
    assert_eq!(
        decode::canonical_interface_name("0/1"),
        Err(DecodeError::InvalidInterfaceName("0/1".to_string()))
    );
    assert_eq!(
        decode::split_interface_name("Port-channel1.100").unwrap(),
        ("Port-channel", "1.100")
    );
}

#[test]
fn interface_ranges() {
    assert_eq!(
        decode::expand_interface_range("Ethernet1-3").unwrap(),
        vec!["Ethernet1", "Ethernet2", "Ethernet3"]
    );
    assert_eq!(
        decode::expand_interface_range("Gi0/1-2,5").unwrap(),
        vec!["GigabitEthernet0/1", "GigabitEthernet0/2", "GigabitEthernet0/5"]
    );
    assert_eq!(
        decode::expand_interface_range("Vlan100").unwrap(),
        vec!["Vlan100"]
    );
}

#[test]
fn interface_globs() {
    assert_eq!(
        decode::expand_interface_glob("swp1-4,swp6").unwrap(),
        vec!["swp1", "swp2", "swp3", "swp4", "swp6"]
    );
    assert_eq!(
        decode::expand_interface_glob("swp1-3,5").unwrap(),
        vec!["swp1", "swp2", "swp3", "swp5"]
    );
    assert_eq!(
        decode::expand_interface_glob("bond2.4094").unwrap(),
        vec!["bond2.4094"]
    );
    assert_eq!(decode::expand_interface_glob("lo").unwrap(), vec!["lo"]);
    assert!(decode::expand_interface_glob("1-3").is_err());
}

#[test]
fn default_bandwidths() {
    assert_eq!(decode::default_bandwidth("Ethernet"), Some(1e7));
    assert_eq!(decode::default_bandwidth("FastEthernet"), Some(100e6));
    assert_eq!(decode::default_bandwidth("GigabitEthernet"), Some(1e9));
    assert_eq!(decode::default_bandwidth("Loopback"), Some(8e9));
    assert_eq!(decode::default_bandwidth("Port-channel"), None);
}
