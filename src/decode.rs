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

//! # Primitive decoders
//!
//! Pure functions turning the text of a single token (or a small fixed group of tokens) into a
//! typed value. A well-formed parse tree never triggers a [`DecodeError`]; when it happens anyway,
//! the extractor aborts the current file.
//!
//! ```
//! use vendorcfg::decode;
//! use vendorcfg::types::SubRange;
//!
//! assert_eq!(decode::community("65000:100").unwrap(), (65000 << 16) | 100);
//! assert_eq!(
//!     decode::port_ranges("neq", &["53"]).unwrap(),
//!     vec![SubRange::new(0, 52), SubRange::new(54, 65535)]
//! );
//! ```

use std::{collections::HashMap, net::Ipv4Addr};

use ipnet::Ipv4Net;
use lazy_static::lazy_static;
use thiserror::Error;

use crate::types::{IpProtocol, LineAction, SubRange};

/// Largest valid port number.
pub const MAX_PORT: u32 = 65535;
/// Largest AS number an AS-path regex wildcard can stand for.
pub const MAX_AS_PATH_REGEX_AS: u32 = 65535;

/// Community `internet`
pub const COMMUNITY_INTERNET: u32 = 0;
/// Community `no-export`
pub const COMMUNITY_NO_EXPORT: u32 = 0xFFFF_FF01;
/// Community `no-advertise`
pub const COMMUNITY_NO_ADVERTISE: u32 = 0xFFFF_FF02;
/// Community `local-AS`
pub const COMMUNITY_LOCAL_AS: u32 = 0xFFFF_FF03;

/// Error raised by a decoder on malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token is not a dotted-quad IPv4 address.
    #[error("Invalid IP address: '{0}'")]
    InvalidIp(String),
    /// The token is not a valid `<addr>/<len>` prefix.
    #[error("Invalid IP prefix: '{0}'")]
    InvalidPrefix(String),
    /// The token is not a number or the number is out of range.
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),
    /// Unknown named port, or port number out of range.
    #[error("Invalid port: '{0}'")]
    InvalidPort(String),
    /// Unknown protocol name.
    #[error("Invalid protocol: '{0}'")]
    InvalidProtocol(String),
    /// Unknown port comparison operator, or wrong number of operands.
    #[error("Invalid port range: '{0}'")]
    InvalidPortRange(String),
    /// The token is not a valid community.
    #[error("Invalid community: '{0}'")]
    InvalidCommunity(String),
    /// The token is not a valid numeric subrange.
    #[error("Invalid subrange: '{0}'")]
    InvalidSubRange(String),
    /// The token is neither `permit` nor `deny`.
    #[error("Invalid line action: '{0}'")]
    InvalidLineAction(String),
    /// The alphabetic part of an interface name matches no known interface type.
    #[error("Invalid interface name prefix: '{0}'")]
    UnknownInterfacePrefix(String),
    /// The interface name has no alphabetic prefix.
    #[error("Invalid interface name: '{0}'")]
    InvalidInterfaceName(String),
}

lazy_static! {
    /// Ordered table mapping interface name aliases to their canonical prefix.
    static ref INTERFACE_PREFIXES: Vec<(&'static str, &'static str)> = vec![
        ("Async", "Async"),
        ("ATM", "ATM"),
        ("Bundle-Ether", "Bundle-Ethernet"),
        ("BVI", "BVI"),
        ("cmp-mgmt", "cmp-mgmt"),
        ("Dialer", "Dialer"),
        ("Dot11Radio", "Dot11Radio"),
        ("Embedded-Service-Engine", "Embedded-Service-Engine"),
        ("Ethernet", "Ethernet"),
        ("FastEthernet", "FastEthernet"),
        ("fc", "fc"),
        ("fe", "FastEthernet"),
        ("fortyGigE", "FortyGigabitEthernet"),
        ("FortyGigabitEthernet", "FortyGigabitEthernet"),
        ("GigabitEthernet", "GigabitEthernet"),
        ("ge", "GigabitEthernet"),
        ("GMPLS", "GMPLS"),
        ("HundredGigE", "HundredGigabitEthernet"),
        ("ip", "ip"),
        ("Group-Async", "Group-Async"),
        ("LongReachEthernet", "LongReachEthernet"),
        ("Loopback", "Loopback"),
        ("Management", "Management"),
        ("ManagementEthernet", "ManagementEthernet"),
        ("mgmt", NXOS_MANAGEMENT_INTERFACE_PREFIX),
        ("MgmtEth", "ManagementEthernet"),
        ("Null", "Null"),
        ("Port-channel", "Port-channel"),
        ("POS", "POS"),
        ("Serial", "Serial"),
        ("TenGigabitEthernet", "TenGigabitEthernet"),
        ("TenGigE", "TenGigabitEthernet"),
        ("te", "TenGigabitEthernet"),
        ("trunk", "trunk"),
        ("Tunnel", "Tunnel"),
        ("tunnel-te", "tunnel-te"),
        ("ve", "VirtualEthernet"),
        ("Virtual-Template", "Virtual-Template"),
        ("Vlan", "Vlan"),
    ];

    /// Well-known service names accepted in place of a port number.
    static ref NAMED_PORTS: HashMap<&'static str, u32> = HashMap::from([
        ("aol", 5190),
        ("bgp", 179),
        ("biff", 512),
        ("bootpc", 68),
        ("bootps", 67),
        ("chargen", 19),
        ("citrix-ica", 1494),
        ("cmd", 514),
        ("ctiqbe", 2748),
        ("daytime", 13),
        ("discard", 9),
        ("dnsix", 195),
        ("domain", 53),
        ("echo", 7),
        ("exec", 512),
        ("finger", 79),
        ("ftp", 21),
        ("ftp-data", 20),
        ("gopher", 70),
        ("h323", 1720),
        ("hostname", 101),
        ("http", 80),
        ("https", 443),
        ("ident", 113),
        ("imap4", 143),
        ("irc", 194),
        ("isakmp", 500),
        ("kerberos", 750),
        ("klogin", 543),
        ("kshell", 544),
        ("ldap", 389),
        ("ldaps", 636),
        ("login", 513),
        ("lotusnotes", 1352),
        ("lpd", 515),
        ("mlag", 4432),
        ("mobile-ip", 434),
        ("msrpc", 135),
        ("nameserver", 42),
        ("netbios-dgm", 138),
        ("netbios-ns", 137),
        ("netbios-ss", 139),
        ("netbios-ssn", 139),
        ("nntp", 119),
        ("non500-isakmp", 4500),
        ("ntp", 123),
        ("pcanywhere-data", 5631),
        ("pcanywhere-status", 5632),
        ("pim-auto-rp", 496),
        ("pop2", 109),
        ("pop3", 110),
        ("pptp", 1723),
        ("radius", 1645),
        ("radius-acct", 1646),
        ("rip", 520),
        ("secureid-udp", 5510),
        ("smtp", 25),
        ("snmp", 161),
        ("snmptrap", 162),
        ("sqlnet", 1521),
        ("ssh", 22),
        ("sunrpc", 111),
        ("syslog", 514),
        ("tacacs", 49),
        ("tacacs-ds", 65),
        ("talk", 517),
        ("telnet", 23),
        ("tftp", 69),
        ("time", 37),
        ("uucp", 540),
        ("who", 513),
        ("whois", 43),
        ("www", 80),
        ("xdmcp", 177),
    ]);

    /// Protocol names accepted in extended access lists.
    static ref NAMED_PROTOCOLS: HashMap<&'static str, u8> = HashMap::from([
        ("ahp", 51),
        ("eigrp", 88),
        ("esp", 50),
        ("gre", 47),
        ("icmp", 1),
        ("igmp", 2),
        ("ip", 0),
        ("ipinip", 4),
        ("ospf", 89),
        ("pim", 103),
        ("sctp", 132),
        ("tcp", 6),
        ("udp", 17),
        ("vrrp", 112),
    ]);
}

/// Canonical prefix of NX-OS management interfaces.
pub const NXOS_MANAGEMENT_INTERFACE_PREFIX: &str = "mgmt";

/// Parse a dotted-quad IPv4 address.
pub fn ip(s: &str) -> Result<Ipv4Addr, DecodeError> {
    s.parse().map_err(|_| DecodeError::InvalidIp(s.to_string()))
}

/// Get the 32-bit value of an address (most significant octet first).
pub fn ip_to_u32(ip: Ipv4Addr) -> u32 {
    u32::from(ip)
}

/// Build an address from its 32-bit value.
pub fn u32_to_ip(x: u32) -> Ipv4Addr {
    Ipv4Addr::from(x)
}

/// Parse a `<addr>/<len>` prefix. The host bits are kept as written.
pub fn prefix(s: &str) -> Result<Ipv4Net, DecodeError> {
    let err = || DecodeError::InvalidPrefix(s.to_string());
    let (addr, len) = s.split_once('/').ok_or_else(err)?;
    let addr = ip(addr).map_err(|_| err())?;
    let len: u8 = len.parse().map_err(|_| err())?;
    Ipv4Net::new(addr, len).map_err(|_| err())
}

/// Build a prefix from an address and a subnet mask (`10.0.0.1 255.255.255.0`).
pub fn prefix_from_mask(addr: &str, mask: &str) -> Result<Ipv4Net, DecodeError> {
    let addr = ip(addr)?;
    let len = num_subnet_bits(ip(mask)?);
    Ipv4Net::new(addr, len).map_err(|_| DecodeError::InvalidPrefix(format!("{addr} {mask}")))
}

/// Build a prefix from an address alone, using its classful mask (`network 10.0.0.0` in BGP).
pub fn classful_prefix(addr: &str) -> Result<Ipv4Net, DecodeError> {
    let addr = ip(addr)?;
    let first = addr.octets()[0];
    let len = if first < 128 {
        8
    } else if first < 192 {
        16
    } else if first < 224 {
        24
    } else {
        32
    };
    Ipv4Net::new(addr, len).map_err(|_| DecodeError::InvalidPrefix(addr.to_string()))
}

/// Count of leading one bits in a subnet mask.
pub fn num_subnet_bits(mask: Ipv4Addr) -> u8 {
    ip_to_u32(mask).leading_ones() as u8
}

/// Wildcard mask of a prefix length (`0xFFFFFFFF >>> len`).
pub fn wildcard_of_length(len: u8) -> u32 {
    u32::MAX.checked_shr(len as u32).unwrap_or(0)
}

/// Decode the address part of an ACL address specification.
///
/// Accepted forms are `any`, `host <ip>`, `<ip> <wildcard>`, `<prefix>` and a bare `<ip>`. The
/// result is the address together with its wildcard mask.
pub fn wildcard(words: &[&str]) -> Result<(Ipv4Addr, u32), DecodeError> {
    match words {
        ["any"] => Ok((Ipv4Addr::UNSPECIFIED, u32::MAX)),
        ["host", addr] => Ok((ip(addr)?, 0)),
        [addr, mask] => Ok((ip(addr)?, ip_to_u32(ip(mask)?))),
        [p] if p.contains('/') => {
            let p = prefix(p)?;
            Ok((p.addr(), wildcard_of_length(p.prefix_len())))
        }
        [addr] => Ok((ip(addr)?, 0)),
        _ => Err(DecodeError::InvalidIp(words.join(" "))),
    }
}

/// Parse a number, accepting at most `max`.
pub fn number(s: &str, max: u32) -> Result<u32, DecodeError> {
    s.parse::<u32>()
        .ok()
        .filter(|x| *x <= max)
        .ok_or_else(|| DecodeError::InvalidNumber(s.to_string()))
}

/// Parse any 32-bit unsigned number.
pub fn uint(s: &str) -> Result<u32, DecodeError> {
    number(s, u32::MAX)
}

/// Decode a port, either by number or by its service name.
pub fn port(s: &str) -> Result<u32, DecodeError> {
    if let Some(p) = NAMED_PORTS.get(s) {
        return Ok(*p);
    }
    number(s, MAX_PORT).map_err(|_| DecodeError::InvalidPort(s.to_string()))
}

/// Decode an IP protocol, either by number or by its name.
pub fn protocol(s: &str) -> Result<IpProtocol, DecodeError> {
    if let Some(p) = NAMED_PROTOCOLS.get(s) {
        return Ok(IpProtocol(*p));
    }
    s.parse::<u8>()
        .map(IpProtocol)
        .map_err(|_| DecodeError::InvalidProtocol(s.to_string()))
}

/// Decode a DSCP value, either numeric (0 to 63) or a per-hop behavior name (`af21`, `cs3`,
/// `ef`, `default`).
pub fn dscp(s: &str) -> Result<u32, DecodeError> {
    let err = || DecodeError::InvalidNumber(s.to_string());
    let class = |x: &str| x.parse::<u32>().map_err(|_| err());
    match s {
        "default" => Ok(0),
        "ef" => Ok(46),
        s if s.starts_with("af") && s.len() == 4 => {
            let (x, y) = (class(&s[2..3])?, class(&s[3..4])?);
            if (1..=4).contains(&x) && (1..=3).contains(&y) {
                Ok(8 * x + 2 * y)
            } else {
                Err(err())
            }
        }
        s if s.starts_with("cs") && s.len() == 3 => match class(&s[2..])? {
            x @ 0..=7 => Ok(8 * x),
            _ => Err(err()),
        },
        s => number(s, 63),
    }
}

/// Decode a port specifier (`eq`, `gt`, `lt`, `neq` or `range`) into closed subranges.
pub fn port_ranges(op: &str, operands: &[&str]) -> Result<Vec<SubRange>, DecodeError> {
    let err = || DecodeError::InvalidPortRange(format!("{} {}", op, operands.join(" ")));
    let ports = operands
        .iter()
        .map(|p| port(p))
        .collect::<Result<Vec<u32>, _>>()?;
    match (op, ports.as_slice()) {
        ("eq", ports) if !ports.is_empty() => {
            Ok(ports.iter().map(|p| SubRange::singleton(*p)).collect())
        }
        ("gt", [p]) if *p < MAX_PORT => Ok(vec![SubRange::new(p + 1, MAX_PORT)]),
        ("lt", [p]) if *p > 0 => Ok(vec![SubRange::new(0, p - 1)]),
        ("neq", [p]) => {
            let mut ranges = Vec::with_capacity(2);
            if *p > 0 {
                ranges.push(SubRange::new(0, p - 1));
            }
            if *p < MAX_PORT {
                ranges.push(SubRange::new(p + 1, MAX_PORT));
            }
            Ok(ranges)
        }
        ("range", [lo, hi]) if lo <= hi => Ok(vec![SubRange::new(*lo, *hi)]),
        _ => Err(err()),
    }
}

/// Decode a community value.
pub fn community(s: &str) -> Result<u32, DecodeError> {
    let err = || DecodeError::InvalidCommunity(s.to_string());
    match s {
        "internet" => Ok(COMMUNITY_INTERNET),
        "no-export" => Ok(COMMUNITY_NO_EXPORT),
        "no-advertise" => Ok(COMMUNITY_NO_ADVERTISE),
        "local-AS" | "local-as" => Ok(COMMUNITY_LOCAL_AS),
        s => match s.split_once(':') {
            Some((high, low)) => {
                let high = number(high, 0xFFFF).map_err(|_| err())?;
                let low = number(low, 0xFFFF).map_err(|_| err())?;
                Ok((high << 16) | low)
            }
            None => uint(s).map_err(|_| err()),
        },
    }
}

/// Decode one AS term of an AS-path regex: a number, or `.` matching any AS.
pub fn as_path_regex_range(s: &str) -> Result<SubRange, DecodeError> {
    if s == "." {
        Ok(SubRange::new(0, MAX_AS_PATH_REGEX_AS))
    } else {
        Ok(SubRange::singleton(uint(s)?))
    }
}

/// Decode `low` or `low-high`.
pub fn subrange(s: &str) -> Result<SubRange, DecodeError> {
    let err = || DecodeError::InvalidSubRange(s.to_string());
    match s.split_once('-') {
        Some((lo, hi)) => {
            let lo = uint(lo.trim()).map_err(|_| err())?;
            let hi = uint(hi.trim()).map_err(|_| err())?;
            if lo > hi {
                return Err(err());
            }
            Ok(SubRange::new(lo, hi))
        }
        None => Ok(SubRange::singleton(uint(s.trim()).map_err(|_| err())?)),
    }
}

/// Decode a comma separated list of subranges (`1-4,7,10-12`).
pub fn subrange_list(s: &str) -> Result<Vec<SubRange>, DecodeError> {
    s.split(',')
        .filter(|x| !x.is_empty())
        .map(subrange)
        .collect()
}

/// Decode `permit` or `deny`.
pub fn line_action(s: &str) -> Result<LineAction, DecodeError> {
    match s {
        "permit" => Ok(LineAction::Permit),
        "deny" => Ok(LineAction::Deny),
        _ => Err(DecodeError::InvalidLineAction(s.to_string())),
    }
}

/// Map an interface name alias (for instance `Gi`, `ge` or `fe`) to its canonical prefix.
///
/// The first entry of the ordered prefix table whose lower-cased name starts with the lower-cased
/// alias wins.
pub fn canonical_interface_prefix(alias: &str) -> Result<&'static str, DecodeError> {
    let alias_lower = alias.to_lowercase();
    INTERFACE_PREFIXES
        .iter()
        .find(|(key, _)| key.to_lowercase().starts_with(&alias_lower))
        .map(|(_, canonical)| *canonical)
        .ok_or_else(|| DecodeError::UnknownInterfacePrefix(alias.to_string()))
}

/// Split an interface name into its alphabetic prefix and the remainder.
///
/// The prefix starts with a letter and may contain inner dashes (`Port-channel`, `tunnel-te`).
pub fn split_interface_name(name: &str) -> Result<(&str, &str), DecodeError> {
    let bytes = name.as_bytes();
    if bytes.first().map_or(true, |c| !c.is_ascii_alphabetic()) {
        return Err(DecodeError::InvalidInterfaceName(name.to_string()));
    }
    let mut end = 0;
    for (i, c) in bytes.iter().enumerate() {
        if c.is_ascii_alphabetic() {
            end = i + 1;
        } else if *c != b'-' {
            break;
        }
    }
    Ok(name.split_at(end))
}

/// Canonicalize a full interface name (`Gi0/1` becomes `GigabitEthernet0/1`).
pub fn canonical_interface_name(name: &str) -> Result<String, DecodeError> {
    let (alias, rest) = split_interface_name(name)?;
    Ok(format!("{}{}", canonical_interface_prefix(alias)?, rest))
}

/// Expand an interface name that may end in a range (`Ethernet1-4`, `GigabitEthernet0/1-2,5`).
///
/// The alphabetic prefix is canonicalized. Only the last numeric component may be a range.
pub fn expand_interface_range(name: &str) -> Result<Vec<String>, DecodeError> {
    let (alias, rest) = split_interface_name(name)?;
    let canonical = canonical_interface_prefix(alias)?;
    let split = rest.rfind(['/', '.', ':']).map(|i| i + 1).unwrap_or(0);
    let (middle, last) = rest.split_at(split);
    if last.contains('-') || last.contains(',') {
        let ranges = subrange_list(last)?;
        Ok(ranges
            .iter()
            .flat_map(|r| r.start..=r.end)
            .map(|i| format!("{canonical}{middle}{i}"))
            .collect())
    } else {
        Ok(vec![format!("{canonical}{rest}")])
    }
}

/// Expand a Cumulus interface glob (`swp1-4,swp6`, `swp1-3,5`, `bond2.4094`).
///
/// Elements without an alphabetic prefix reuse the prefix of the previous element. Names are
/// never canonicalized.
pub fn expand_interface_glob(glob: &str) -> Result<Vec<String>, DecodeError> {
    let mut names = Vec::new();
    let mut last_prefix = String::new();
    for elem in glob.split(',').filter(|x| !x.is_empty()) {
        let digits_at = elem
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '-')
            .last()
            .map(|(i, _)| i)
            .unwrap_or(elem.len());
        let (prefix, range) = elem.split_at(digits_at);
        if !prefix.is_empty() {
            last_prefix = prefix.to_string();
        } else if last_prefix.is_empty() {
            return Err(DecodeError::InvalidInterfaceName(glob.to_string()));
        }
        if range.is_empty() {
            names.push(last_prefix.clone());
        } else if range.contains('-') {
            let r = subrange(range)?;
            names.extend((r.start..=r.end).map(|i| format!("{last_prefix}{i}")));
        } else {
            names.push(format!("{last_prefix}{range}"));
        }
    }
    Ok(names)
}

/// Default bandwidth (in bits per second) of an interface with the given canonical prefix.
///
/// Bundles and port channels derive their bandwidth from the members, hence `None`.
pub fn default_bandwidth(canonical_prefix: &str) -> Option<f64> {
    match canonical_prefix {
        "Ethernet" => Some(1e7),
        "FastEthernet" => Some(100e6),
        "GigabitEthernet" => Some(1e9),
        "LongReachEthernet" => Some(10e6),
        "TenGigabitEthernet" => Some(10e9),
        "Loopback" => Some(8e9),
        "Bundle-Ethernet" | "Port-channel" => None,
        _ => Some(1e12),
    }
}
