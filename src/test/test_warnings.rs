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

use super::{cisco, try_cisco};
use crate::{
    parser::ParseError,
    settings::Settings,
    warnings::{WarningError, Warnings},
    ExtractionError, VendorConfigError,
};

#[test]
fn unimplemented_features_are_deduplicated() {
    let e = cisco(
        "router bgp 1
 neighbor 10.0.0.1 remote-as 2
 neighbor 10.0.0.1 ebgp-multihop 2
 neighbor 10.0.0.1 ebgp-multihop 3
",
    );
    assert_eq!(e.warnings.unimplemented.len(), 1);
    assert_eq!(
        e.warnings.unimplemented.get("Cisco: bgp - ebgp-multihop"),
        Some(&Some(3))
    );
    assert_eq!(
        e.config.unimplemented_features.iter().collect::<Vec<_>>(),
        vec!["Cisco: bgp - ebgp-multihop"]
    );
}

#[test]
fn unrecognized_lines() {
    let e = cisco("hostname R1\nfrobnicate now\n");
    assert_eq!(e.config.hostname.as_deref(), Some("R1"));
    assert_eq!(
        e.warnings.red_flags.get("Line 2 unrecognized: frobnicate now"),
        Some(&Some(2))
    );
}

#[test]
fn red_flag_as_error() {
    let settings = Settings {
        red_flag_as_error: true,
        ..Default::default()
    };
    match try_cisco("hostname R1\nfrobnicate\n", &settings) {
        Err(VendorConfigError::Extraction(e)) => {
            assert_eq!(
                e.root_cause(),
                &ExtractionError::Warning(WarningError::RedFlag(
                    "Line 2 unrecognized: frobnicate".to_string()
                ))
            );
            assert!(matches!(e, ExtractionError::AtLine { line: 2, .. }));
        }
        r => panic!("unexpected result: {r:?}"),
    }
}

#[test]
fn unimplemented_as_error() {
    let settings = Settings {
        unimplemented_as_error: true,
        ..Default::default()
    };
    match try_cisco("router rip\n network 10.0.0.0\n", &settings) {
        Err(VendorConfigError::Extraction(e)) => assert_eq!(
            e.root_cause(),
            &ExtractionError::Warning(WarningError::Unimplemented("Cisco: rip".to_string()))
        ),
        r => panic!("unexpected result: {r:?}"),
    }
}

#[test]
fn strict_settings() {
    assert_eq!(
        try_cisco("hostname R1\nfrobnicate\n", &Settings::strict()),
        Err(VendorConfigError::Parse(ParseError::Unrecognized {
            line: 2,
            text: "frobnicate".to_string()
        }))
    );
    assert!(try_cisco("hostname R1\nrouter rip\n", &Settings::strict()).is_ok());
}

#[test]
fn nothing_is_recorded() {
    let settings = Settings {
        red_flag_record: false,
        pedantic_record: false,
        unimplemented_record: false,
        ..Default::default()
    };
    let e = try_cisco(
        "interface Ethernet0
interface Ethernet0
router rip
frobnicate
",
        &settings,
    )
    .unwrap();
    assert!(e.warnings.is_empty());
    assert_eq!(
        e.config.unimplemented_features.iter().collect::<Vec<_>>(),
        vec!["Cisco: rip"]
    );
}

#[test]
fn warnings_keep_the_first_line() {
    let mut w = Warnings::new(Settings::default());
    assert!(w.is_empty());
    w.red_flag("a", Some(3)).unwrap();
    w.red_flag("a", Some(5)).unwrap();
    w.red_flag("b", None).unwrap();
    w.pedantic("p", Some(1));
    w.todo("t", Some(7)).unwrap();
    w.todo("t", Some(2)).unwrap();
    assert!(!w.is_empty());
    assert_eq!(
        w.red_flags.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
        vec![("a", Some(3)), ("b", None)]
    );
    assert_eq!(w.pedantic.get("p"), Some(&Some(1)));
    assert_eq!(w.unimplemented.get("t"), Some(&Some(7)));
}

#[test]
fn promoted_warnings() {
    let mut w = Warnings::new(Settings {
        red_flag_as_error: true,
        unimplemented_as_error: true,
        ..Default::default()
    });
    assert_eq!(
        w.red_flag("bad", Some(1)),
        Err(WarningError::RedFlag("bad".to_string()))
    );
    assert_eq!(
        w.todo("missing", None),
        Err(WarningError::Unimplemented("missing".to_string()))
    );
    // pedantic notes are never promoted
    w.pedantic("note", None);
    assert!(w.red_flags.is_empty());
    assert_eq!(w.pedantic.len(), 1);
}

#[test]
fn extraction_serializes_without_settings() {
    let e = cisco("hostname R1\nrouter rip\n");
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["config"]["hostname"], "R1");
    assert_eq!(json["config"]["vendor"], "Cisco");
    assert_eq!(json["warnings"]["unimplemented"]["Cisco: rip"], 2);
    assert!(json["warnings"].get("settings").is_none());

    let back: crate::Extraction = serde_json::from_value(json).unwrap();
    assert_eq!(back.config, e.config);
    assert_eq!(back.warnings.unimplemented, e.warnings.unimplemented);
}
