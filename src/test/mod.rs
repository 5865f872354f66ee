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

//! Tests of the whole pipeline, from text to the vendor configuration.

use crate::{parse_vendor_config, settings::Settings, ConfigFormat, Extraction, VendorConfigError};

mod test_bgp;
mod test_decode;
mod test_extract_cisco;
mod test_ospf;
mod test_warnings;

/// Extract a Cisco configuration with the default settings.
pub(crate) fn cisco(text: &str) -> Extraction {
    parse_vendor_config(text, ConfigFormat::Cisco, &Settings::default()).unwrap()
}

/// Extract a Cumulus NCLU command file with the default settings.
pub(crate) fn nclu(text: &str) -> Extraction {
    parse_vendor_config(text, ConfigFormat::Nclu, &Settings::default()).unwrap()
}

/// Extract a Cisco configuration with custom settings.
pub(crate) fn try_cisco(text: &str, settings: &Settings) -> Result<Extraction, VendorConfigError> {
    parse_vendor_config(text, ConfigFormat::Cisco, settings)
}

/// Parse a prefix literal.
pub(crate) fn net(s: &str) -> ipnet::Ipv4Net {
    s.parse().unwrap()
}

/// Parse an address literal.
pub(crate) fn ip(s: &str) -> std::net::Ipv4Addr {
    s.parse().unwrap()
}
