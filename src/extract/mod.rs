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

//! # Extraction
//!
//! The [`Extractor`] walks the parse tree of one file depth first. Every node is *entered* before
//! its children are visited and *exited* afterwards. Both events are dispatched on the
//! [`NodeKind`] to the handlers of the Cisco or the NCLU rules, which mutate the
//! [`VendorConfiguration`] under construction and the [`ExtractionContext`].
//!
//! ```
//! use vendorcfg::{parse_vendor_config, settings::Settings, ConfigFormat};
//!
//! let extraction = parse_vendor_config("hostname R1\n", ConfigFormat::Cisco, &Settings::default())?;
//! assert_eq!(extraction.config.hostname.as_deref(), Some("R1"));
//! assert!(extraction.warnings.is_empty());
//! # Ok::<(), vendorcfg::VendorConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    decode::DecodeError,
    parser::{Node, NodeKind, ParseError},
    representation::{BgpProcess, Interface, PeerGroup, VendorConfiguration},
    settings::Settings,
    types::Vendor,
    warnings::{WarningError, Warnings},
};

mod cisco;
pub mod context;
mod nclu;

pub use context::{ExtractionContext, PeerRef};

/// Fatal error while extracting a file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A token could not be decoded.
    #[error("{0}")]
    Decode(#[from] DecodeError),
    /// The parse tree is missing a required capture.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A diagnostic was promoted to an error.
    #[error("{0}")]
    Warning(#[from] WarningError),
    /// A route-map declares the same clause number twice.
    #[error("Route map '{map}' already contains clause numbered '{number}'")]
    DuplicateRouteMapClause {
        /// Name of the route-map
        map: String,
        /// Clause number
        number: u32,
    },
    /// `activate` outside of a neighbor or peer group.
    #[error("no peer or peer group to activate in this context")]
    NoPeerToActivate,
    /// `remote-as` outside of a neighbor or peer group.
    #[error("no peer or peer group in context")]
    RemoteAsWithoutPeer,
    /// Inheritance configured on the process itself.
    #[error("Invalid peer context for inheritance")]
    InvalidInheritanceContext,
    /// `redistribute` inside a neighbor or peer group.
    #[error("do not currently handle per-neighbor redistribution policies")]
    PerNeighborRedistribution,
    /// `address-family` inside another address family.
    #[error("Nested address families are not supported")]
    NestedAddressFamily,
    /// A BGP statement for a VRF without a BGP process.
    #[error("No BGP process for vrf '{0}'")]
    MissingBgpProcess(String),
    /// A statement outside of the block it belongs to.
    #[error("Statement outside of its context: {0}")]
    MissingContext(&'static str),
    /// Location of an error.
    #[error("Line {line} ({text}): {source}")]
    AtLine {
        /// Line number
        line: usize,
        /// Text of the offending line
        text: String,
        /// The actual error
        source: Box<ExtractionError>,
    },
}

impl ExtractionError {
    /// Attach the location of `node`, unless the error already carries one.
    fn at(self, node: &Node) -> Self {
        match self {
            e @ Self::AtLine { .. } => e,
            e => Self::AtLine {
                line: node.line,
                text: node.text.clone(),
                source: Box::new(e),
            },
        }
    }

    /// The error without its location.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::AtLine { source, .. } => source.root_cause(),
            e => e,
        }
    }
}

/// Result of extracting one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// The vendor configuration
    pub config: VendorConfiguration,
    /// Diagnostics raised while extracting
    pub warnings: Warnings,
}

/// Tree walker building a [`VendorConfiguration`] from a parse tree.
#[derive(Debug)]
pub struct Extractor {
    vendor: Vendor,
    config: VendorConfiguration,
    ctx: ExtractionContext,
    warnings: Warnings,
}

impl Extractor {
    /// Create an extractor for a file of the given vendor.
    pub fn new(vendor: Vendor, settings: &Settings) -> Self {
        Self {
            vendor,
            config: VendorConfiguration::new(vendor),
            ctx: ExtractionContext::default(),
            warnings: Warnings::new(settings.clone()),
        }
    }

    /// Walk all productions below `root`.
    pub fn extract(&mut self, root: &Node) -> Result<(), ExtractionError> {
        log::debug!(
            "extracting {} statements of a {} configuration",
            root.children.len(),
            self.vendor
        );
        root.children.iter().try_for_each(|child| self.walk(child))
    }

    /// Finish the extraction.
    pub fn finalize(self) -> Extraction {
        log::debug!(
            "extracted {} interfaces, {} bgp processes, {} route-maps ({} red flags, {} unimplemented)",
            self.config.interfaces.len(),
            self.config.bgp_processes.len(),
            self.config.route_maps.len(),
            self.warnings.red_flags.len(),
            self.config.unimplemented_features.len(),
        );
        Extraction {
            config: self.config,
            warnings: self.warnings,
        }
    }

    fn walk(&mut self, node: &Node) -> Result<(), ExtractionError> {
        self.enter(node).map_err(|e| e.at(node))?;
        for child in node.children.iter() {
            self.walk(child)?;
        }
        self.exit(node).map_err(|e| e.at(node))
    }

    fn enter(&mut self, node: &Node) -> Result<(), ExtractionError> {
        match node.kind {
            NodeKind::Null => Ok(()),
            NodeKind::Unrecognized => {
                self.red_flag(format!("Line {} unrecognized: {}", node.line, node.text), node)
            }
            _ => match self.vendor {
                Vendor::Cisco => self.enter_cisco(node),
                Vendor::CumulusNclu => self.enter_nclu(node),
            },
        }
    }

    fn exit(&mut self, node: &Node) -> Result<(), ExtractionError> {
        match node.kind {
            NodeKind::Null | NodeKind::Unrecognized => Ok(()),
            _ => match self.vendor {
                Vendor::Cisco => self.exit_cisco(node),
                Vendor::CumulusNclu => self.exit_nclu(node),
            },
        }
    }

    fn red_flag(&mut self, text: impl Into<String>, node: &Node) -> Result<(), ExtractionError> {
        Ok(self.warnings.red_flag(text, Some(node.line))?)
    }

    fn pedantic(&mut self, text: impl Into<String>, node: &Node) {
        self.warnings.pedantic(text, Some(node.line))
    }

    /// Record the use of a feature without representation.
    fn todo(&mut self, feature: &str, node: &Node) -> Result<(), ExtractionError> {
        let text = format!("{}: {}", self.vendor, feature);
        self.config.unimplemented_features.insert(text.clone());
        Ok(self.warnings.todo(text, Some(node.line))?)
    }

    /// The peer group statements currently apply to.
    fn current_peer(&mut self) -> Result<&mut PeerGroup, ExtractionError> {
        let peer = self
            .ctx
            .current_peer_group
            .as_ref()
            .ok_or(ExtractionError::MissingContext("bgp peer group"))?;
        resolve(&mut self.config, &mut self.ctx.dummy_peer_group, peer)
    }

    /// Apply `f` to every interface of the current block.
    fn each_interface(&mut self, mut f: impl FnMut(&mut Interface)) {
        for name in self.ctx.current_interfaces.iter() {
            if let Some(iface) = self.config.interfaces.get_mut(name) {
                f(iface)
            }
        }
    }
}

/// Look up the peer group a [`PeerRef`] refers to. Scratch references resolve to `dummy`.
fn resolve<'a>(
    config: &'a mut VendorConfiguration,
    dummy: &'a mut PeerGroup,
    peer: &PeerRef,
) -> Result<&'a mut PeerGroup, ExtractionError> {
    let missing = || ExtractionError::MissingContext("bgp peer group");
    match peer {
        PeerRef::Dummy | PeerRef::Ipv6 => Ok(dummy),
        PeerRef::Master(vrf) => Ok(&mut process(config, vrf)?.master),
        PeerRef::Ip(vrf, ip) => process(config, vrf)?
            .ip_peer_groups
            .get_mut(ip)
            .ok_or_else(missing),
        PeerRef::Named(vrf, name) => process(config, vrf)?
            .named_peer_groups
            .get_mut(name)
            .ok_or_else(missing),
        PeerRef::Dynamic(vrf, prefix) => process(config, vrf)?
            .dynamic_peer_groups
            .get_mut(prefix)
            .ok_or_else(missing),
        PeerRef::PeerSession(vrf, name) => process(config, vrf)?
            .peer_sessions
            .get_mut(name)
            .ok_or_else(missing),
        PeerRef::Interface(vrf, name) => process(config, vrf)?
            .interface_peer_groups
            .get_mut(name)
            .ok_or_else(missing),
    }
}

/// The BGP process of a VRF, which must exist.
fn process<'a>(
    config: &'a mut VendorConfiguration,
    vrf: &str,
) -> Result<&'a mut BgpProcess, ExtractionError> {
    config
        .bgp_processes
        .get_mut(vrf)
        .ok_or_else(|| ExtractionError::MissingBgpProcess(vrf.to_string()))
}
