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

//! # Parse tree
//!
//! Both grammars produce the same flat tagged tree: every [`Node`] names the production it was
//! recognized as ([`NodeKind`]), keeps the source line, the tokens it captured (by name) and its
//! child productions. The extractor consumes this tree with a single recursive walk.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::{Line, Token, TokenKind};

pub mod cisco;
pub mod nclu;

/// Error raised while building the parse tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line matches no production and unrecognized lines are not tolerated.
    #[error("Line {line} unrecognized: {text}")]
    Unrecognized {
        /// Line number
        line: usize,
        /// Text of the line
        text: String,
    },
    /// The nesting of blocks is deeper than allowed.
    #[error("Line {line}: blocks nested deeper than {max_depth}")]
    TooDeep {
        /// Line number
        line: usize,
        /// Maximum allowed depth
        max_depth: usize,
    },
    /// A production is missing a token the extractor requires.
    #[error("Line {line}: production {kind:?} has no capture named '{name}'")]
    MissingCapture {
        /// Line number
        line: usize,
        /// Kind of the production
        kind: NodeKind,
        /// Name of the capture
        name: &'static str,
    },
}

/// Identity of a production.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // root and generic productions
    CiscoConfiguration,
    NcluConfiguration,
    Null,
    Unrecognized,

    // top level
    Hostname,
    InterfaceStanza,
    RouterBgpStanza,
    RouterOspfStanza,
    RouterRipStanza,
    VrfContextStanza,
    IpRouteStanza,
    IpDefaultGateway,
    IpPrefixListStanza,
    IpPrefixListTail,
    NoIpPrefixList,
    StandardAccessListStanza,
    StandardAccessListTail,
    ExtendedAccessListStanza,
    ExtendedAccessListTail,
    IpCommunityListStandardStanza,
    IpCommunityListStandardTail,
    IpCommunityListExpandedStanza,
    IpCommunityListExpandedTail,
    IpAsPathAccessListStanza,
    IpAsPathAccessListTail,
    RouteMapStanza,
    NoRouteMap,
    SwitchingMode,

    // interface body
    DescriptionIf,
    IpAddressIf,
    IpAddressSecondaryIf,
    ShutdownIf,
    BandwidthIf,
    MtuIf,
    VrfForwardingIf,
    VrfMemberIf,
    IpAccessGroupIf,
    IpPolicyIf,
    IpOspfCostIf,
    IpOspfDeadIntervalIf,
    IpOspfDeadIntervalMinimalIf,
    SwitchportIf,
    SwitchportAccessIf,
    SwitchportModeIf,
    SwitchportTrunkAllowedIf,
    SwitchportTrunkEncapsulationIf,
    SwitchportTrunkNativeIf,
    Ipv6If,

    // router bgp body
    RouterIdBgp,
    ClusterIdBgp,
    AlwaysCompareMedBgp,
    BgpListenRange,
    AutoSummaryBgp,
    NetworkBgp,
    AggregateAddressBgp,
    RedistributeBgp,
    NoRedistributeConnectedBgp,
    MaximumPeersBgp,
    NeighborStanza,
    PeerGroupCreation,
    NoNeighborActivate,
    NoNeighborShutdown,
    NoShutdownBgp,
    AddressFamily,
    TemplatePeer,
    TemplatePeerPolicy,
    TemplatePeerSession,
    NeighborGroup,
    NexusNeighbor,
    NexusVrf,

    // neighbor tails
    RemoteAsTail,
    ActivateTail,
    RouteMapTail,
    PrefixListTail,
    SendCommunityTail,
    RouteReflectorClientTail,
    RemovePrivateAsTail,
    NextHopSelfTail,
    UpdateSourceTail,
    DefaultOriginateTail,
    DescriptionTail,
    ShutdownTail,
    EbgpMultihopTail,
    AllowasInTail,
    DisablePeerAsCheckTail,
    DistributeListTail,
    PeerGroupAssignmentTail,
    InheritPeerSessionTail,
    InheritPeerPolicyTail,
    UseNeighborGroupTail,
    ClusterIdTail,

    // router ospf body
    RouterIdOspf,
    NetworkOspf,
    AreaNssaOspf,
    DefaultInformationOspf,
    PassiveInterfaceDefaultOspf,
    PassiveInterfaceOspf,
    RedistributeOspf,
    MaximumPathsOspf,

    // route-map body
    MatchAsPathRm,
    MatchCommunityRm,
    MatchIpAccessListRm,
    MatchIpPrefixListRm,
    MatchTagRm,
    MatchInterfaceRm,
    MatchIpv6Rm,
    SetAsPathPrependRm,
    SetCommListDeleteRm,
    SetCommunityRm,
    SetCommunityAdditiveRm,
    SetCommunityNoneRm,
    SetLocalPreferenceRm,
    SetMetricRm,
    SetMetricTypeRm,
    SetNextHopRm,
    SetNextHopPeerAddressRm,
    SetOriginRm,
    SetIpv6Rm,

    // cumulus nclu
    NcluHostname,
    NcluInterface,
    NcluLoopback,
    NcluIfIpAddress,
    NcluIfAlias,
    NcluIfVrf,
    NcluIfLinkSpeed,
    NcluIfBridgeAccess,
    NcluIfBridgeVids,
    NcluVrf,
    NcluVrfTable,
    NcluBgp,
    NcluBgpAutonomousSystem,
    NcluBgpRouterId,
    NcluBgpNeighbor,
    NcluBgpIpv4Unicast,
    NcluBgpNetwork,
    NcluBgpRedistribute,
    NcluBgpL2vpnEvpn,
    NcluNeighborRemoteAs,
    NcluNeighborPeerGroup,
    NcluNeighborDescription,
    NcluNeighborActivate,
    NcluNeighborRouteReflectorClient,
    NcluRoutingRoute,
    NcluRouteMap,
    NcluRouteMapMatchInterface,
    NcluUnimplemented,
    NcluDel,
}

/// A recognized production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Production this node was recognized as
    pub kind: NodeKind,
    /// Line number of the first line of the production (0 for the root)
    pub line: usize,
    /// Source text of the first line of the production
    pub text: String,
    /// Captured tokens, by name
    pub captures: IndexMap<&'static str, Vec<Token>>,
    /// Child productions, in text order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node for a production starting at `line`.
    pub fn new(kind: NodeKind, line: &Line) -> Self {
        Self {
            kind,
            line: line.number,
            text: line.text.clone(),
            captures: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create the root node of a file.
    pub fn root(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            line: 0,
            text: String::new(),
            captures: IndexMap::new(),
            children,
        }
    }

    /// Capture a token under `name`. Capturing the same name twice appends.
    pub fn with(mut self, name: &'static str, token: &Token) -> Self {
        self.captures.entry(name).or_default().push(token.clone());
        self
    }

    /// Capture a token if it exists.
    pub fn with_opt(self, name: &'static str, token: Option<&Token>) -> Self {
        match token {
            Some(t) => self.with(name, t),
            None => self,
        }
    }

    /// Capture a list of tokens under `name`.
    pub fn with_all(mut self, name: &'static str, tokens: &[Token]) -> Self {
        self.captures
            .entry(name)
            .or_default()
            .extend(tokens.iter().cloned());
        self
    }

    /// Capture free text (for instance the rest of a description line) under `name`.
    pub fn with_text(mut self, name: &'static str, text: &str, line: usize) -> Self {
        self.captures.entry(name).or_default().push(Token {
            kind: TokenKind::Word,
            text: text.to_string(),
            line,
            column: 0,
        });
        self
    }

    /// Capture a flag (presence of a keyword).
    pub fn flag(self, name: &'static str, token: &Token, set: bool) -> Self {
        if set {
            self.with(name, token)
        } else {
            self
        }
    }

    /// Add a child production.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Set all child productions.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// First token captured under `name`.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.captures.get(name).and_then(|x| x.first())
    }

    /// Text of the first token captured under `name`.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).map(|t| t.text.as_str())
    }

    /// All tokens captured under `name`.
    pub fn all(&self, name: &str) -> &[Token] {
        self.captures.get(name).map(|x| x.as_slice()).unwrap_or(&[])
    }

    /// Texts of all tokens captured under `name`.
    pub fn all_str(&self, name: &str) -> Vec<&str> {
        self.all(name).iter().map(|t| t.text.as_str()).collect()
    }

    /// Check whether something was captured under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.captures.get(name).map_or(false, |x| !x.is_empty())
    }

    /// Text of the first token captured under `name`, which the production requires.
    pub fn req(&self, name: &'static str) -> Result<&str, ParseError> {
        self.str(name).ok_or(ParseError::MissingCapture {
            line: self.line,
            kind: self.kind,
            name,
        })
    }
}

/// A line together with the lines indented below it.
#[derive(Debug, Clone)]
pub(crate) struct Block<'a> {
    /// The line opening the block
    pub line: &'a Line,
    /// Lines indented deeper than `line`, grouped recursively
    pub children: Vec<Block<'a>>,
}

impl<'a> Block<'a> {
    /// Texts of the tokens of the opening line.
    pub fn words(&self) -> Vec<&'a str> {
        self.line.words()
    }

    /// Tokens of the opening line.
    pub fn tokens(&self) -> &'a [Token] {
        &self.line.tokens
    }
}

/// Group lines into blocks by their indentation.
pub(crate) fn blocks(lines: &[Line]) -> Vec<Block<'_>> {
    let mut result = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let indent = lines[i].indent;
        let mut j = i + 1;
        while j < lines.len() && lines[j].indent > indent {
            j += 1;
        }
        result.push(Block {
            line: &lines[i],
            children: blocks(&lines[i + 1..j]),
        });
        i = j;
    }
    result
}
