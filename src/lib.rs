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

//! # VendorCfg: Vendor configuration extraction
//!
//! This library reads the configuration file of a single network device (Cisco IOS, NX-OS and
//! IOS-XR style text, or Cumulus NCLU `net add` commands) and turns it into a normalized
//! [`representation::VendorConfiguration`]: interfaces, BGP processes with their peer groups, the
//! OSPF process, static routes, filter lists and route-maps. Everything that could not be
//! understood is reported as a diagnostic instead of aborting, unless the [`settings::Settings`]
//! ask for it.
//!
//! ```
//! use vendorcfg::{parse_vendor_config, settings::Settings, ConfigFormat};
//!
//! let text = "hostname R1\ninterface Loopback0\n ip address 10.0.0.1 255.255.255.255\n";
//! let format = ConfigFormat::detect(text);
//! let extraction = parse_vendor_config(text, format, &Settings::default())?;
//! let lo = &extraction.config.interfaces["Loopback0"];
//! assert_eq!(lo.prefix, Some("10.0.0.1/32".parse().unwrap()));
//! # Ok::<(), vendorcfg::VendorConfigError>(())
//! ```
//!
//! ## Structure
//! A file passes through four stages:
//! - The module [`lexer`] splits the text into lines of typed tokens, remembering the indentation.
//! - The module [`parser`] groups the lines into blocks and classifies every line as a production
//!   ([`parser::NodeKind`]) of the Cisco ([`parser::cisco`]) or the NCLU ([`parser::nclu`])
//!   grammar, capturing the interesting tokens by name.
//! - The module [`extract`] walks the resulting tree and builds the configuration, keeping the
//!   current block in an [`extract::ExtractionContext`].
//! - The module [`representation`] contains the resulting data model. All of it is serializable.
//!
//! Tokens are turned into values with the functions in [`decode`]. Diagnostics are collected in
//! [`warnings::Warnings`].

#![deny(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![allow(clippy::result_large_err)]

pub mod decode;
pub mod extract;
pub mod lexer;
pub mod parser;
pub mod representation;
pub mod settings;
#[cfg(test)]
mod test;
pub mod types;
pub mod warnings;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use extract::{Extraction, ExtractionError, Extractor};
use lexer::LexError;
use parser::ParseError;
use settings::Settings;
use types::Vendor;

/// Syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum ConfigFormat {
    /// Cisco IOS, NX-OS or IOS-XR style configuration
    Cisco,
    /// Cumulus NCLU command file
    Nclu,
}

impl ConfigFormat {
    /// Guess the format from the content: a file whose first command starts with `net ` is an NCLU
    /// command file, everything else is treated as Cisco.
    pub fn detect(text: &str) -> Self {
        let first = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('!'));
        match first {
            Some(l) if l.starts_with("net ") => Self::Nclu,
            _ => Self::Cisco,
        }
    }

    /// The vendor of files in this format.
    pub fn vendor(&self) -> Vendor {
        match self {
            Self::Cisco => Vendor::Cisco,
            Self::Nclu => Vendor::CumulusNclu,
        }
    }
}

/// Error while processing a configuration file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VendorConfigError {
    /// The text could not be split into tokens.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// The lines could not be classified.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The parse tree could not be turned into a configuration.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),
}

/// Extract the configuration of a single file.
pub fn parse_vendor_config(
    text: &str,
    format: ConfigFormat,
    settings: &Settings,
) -> Result<Extraction, VendorConfigError> {
    let tree = match format {
        ConfigFormat::Cisco => {
            let text = parser::cisco::strip_banners(text);
            let lines = lexer::lex(&text)?;
            parser::cisco::parse(&lines, settings)?
        }
        ConfigFormat::Nclu => {
            let lines = lexer::lex(text)?;
            parser::nclu::parse(&lines, settings)?
        }
    };
    let mut extractor = Extractor::new(format.vendor(), settings);
    extractor.extract(&tree)?;
    Ok(extractor.finalize())
}
