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

//! Settings controlling how strictly a configuration file is treated.

use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};

/// Settings of the parser and the extractor. They can be flattened into a command line parser.
#[derive(Debug, Clone, PartialEq, Eq, Args, Serialize, Deserialize)]
pub struct Settings {
    /// Abort a file on the first line that matches no production, instead of reporting a red flag.
    #[clap(long = "fail-on-unrecognized", action = ArgAction::SetFalse)]
    pub unrecognized_as_red_flag: bool,
    /// Abort a file on the first red flag.
    #[clap(long)]
    pub red_flag_as_error: bool,
    /// Abort a file on the first unimplemented feature.
    #[clap(long)]
    pub unimplemented_as_error: bool,
    /// Do not keep red flags in the warnings of a file.
    #[clap(long = "no-red-flags", action = ArgAction::SetFalse)]
    pub red_flag_record: bool,
    /// Do not keep pedantic notes in the warnings of a file.
    #[clap(long = "no-pedantic", action = ArgAction::SetFalse)]
    pub pedantic_record: bool,
    /// Do not keep unimplemented features in the warnings of a file.
    #[clap(long = "no-unimplemented", action = ArgAction::SetFalse)]
    pub unimplemented_record: bool,
    /// Maximum depth of nested blocks.
    #[clap(long, default_value_t = 16)]
    pub max_parse_tree_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unrecognized_as_red_flag: true,
            red_flag_as_error: false,
            unimplemented_as_error: false,
            red_flag_record: true,
            pedantic_record: true,
            unimplemented_record: true,
            max_parse_tree_depth: 16,
        }
    }
}

impl Settings {
    /// Settings that abort on every red flag and on every unrecognized line.
    pub fn strict() -> Self {
        Self {
            unrecognized_as_red_flag: false,
            red_flag_as_error: true,
            ..Default::default()
        }
    }
}
