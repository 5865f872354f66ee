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

//! # Diagnostics
//!
//! Three kinds of non-fatal diagnostics are collected while extracting a file:
//!
//! - **red flags**: something in the file was not understood or contradicts itself,
//! - **pedantic** notes: legal but suspicious constructs,
//! - **unimplemented** features: recognized syntax without a representation.
//!
//! Each kind is deduplicated by its text, keeping the first occurrence and its line.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;

/// A diagnostic that was promoted to an error by the [`Settings`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WarningError {
    /// A red flag while `red_flag_as_error` is set.
    #[error("Red flag: {0}")]
    RedFlag(String),
    /// An unimplemented feature while `unimplemented_as_error` is set.
    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}

/// Collected diagnostics of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings {
    /// Red flags, with the line they were first raised on
    pub red_flags: IndexMap<String, Option<usize>>,
    /// Pedantic notes, with the line they were first raised on
    pub pedantic: IndexMap<String, Option<usize>>,
    /// Unimplemented features, with the line they were first raised on
    pub unimplemented: IndexMap<String, Option<usize>>,
    #[serde(skip)]
    settings: Settings,
}

impl Warnings {
    /// Create an empty collection that follows the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Report a red flag.
    pub fn red_flag(
        &mut self,
        text: impl Into<String>,
        line: Option<usize>,
    ) -> Result<(), WarningError> {
        let text = text.into();
        log::warn!("{}{}", at(line), text);
        if self.settings.red_flag_as_error {
            return Err(WarningError::RedFlag(text));
        }
        if self.settings.red_flag_record {
            self.red_flags.entry(text).or_insert(line);
        }
        Ok(())
    }

    /// Report a pedantic note.
    pub fn pedantic(&mut self, text: impl Into<String>, line: Option<usize>) {
        let text = text.into();
        log::trace!("{}{}", at(line), text);
        if self.settings.pedantic_record {
            self.pedantic.entry(text).or_insert(line);
        }
    }

    /// Report an unimplemented feature.
    pub fn todo(&mut self, text: impl Into<String>, line: Option<usize>) -> Result<(), WarningError> {
        let text = text.into();
        log::debug!("{}unimplemented: {}", at(line), text);
        if self.settings.unimplemented_as_error {
            return Err(WarningError::Unimplemented(text));
        }
        if self.settings.unimplemented_record {
            self.unimplemented.entry(text).or_insert(line);
        }
        Ok(())
    }

    /// Check whether no diagnostic was recorded.
    pub fn is_empty(&self) -> bool {
        self.red_flags.is_empty() && self.pedantic.is_empty() && self.unimplemented.is_empty()
    }
}

fn at(line: Option<usize>) -> String {
    match line {
        Some(l) => format!("line {l}: "),
        None => String::new(),
    }
}
