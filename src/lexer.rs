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

//! Line-oriented lexer for configuration text, using Logos for the token categories.

use logos::Logos;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a lexical token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Spaces and tabs between tokens, never emitted by [`lex`].
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    /// IPv4 prefix, like `10.0.0.0/24`
    #[regex(r"[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+/[0-9]+", priority = 10)]
    IpPrefix,
    /// IPv4 address, like `10.0.0.1`
    #[regex(r"[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+", priority = 10)]
    Ip,
    /// Community in the `<16bit>:<16bit>` form
    #[regex(r"[0-9]+:[0-9]+", priority = 10)]
    Community,
    /// IPv6 address or prefix
    #[regex(r"[0-9a-fA-F]*:[0-9a-fA-F]*:[0-9a-fA-F:.]*(/[0-9]+)?", priority = 8)]
    Ipv6,
    /// Decimal number
    #[regex(r"[0-9]+", priority = 10)]
    Dec,
    /// Any other word
    #[regex(r"[^ \t\r\n\f]+", priority = 1, allow_greedy = true)]
    Word,
}

/// A single token together with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Category of the token
    pub kind: TokenKind,
    /// Text of the token
    pub text: String,
    /// Line number (starting at 1)
    pub line: usize,
    /// Byte offset of the token within its line (including the indentation)
    pub column: usize,
}

impl Token {
    /// Check whether the token has the given text.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A non-empty, non-comment line of configuration text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Line number (starting at 1)
    pub number: usize,
    /// Number of leading whitespace characters
    pub indent: usize,
    /// The line without its indentation and without trailing whitespace
    pub text: String,
    /// Tokens of the line
    pub tokens: Vec<Token>,
}

impl Line {
    /// Texts of all tokens.
    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// The original text starting at token `i` until the end of the line.
    pub fn rest_from(&self, i: usize) -> &str {
        match self.tokens.get(i) {
            Some(t) => &self.text[t.column - self.indent..],
            None => "",
        }
    }
}

/// Error while splitting text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Logos could not match a token.
    #[error("Line {line}: cannot tokenize '{text}'")]
    InvalidToken {
        /// Line of the offending text
        line: usize,
        /// The offending text
        text: String,
    },
}

/// Check whether a (trimmed) line is a comment.
fn is_comment(text: &str) -> bool {
    text.starts_with('!') || text.starts_with('#')
}

/// Split configuration text into lines of tokens. Empty lines and comments are dropped.
pub fn lex(text: &str) -> Result<Vec<Line>, LexError> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let number = i + 1;
        let content = raw.trim_start();
        let indent = raw.len() - content.len();
        let content = content.trim_end();
        if content.is_empty() || is_comment(content) {
            continue;
        }
        let mut tokens = Vec::new();
        for (kind, span) in TokenKind::lexer(content).spanned() {
            let kind = kind.map_err(|_| LexError::InvalidToken {
                line: number,
                text: content[span.clone()].to_string(),
            })?;
            if kind == TokenKind::Whitespace {
                continue;
            }
            tokens.push(Token {
                kind,
                text: content[span.clone()].to_string(),
                line: number,
                column: indent + span.start,
            });
        }
        lines.push(Line {
            number,
            indent,
            text: content.to_string(),
            tokens,
        });
    }
    log::trace!("lexed {} lines", lines.len());
    Ok(lines)
}
