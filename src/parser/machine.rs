//! Block-comment state machine shared by the file and method scanners.
//!
//! ```text
//!   Idle ──/**──▶ Capturing ──…*/──▶ PendingMatch ──code line──▶ Idle
//!    │              ▲   │                 │
//!    │              └/**┘                 │
//!    └──/** … */ (one line)───────────────┘
//! ```
//!
//! A `/**` line always starts over: it restarts an open capture and drops a
//! pending docblock. Blank lines, `//` comments and stray `*` lines never
//! leave `PendingMatch`; the first other line hands the docblock to the
//! caller.

use crate::parser::docblock::Docblock;
use regex::Regex;
use std::mem;
use std::sync::LazyLock;

static RE_BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*\*").unwrap());

static RE_BLOCK_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*/\s*$").unwrap());

static RE_BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*$").unwrap());

static RE_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//").unwrap());

static RE_STRAY_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\*").unwrap());

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    /// Inside a `/**` block; holds the verbatim lines seen so far.
    Capturing(String),
    /// A complete docblock waiting for the next code line.
    PendingMatch(Docblock),
}

/// First code line after a docblock. The machine is `Idle` again.
#[derive(Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub docblock: Docblock,
    pub line: &'a str,
}

#[derive(Debug, Default)]
pub struct DocblockMachine {
    state: ScanState,
}

impl DocblockMachine {
    #[cfg(test)]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn feed<'a>(&mut self, line: &'a str) -> Option<Candidate<'a>> {
        if RE_BLOCK_OPEN.is_match(line) {
            let buffer = format!("{}\n", line);
            // `/**/` closes with the opening marker's own star.
            let rest = line.trim_start().get(2..).unwrap_or("");
            self.state = if rest.contains("*/") {
                ScanState::PendingMatch(Docblock::from_block(&buffer))
            } else {
                ScanState::Capturing(buffer)
            };
            return None;
        }

        match mem::take(&mut self.state) {
            ScanState::Capturing(mut buffer) => {
                buffer.push_str(line);
                buffer.push('\n');
                self.state = if RE_BLOCK_CLOSE.is_match(line) {
                    ScanState::PendingMatch(Docblock::from_block(&buffer))
                } else {
                    ScanState::Capturing(buffer)
                };
                None
            }
            state if is_filler(line) => {
                self.state = state;
                None
            }
            ScanState::PendingMatch(docblock) => Some(Candidate { docblock, line }),
            ScanState::Idle => None,
        }
    }

    /// End of input: a docblock still waiting for code, if any.
    ///
    /// An unterminated capture is not a docblock and is dropped.
    pub fn finish(self) -> Option<Docblock> {
        match self.state {
            ScanState::PendingMatch(docblock) => Some(docblock),
            _ => None,
        }
    }
}

fn is_filler(line: &str) -> bool {
    RE_BLANK.is_match(line) || RE_LINE_COMMENT.is_match(line) || RE_STRAY_STAR.is_match(line)
}
