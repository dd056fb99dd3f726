//! Docblock text handling: description summary and `@tag` annotations.

use regex::Regex;
use std::sync::LazyLock;

static RE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\s?").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// `/** doc */ declaration` on one line
static RE_SAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*\*(.*?)\*/\s*(.*)").unwrap());

/// A complete `/** ... */` comment, stored without its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docblock {
    body: String,
}

impl Docblock {
    /// Build from the verbatim lines of a block comment, delimiters included.
    pub fn from_block(raw: &str) -> Self {
        let body = match raw.find("/**") {
            Some(open) => {
                let inner_start = open + 3;
                match raw.rfind("*/") {
                    Some(close) if close >= inner_start => &raw[inner_start..close],
                    Some(_) => "",
                    None => &raw[inner_start..],
                }
            }
            None => raw,
        };
        Docblock {
            body: body.to_string(),
        }
    }

    /// Build from the text already found between `/**` and `*/`.
    pub fn from_body(body: &str) -> Self {
        Docblock {
            body: body.to_string(),
        }
    }

    /// Free text preceding the first `@tag` line, on a single line.
    pub fn description(&self) -> String {
        let lines = self
            .body
            .lines()
            .map(|line| RE_CONTINUATION.replace(line, ""))
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .take_while(|line| !line.starts_with('@'))
            .collect::<Vec<_>>();
        let joined = lines.join(" ");
        RE_WHITESPACE.replace_all(&joined, " ").trim().to_string()
    }

    /// Every `@tag ...` fragment, in order.
    ///
    /// A fragment runs from an `@` to just before the next `@` on the same
    /// line, so an address like `me@host` inside prose is split as well.
    pub fn annotations(&self) -> Vec<String> {
        let mut annotations = Vec::new();
        for line in self.body.lines() {
            let line = line.trim();
            let line = line.strip_prefix('*').map_or(line, |rest| {
                rest.strip_prefix(' ').unwrap_or(rest)
            });
            let Some(first) = line.find('@') else {
                continue;
            };
            let mut rest = &line[first..];
            loop {
                match rest[1..].find('@') {
                    Some(next) => {
                        annotations.push(rest[..next + 1].trim().to_string());
                        rest = &rest[next + 1..];
                    }
                    None => {
                        annotations.push(rest.trim().to_string());
                        break;
                    }
                }
            }
        }
        annotations.retain(|a| a.starts_with('@'));
        annotations
    }
}

/// A docblock and the code that follows it on the same line.
#[derive(Debug)]
pub struct SameLine<'a> {
    pub docblock: Docblock,
    pub declaration: &'a str,
    /// Byte offset of `declaration` within the line.
    pub column: usize,
}

/// Split `/** doc */ code` into its parts. `None` when nothing but
/// whitespace follows the comment.
pub fn same_line(line: &str) -> Option<SameLine<'_>> {
    let caps = RE_SAME_LINE.captures(line)?;
    let declaration = caps.get(2).filter(|m| !m.as_str().is_empty())?;
    Some(SameLine {
        docblock: Docblock::from_body(&caps[1]),
        declaration: declaration.as_str(),
        column: declaration.start(),
    })
}
