//! Declaration classification: an ordered rule list, first match wins.
//!
//! Patterns overlap on purpose (`const f = () => ...` is both a constant
//! assignment and an arrow function); the position in [`DECLARATION_RULES`]
//! decides.

use regex::Regex;
use std::sync::LazyLock;

/// What kind of entry a declaration line produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Function,
    Class,
    Constant,
    Hook,
}

/// Result of matching a line against one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Emit(EntryKind),
    /// Recognized, but the docblock is dropped without an entry.
    Suppress,
}

/// Classification of the first code line after a docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    Declaration { kind: EntryKind, name: &'a str },
    Suppressed,
    Unrecognized,
}

pub struct Rule {
    pub outcome: Outcome,
    pattern: Regex,
}

impl Rule {
    fn new(outcome: Outcome, pattern: &str) -> Self {
        Rule {
            outcome,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

pub static DECLARATION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use EntryKind::*;
    vec![
        Rule::new(Outcome::Emit(Function), r"function\s+(\w+)\s*\("),
        Rule::new(
            Outcome::Emit(Class),
            r"(?:abstract\s+)?(?:class|interface|trait)\s+(\w+)",
        ),
        Rule::new(Outcome::Emit(Constant), r"const\s+(\w+)\s*="),
        // PHP define('NAME', ...)
        Rule::new(Outcome::Emit(Constant), r#"define\s*\(\s*["'](\w+)["']"#),
        Rule::new(Outcome::Emit(Hook), r#"\bon\(\s*['"`](\w+)['"`]\s*[,)]"#),
        // WordPress add_filter/add_action registrations
        Rule::new(
            Outcome::Suppress,
            r#"add_(?:filter|action)\s*\(\s*["'][^"']+["']\s*,\s*["'](\w+)["']"#,
        ),
        Rule::new(
            Outcome::Emit(Function),
            r"(?:const|let|var)\s+(\w+)\s*=\s*\(?.*\)?\s*=>",
        ),
        // anonymous `= function (`
        Rule::new(Outcome::Suppress, r"=\s*function\s*\("),
    ]
});

// Methods inside a class body
static RE_METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:public\s+|private\s+|protected\s+)?(?:static\s+)?function\s+(\w+)\s*\(")
        .unwrap()
});

/// Classify a line against [`DECLARATION_RULES`] in priority order.
pub fn classify(line: &str) -> Classification<'_> {
    for rule in DECLARATION_RULES.iter() {
        let Some(caps) = rule.pattern.captures(line) else {
            continue;
        };
        return match rule.outcome {
            Outcome::Suppress => Classification::Suppressed,
            Outcome::Emit(kind) => match caps.get(1) {
                Some(name) => Classification::Declaration {
                    kind,
                    name: name.as_str(),
                },
                None => Classification::Unrecognized,
            },
        };
    }
    Classification::Unrecognized
}

/// Name of the method declared on `line`, if any.
pub fn method_name(line: &str) -> Option<&str> {
    RE_METHOD
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
