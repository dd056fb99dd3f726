//! Method extraction inside a class body.

use crate::model::{ClassBoundary, DocEntry};
use crate::parser::docblock::{self, Docblock};
use crate::parser::machine::{Candidate, DocblockMachine};
use crate::parser::rules;

/// Documented methods between the boundary lines, in source order.
///
/// A docblock pairs with the next code line, or with the code after it on
/// the same line, and only when that code declares a method. Anything else
/// drops the docblock.
pub fn scan_methods(lines: &[&str], boundary: ClassBoundary) -> Vec<DocEntry> {
    let body = lines
        .get(boundary.start + 1..boundary.end)
        .unwrap_or_default();
    let mut machine = DocblockMachine::default();
    let mut methods = Vec::new();

    for &line in body {
        if let Some(pair) = docblock::same_line(line) {
            methods.extend(method_entry(&pair.docblock, pair.declaration));
            continue;
        }
        if let Some(Candidate { docblock, line }) = machine.feed(line) {
            methods.extend(method_entry(&docblock, line));
        }
    }

    methods
}

fn method_entry(docblock: &Docblock, line: &str) -> Option<DocEntry> {
    let name = rules::method_name(line)?;
    Some(DocEntry {
        name: name.to_string(),
        doc: docblock.description(),
        annotations: docblock.annotations(),
    })
}
