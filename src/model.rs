//! Data model for extracted documentation, format-agnostic.

use serde::Serialize;

/// Everything extracted from a single source file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolTable {
    pub classes: Vec<ClassEntry>,
    /// Deduplicated by name, first occurrence wins.
    pub functions: Vec<DocEntry>,
    pub constants: Vec<DocEntry>,
    pub hooks: Vec<DocEntry>,
    /// File-level fragments joined with a blank line.
    pub file_doc: String,
}

/// A documented class, interface or trait.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ClassEntry {
    pub name: String,
    pub doc: String,
    pub annotations: Vec<String>,
    pub methods: Vec<DocEntry>,
}

/// A documented function, method, constant or hook.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    pub name: String,
    /// Description with whitespace collapsed, possibly empty.
    pub doc: String,
    /// Raw `@tag ...` fragments in source order.
    pub annotations: Vec<String>,
}

/// Line range of a class body.
///
/// `start` is the line holding the opening brace, `end` the line where brace
/// depth returns to zero. Both lines are outside the scanned body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBoundary {
    pub start: usize,
    pub end: usize,
}

/// A scanned file ready for rendering.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Display path with `/` separators.
    pub path: String,
    pub symbols: SymbolTable,
}

impl SymbolTable {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.functions.is_empty()
            && self.constants.is_empty()
            && self.hooks.is_empty()
            && self.file_doc.is_empty()
    }
}
