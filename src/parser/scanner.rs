//! Per-file docblock scanner.
//!
//! Pairs each docblock with the first code line after it, classifies that
//! line through [`rules::classify`], and collects the result into a
//! [`SymbolTable`]. Classes get their body located by brace counting so the
//! method scanner can run inside it afterwards.

use crate::config::Include;
use crate::model::{ClassBoundary, ClassEntry, DocEntry, SymbolTable};
use crate::parser::docblock::{self, Docblock};
use crate::parser::machine::{Candidate, DocblockMachine};
use crate::parser::methods;
use crate::parser::rules::{self, Classification, EntryKind};
use std::collections::HashSet;

/// Extract the symbol table of one file.
pub fn scan(content: &str, include: &Include) -> SymbolTable {
    let lines: Vec<&str> = content.lines().collect();
    let mut table = TableBuilder::default();
    let mut machine = DocblockMachine::default();

    for (index, &line) in lines.iter().enumerate() {
        // A same-line pair is resolved on the spot; any pending docblock
        // keeps waiting for the next code line.
        if let Some(pair) = docblock::same_line(line) {
            table.resolve(&pair.docblock, pair.declaration, index, pair.column, &lines);
            continue;
        }

        if let Some(Candidate { docblock, line }) = machine.feed(line) {
            table.resolve(&docblock, line, index, 0, &lines);
        }
    }

    if let Some(docblock) = machine.finish() {
        table.push_file_doc(&docblock);
    }

    table.finish(&lines, include)
}

#[derive(Default)]
struct TableBuilder {
    classes: Vec<ClassEntry>,
    /// Index into `classes` with the body found for that class.
    boundaries: Vec<(usize, ClassBoundary)>,
    functions: Vec<DocEntry>,
    constants: Vec<DocEntry>,
    hooks: Vec<DocEntry>,
    file_docs: Vec<String>,
}

impl TableBuilder {
    fn resolve(
        &mut self,
        docblock: &Docblock,
        line: &str,
        index: usize,
        column: usize,
        lines: &[&str],
    ) {
        let (kind, name) = match rules::classify(line) {
            Classification::Declaration { kind, name } => (kind, name),
            Classification::Suppressed => return,
            Classification::Unrecognized => {
                self.push_file_doc(docblock);
                return;
            }
        };

        let entry = DocEntry {
            name: name.to_string(),
            doc: docblock.description(),
            annotations: docblock.annotations(),
        };
        match kind {
            EntryKind::Function => self.functions.push(entry),
            EntryKind::Constant => self.constants.push(entry),
            EntryKind::Hook => self.hooks.push(entry),
            EntryKind::Class => {
                if let Some(boundary) = find_class_boundary(lines, index, column) {
                    self.boundaries.push((self.classes.len(), boundary));
                }
                self.classes.push(ClassEntry {
                    name: entry.name,
                    doc: entry.doc,
                    annotations: entry.annotations,
                    methods: Vec::new(),
                });
            }
        }
    }

    fn push_file_doc(&mut self, docblock: &Docblock) {
        let description = docblock.description();
        if !description.is_empty() {
            self.file_docs.push(description);
        }
    }

    fn finish(mut self, lines: &[&str], include: &Include) -> SymbolTable {
        if include.classes && include.methods {
            for (class, boundary) in self.boundaries {
                self.classes[class].methods = methods::scan_methods(lines, boundary);
            }
        }

        let mut seen = HashSet::new();
        self.functions.retain(|f| seen.insert(f.name.clone()));

        SymbolTable {
            classes: self.classes,
            functions: self.functions,
            constants: self.constants,
            hooks: self.hooks,
            file_doc: self.file_docs.join("\n\n"),
        }
    }
}

/// Locate a class body starting the search at `lines[from][column..]`.
///
/// The body opens at the first `{` and ends on the line where the brace
/// depth drops back to zero. `None` when there is no `{` or the braces
/// never balance.
pub fn find_class_boundary(lines: &[&str], from: usize, column: usize) -> Option<ClassBoundary> {
    let mut depth = 0usize;
    let mut start = None;

    for (index, line) in lines.iter().enumerate().skip(from) {
        let text = if index == from {
            line.get(column..).unwrap_or("")
        } else {
            line
        };
        for ch in text.chars() {
            match ch {
                '{' => {
                    start.get_or_insert(index);
                    depth += 1;
                }
                '}' if start.is_some() => {
                    depth -= 1;
                    if depth == 0 {
                        return start.map(|start| ClassBoundary { start, end: index });
                    }
                }
                _ => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(content: &str) -> SymbolTable {
        scan(content, &Include::default())
    }

    fn names(entries: &[DocEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn block_docblock_before_function() {
        let table = scan_all("/**\n * Adds two numbers.\n * @param a\n */\nfunction add(a, b) { return a + b; }\n");
        assert_eq!(table.functions.len(), 1);
        assert_eq!(table.functions[0].name, "add");
        assert_eq!(table.functions[0].doc, "Adds two numbers.");
        assert_eq!(table.functions[0].annotations, vec!["@param a"]);
        assert_eq!(table.file_doc, "");
    }

    #[test]
    fn inline_docblock_before_function() {
        let table = scan_all("/** Adds two numbers. @param a */ function add(a, b) {}\n");
        assert_eq!(names(&table.functions), ["add"]);
        assert_eq!(table.functions[0].annotations, vec!["@param a"]);
    }

    #[test]
    fn inline_and_block_agree() {
        let block = scan_all("/**\n * Greets.\n */\nfunction hi() {}\n");
        let inline = scan_all("/** Greets. */ function hi() {}\n");
        assert_eq!(block.functions, inline.functions);
    }

    #[test]
    fn single_line_docblock_on_its_own_line() {
        let table = scan_all("/** Max retries. */\nconst MAX_RETRIES = 3;\n");
        assert_eq!(names(&table.constants), ["MAX_RETRIES"]);
        assert_eq!(table.constants[0].doc, "Max retries.");
    }

    #[test]
    fn scanning_is_repeatable() {
        let src = "/** A. */\nclass A {\n  /** m. */\n  function m() {}\n}\n/** f. */\nfunction f() {}\n";
        assert_eq!(scan_all(src), scan_all(src));
    }

    #[test]
    fn functions_deduplicated_by_first_occurrence() {
        let src = "/** First. */\nfunction dup() {}\n/** Other. */\nfunction other() {}\n/** Second. */\nfunction dup() {}\n";
        let table = scan_all(src);
        assert_eq!(names(&table.functions), ["dup", "other"]);
        assert_eq!(table.functions[0].doc, "First.");
    }

    #[test]
    fn constants_and_hooks_not_deduplicated() {
        let src = "/** a */\nconst X = 1;\n/** b */\nconst X = 2;\n/** c */\nbus.on('ready')\n/** d */\nbus.on('ready')\n";
        let table = scan_all(src);
        assert_eq!(names(&table.constants), ["X", "X"]);
        assert_eq!(names(&table.hooks), ["ready", "ready"]);
    }

    #[test]
    fn define_constant() {
        let table = scan_all("<?php\n/**\n * Plugin version.\n */\ndefine('PLUGIN_VERSION', '1.2.0');\n");
        assert_eq!(names(&table.constants), ["PLUGIN_VERSION"]);
        assert_eq!(table.constants[0].doc, "Plugin version.");
    }

    #[test]
    fn hook_entry() {
        let table = scan_all("/**\n * Fired when ready.\n * @event\n */\nemitter.on('ready', () => {});\n");
        assert_eq!(names(&table.hooks), ["ready"]);
        assert_eq!(table.hooks[0].annotations, vec!["@event"]);
    }

    #[test]
    fn suppressed_patterns_leave_no_trace() {
        let src = "/**\n * Registers the theme.\n */\nadd_action('init', 'setup_theme');\n\
                   /**\n * Runs the job.\n */\nmodule.exports.run = function (opts) {};\n";
        let table = scan_all(src);
        assert!(table.functions.is_empty());
        assert!(table.constants.is_empty());
        assert!(table.hooks.is_empty());
        assert!(table.classes.is_empty());
        assert_eq!(table.file_doc, "");
    }

    #[test]
    fn arrow_function_assignment() {
        let table = scan_all("/** Doubles. */\nlet double = (x) => x * 2;\n");
        assert_eq!(names(&table.functions), ["double"]);
    }

    #[test]
    fn unrecognized_line_becomes_file_doc() {
        let src = "/**\n * Utility helpers.\n */\nimport fs from 'fs';\n";
        let table = scan_all(src);
        assert_eq!(table.file_doc, "Utility helpers.");
    }

    #[test]
    fn unresolved_docblock_at_eof_becomes_file_doc() {
        let table = scan_all("function x() {}\n/**\n * Trailing notes.\n */\n\n");
        assert_eq!(table.file_doc, "Trailing notes.");
        assert!(table.functions.is_empty());
    }

    #[test]
    fn replaced_docblock_is_discarded() {
        let src = "/**\n * Module header.\n */\n\n/**\n * Adds.\n */\nfunction add() {}\n";
        let table = scan_all(src);
        assert_eq!(table.file_doc, "");
        assert_eq!(names(&table.functions), ["add"]);
        assert_eq!(table.functions[0].doc, "Adds.");
    }

    #[test]
    fn same_line_pair_keeps_pending_docblock() {
        let src = "/**\n * Adds.\n */\n/** Limit. */ const MAX = 3;\nfunction add() {}\n";
        let table = scan_all(src);
        assert_eq!(names(&table.constants), ["MAX"]);
        assert_eq!(names(&table.functions), ["add"]);
        assert_eq!(table.functions[0].doc, "Adds.");
        assert_eq!(table.file_doc, "");
    }

    #[test]
    fn file_doc_fragments_joined_by_blank_line() {
        let src = "/** One. */\nimport a from 'a';\n/** Two. */\nimport b from 'b';\n";
        assert_eq!(scan_all(src).file_doc, "One.\n\nTwo.");
    }

    #[test]
    fn empty_descriptions_are_not_file_doc() {
        let src = "/**\n * @license MIT\n */\n'use strict';\n";
        assert_eq!(scan_all(src).file_doc, "");
    }

    #[test]
    fn pending_cleared_by_any_code_line() {
        let src = "/** Orphan. */\nlet x = 1;\nfunction later() {}\n";
        let table = scan_all(src);
        assert!(table.functions.is_empty());
        assert_eq!(table.file_doc, "Orphan.");
    }

    #[test]
    fn class_with_methods() {
        let src = "\
/**
 * A user account.
 * @package app
 */
class User {
    /**
     * Full name.
     */
    public function name() {
        if ($this->first) {
            return $this->first;
        }
    }

    /** Deletes it. */
    public function delete() {}
}

/** Outside. */
function outside() {}
";
        let table = scan_all(src);
        assert_eq!(table.classes.len(), 1);
        let class = &table.classes[0];
        assert_eq!(class.name, "User");
        assert_eq!(class.doc, "A user account.");
        assert_eq!(class.annotations, vec!["@package app"]);
        assert_eq!(names(&class.methods), ["name", "delete"]);
        assert_eq!(class.methods[1].doc, "Deletes it.");
        // Documented `function` lines inside the body also count at file level.
        assert_eq!(names(&table.functions), ["name", "delete", "outside"]);
    }

    #[test]
    fn methods_skipped_when_disabled() {
        let src = "/** A. */\nclass A {\n  /** m. */\n  function m() {}\n}\n";
        let include = Include {
            methods: false,
            ..Include::default()
        };
        let table = scan(src, &include);
        assert_eq!(table.classes.len(), 1);
        assert!(table.classes[0].methods.is_empty());

        let include = Include {
            classes: false,
            ..Include::default()
        };
        assert!(scan(src, &include).classes[0].methods.is_empty());
    }

    #[test]
    fn class_without_brace_has_no_methods() {
        let src = "/** Marker. */\ninterface Marker\n/** m. */\nfunction m()\n";
        let table = scan_all(src);
        assert_eq!(table.classes.len(), 1);
        assert!(table.classes[0].methods.is_empty());
    }

    #[test]
    fn unbalanced_class_has_no_methods() {
        let src = "/** Broken. */\nclass Broken {\n  /** m. */\n  function m() {\n";
        let table = scan_all(src);
        assert_eq!(table.classes.len(), 1);
        assert!(table.classes[0].methods.is_empty());
    }

    #[test]
    fn boundary_tracks_nested_braces() {
        let lines = vec![
            "class A",
            "{",
            "  function a() {",
            "    if (x) { y(); }",
            "  }",
            "}",
            "function after() {}",
        ];
        assert_eq!(
            find_class_boundary(&lines, 0, 0),
            Some(ClassBoundary { start: 1, end: 5 })
        );
    }

    #[test]
    fn boundary_on_one_line() {
        let lines = vec!["class A {}", "function b() {}"];
        assert_eq!(
            find_class_boundary(&lines, 0, 0),
            Some(ClassBoundary { start: 0, end: 0 })
        );
    }

    #[test]
    fn boundary_missing() {
        let lines = vec!["class A", "  extends B;"];
        assert_eq!(find_class_boundary(&lines, 0, 0), None);
        let lines = vec!["class A {", "  function a() {", "}"];
        assert_eq!(find_class_boundary(&lines, 0, 0), None);
    }

    #[test]
    fn inline_class_ignores_braces_in_comment() {
        let src = "/** See {@link Base}. */ class Child {\n  /** Run. */\n  function run() {}\n}\n";
        let table = scan_all(src);
        assert_eq!(table.classes.len(), 1);
        assert_eq!(names(&table.classes[0].methods), ["run"]);
    }
}
