//! Markdown renderer: title, optional table of contents, one section per file.

use crate::config::Config;
use crate::model::{DocEntry, ScannedFile};
use crate::render::{qualifies, Renderer};
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, files: &[ScannedFile], config: &Config) -> Result<String> {
        let include = &config.include;
        let labels = &config.labels;

        let mut toc_items = Vec::new();
        let mut sections = Vec::new();
        for file in files.iter().filter(|f| qualifies(&f.symbols, include)) {
            if include.toc {
                toc_items.push(toc::render_toc_item(&file.path));
            }
            sections.push(render_section(file, config));
        }

        let mut output = format!("# {}\n\n", labels.doc_title);
        if include.toc && !toc_items.is_empty() {
            output.push_str(&format!(
                "## {}\n\n{}\n\n",
                labels.toc_title,
                toc_items.join("\n")
            ));
        }
        output.push_str(&sections.join("\n"));
        Ok(output)
    }
}

fn render_section(file: &ScannedFile, config: &Config) -> String {
    let include = &config.include;
    let labels = &config.labels;
    let symbols = &file.symbols;
    let show = config.show_annotations;

    let mut section = format!("### {}\n\n", file.path);

    if !symbols.file_doc.is_empty() {
        section.push_str(&symbols.file_doc);
        section.push_str("\n\n");
    }

    if include.classes {
        for class in &symbols.classes {
            section.push_str(&format!(
                "- **{} `{}`** – {}\n",
                labels.class_title, class.name, class.doc
            ));
            push_annotations(&mut section, &class.annotations, "  ", show);

            if include.methods {
                for method in &class.methods {
                    section.push_str(&format!("  - `{}()` – {}\n", method.name, method.doc));
                    push_annotations(&mut section, &method.annotations, "    ", show);
                }
            }
        }
    }

    if include.functions && !symbols.functions.is_empty() {
        push_group(&mut section, &labels.functions_title, &symbols.functions, "()", show);
    }
    if include.constants && !symbols.constants.is_empty() {
        push_group(&mut section, &labels.constants_title, &symbols.constants, "", show);
    }
    if include.hooks && !symbols.hooks.is_empty() {
        push_group(&mut section, &labels.hooks_title, &symbols.hooks, "()", show);
    }

    section
}

/// A bold group title followed by one bullet per entry.
fn push_group(out: &mut String, title: &str, entries: &[DocEntry], suffix: &str, show: bool) {
    out.push_str(&format!("\n**{}:**\n", title));
    for entry in entries {
        out.push_str(&format!("- `{}{}` – {}\n", entry.name, suffix, entry.doc));
        push_annotations(out, &entry.annotations, "  ", show);
    }
}

fn push_annotations(out: &mut String, annotations: &[String], indent: &str, show: bool) {
    if !show {
        return;
    }
    for annotation in annotations {
        out.push_str(&format!("{}- _{}_\n", indent, annotation));
    }
}
