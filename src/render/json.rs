//! JSON renderer: structured output for tooling integration.
//!
//! Same file selection and category switches as the markdown output;
//! annotations are always included.

use crate::config::Config;
use crate::model::{ClassEntry, DocEntry, ScannedFile};
use crate::render::{qualifies, Renderer};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFile<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    file_doc: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    classes: Option<&'a [ClassEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<&'a [DocEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constants: Option<&'a [DocEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hooks: Option<&'a [DocEntry]>,
}

impl Renderer for JsonRenderer {
    fn render(&self, files: &[ScannedFile], config: &Config) -> Result<String> {
        let include = &config.include;
        let files = files
            .iter()
            .filter(|f| qualifies(&f.symbols, include))
            .map(|f| JsonFile {
                path: &f.path,
                file_doc: &f.symbols.file_doc,
                classes: include.classes.then_some(f.symbols.classes.as_slice()),
                functions: include.functions.then_some(f.symbols.functions.as_slice()),
                constants: include.constants.then_some(f.symbols.constants.as_slice()),
                hooks: include.hooks.then_some(f.symbols.hooks.as_slice()),
            })
            .collect();
        let document = JsonDocument {
            title: &config.labels.doc_title,
            files,
        };
        let mut out =
            serde_json::to_string_pretty(&document).context("failed to serialize documentation")?;
        out.push('\n');
        Ok(out)
    }
}
