//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::config::{Config, Include};
use crate::model::{ScannedFile, SymbolTable};
use anyhow::{anyhow, Result};

/// Trait for rendering all scanned files into one output document.
pub trait Renderer {
    fn render(&self, files: &[ScannedFile], config: &Config) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}

/// Whether a file gets a section: any enabled category with entries, or a
/// file-level description.
pub fn qualifies(symbols: &SymbolTable, include: &Include) -> bool {
    (include.classes && !symbols.classes.is_empty())
        || (include.functions && !symbols.functions.is_empty())
        || (include.constants && !symbols.constants.is_empty())
        || (include.hooks && !symbols.hooks.is_empty())
        || !symbols.file_doc.is_empty()
}
