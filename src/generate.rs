//! One documentation run: walk, scan each file in path order, render, write.

use crate::config::Config;
use crate::model::ScannedFile;
use crate::parser;
use crate::render::Renderer;
use crate::walk::{self, FileFilter};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Component, Path};

/// Scan every accepted file under `config.src_dir`, sorted by display path.
///
/// Unreadable files are reported and skipped.
pub fn scan_tree(config: &Config, cwd: &Path, verbose: bool) -> Vec<ScannedFile> {
    let filter = FileFilter::from_config(config);
    let mut paths: Vec<(String, _)> = walk::walk(&config.src_dir, &filter)
        .into_iter()
        .map(|path| (display_path(&path, cwd), path))
        .collect();
    paths.sort_by(|a, b| a.0.cmp(&b.0));

    let mut scanned = Vec::with_capacity(paths.len());
    for (display, path) in paths {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!(
                    "{} skipping unreadable file: {} ({})",
                    "warning:".bold().yellow(),
                    display,
                    err
                );
                continue;
            }
        };
        let content = String::from_utf8_lossy(&bytes);
        let symbols = parser::scan(&content, &config.include);

        if verbose {
            if symbols.is_empty() {
                eprintln!("{} {} (nothing documented)", "scanned".dimmed(), display);
            } else {
                eprintln!(
                    "{} {} ({} classes, {} functions, {} constants, {} hooks)",
                    "scanned".dimmed(),
                    display,
                    symbols.classes.len(),
                    symbols.functions.len(),
                    symbols.constants.len(),
                    symbols.hooks.len()
                );
            }
        }

        scanned.push(ScannedFile {
            path: display,
            symbols,
        });
    }
    scanned
}

/// Build the whole document in memory, then write it once.
pub fn run(config: &Config, renderer: &dyn Renderer, cwd: &Path, verbose: bool) -> Result<()> {
    let files = scan_tree(config, cwd, verbose);
    let document = renderer.render(&files, config)?;
    write_output(&config.output_file, &document)?;
    println!(
        "{} Documentation generated at: {}",
        "[doctree]".cyan(),
        config.output_file.display()
    );
    Ok(())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Path as shown in headings and links: relative to `cwd` when possible,
/// `/`-separated, without a leading `./`.
fn display_path(path: &Path, cwd: &Path) -> String {
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    if relative.is_absolute() {
        return relative.to_string_lossy().replace('\\', "/");
    }
    relative
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
