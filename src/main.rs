//! doctree: generate one Markdown overview of a project's documented
//! classes, methods, functions, constants and hooks.
//!
//! `doctree [SRC_DIR] [OUTPUT_FILE] [options]`, e.g.
//! `doctree ./ docs/structure.md --showAnnotations --include.constants=false`

mod config;
mod generate;
mod model;
mod parser;
mod render;
mod toc;
mod walk;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use config::{Config, ConfigOverrides, IncludeOverrides, LabelOverrides};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doctree",
    version,
    about = "Generate Markdown documentation from docblocks in JavaScript and PHP sources"
)]
struct Cli {
    /// Source directory to analyze (default: src)
    src_dir: Option<PathBuf>,

    /// Output file (default: docs/structure.md)
    output_file: Option<PathBuf>,

    /// Source directory, takes precedence over the positional argument
    #[arg(long = "srcDir", value_name = "DIR")]
    src_dir_flag: Option<PathBuf>,

    /// Output file, takes precedence over the positional argument
    #[arg(long = "outputFile", value_name = "FILE")]
    output_file_flag: Option<PathBuf>,

    /// File extensions to analyze (comma-separated), e.g. .js,.php
    #[arg(long, value_delimiter = ',', value_name = "EXT")]
    extensions: Option<Vec<String>>,

    /// File suffixes to exclude (comma-separated), e.g. .test.js
    #[arg(long = "excludeExtensions", value_delimiter = ',', value_name = "EXT")]
    exclude_extensions: Option<Vec<String>>,

    /// Extra directories/files to ignore (comma-separated), added to the built-in list
    #[arg(long, value_delimiter = ',', value_name = "NAME")]
    ignore: Option<Vec<String>>,

    /// Render the table of contents
    #[arg(long = "include.toc", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_toc: Option<bool>,

    /// Render classes
    #[arg(long = "include.classes", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_classes: Option<bool>,

    /// Render class methods
    #[arg(long = "include.methods", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_methods: Option<bool>,

    /// Render global functions
    #[arg(long = "include.functions", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_functions: Option<bool>,

    /// Render constants
    #[arg(long = "include.constants", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_constants: Option<bool>,

    /// Render hooks/events
    #[arg(long = "include.hooks", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    include_hooks: Option<bool>,

    #[arg(long = "labels.tocTitle", value_name = "TEXT")]
    toc_title: Option<String>,

    /// Custom documentation title
    #[arg(long = "labels.docTitle", value_name = "TEXT")]
    doc_title: Option<String>,

    #[arg(long = "labels.classTitle", value_name = "TEXT")]
    class_title: Option<String>,

    #[arg(long = "labels.functionsTitle", value_name = "TEXT")]
    functions_title: Option<String>,

    #[arg(long = "labels.constantsTitle", value_name = "TEXT")]
    constants_title: Option<String>,

    #[arg(long = "labels.hooksTitle", value_name = "TEXT")]
    hooks_title: Option<String>,

    /// Show annotations (@...) from docblocks
    #[arg(long = "showAnnotations", visible_alias = "annotations", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    show_annotations: Option<bool>,

    /// Output format: markdown (default) or json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// JSON config file (default: .doctreerc.json in the current directory, if present)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one line per scanned file to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    /// The command-line layer; flags win over positionals.
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            src_dir: self.src_dir_flag.clone().or_else(|| self.src_dir.clone()),
            output_file: self
                .output_file_flag
                .clone()
                .or_else(|| self.output_file.clone()),
            extensions: self.extensions.clone(),
            exclude_extensions: self.exclude_extensions.clone(),
            ignore: self.ignore.clone(),
            include: IncludeOverrides {
                toc: self.include_toc,
                classes: self.include_classes,
                methods: self.include_methods,
                functions: self.include_functions,
                constants: self.include_constants,
                hooks: self.include_hooks,
            },
            labels: LabelOverrides {
                toc_title: self.toc_title.clone(),
                doc_title: self.doc_title.clone(),
                class_title: self.class_title.clone(),
                functions_title: self.functions_title.clone(),
                constants_title: self.constants_title.clone(),
                hooks_title: self.hooks_title.clone(),
            },
            show_annotations: self.show_annotations,
            format: self.format.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = env::current_dir().context("failed to determine the current directory")?;

    let file_layer = config::load_file_layer(cli.config.as_deref(), &cwd)?;
    let config = Config::layered(file_layer.into_iter().chain([cli.overrides()]));
    let renderer = render::create_renderer(&config.format)?;

    // Failures during the run are reported, not turned into an exit status.
    if let Err(err) = generate::run(&config, renderer.as_ref(), &cwd, cli.verbose) {
        eprintln!("{} {:#}", "error:".bold().red(), err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positionals_and_flags() {
        let cli = Cli::parse_from(["doctree", "lib", "out.md", "--srcDir=app"]);
        let config = Config::layered([cli.overrides()]);
        assert_eq!(config.src_dir, PathBuf::from("app"));
        assert_eq!(config.output_file, PathBuf::from("out.md"));
    }

    #[test]
    fn dotted_switches() {
        let cli = Cli::parse_from([
            "doctree",
            "--include.constants=false",
            "--include.toc",
            "--labels.docTitle=My API",
            "--annotations",
        ]);
        let config = Config::layered([cli.overrides()]);
        assert!(!config.include.constants);
        assert!(config.include.toc);
        assert_eq!(config.labels.doc_title, "My API");
        assert!(config.show_annotations);
    }

    #[test]
    fn comma_separated_lists() {
        let cli = Cli::parse_from([
            "doctree",
            "--extensions=.ts,.tsx",
            "--excludeExtensions=.d.ts",
            "--ignore=vendor,tmp",
        ]);
        let config = Config::layered([cli.overrides()]);
        assert_eq!(config.extensions, vec![".ts", ".tsx"]);
        assert_eq!(config.exclude_extensions, vec![".d.ts"]);
        assert!(config.ignore.iter().any(|i| i == "vendor"));
        assert!(config.ignore.iter().any(|i| i == "node_modules"));
    }

    #[test]
    fn show_annotations_explicit_false() {
        let cli = Cli::parse_from(["doctree", "--showAnnotations=false"]);
        assert_eq!(cli.show_annotations, Some(false));
    }
}
