//! Run configuration: built-in defaults, an optional JSON file, then the
//! command line. Assembled once per run and never mutated afterwards.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".doctreerc.json";

/// The tool's own entry scripts, build output, VCS metadata and package
/// artifacts. Never scanned.
pub const DEFAULT_IGNORE: &[&str] = &[
    "doctree-cli.js",
    "vite-doctree.js",
    "tailwind.config.js",
    "node_modules",
    ".git",
    "dist",
    "build",
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "README.md",
    "LICENSE",
    "webpack.config.js",
    ".env",
    ".env.local",
    "tests",
    "test",
    "__tests__",
    "coverage",
    ".vscode",
    ".idea",
];

pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".php"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub src_dir: PathBuf,
    pub output_file: PathBuf,
    pub extensions: Vec<String>,
    pub exclude_extensions: Vec<String>,
    pub ignore: Vec<String>,
    pub include: Include,
    pub labels: Labels,
    pub show_annotations: bool,
    /// Renderer name, see [`crate::render::create_renderer`].
    pub format: String,
}

/// Per-category rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Include {
    pub toc: bool,
    pub classes: bool,
    pub methods: bool,
    pub functions: bool,
    pub constants: bool,
    pub hooks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub toc_title: String,
    pub doc_title: String,
    pub class_title: String,
    pub functions_title: String,
    pub constants_title: String,
    pub hooks_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            src_dir: PathBuf::from("src"),
            output_file: PathBuf::from("docs/structure.md"),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude_extensions: Vec::new(),
            ignore: DEFAULT_IGNORE.iter().map(|e| e.to_string()).collect(),
            include: Include::default(),
            labels: Labels::default(),
            show_annotations: false,
            format: "markdown".to_string(),
        }
    }
}

impl Default for Include {
    fn default() -> Self {
        Include {
            toc: true,
            classes: true,
            methods: true,
            functions: true,
            constants: true,
            hooks: true,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            toc_title: "Table of Contents".to_string(),
            doc_title: "Project Documentation".to_string(),
            class_title: "Class".to_string(),
            functions_title: "Global Functions".to_string(),
            constants_title: "Constants".to_string(),
            hooks_title: "Hooks / Events".to_string(),
        }
    }
}

/// One configuration layer. Unset keys keep the value of the layer below.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub src_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub exclude_extensions: Option<Vec<String>>,
    /// Added to the built-in ignore list, never replacing it.
    pub ignore: Option<Vec<String>>,
    #[serde(default)]
    pub include: IncludeOverrides,
    #[serde(default)]
    pub labels: LabelOverrides,
    pub show_annotations: Option<bool>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IncludeOverrides {
    pub toc: Option<bool>,
    pub classes: Option<bool>,
    pub methods: Option<bool>,
    pub functions: Option<bool>,
    pub constants: Option<bool>,
    pub hooks: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LabelOverrides {
    pub toc_title: Option<String>,
    pub doc_title: Option<String>,
    pub class_title: Option<String>,
    pub functions_title: Option<String>,
    pub constants_title: Option<String>,
    pub hooks_title: Option<String>,
}

impl Config {
    /// Defaults, then each layer in order.
    pub fn layered<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = ConfigOverrides>,
    {
        let mut config = Config::default();
        for layer in layers {
            config.apply(layer);
        }
        config
    }

    pub fn apply(&mut self, layer: ConfigOverrides) {
        if let Some(src_dir) = layer.src_dir {
            self.src_dir = src_dir;
        }
        if let Some(output_file) = layer.output_file {
            self.output_file = output_file;
        }
        if let Some(extensions) = layer.extensions {
            self.extensions = extensions;
        }
        if let Some(exclude) = layer.exclude_extensions {
            self.exclude_extensions = exclude;
        }
        for entry in layer.ignore.into_iter().flatten() {
            if !self.ignore.contains(&entry) {
                self.ignore.push(entry);
            }
        }

        let include = layer.include;
        let flags = &mut self.include;
        flags.toc = include.toc.unwrap_or(flags.toc);
        flags.classes = include.classes.unwrap_or(flags.classes);
        flags.methods = include.methods.unwrap_or(flags.methods);
        flags.functions = include.functions.unwrap_or(flags.functions);
        flags.constants = include.constants.unwrap_or(flags.constants);
        flags.hooks = include.hooks.unwrap_or(flags.hooks);

        let labels = layer.labels;
        replace(&mut self.labels.toc_title, labels.toc_title);
        replace(&mut self.labels.doc_title, labels.doc_title);
        replace(&mut self.labels.class_title, labels.class_title);
        replace(&mut self.labels.functions_title, labels.functions_title);
        replace(&mut self.labels.constants_title, labels.constants_title);
        replace(&mut self.labels.hooks_title, labels.hooks_title);

        if let Some(show) = layer.show_annotations {
            self.show_annotations = show;
        }
        if let Some(format) = layer.format {
            self.format = format;
        }
    }
}

fn replace(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Read the config file layer.
///
/// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] in
/// `cwd` is used when present.
pub fn load_file_layer(explicit: Option<&Path>, cwd: &Path) -> Result<Option<ConfigOverrides>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(None);
            }
            candidate
        }
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let layer = serde_json::from_str(&content)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    Ok(Some(layer))
}
