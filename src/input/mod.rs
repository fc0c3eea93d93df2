//! Declaration input
//!
//! The host does the syntax traversal and hands over one record per
//! declaration: identifier text plus the async flag, optionally with a
//! location. Supported inputs:
//!
//! - `*.json` - an array of declarations, or `{ "declarations": [...] }`
//! - `*.jsonl` / `*.ndjson` - one declaration per non-blank line
//! - `-` - JSON Lines on stdin
//! - a directory - walked recursively (respecting `.gitignore`) for the
//!   file types above

use crate::models::Declaration;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File extensions recognised as declaration files
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson"];

/// Path argument meaning "read from stdin"
pub const STDIN_PATH: &str = "-";

/// Errors that can occur while reading declarations
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid declarations in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid declaration at {path}:{line}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported declaration file {path} (expected .json, .jsonl or .ndjson)")]
    UnsupportedFormat { path: PathBuf },
}

pub type InputResult<T> = Result<T, InputError>;

#[derive(Deserialize)]
#[serde(untagged)]
enum DeclarationFile {
    List(Vec<Declaration>),
    Wrapped { declarations: Vec<Declaration> },
}

/// Parse a JSON document holding declarations
pub fn parse_json(content: &str, path: &Path) -> InputResult<Vec<Declaration>> {
    let file: DeclarationFile =
        serde_json::from_str(content).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(match file {
        DeclarationFile::List(decls) => decls,
        DeclarationFile::Wrapped { declarations } => declarations,
    })
}

/// Parse JSON Lines, one declaration per non-blank line
pub fn parse_json_lines(content: &str, path: &Path) -> InputResult<Vec<Declaration>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| InputError::JsonLine {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

/// Load declarations from a single file, choosing the format by extension
pub fn load_file(path: &Path) -> InputResult<Vec<Declaration>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !SUPPORTED_EXTENSIONS.contains(&ext) {
        return Err(InputError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if ext == "json" {
        parse_json(&content, path)
    } else {
        parse_json_lines(&content, path)
    }
}

/// Load JSON Lines declarations from a reader (stdin in practice)
pub fn load_reader(mut reader: impl Read) -> InputResult<Vec<Declaration>> {
    let path = PathBuf::from("<stdin>");
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| InputError::Io {
            path: path.clone(),
            source,
        })?;
    parse_json_lines(&content, &path)
}

/// Collect declaration files under a directory
pub fn collect_declaration_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Load declarations from every input path.
///
/// Explicit files must parse; files discovered by walking a directory are
/// skipped with a warning when they do not. Order is deterministic: inputs
/// in argument order, directory contents sorted by path.
pub fn load_inputs(inputs: &[PathBuf]) -> InputResult<Vec<Declaration>> {
    let mut declarations = Vec::new();

    for input in inputs {
        if input.as_os_str() == STDIN_PATH {
            let decls = load_reader(std::io::stdin().lock())?;
            debug!("Read {} declarations from stdin", decls.len());
            declarations.extend(decls);
        } else if input.is_dir() {
            declarations.extend(load_directory(input));
        } else {
            let decls = load_file(input)?;
            debug!("Read {} declarations from {}", decls.len(), input.display());
            declarations.extend(decls);
        }
    }

    info!("Loaded {} declarations", declarations.len());
    Ok(declarations)
}

fn load_directory(root: &Path) -> Vec<Declaration> {
    let files = collect_declaration_files(root);
    debug!(
        "Found {} declaration files under {}",
        files.len(),
        root.display()
    );

    let loaded: Vec<Vec<Declaration>> = files
        .par_iter()
        .filter_map(|path| match load_file(path) {
            Ok(decls) => Some(decls),
            Err(e) => {
                warn!("Skipping {}", e);
                None
            }
        })
        .collect();

    loaded.into_iter().flatten().collect()
}
