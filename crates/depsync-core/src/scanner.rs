//! Import extraction from source trees
//!
//! Scans JavaScript/TypeScript source files for `from "<specifier>"` import
//! clauses and collects the canonical package names they reference.
//!
//! Extraction is lexical, not a parse: a regex over the raw text. This can
//! over-match inside comments or string literals that happen to look like
//! import syntax, and under-match exotic import forms. That trade-off is
//! deliberate — the extractor interface isolates it so a real parser could
//! replace the regex later without touching the resolver.

use crate::specifier;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Matches a `from` clause followed by a single- or double-quoted specifier.
/// Quotes are not mixed within one literal.
static FROM_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"from\s+(?:'([^']*)'|"([^"]*)")"#).unwrap());

/// Errors that can occur while scanning a source tree
#[derive(Debug, Error)]
pub enum ScanError {
    /// A source file could not be read or decoded. Fatal for the whole scan:
    /// skipping it would shrink the extracted set and hide truly missing
    /// dependencies that only appear in the unreadable file.
    #[error("Failed to read source file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to enumerate files under the project root
    #[error("Failed to enumerate source files: {0}")]
    Io(#[from] std::io::Error),
}

/// Options controlling which files a scan visits
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extensions to scan (without the leading dot)
    pub extensions: Vec<String>,

    /// Directory names to skip entirely. Skipping dependency-output and
    /// build-output directories is a correctness requirement, not an
    /// optimization: scanning `node_modules` would re-extract installed
    /// packages' own imports and corrupt the result.
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["ts".to_string(), "tsx".to_string()],
            exclude_dirs: vec!["node_modules".to_string(), "dist".to_string()],
        }
    }
}

impl ScanOptions {
    fn matches_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.extensions.iter().any(|e| e == ext),
            None => false,
        }
    }

    fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Extract raw import specifiers from source text.
///
/// Returns every quoted specifier of a `from` clause, in order of
/// appearance, duplicates included. Callers normalize and deduplicate.
pub fn extract_specifiers(source: &str) -> Vec<&str> {
    FROM_CLAUSE
        .captures_iter(source)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .collect()
}

/// Recursively collect source files under `root`, honoring `options`.
///
/// Hidden directories are always skipped. The result is sorted for
/// deterministic iteration across runs.
pub fn collect_source_files(
    root: &Path,
    options: &ScanOptions,
) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    collect_in_dir(root, options, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_in_dir(
    dir: &Path,
    options: &ScanOptions,
    files: &mut Vec<PathBuf>,
) -> Result<(), ScanError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        // Symlinked directories can form cycles; never descend them
        if entry.file_type()?.is_symlink() && path.is_dir() {
            continue;
        }

        if path.is_dir() {
            let name = entry.file_name();
            if options.is_excluded_dir(&name.to_string_lossy()) {
                continue;
            }
            collect_in_dir(&path, options, files)?;
        } else if options.matches_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Scan the given files and return the set of canonical package names they
/// reference. Relative imports never appear in the result.
pub fn scan_files(files: &[PathBuf]) -> Result<BTreeSet<String>, ScanError> {
    let mut referenced = BTreeSet::new();
    for path in files {
        scan_into(path, &mut referenced)?;
    }
    Ok(referenced)
}

/// Parallel variant of [`scan_files`].
///
/// Files are fanned out to `workers` threads over a channel; each worker
/// accumulates a private partial set and the partials are merged after all
/// workers finish, so there is no shared mutable accumulation to lose
/// updates in. Produces exactly the same set as the sequential scan. The
/// first file error fails the whole scan.
pub fn scan_files_parallel(
    files: &[PathBuf],
    workers: usize,
) -> Result<BTreeSet<String>, ScanError> {
    if files.len() <= 1 || workers <= 1 {
        return scan_files(files);
    }
    let workers = workers.min(files.len());

    let (tx, rx) = crossbeam::channel::unbounded::<&PathBuf>();
    for path in files {
        // Cannot fail: the receiver is still alive in this scope
        let _ = tx.send(path);
    }
    drop(tx);

    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let rx = rx.clone();
            handles.push(scope.spawn(move || -> Result<BTreeSet<String>, ScanError> {
                let mut partial = BTreeSet::new();
                while let Ok(path) = rx.recv() {
                    scan_into(path, &mut partial)?;
                }
                Ok(partial)
            }));
        }

        let mut merged = BTreeSet::new();
        for handle in handles {
            let partial = handle
                .join()
                .map_err(|_| {
                    ScanError::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "scan worker panicked",
                    ))
                })??;
            merged.extend(partial);
        }
        Ok(merged)
    })
}

fn scan_into(path: &Path, referenced: &mut BTreeSet<String>) -> Result<(), ScanError> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    for raw in extract_specifiers(&content) {
        if let Some(name) = specifier::normalize(raw) {
            referenced.insert(name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_double_quoted() {
        let src = r#"import { useState } from "react";"#;
        assert_eq!(extract_specifiers(src), vec!["react"]);
    }

    #[test]
    fn test_extract_single_quoted() {
        let src = "import debounce from 'lodash/debounce';";
        assert_eq!(extract_specifiers(src), vec!["lodash/debounce"]);
    }

    #[test]
    fn test_extract_multiple_clauses() {
        let src = r#"
import React from "react";
import { render } from "@testing-library/react";
import { helper } from "./local-helper";
export { thing } from "../shared/thing";
"#;
        assert_eq!(
            extract_specifiers(src),
            vec![
                "react",
                "@testing-library/react",
                "./local-helper",
                "../shared/thing"
            ]
        );
    }

    #[test]
    fn test_mixed_quotes_not_matched() {
        // An unterminated literal must not produce a specifier spanning it
        let src = r#"import x from "react';"#;
        assert!(extract_specifiers(src).is_empty());
    }

    #[test]
    fn test_no_from_clause() {
        let src = "const x = 1;\nimport './side-effect.css';";
        assert!(extract_specifiers(src).is_empty());
    }

    #[test]
    fn test_default_options() {
        let options = ScanOptions::default();
        assert_eq!(options.extensions, vec!["ts", "tsx"]);
        assert_eq!(options.exclude_dirs, vec!["node_modules", "dist"]);
    }

    #[test]
    fn test_excluded_dir_names() {
        let options = ScanOptions::default();
        assert!(options.is_excluded_dir("node_modules"));
        assert!(options.is_excluded_dir("dist"));
        assert!(options.is_excluded_dir(".git"));
        assert!(!options.is_excluded_dir("src"));
    }

    #[test]
    fn test_extension_filter() {
        let options = ScanOptions::default();
        assert!(options.matches_extension(Path::new("src/index.ts")));
        assert!(options.matches_extension(Path::new("src/App.tsx")));
        assert!(!options.matches_extension(Path::new("src/legacy.js")));
        assert!(!options.matches_extension(Path::new("README")));
    }

    #[test]
    fn test_scan_normalizes_and_dedupes() {
        let src = r#"
import a from "lodash/debounce";
import b from "lodash/throttle";
import c from "./local";
"#;
        let mut referenced = BTreeSet::new();
        for raw in extract_specifiers(src) {
            if let Some(name) = crate::specifier::normalize(raw) {
                referenced.insert(name);
            }
        }
        assert_eq!(
            referenced.into_iter().collect::<Vec<_>>(),
            vec!["lodash".to_string()]
        );
    }
}
