//! Dependency reconciliation
//!
//! Drives the scanner over a project tree, diffs the referenced packages
//! against the manifest's declared set, and hands the missing ones to an
//! [`Installer`].

use crate::installer::{InstallError, Installer};
use crate::manifest::{ManifestError, PackageManifest};
use crate::scanner::{self, ScanError, ScanOptions};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during a resolution run
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Scan error
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Install error
    #[error("Install error: {0}")]
    Install(#[from] InstallError),
}

/// Summary of one resolution run. Computed fresh every run, never persisted.
#[derive(Debug)]
pub struct Resolution {
    /// Manifest name of the project, if it declares one
    pub project: Option<String>,

    /// Number of source files scanned
    pub files_scanned: usize,

    /// Canonical names referenced by the source tree
    pub referenced: BTreeSet<String>,

    /// Canonical names declared in the manifest (all classes merged)
    pub declared: BTreeSet<String>,

    /// Referenced but undeclared names, sorted — exactly what was handed to
    /// the installer (empty means the installer was never invoked)
    pub missing: Vec<String>,
}

/// Compute the missing set: names referenced in source but not declared in
/// the manifest. Pure set difference; depends only on the two sets.
pub fn missing_packages(
    referenced: &BTreeSet<String>,
    declared: &BTreeSet<String>,
) -> BTreeSet<String> {
    referenced.difference(declared).cloned().collect()
}

/// Dependency resolver
pub struct Resolver {
    /// Scan configuration
    options: ScanOptions,

    /// Worker thread count for the scan (defaults to available parallelism)
    workers: Option<usize>,
}

impl Resolver {
    /// Create a resolver with default scan options.
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
            workers: None,
        }
    }

    /// Set the scan options.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the scan worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Run one resolution pass over `project_root`.
    ///
    /// Scans the tree, reads `package.json`, computes the missing set, and —
    /// only if it is non-empty — invokes `installer` once with the full
    /// sorted list. No retry, no partial application.
    pub fn resolve(
        &self,
        project_root: &Path,
        installer: &dyn Installer,
    ) -> Result<Resolution, ResolveError> {
        let files = scanner::collect_source_files(project_root, &self.options)?;
        let workers = self.workers.unwrap_or_else(num_cpus::get);
        let referenced = scanner::scan_files_parallel(&files, workers)?;

        let manifest = PackageManifest::from_file(&project_root.join("package.json"))?;
        let declared = manifest.declared_names();

        let missing: Vec<String> = missing_packages(&referenced, &declared)
            .into_iter()
            .collect();

        if !missing.is_empty() {
            println!("Found {} missing dependencies:", missing.len());
            for name in &missing {
                println!("  + {}", name);
            }
            installer.install(project_root, &missing)?;
        }

        Ok(Resolution {
            project: manifest.name.clone(),
            files_scanned: files.len(),
            referenced,
            declared,
            missing,
        })
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
