//! Depsync dependency reconciliation engine
//!
//! Detects third-party packages a JavaScript/TypeScript source tree imports
//! but does not declare in its package.json, and installs the missing ones.
//! This crate provides:
//! - Import specifier normalization (scoped and unscoped package names)
//! - Lexical import extraction over a source tree (optionally parallel)
//! - package.json reading (runtime, dev and peer dependency classes)
//! - Missing-set computation and install orchestration
//!
//! Installation is abstracted behind the [`Installer`] trait so the resolver
//! can be exercised without a real package-manager process.

pub mod installer;
pub mod manifest;
pub mod resolver;
pub mod scanner;
pub mod specifier;

pub use installer::{CommandInstaller, DryRunInstaller, InstallError, Installer};
pub use manifest::{ManifestError, PackageManifest};
pub use resolver::{missing_packages, Resolution, ResolveError, Resolver};
pub use scanner::{
    collect_source_files, extract_specifiers, scan_files, scan_files_parallel, ScanError,
    ScanOptions,
};
pub use specifier::normalize;
