//! Depsync command-line interface
//!
//! Scans a project tree for undeclared imports and installs the missing
//! packages through an external package manager.

use clap::Parser;
use depsync_core::{CommandInstaller, DryRunInstaller, Installer, Resolver, ScanOptions};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "depsync")]
#[command(about = "Install dependencies your sources import but your manifest omits", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root containing package.json
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Report missing dependencies without installing them
    #[arg(long)]
    dry_run: bool,

    /// File extensions to scan
    #[arg(long = "extension", value_name = "EXT", default_values = ["ts", "tsx"])]
    extensions: Vec<String>,

    /// Additional directory names to skip (node_modules and dist are always skipped)
    #[arg(long = "exclude", value_name = "DIR")]
    excludes: Vec<String>,

    /// Package manager to invoke as `<PROGRAM> add <pkg>...`
    #[arg(long, default_value = "yarn")]
    installer: String,

    /// Abort the install step after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Scan worker threads (defaults to available CPUs)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut options = ScanOptions::default();
    options.extensions = cli.extensions;
    options.exclude_dirs.extend(cli.excludes);

    let mut resolver = Resolver::new().with_options(options);
    if let Some(jobs) = cli.jobs {
        resolver = resolver.with_workers(jobs);
    }

    let installer: Box<dyn Installer> = if cli.dry_run {
        Box::new(DryRunInstaller)
    } else {
        let mut command = CommandInstaller::new(cli.installer);
        if let Some(secs) = cli.timeout {
            command = command.with_timeout(Duration::from_secs(secs));
        }
        Box::new(command)
    };

    let resolution = resolver.resolve(&cli.root, installer.as_ref())?;

    match resolution.project.as_deref() {
        Some(name) => println!(
            "Scanned {} files in {} ({})",
            resolution.files_scanned,
            cli.root.display(),
            name
        ),
        None => println!(
            "Scanned {} files in {}",
            resolution.files_scanned,
            cli.root.display()
        ),
    }

    if resolution.missing.is_empty() {
        println!("All imported packages are declared.");
    } else if cli.dry_run {
        println!(
            "{} missing dependencies (dry run, nothing installed).",
            resolution.missing.len()
        );
    } else {
        println!("Installed {} missing dependencies.", resolution.missing.len());
    }

    Ok(())
}
