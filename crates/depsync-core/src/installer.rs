//! Package installation
//!
//! The resolver only decides WHAT to install; actually installing is
//! delegated through the [`Installer`] trait so the resolver can be tested
//! against in-memory fakes instead of a real package-manager process.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur during installation
#[derive(Debug, Error)]
pub enum InstallError {
    /// The installer process could not be started
    #[error("Failed to launch installer `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The installer process exited with failure
    #[error("Installer `{program}` failed with {status} while installing: {packages}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        packages: String,
    },

    /// The installer process exceeded the caller-specified time limit
    #[error("Installer `{program}` timed out after {limit:?}")]
    TimedOut { program: String, limit: Duration },

    /// I/O error while supervising the installer process
    #[error("I/O error while running installer: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs a list of packages into a project.
///
/// All packages are installed in one invocation; failure is a single
/// outcome, never per-package.
pub trait Installer {
    fn install(&self, project_root: &Path, packages: &[String]) -> Result<(), InstallError>;
}

/// Installs packages by invoking an external package manager, e.g.
/// `yarn add <pkg>...`, with the project root as working directory.
pub struct CommandInstaller {
    program: String,
    timeout: Option<Duration>,
}

impl CommandInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Limit how long the installer process may run. Once started the
    /// process is otherwise blocking and non-cancelable: a partial install
    /// cannot be safely rolled back, so on expiry the process is killed and
    /// the run fails.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for CommandInstaller {
    fn default() -> Self {
        Self::new("yarn")
    }
}

impl Installer for CommandInstaller {
    fn install(&self, project_root: &Path, packages: &[String]) -> Result<(), InstallError> {
        println!("Installing {} missing dependencies...", packages.len());
        let mut child = Command::new(&self.program)
            .arg("add")
            .args(packages)
            .current_dir(project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| InstallError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => {
                let started = Instant::now();
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if started.elapsed() >= limit {
                        child.kill()?;
                        child.wait()?;
                        return Err(InstallError::TimedOut {
                            program: self.program.clone(),
                            limit,
                        });
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        };

        if !status.success() {
            return Err(InstallError::Failed {
                program: self.program.clone(),
                status,
                packages: packages.join(" "),
            });
        }
        Ok(())
    }
}

/// Reports what would be installed without installing anything.
pub struct DryRunInstaller;

impl Installer for DryRunInstaller {
    fn install(&self, _project_root: &Path, packages: &[String]) -> Result<(), InstallError> {
        for package in packages {
            println!("  would install {}", package);
        }
        Ok(())
    }
}
