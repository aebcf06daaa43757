//! Dependency installation via an external package manager
//!
//! The package manager runs with the project as its working directory and
//! the parent's environment. Its stdout and stderr are read concurrently and
//! forwarded line by line to the console as they arrive.

use crate::error::{Error, Result};
use camino::Utf8Path;
use puro_core::types::ExitStatusPolicy;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Placeholder in package manager arguments replaced by the project path
pub const TARGET_PLACEHOLDER: &str = "{target}";

/// Outcome of a package manager run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Executable that was run
    pub program: String,
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Lines forwarded from stdout
    pub stdout_lines: usize,
    /// Lines forwarded from stderr
    pub stderr_lines: usize,
}

/// Runs `<package-manager> install` for a project
#[derive(Debug, Clone)]
pub struct DependencyInstaller {
    program: String,
    args: Vec<String>,
    exit_status: ExitStatusPolicy,
}

impl DependencyInstaller {
    /// Create an installer for `program` with argument template `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            exit_status: ExitStatusPolicy::default(),
        }
    }

    /// Set how a non-zero exit status is treated
    pub fn with_exit_status(mut self, policy: ExitStatusPolicy) -> Self {
        self.exit_status = policy;
        self
    }

    /// Arguments with `{target}` substituted
    pub fn args_for(&self, target: &Utf8Path) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(TARGET_PLACEHOLDER, target.as_str()))
            .collect()
    }

    /// Locate the package manager on PATH
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|e| {
            debug!("Lookup of {} failed: {}", self.program, e);
            Error::package_manager_not_found(&self.program)
        })
    }

    /// Install dependencies for the project at `target`
    pub async fn install(&self, target: &Utf8Path) -> Result<InstallReport> {
        let executable = self.locate()?;
        let args = self.args_for(target);

        info!("Running {} {} ...", self.program, args.join(" "));

        let mut cmd = Command::new(&executable);
        cmd.args(&args)
            .current_dir(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::package_manager_not_found(&self.program)
            } else {
                Error::process_execution(format!("Failed to launch {}: {}", self.program, e))
            }
        })?;

        let stdout_task = child
            .stdout
            .take()
            .map(|stdout| forward_lines(stdout, OutputChannel::Stdout));
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| forward_lines(stderr, OutputChannel::Stderr));

        let status = child.wait().await.map_err(|e| {
            Error::process_execution(format!("Failed to wait for {}: {}", self.program, e))
        })?;

        let stdout_lines = join_forwarder(stdout_task).await?;
        let stderr_lines = join_forwarder(stderr_task).await?;

        let report = InstallReport {
            program: self.program.clone(),
            exit_code: status.code(),
            success: status.success(),
            stdout_lines,
            stderr_lines,
        };

        if report.success {
            info!("Dependencies installed successfully");
            return Ok(report);
        }

        match self.exit_status {
            ExitStatusPolicy::Ignore => {
                debug!("{} exited with {}, ignoring", self.program, status);
                Ok(report)
            }
            ExitStatusPolicy::Warn => {
                warn!("{} exited with {}", self.program, status);
                Ok(report)
            }
            ExitStatusPolicy::Fail => Err(Error::install_failed(&self.program, status.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum OutputChannel {
    Stdout,
    Stderr,
}

/// Forward every line of `reader` to the matching console stream
///
/// Lines are read as bytes and printed lossily so output that is not valid
/// UTF-8 never stops forwarding. After a read error the rest of the stream
/// is drained so the child never writes into a closed pipe.
fn forward_lines<R>(reader: R, channel: OutputChannel) -> JoinHandle<usize>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut count = 0;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(trim_line_ending(&buf));
                    match channel {
                        OutputChannel::Stdout => println!("{}", line),
                        OutputChannel::Stderr => eprintln!("{}", line),
                    }
                    count += 1;
                }
                Err(e) => {
                    warn!("Failed to read package manager {:?}: {}", channel, e);
                    let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                    break;
                }
            }
        }

        count
    })
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

async fn join_forwarder(task: Option<JoinHandle<usize>>) -> Result<usize> {
    match task {
        Some(handle) => handle
            .await
            .map_err(|e| Error::process_execution(format!("Output forwarding failed: {}", e))),
        None => Ok(0),
    }
}
