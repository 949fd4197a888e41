use anyhow::{Context, Result, anyhow};
use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// A child process built from a shell-style command line.
///
/// The line is split with POSIX quoting rules, but no shell is involved:
/// pipes, globs and variable expansion are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }

    /// Split `command_line` into a program and its arguments.
    pub fn parse(command_line: &str) -> Result<Self> {
        let argv = shlex::split(command_line)
            .ok_or_else(|| anyhow!("malformed command line: {command_line}"))?;
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .ok_or_else(|| anyhow!("empty command line"))?;
        Ok(Self::new(program.into(), argv.map(OsString::from).collect()))
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Runs the command with inherited stdio and waits for it to finish.
    pub fn execute(&self) -> Result<ExitCode> {
        log::debug!("spawning {:?} with {:?}", self.program, self.args);
        let mut child = std::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("can't spawn {}", self.program.to_string_lossy()))?;
        let exit_status = child.wait()?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}
