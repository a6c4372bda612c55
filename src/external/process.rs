//! Synchronous external tool invocation with a timeout.
//!
//! Children are polled until they exit, the timeout expires or Ctrl+C is
//! received; in the last two cases the child is killed. Output streams are
//! drained on separate threads so a chatty tool cannot block on a full pipe.

use std::ffi::OsString;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{BidetError, Result};

/// Interval between child status polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Set by the Ctrl+C handler.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Check if Ctrl+C has been received.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Install the Ctrl+C handler. Call once per process.
pub fn setup_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        INTERRUPTED.store(true, Ordering::SeqCst);
    })
    .map_err(|e| BidetError::Tool {
        tool: "signal handler".to_string(),
        message: e.to_string(),
        help: None,
    })
}

/// What to do with a tool's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutMode {
    /// Collect it into [`ToolOutput::stdout`].
    Capture,
    /// Pass it straight through to our stdout.
    Inherit,
}

/// Result of a finished tool run.
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// A command line for an external tool.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    timeout: Duration,
    stdout: StdoutMode,
}

impl ToolCommand {
    /// Create a command with a 30 second timeout and captured stdout.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
            stdout: StdoutMode::Capture,
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the stdout handling.
    pub fn stdout(mut self, mode: StdoutMode) -> Self {
        self.stdout = mode;
        self
    }

    /// The executable name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render the command line for debug output.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Run to completion, returning the output whatever the exit status.
    pub fn output(&self) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .stdout(match self.stdout {
                StdoutMode::Capture => Stdio::piped(),
                StdoutMode::Inherit => Stdio::inherit(),
            });

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BidetError::Tool {
                    tool: self.program.clone(),
                    message: "command not found".to_string(),
                    help: Some(format!("Install {} or point bidet.yaml at it", self.program)),
                }
            } else {
                BidetError::Tool {
                    tool: self.program.clone(),
                    message: format!("failed to start: {}", e),
                    help: None,
                }
            }
        })?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait(&mut child)?;

        Ok(ToolOutput {
            status,
            stdout: collect(stdout),
            stderr: String::from_utf8_lossy(&collect(stderr)).trim().to_string(),
        })
    }

    /// Run to completion and fail on a non-zero exit status.
    pub fn run(&self) -> Result<ToolOutput> {
        let output = self.output()?;
        if output.status.success() {
            return Ok(output);
        }

        let code = output
            .status
            .code()
            .map_or_else(|| "a signal".to_string(), |c| format!("status {}", c));
        let message = if output.stderr.is_empty() {
            format!("exited with {}", code)
        } else {
            format!("exited with {}: {}", code, output.stderr)
        };
        Err(BidetError::Tool {
            tool: self.program.clone(),
            message,
            help: None,
        })
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let start = Instant::now();

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if interrupted() {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BidetError::Interrupted);
            }
            if start.elapsed() > self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(BidetError::Timeout {
                    tool: self.program.clone(),
                    seconds: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

fn drain(mut stream: impl Read + Send + 'static) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
