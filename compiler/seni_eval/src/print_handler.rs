//! Output sink for `print` and `log`.
//!
//! Scripts never write to the console directly. The embedder chooses where
//! their lines go:
//! - `Stdout` for the command-line driver
//! - `Buffer` to capture lines for tests or to return them in a job response
//! - `Tracing` to fold script output into the host's log stream
//! - `Silent` when generating genotypes, where output is noise
//!
//! Enum dispatch keeps the handler `Send + Sync` without trait objects.

use parking_lot::Mutex;
use std::sync::Arc;

/// Captures lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    lines: Mutex<Vec<String>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, msg: &str) {
        self.lines.lock().push(msg.to_owned());
    }

    /// Everything printed so far, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout,
    Buffer(BufferPrintHandler),
    Tracing,
    Silent,
}

impl PrintHandlerImpl {
    /// Emit one line of script output.
    pub fn line(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(handler) => handler.line(msg),
            Self::Tracing => tracing::info!(target: "seni::script", "{msg}"),
            Self::Silent => {}
        }
    }

    /// Captured lines; empty for handlers that do not capture.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Buffer(handler) => handler.lines(),
            Self::Stdout | Self::Tracing | Self::Silent => Vec::new(),
        }
    }

    /// Captured lines joined with newlines.
    pub fn output(&self) -> String {
        self.lines().join("\n")
    }
}

pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn tracing_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Tracing)
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
