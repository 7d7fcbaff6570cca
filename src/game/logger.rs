//! Centralized logger for game events
//!
//! Model no-ops (empty reserve, unknown card id) and controller decisions are
//! reported here rather than panicking or printing ad hoc. The log buffer can
//! be captured in memory for test assertions.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When the verbose-logging feature is disabled, this becomes a no-op at
/// compile time, eliminating the format! allocations on the move hot path.
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.log(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger; // Suppress unused variable warning
        }
    };
}

pub(crate) use log_if_verbose;

/// Verbosity level for engine output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only game outcome events
    Minimal = 1,
    /// Normal - committed moves and rejections (default)
    #[default]
    Normal = 2,
    /// Verbose - every state change
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A log entry with owned strings (no lifetime parameters)
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Verbosity level of this log entry
    pub level: VerbosityLevel,
    /// Log message (owned)
    pub message: String,
}

/// Guard type that provides read-only access to captured log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

/// Logger with a verbosity filter and an optional in-memory capture buffer
///
/// The buffer sits behind a RefCell so read paths holding `&GameState` can
/// still record events.
#[derive(Debug, Clone)]
pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        GameLogger {
            verbosity: VerbosityLevel::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Set output mode (Stdout, Memory, or Both)
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Switch to in-memory capture (suppresses stdout output)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    /// Log a message at Normal level
    pub fn log(&self, message: &str) {
        self.dispatch(VerbosityLevel::Normal, message);
    }

    /// Log a message at Verbose level
    pub fn verbose(&self, message: &str) {
        self.dispatch(VerbosityLevel::Verbose, message);
    }

    fn dispatch(&self, level: VerbosityLevel, message: &str) {
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
            && level <= self.verbosity
        {
            println!("{message}");
        }
    }

    /// Read-only access to the captured entries
    pub fn entries(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Drop all captured entries
    pub fn clear_logs(&mut self) {
        self.log_buffer.borrow_mut().clear();
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

// The capture buffer is transient diagnostics, not game state: serialization
// round-trips the configuration and comes back with an empty buffer.
impl Serialize for GameLogger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("GameLogger", 2)?;
        state.serialize_field("verbosity", &self.verbosity)?;
        state.serialize_field("output_mode", &self.output_mode)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GameLogger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GameLoggerData {
            verbosity: VerbosityLevel,
            output_mode: OutputMode,
        }

        let data = GameLoggerData::deserialize(deserializer)?;
        Ok(GameLogger {
            verbosity: data.verbosity,
            output_mode: data.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        })
    }
}
