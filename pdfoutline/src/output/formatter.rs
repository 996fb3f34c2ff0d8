//! Console messages for the person running the tool.
//!
//! Informational lines go to stdout, warnings and errors to stderr. Quiet
//! mode keeps only warnings and errors; verbose mode adds debug lines and
//! labelled details. Color is used when stdout is a terminal and `NO_COLOR`
//! is unset.
//!
//! # Examples
//!
//! ```
//! use pdfoutline::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Scanning inputs...");
//! formatter.success("Wrote 3 outlines");
//! formatter.error("Something went wrong");
//! ```

use std::io::IsTerminal;

use crate::config::Config;

/// Kind of console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Plain status line.
    Info,
    /// Completed work.
    Success,
    /// Something the user should look at.
    Warning,
    /// A failure.
    Error,
    /// Verbose-only line.
    Debug,
}

impl MessageLevel {
    /// Prefix symbol and ANSI color for this level.
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    fn shown(self, quiet: bool, verbose: bool) -> bool {
        match self {
            Self::Warning | Self::Error => true,
            Self::Debug => verbose,
            Self::Info | Self::Success => !quiet,
        }
    }
}

/// Prints status messages according to the verbosity of a run.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter; color is detected from the terminal.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let colored = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            quiet,
            verbose,
            colored,
        }
    }

    /// Create a formatter matching the verbosity of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Whether verbose lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether only warnings and errors are printed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a status line.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// Print a success line.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Print a warning, even in quiet mode.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error, even in quiet mode.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a line in verbose mode only.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    /// Print an indented `label: value` pair in verbose mode only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered entry (1-based) unless quiet.
    pub fn list_item(&self, index: usize, message: &str) {
        if !self.quiet {
            println!("  {index}. {message}");
        }
    }

    /// Format `message` for `level` without printing it.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let (prefix, color) = level.style();
        if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}\x1b[0m")
        } else {
            format!("{prefix}{message}")
        }
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if !level.shown(self.quiet, self.verbose) {
            return;
        }
        let line = self.render(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}
