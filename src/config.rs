//! Configuration module for pidbm
//!
//! This module provides a centralized configuration structure for the
//! application. The historical tool kept its parsed option values in
//! fields shared by every sub-command handler; here they are collected
//! once at startup and passed down by reference, so no component reads
//! global state.

use crate::cli::PidbmArgs;

/// Application configuration
///
/// Created in `main` from the parsed command line and handed to the
/// dispatcher and engine. Options that only some sub-commands consume
/// (revision, tag, memory, pcb, mode) stay `None` when absent.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Whether to suppress informational output and confirmation prompts
    quiet: bool,

    /// Board revision for `add board` (-r)
    revision: Option<String>,

    /// Board RAM in MB for `add board` (-m)
    memory: Option<String>,

    /// Board tag for `add board` (-t)
    tag: Option<String>,

    /// PCB revision for `add board` (-p)
    pcb: Option<String>,

    /// Pin mode filter for pin listings (-M, implicit value "input")
    mode: Option<String>,

    /// Explicit connection info (-c), overrides discovery
    connection: Option<String>,
}

impl Config {
    /// Build the configuration from parsed command-line arguments
    pub fn from_args(args: &PidbmArgs) -> Self {
        Config {
            quiet: args.quiet,
            revision: args.revision.clone(),
            memory: args.memory.clone(),
            tag: args.tag.clone(),
            pcb: args.pcb.clone(),
            mode: args.mode.clone(),
            connection: args.connection.clone(),
        }
    }

    /// Get the quiet flag
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Get the board revision option
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Get the board memory option
    pub fn memory(&self) -> Option<&str> {
        self.memory.as_deref()
    }

    /// Get the board tag option
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Get the PCB revision option
    pub fn pcb(&self) -> Option<&str> {
        self.pcb.as_deref()
    }

    /// Get the pin mode filter
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Get the explicit connection info
    pub fn connection(&self) -> Option<&str> {
        self.connection.as_deref()
    }
}
