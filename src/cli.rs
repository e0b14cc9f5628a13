//! CLI argument parsing module for pidbm
//!
//! This module handles parsing command-line arguments using the clap crate.
//! The command surface is deliberately loose: the sub-command (`list`,
//! `show`, `add`, `cp`, `mod`, `rm`) and everything after it are plain
//! positional arguments, and the dispatcher derives each sub-command's
//! required argument shape itself. Options may appear before or after the
//! positional arguments.
//!
//! clap's automatic version flag is disabled because the historical tool
//! answers to lowercase `-v`, and `-w/--warranty` is an extra informational
//! switch with no clap builtin.

use anyhow::Result;
use clap::Parser;

/// Command-line arguments for pidbm
#[derive(Parser, Debug)]
#[clap(
    author,
    disable_version_flag = true,
    about = "Piduino database manager",
    override_usage = "pidbm [OPTIONS] {list | show | add | cp | mod | rm} [<args>]"
)]
pub struct PidbmArgs {
    /// Sub-command followed by its arguments
    ///
    /// Example: `pidbm list soc h3` or `pidbm add manufacturer "Sony Japan"`.
    /// No positional argument is required so that `-v` and `-w` can be used
    /// alone.
    #[clap(help = "Sub-command and arguments: {list|show|add|cp|mod|rm} [<args>]")]
    pub args: Vec<String>,

    /// Prints version and exit
    #[clap(short = 'v', long = "version", help = "Prints version and exit")]
    pub version: bool,

    /// Output the warranty and exit
    #[clap(short = 'w', long = "warranty", help = "Output the warranty and exit")]
    pub warranty: bool,

    /// Perform operations quietly
    ///
    /// Suppresses informational messages and auto-confirms destructive
    /// operations (deletions proceed without the interactive [y/N] prompt).
    #[clap(short = 'q', long = "quiet", help = "Perform operations quietly")]
    pub quiet: bool,

    /// Board revision, used by `add board` (hex accepted, e.g. -r0xa03111)
    #[clap(short = 'r', long = "revision", help = "Board revision")]
    pub revision: Option<String>,

    /// Board RAM in megabytes, used by `add board`
    #[clap(short = 'm', long = "memory", help = "Board RAM (MB)")]
    pub memory: Option<String>,

    /// Board tag, used by `add board` as an alternative to a revision
    #[clap(short = 't', long = "tag", help = "Board tag")]
    pub tag: Option<String>,

    /// PCB revision, used by `add board`
    #[clap(short = 'p', long = "pcb", help = "PCB revision")]
    pub pcb: Option<String>,

    /// Pin mode filter for pin listings
    ///
    /// The value must be attached (`-Malt0` or `--mode=alt0`); a bare `-M`
    /// selects the implicit default mode `input`.
    #[clap(
        short = 'M',
        long = "mode",
        num_args = 0..=1,
        default_missing_value = "input",
        help = "Pin mode (default: input)"
    )]
    pub mode: Option<String>,

    /// Database connection info, overrides every discovery source
    ///
    /// Example: -c "sqlite3:db=/var/lib/piduino/piduino.db"
    #[clap(short = 'c', long = "connection", help = "Database connection info")]
    pub connection: Option<String>,
}

/// Parse command-line arguments into the PidbmArgs structure
///
/// clap handles validation and help text generation; `-h/--help` prints the
/// usage and exits with success.
pub fn parse_args() -> Result<PidbmArgs> {
    Ok(PidbmArgs::parse())
}
