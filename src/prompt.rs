//! Interactive input module for pidbm
//!
//! Several commands block on operator input: filling a connector pin
//! grid, appending pins to a SoC or GPIO map, confirming a deletion. The
//! line source is injected behind a small trait so the engine and the
//! dispatcher can be driven by scripted input in tests instead of a real
//! standard input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::PidbmResult;

/// A blocking source of operator input lines
pub trait LineReader {
    /// Print `prompt` (no trailing newline) and read one line
    ///
    /// The returned line has no line terminator. `None` means end of
    /// input; interactive loops treat it like their quit sentinel.
    fn read_line(&mut self, prompt: &str) -> PidbmResult<Option<String>>;
}

/// Line reader backed by the process standard input
#[derive(Debug, Default)]
pub struct StdinReader;

impl StdinReader {
    pub fn new() -> Self {
        StdinReader
    }
}

impl LineReader for StdinReader {
    fn read_line(&mut self, prompt: &str) -> PidbmResult<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Line reader fed from a fixed script, for tests
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new(lines: &[&str]) -> Self {
        ScriptedReader {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> PidbmResult<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Ask a yes/no question; only a literal `y` or `Y` confirms
///
/// Anything else, including end of input, declines.
pub fn confirm(reader: &mut dyn LineReader, prompt: &str) -> PidbmResult<bool> {
    let answer = reader.read_line(prompt)?;
    Ok(matches!(answer.as_deref().map(str::trim), Some("y") | Some("Y")))
}

/// Whether a line is the interactive-loop quit sentinel (`q` or `Q`)
pub fn is_quit(line: &str) -> bool {
    line == "q" || line == "Q"
}
