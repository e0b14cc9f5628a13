//! pidbm - command-line manager for the Piduino board and pin database
//!
//! The Piduino hardware-abstraction library describes boards, SoCs,
//! connectors and pin mappings in a normalized SQLite database. This tool
//! administers that database from the command line: `list` and `show`
//! browse it, `add`, `mod`, `rm` and `cp` maintain it, resolving
//! human-readable names or numeric ids to rows throughout.
//!
//! # Program Flow
//!
//! 1. Parse command-line arguments
//! 2. Discover the connection info (flag, environment, config files)
//! 3. Open the database and check the schema version precondition
//! 4. Dispatch the sub-command
//!
//! Any resolution or argument-shape failure terminates the process with a
//! non-zero status and a message naming the offending argument.

use anyhow::{Context, Result};

use pidbm::cli;
use pidbm::config::Config;
use pidbm::conninfo;
use pidbm::db::Database;
use pidbm::dispatch::Dispatcher;
use pidbm::prompt::StdinReader;

fn main() -> Result<()> {
    // Step 1: Parse command-line arguments
    let args = cli::parse_args()?;

    if args.version {
        version();
        return Ok(());
    }
    if args.warranty {
        warranty();
        return Ok(());
    }

    // Centralized configuration, passed to every component that needs it
    let config = Config::from_args(&args);

    // Step 2: Resolve the connection info; the -c flag wins over the
    // environment and the configuration files
    let cinfo = conninfo::find(config.connection()).context("Failed to locate the database")?;

    // Step 3: Open the session and check the schema precondition before
    // any command runs
    let db = Database::open(&cinfo)
        .with_context(|| format!("Failed to open the database ({cinfo})"))?;
    db.check_schema_version()?;

    // Step 4: Dispatch, blocking on stdin for the interactive commands
    let mut reader = StdinReader::new();
    let mut dispatcher = Dispatcher::new(&db, config, &mut reader);
    dispatcher.run(&args.args)?;

    Ok(())
}

/// Print the version banner
fn version() {
    println!("Piduino pidbm version {}", env!("CARGO_PKG_VERSION"));
    println!("Copyright © 2020 Pascal JEAN, https://github.com/epsilonrt/pidbm");
    println!("This program comes with ABSOLUTELY NO WARRANTY.");
    println!("This is free software, and you are welcome to redistribute it");
    println!("under certain conditions; type 'pidbm -w' for details.");
    println!();
}

/// Print the warranty statement
fn warranty() {
    println!(
        "Copyright © 2020 Pascal JEAN, All rights reserved.\n\n\
         pidbm is provided \"as is\", without warranty of any kind, express\n\
         or implied, including but not limited to the warranties of\n\
         merchantability, fitness for a particular purpose and\n\
         noninfringement. In no event shall the authors or copyright\n\
         holders be liable for any claim, damages or other liability,\n\
         whether in an action of contract, tort or otherwise, arising\n\
         from, out of or in connection with the software or the use or\n\
         other dealings in the software."
    );
}
