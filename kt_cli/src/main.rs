//! A terminal front-end for king-of-the-table tournaments.
//!
//! Reads commands from stdin, applies them to the engine, saves the
//! tournament after every change and prints the tables.

use anyhow::{Context, Error};
use ctrlc::set_handler;
use king_table::JsonFileStore;
use log::{error, info};
use pico_args::Arguments;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use kt_cli::{
    commands::parse_command,
    config::CliConfig,
    render::{Board, COMMANDS_HELP},
    session::{Response, Session, SessionError},
};

const HELP: &str = "\
Run a king-of-the-table tournament from the terminal

USAGE:
  kt_cli [OPTIONS]

OPTIONS:
  --state      FILE        Snapshot file  [default: env KT_STATE_FILE or king_table.json]
  --tables     N           Tables for new tournaments  [default: env KT_TABLES or 1]
  --streak     N           Wins in a row before rotating off, 0 disables  [default: env KT_MAX_STREAK or 2]
  --history    N           Maximum undo depth  [default: env KT_HISTORY_LIMIT or unlimited]

FLAGS:
  --fresh                  Ignore the stored tournament (it is replaced on the next change)
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                 Log level (e.g., debug)
  (A .env file in the working directory is loaded if present)
";

struct Args {
    state_file: Option<PathBuf>,
    tables: Option<i64>,
    streak: Option<i64>,
    history: Option<usize>,
    fresh: bool,
}

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        state_file: pargs.opt_value_from_str("--state")?,
        tables: pargs.opt_value_from_str("--tables")?,
        streak: pargs.opt_value_from_str("--streak")?,
        history: pargs.opt_value_from_str("--history")?,
        fresh: pargs.contains("--fresh"),
    };
    let unused = pargs.finish();
    if !unused.is_empty() {
        anyhow::bail!("unexpected arguments: {unused:?}");
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    env_logger::builder().format_target(false).init();

    let config = CliConfig::from_env(args.state_file, args.tables, args.streak, args.history);
    config.validate()?;
    info!("keeping tournament in {}", config.state_file.display());

    let store = JsonFileStore::new(&config.state_file);
    let session = if args.fresh {
        Session::new(&config, store)
    } else {
        Session::open(&config, store)
            .with_context(|| format!("Failed to read {}", config.state_file.display()))?
    };

    run(session)
}

fn run(mut session: Session<JsonFileStore>) -> Result<(), Error> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", Board(&session.view()));
    println!("Type 'help' for commands.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.execute(command) {
            Ok(Response::Updated | Response::Show) => println!("{}", Board(&session.view())),
            Ok(Response::Ignored(reason)) => println!("Nothing changed: {reason}"),
            Ok(Response::Status(summary)) => print!("{summary}"),
            Ok(Response::Help) => print!("{COMMANDS_HELP}"),
            Ok(Response::Quit) => break,
            Err(SessionError::Engine(e)) => println!("{e}"),
            Err(e @ SessionError::Store(_)) => {
                error!("{e}");
                println!("{}", Board(&session.view()));
            }
        }
    }

    Ok(())
}
