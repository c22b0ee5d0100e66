//! Mapcolor -- a territory map-coloring engine.
//!
//! This binary reads session commands from stdin and writes responses to
//! stdout, one command per line. Diagnostics go to stderr through `tracing`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mapcolor::config::SessionConfig;
use mapcolor::protocol::parser::{parse_command, Command};
use mapcolor::session::Session;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "mapcolor", version, about = "Assign map provinces to countries")]
struct Args {
    /// JSON configuration file (countries, secret, neutral color).
    #[arg(long)]
    config: Option<PathBuf>,

    /// SVG map asset to load at start-up.
    #[arg(long)]
    map: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => match SessionConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };

    let mut session = match Session::new(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if let Some(path) = &args.map {
        // Failures are reported through the status line; the session stays usable.
        let _ = session.load_map_file(path);
        if write_status(&mut out, &session).is_err() {
            return ExitCode::FAILURE;
        }
    }

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        if cmd == Command::Quit {
            break;
        }
        if handle(&mut session, cmd, &mut out).is_err() {
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

/// Applies one command and writes its response. Rejected actions are not
/// errors here: their outcome is already in the session's status line.
fn handle<W: Write>(session: &mut Session, cmd: Command, out: &mut W) -> io::Result<()> {
    match cmd {
        Command::Load { path } => {
            let _ = session.load_map_file(&PathBuf::from(path));
            write_status(out, session)
        }
        Command::Unlock { credential } => {
            let _ = session.unlock(&credential);
            write_status(out, session)
        }
        Command::Lock => {
            session.lock();
            write_status(out, session)
        }
        Command::Select { country } => {
            let _ = session.select_country(country);
            write_status(out, session)
        }
        Command::Remove => {
            let _ = session.select_remove();
            write_status(out, session)
        }
        Command::Click { province } => {
            let _ = session.click(&province);
            write_status(out, session)
        }
        Command::Colors => {
            for (region, color) in session.painter().iter() {
                writeln!(out, "fill {} {}", region, color)?;
            }
            writeln!(out, "colorsok")?;
            out.flush()
        }
        Command::Owners => {
            for country in session.state().countries.iter() {
                let owned = country.sorted_territories();
                let owned = if owned.is_empty() {
                    String::from("-")
                } else {
                    owned.join(",")
                };
                writeln!(out, "owner {} {} {}", country.id(), country.name(), owned)?;
            }
            writeln!(out, "ownersok")?;
            out.flush()
        }
        Command::Status => write_status(out, session),
        Command::LockState => {
            writeln!(out, "lock {}", session.lock_label())?;
            out.flush()
        }
        Command::Quit => Ok(()),
    }
}

fn write_status<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "status {}", session.status())?;
    out.flush()
}
