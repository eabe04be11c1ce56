//! `flightdesk` - CLI for the in-memory flight board

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};

use anyhow::Context;
use clap::Parser;

use flightdesk::cli::{Cli, Command, SessionCommand};
use flightdesk::{init_logging, render, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Session(session_cmd) => {
            let config = Config::load_from(cli.config).context("loading configuration")?;
            handle_session(config, &session_cmd)
        }
        // Runs without a loaded config so a broken file can still be located and checked
        Command::Config(config_cmd) => {
            let stdout = io::stdout();
            config_cmd
                .run(cli.config, &mut stdout.lock())
                .context("checking configuration")
        }
    }
}

fn handle_session(mut config: Config, cmd: &SessionCommand) -> anyhow::Result<()> {
    if cmd.no_color {
        config.display.color = false;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let session = if let Some(path) = &cmd.script {
        let file =
            File::open(path).with_context(|| format!("opening script {}", path.display()))?;
        let mut session = Session::new(config);
        session
            .run(BufReader::new(file), &mut out)
            .with_context(|| format!("running script {}", path.display()))?;
        session
    } else {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        if interactive {
            writeln!(out, "flightdesk: type 'help' for commands, 'quit' to leave")?;
        }
        let mut session = Session::new(config).interactive(interactive);
        session.run(stdin.lock(), &mut out)?;
        session
    };

    if cmd.json {
        writeln!(out, "{}", render::render_json(session.registry().flights())?)?;
    }
    Ok(())
}
