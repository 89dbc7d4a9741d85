mod cli;
mod config;
mod tables;

use clap::Parser;
use colored::Colorize;

use common::Error;
use common::search::{self, Limits};

use crate::cli::Args;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let puzzle = config::load(&args.file)?;

    log::info!("{}", puzzle.description);
    log::debug!(
        "board with {} holes, start {}, method {:?}, scope {:?}",
        puzzle.board.holes(),
        puzzle.start,
        puzzle.method,
        puzzle.scope
    );

    let limits = Limits {
        max_states: args.max_states,
        cancel: None,
    };

    match search::solve(
        &puzzle.board,
        &puzzle.start,
        &puzzle.goal,
        puzzle.method,
        puzzle.scope,
        &limits,
    ) {
        Ok(solutions) => {
            cli::print_solutions(&solutions);
            Ok(())
        }
        Err(Error::Aborted { explored }) => {
            eprintln!(
                "{}",
                format!("search aborted after exploring {explored} states").red()
            );
            std::process::exit(2);
        }
        Err(err) => Err(err.into()),
    }
}
