use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use common::search::Solutions;

/// A general peg jump puzzle solver.
#[derive(Parser, Debug)]
#[command(name = "pegjump", version, about)]
pub struct Args {
    /// JSON file describing the board, the start state and the goal
    #[arg(long)]
    pub file: PathBuf,

    /// Give up after examining this many states
    #[arg(long)]
    pub max_states: Option<u64>,
}

/// Print every discovered path and a summary line.
pub fn print_solutions(solutions: &Solutions) {
    for (idx, path) in solutions.paths.iter().enumerate() {
        if path.is_empty() {
            println!("{:4}: (no moves required)", idx + 1);
            continue;
        }

        let rendered: Vec<String> = path.iter().map(|mv| mv.to_string()).collect();
        println!("{:4}: {}", idx + 1, rendered.join(", "));
    }

    let summary = format!("Solutions found: {}", solutions.count());
    if solutions.is_empty() {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }

    log::debug!("{} states explored", solutions.explored);
}
