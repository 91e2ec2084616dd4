mod utils;

use crate::utils::*;

use anyhow::{Context, Result, bail};
use clap::Parser;
use freecell_solver::{FreeCellState, SolverConfig, format_moves};

use std::{
    io::{IsTerminal, Read, stdin},
    path::PathBuf,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Deal a numbered game instead of reading a file
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u32>,
    /// Max search nodes to generate before giving up
    #[arg(short, long, value_name = "NUM")]
    max_states: Option<usize>,
    /// Play safe foundation moves automatically
    #[arg(short, long)]
    auto_play: bool,
    /// Preview the initial layout without solving
    #[arg(short, long)]
    preview: bool,
    /// Print the layout after every move
    #[arg(short, long)]
    boards: bool,
    /// Path to a deal file: one pile per line, cards bottom to top (e.g. "KS, QH, 3C")
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let Cli {
        seed,
        max_states,
        auto_play,
        preview,
        boards,
        file,
    } = Cli::parse();

    let (name, state) = if let Some(file) = file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        let state = FreeCellState::parse(&content).context("Failed to parse deal")?;
        (file.display().to_string(), state)
    } else if let Some(seed) = seed {
        (format!("deal #{seed}"), FreeCellState::from_seed(seed))
    } else if !stdin().is_terminal() {
        let mut content = String::new();
        stdin()
            .read_to_string(&mut content)
            .context("Failed to read from stdin")?;
        let state = FreeCellState::parse(&content).context("Failed to parse deal")?;
        ("deal from stdin".to_string(), state)
    } else {
        bail!("No deal `file` or `--seed` provided.");
    };
    if preview {
        println!("{state}");
        return Ok(());
    }

    let config = SolverConfig {
        max_states,
        auto_play,
    };
    let Some(moves) = do_solve(&name, state.clone(), config)? else {
        bail!("No solution found.");
    };

    if boards {
        let mut current = state;
        for (i, mov) in moves.iter().enumerate() {
            current = current
                .apply(mov)
                .with_context(|| format!("Failed to replay move {}", i + 1))?;
            println!("{}. {mov}\n{current}\n", i + 1);
        }
    } else {
        print!("{}", format_moves(&moves));
    }

    Ok(())
}
