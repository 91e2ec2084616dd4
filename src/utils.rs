use anyhow::Result;
use freecell_solver::{FreeCellState, Move, Outcome, SolveResult, SolverConfig, solve};

use std::{
    io::{IsTerminal, Write, stderr},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

/// Solves the deal and prints a summary line. Returns `None` when the search
/// ran out of states to explore.
pub fn do_solve(name: &str, state: FreeCellState, config: SolverConfig) -> Result<Option<Vec<Move>>> {
    println!("# {name}, {} cards to play\n{state}\n", state.heuristic());
    let mode = if config.auto_play { ", auto play" } else { "" };
    let SolveResult {
        outcome,
        expanded,
        generated,
        elapsed,
    } = with_spinner(&format!("Searching {name}{mode}"), move || solve(state, config))?;
    let elapsed_str = format_elapsed(elapsed);
    match outcome {
        Outcome::Solved { moves, cost } => {
            println!(
                "✓ Solved {name} in {} moves (cost {cost}), Time: {elapsed_str}, Expanded: {expanded}, States: {generated}\n",
                moves.len()
            );
            Ok(Some(moves))
        }
        Outcome::NoSolution => {
            println!(
                "✗ No solution for {name}, every reachable layout tried. Time: {elapsed_str}, Expanded: {expanded}, States: {generated}"
            );
            Ok(None)
        }
    }
}

/// Runs `f` while a spinner with a running clock ticks on stderr.
fn with_spinner<T, F: FnOnce() -> T>(message: &str, f: F) -> T {
    if !stderr().is_terminal() {
        return f();
    }
    let spinning = Arc::new(AtomicBool::new(true));
    let ticker = {
        let spinning = Arc::clone(&spinning);
        let message = message.to_string();
        std::thread::spawn(move || {
            let started = Instant::now();
            let stderr = stderr();
            let mut handle = stderr.lock();

            let _ = write!(handle, "\x1b[?25l"); // hide cursor
            for frame in ['|', '/', '-', '\\'].into_iter().cycle() {
                if !spinning.load(Ordering::Relaxed) {
                    break;
                }
                let clock = format_elapsed(started.elapsed());
                let _ = write!(handle, "\r\x1b[2K{frame} {message} ({clock})");
                let _ = handle.flush();
                std::thread::sleep(Duration::from_millis(100));
            }

            let _ = write!(handle, "\r\x1b[2K\x1b[?25h"); // clear line and show cursor
            let _ = handle.flush();
        })
    };

    let result = f();
    spinning.store(false, Ordering::Relaxed);
    let _ = ticker.join();
    result
}

/// Milliseconds under a minute, whole seconds under an hour, then hours.
fn format_elapsed(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        secs @ 0..60 => format!("{secs}.{:03}s", elapsed.subsec_millis()),
        secs @ 60..3600 => format!("{}m {:02}s", secs / 60, secs % 60),
        secs => format!("{}h {:02}m", secs / 3600, secs % 3600 / 60),
    }
}
