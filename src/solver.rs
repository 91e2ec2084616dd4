use crate::{
    action::Move,
    search::{Outcome, Problem, SearchError, SearchLimits, SearchReport, astar},
    state::FreeCellState,
};

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Give up after generating this many search nodes.
    pub max_states: Option<usize>,
    /// Play safe foundation moves without branching on alternatives.
    pub auto_play: bool,
}

/// FreeCell as a search problem; every question is answered by the state itself.
#[derive(Debug, Clone)]
pub struct FreeCellProblem {
    initial_state: FreeCellState,
    auto_play: bool,
}

impl FreeCellProblem {
    pub fn new(initial_state: FreeCellState, auto_play: bool) -> Self {
        Self {
            initial_state,
            auto_play,
        }
    }
}

impl Problem for FreeCellProblem {
    type State = FreeCellState;
    type Move = Move;

    fn initial_state(&self) -> FreeCellState {
        self.initial_state.clone()
    }

    fn is_goal(&self, state: &FreeCellState) -> bool {
        state.is_goal()
    }

    fn next_states(&self, state: &FreeCellState) -> Vec<(FreeCellState, Move, u32)> {
        if self.auto_play {
            if let Some(forced) = state.safe_foundation_move() {
                return vec![forced];
            }
        }
        state.next_states()
    }

    fn heuristic(&self, state: &FreeCellState) -> u32 {
        state.heuristic()
    }
}

#[derive(Debug, Clone)]
pub struct SolveResult {
    pub outcome: Outcome<Move>,
    pub expanded: usize,
    pub generated: usize,
    pub elapsed: Duration,
}

pub fn solve(state: FreeCellState, config: SolverConfig) -> Result<SolveResult, SearchError> {
    let problem = FreeCellProblem::new(state, config.auto_play);
    let limits = SearchLimits {
        max_states: config.max_states,
    };
    let timer = Instant::now();
    let SearchReport {
        outcome,
        expanded,
        generated,
    } = astar(&problem, limits)?;
    Ok(SolveResult {
        outcome,
        expanded,
        generated,
        elapsed: timer.elapsed(),
    })
}
