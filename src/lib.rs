//! This crate solves FreeCell solitaire deals with an A* search.
//!
pub mod action;
pub mod card;
pub mod deal;
pub mod error;
pub mod pile;
pub mod search;
pub mod solver;
pub mod state;

pub use crate::action::{Move, Target, format_moves};
pub use crate::card::{Card, Color, Suit};
pub use crate::error::{InvalidMove, ParseError};
pub use crate::pile::{Pile, Tableau};
pub use crate::search::{Outcome, Problem, SearchError, SearchLimits};
pub use crate::solver::{FreeCellProblem, SolveResult, SolverConfig, solve};
pub use crate::state::FreeCellState;
