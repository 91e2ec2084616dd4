//! Best-first graph search over any puzzle that implements [`Problem`].
//!
//! The search keeps every generated node in a [`NodeTree`], orders the
//! unexpanded ones in a [`Fringe`], and never expands the same state twice.
mod fringe;
mod node;

pub use fringe::{FifoFringe, Fringe, PriorityFringe};
pub use node::{Node, NodeIndex, NodeTree};

use rustc_hash::FxHashSet;
use std::{collections::TryReserveError, hash::Hash, rc::Rc};

/// A puzzle the search can solve.
pub trait Problem {
    type State: Eq + Hash;
    type Move: Clone;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Every `(state, move, cost)` reachable from `state` in one move.
    fn next_states(&self, state: &Self::State) -> Vec<(Self::State, Self::Move, u32)>;

    /// A lower bound on the remaining cost. Zero turns A* into uniform-cost search.
    fn heuristic(&self, _state: &Self::State) -> u32 {
        0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop with [`SearchError::StateLimit`] once this many nodes were generated.
    pub max_states: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<M> {
    Solved { moves: Vec<M>, cost: u32 },
    /// Every reachable state was expanded and none is a goal.
    NoSolution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport<M> {
    pub outcome: Outcome<M>,
    /// States taken off the fringe and expanded.
    pub expanded: usize,
    /// Nodes created, the root included.
    pub generated: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Unable to finish the search; reached max states {0}.")]
    StateLimit(usize),

    #[error("Ran out of memory after generating {generated} states.")]
    OutOfMemory {
        generated: usize,
        #[source]
        source: TryReserveError,
    },
}

pub fn astar<P: Problem>(
    problem: &P,
    limits: SearchLimits,
) -> Result<SearchReport<P::Move>, SearchError> {
    search(problem, PriorityFringe::default(), limits)
}

pub fn breadth_first<P: Problem>(
    problem: &P,
    limits: SearchLimits,
) -> Result<SearchReport<P::Move>, SearchError> {
    search(problem, FifoFringe::default(), limits)
}

/// Runs a graph search with the given fringe until a goal is popped or the
/// fringe runs dry.
pub fn search<P: Problem, F: Fringe>(
    problem: &P,
    mut fringe: F,
    limits: SearchLimits,
) -> Result<SearchReport<P::Move>, SearchError> {
    let mut tree: NodeTree<P::State, P::Move> = NodeTree::new();
    let mut closed: FxHashSet<Rc<P::State>> = FxHashSet::default();
    let out_of_memory = |generated: usize| {
        move |source: TryReserveError| SearchError::OutOfMemory { generated, source }
    };

    let root = Rc::new(problem.initial_state());
    let estimate = problem.heuristic(&root);
    let index = tree.push(Node::root(root)).map_err(out_of_memory(0))?;
    fringe.push(estimate, index).map_err(out_of_memory(1))?;

    while let Some(index) = fringe.pop() {
        // every node enters the fringe once, so its state is still there
        let Some(state) = tree.take_state(index) else {
            continue;
        };
        let cost = tree.get(index).cost();

        if problem.is_goal(&state) {
            return Ok(SearchReport {
                outcome: Outcome::Solved {
                    moves: tree.moves_to(index),
                    cost,
                },
                expanded: closed.len(),
                generated: tree.len(),
            });
        }
        if closed.contains(&state) {
            continue;
        }
        closed.try_reserve(1).map_err(out_of_memory(tree.len()))?;
        let successors = problem.next_states(&state);
        closed.insert(state);

        for (next, mov, step_cost) in successors {
            // a closed state can never be a goal, so its node would only be discarded
            if closed.contains(&next) {
                continue;
            }
            if let Some(max_states) = limits.max_states {
                if tree.len() >= max_states {
                    return Err(SearchError::StateLimit(max_states));
                }
            }
            let child_cost = cost + step_cost;
            let estimate = child_cost + problem.heuristic(&next);
            let child = tree
                .push(Node::child(Rc::new(next), index, mov, child_cost))
                .map_err(out_of_memory(tree.len()))?;
            fringe
                .push(estimate, child)
                .map_err(out_of_memory(tree.len()))?;
        }
    }

    Ok(SearchReport {
        outcome: Outcome::NoSolution,
        expanded: closed.len(),
        generated: tree.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    /// Counting from `start` to `goal` with `+1` and `*2`, never above `bound`.
    struct Arithmetic {
        start: u32,
        goal: u32,
        bound: u32,
        guided: bool,
    }

    impl Problem for Arithmetic {
        type State = u32;
        type Move = &'static str;

        fn initial_state(&self) -> u32 {
            self.start
        }

        fn is_goal(&self, state: &u32) -> bool {
            *state == self.goal
        }

        fn next_states(&self, state: &u32) -> Vec<(u32, &'static str, u32)> {
            [(state + 1, "+1"), (state * 2, "*2")]
                .into_iter()
                .filter(|&(next, _)| next <= self.bound)
                .map(|(next, mov)| (next, mov, 1))
                .collect()
        }

        fn heuristic(&self, state: &u32) -> u32 {
            // doubling at most halves the distance each move
            if self.guided && *state < self.goal {
                let mut steps = 0;
                let mut value = *state;
                while value < self.goal {
                    value *= 2;
                    steps += 1;
                }
                steps
            } else {
                0
            }
        }
    }

    /// A ring of states with no goal on it.
    struct Ring {
        size: u32,
        expansions: Cell<usize>,
    }

    impl Problem for Ring {
        type State = u32;
        type Move = u32;

        fn initial_state(&self) -> u32 {
            0
        }

        fn is_goal(&self, _state: &u32) -> bool {
            false
        }

        fn next_states(&self, state: &u32) -> Vec<(u32, u32, u32)> {
            self.expansions.set(self.expansions.get() + 1);
            let next = (state + 1) % self.size;
            let prev = (state + self.size - 1) % self.size;
            vec![(next, next, 1), (prev, prev, 1)]
        }
    }

    #[test]
    fn test_uniform_cost_finds_shortest_path() {
        let problem = Arithmetic {
            start: 1,
            goal: 10,
            bound: 20,
            guided: false,
        };
        let report = astar(&problem, SearchLimits::default()).unwrap();
        assert_eq!(
            report.outcome,
            Outcome::Solved {
                moves: vec!["+1", "*2", "+1", "*2"],
                cost: 4
            }
        );
    }

    #[test]
    fn test_heuristic_expands_fewer_states() {
        let blind = Arithmetic {
            start: 1,
            goal: 100,
            bound: 200,
            guided: false,
        };
        let guided = Arithmetic {
            guided: true,
            ..blind
        };
        let blind = astar(&blind, SearchLimits::default()).unwrap();
        let guided = astar(&guided, SearchLimits::default()).unwrap();
        let cost = |report: &SearchReport<&str>| match report.outcome {
            Outcome::Solved { cost, .. } => cost,
            Outcome::NoSolution => panic!("no solution"),
        };
        assert_eq!(cost(&blind), cost(&guided));
        assert!(guided.expanded < blind.expanded);
    }

    #[test]
    fn test_goal_at_start() {
        let problem = Arithmetic {
            start: 7,
            goal: 7,
            bound: 20,
            guided: true,
        };
        let report = astar(&problem, SearchLimits::default()).unwrap();
        assert_eq!(
            report.outcome,
            Outcome::Solved {
                moves: vec![],
                cost: 0
            }
        );
        assert_eq!(report.expanded, 0);
        assert_eq!(report.generated, 1);
    }

    #[test]
    fn test_exhausted_space_has_no_solution() {
        let problem = Ring {
            size: 12,
            expansions: Cell::new(0),
        };
        let report = astar(&problem, SearchLimits::default()).unwrap();
        assert_eq!(report.outcome, Outcome::NoSolution);
        assert_eq!(report.expanded, 12);
        // every state is expanded exactly once
        assert_eq!(problem.expansions.get(), 12);

        let report = breadth_first(&problem, SearchLimits::default()).unwrap();
        assert_eq!(report.outcome, Outcome::NoSolution);
        assert_eq!(report.expanded, 12);
    }

    #[test]
    fn test_state_limit() {
        let problem = Ring {
            size: 1000,
            expansions: Cell::new(0),
        };
        let limits = SearchLimits {
            max_states: Some(50),
        };
        assert!(matches!(
            astar(&problem, limits),
            Err(SearchError::StateLimit(50))
        ));
    }

    #[test]
    fn test_breadth_first() {
        let problem = Arithmetic {
            start: 1,
            goal: 10,
            bound: 20,
            guided: false,
        };
        let report = breadth_first(&problem, SearchLimits::default()).unwrap();
        assert_eq!(
            report.outcome,
            Outcome::Solved {
                moves: vec!["+1", "*2", "+1", "*2"],
                cost: 4
            }
        );
    }
}
