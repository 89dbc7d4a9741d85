//! Exhaustive search for winning jump sequences.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Board, BoardState, Error, Move, Vertex};

/// Traversal order for the state space.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SearchMethod {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// Stop at the first solution, or enumerate every one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SolutionScope {
    #[default]
    Single,
    Multiple,
}

/// What counts as a solved board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Goal {
    /// The occupancy must equal this state exactly.
    Position(BoardState),
    /// Exactly this many pegs remain and no further jump is possible.
    Count(u32),
}

impl Goal {
    /// An exact-occupancy goal with pegs in the given holes.
    pub fn position(board: &Board, pegs: &[Vertex]) -> Result<Goal, Error> {
        if let Some(&v) = pegs.iter().find(|&&v| v >= board.holes()) {
            return Err(Error::InvalidGoal(format!(
                "target hole {v} does not exist on a board with {} holes",
                board.holes()
            )));
        }

        Ok(Goal::Position(BoardState::with_pegs(
            board.holes(),
            pegs.iter().copied(),
        )))
    }

    /// A goal asking for `count` pegs left with no move remaining.
    pub fn count(count: u32) -> Goal {
        Goal::Count(count)
    }

    /// Does `state` satisfy the goal? The count variant checks the cheap
    /// peg count before probing for remaining moves.
    pub fn is_satisfied(&self, board: &Board, state: &BoardState) -> bool {
        match self {
            Goal::Position(target) => state == target,
            Goal::Count(count) => state.peg_count() == *count && !board.has_moves(state),
        }
    }

    /// Peg count of any state satisfying this goal. Every jump removes
    /// one peg, so a branch that has dropped to this count without
    /// satisfying the goal is dead.
    fn target_pegs(&self) -> u32 {
        match self {
            Goal::Position(target) => target.peg_count(),
            Goal::Count(count) => *count,
        }
    }

    fn validate(&self, board: &Board, start: &BoardState) -> Result<(), Error> {
        match self {
            Goal::Position(target) => {
                if target.holes() != board.holes() {
                    return Err(Error::InvalidGoal(format!(
                        "target covers {} holes but the board has {}",
                        target.holes(),
                        board.holes()
                    )));
                }
                if target.peg_count() > start.peg_count() {
                    return Err(Error::InvalidGoal(format!(
                        "target has {} pegs but the start state only has {}",
                        target.peg_count(),
                        start.peg_count()
                    )));
                }
                Ok(())
            }
            Goal::Count(count) => {
                if *count < 1 || *count >= start.peg_count() {
                    return Err(Error::InvalidGoal(format!(
                        "a finishing count of {count} is outside 1..{}",
                        start.peg_count()
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Optional ceilings on a search run.
///
/// `max_states` bounds how many states may be examined; `cancel` is a
/// cooperative flag checked at the same point, between pops. Either
/// trips the run into [`Error::Aborted`].
#[derive(Clone, Default)]
pub struct Limits {
    pub max_states: Option<u64>,
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Every solution discovered, in discovery order, along with how much
/// of the state space the run touched.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solutions {
    pub paths: Vec<Vec<Move>>,
    pub explored: u64,
}

impl Solutions {
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Search the board for jump sequences taking `start` to a state that
/// satisfies `goal`.
///
/// Depth-first search mutates a single state in place and backtracks by
/// undoing moves; breadth-first search keeps a FIFO frontier in which
/// every entry owns its state and path. Under [`SolutionScope::Single`]
/// depth-first returns the first solution in move-generation order while
/// breadth-first returns one of minimal length; the difference is part
/// of the contract. A goal state ends its branch: the search never
/// extends a recorded solution with further jumps, and states are never
/// skipped just because another move order reached the same occupancy.
///
/// Finding nothing is a successful outcome with zero paths, not an
/// error.
pub fn solve(
    board: &Board,
    start: &BoardState,
    goal: &Goal,
    method: SearchMethod,
    scope: SolutionScope,
    limits: &Limits,
) -> Result<Solutions, Error> {
    debug_assert_eq!(start.holes(), board.holes());
    goal.validate(board, start)?;

    let mut search = Search {
        board,
        goal,
        scope,
        ticker: Ticker::new(limits),
        paths: Vec::new(),
    };

    match method {
        SearchMethod::DepthFirst => {
            let mut state = start.clone();
            let mut path = Vec::new();
            search.depth_first(&mut state, &mut path)?;
        }
        SearchMethod::BreadthFirst => search.breadth_first(start)?,
    }

    log::debug!(
        "explored {} states, found {} solutions",
        search.ticker.explored,
        search.paths.len()
    );

    Ok(Solutions {
        paths: search.paths,
        explored: search.ticker.explored,
    })
}

struct Search<'a> {
    board: &'a Board,
    goal: &'a Goal,
    scope: SolutionScope,
    ticker: Ticker,
    paths: Vec<Vec<Move>>,
}

impl Search<'_> {
    /// Returns true when the caller should stop unwinding: a
    /// single-solution run ends at the first hit.
    fn depth_first(&mut self, state: &mut BoardState, path: &mut Vec<Move>) -> Result<bool, Error> {
        self.ticker.tick()?;

        if self.goal.is_satisfied(self.board, state) {
            log::debug!("solution after {} moves: {state}", path.len());
            self.paths.push(path.clone());
            return Ok(self.scope == SolutionScope::Single);
        }

        if state.peg_count() <= self.goal.target_pegs() {
            return Ok(false);
        }

        let moves: Vec<Move> = self.board.legal_moves(state).collect();
        for mv in moves {
            state.apply(mv);
            path.push(mv);
            let stop = self.depth_first(state, path)?;
            path.pop();
            state.undo(mv);
            if stop {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn breadth_first(&mut self, start: &BoardState) -> Result<(), Error> {
        let mut frontier = VecDeque::new();
        frontier.push_back((start.clone(), Vec::new()));

        while let Some((state, path)) = frontier.pop_front() {
            self.ticker.tick()?;

            if self.goal.is_satisfied(self.board, &state) {
                log::debug!("solution after {} moves: {state}", path.len());
                self.paths.push(path);
                if self.scope == SolutionScope::Single {
                    return Ok(());
                }
                continue;
            }

            if state.peg_count() <= self.goal.target_pegs() {
                continue;
            }

            for mv in self.board.legal_moves(&state) {
                let mut next = state.clone();
                next.apply(mv);
                let mut longer = path.clone();
                longer.push(mv);
                frontier.push_back((next, longer));
            }
        }

        Ok(())
    }
}

struct Ticker {
    explored: u64,
    max_states: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Ticker {
    fn new(limits: &Limits) -> Self {
        Ticker {
            explored: 0,
            max_states: limits.max_states,
            cancel: limits.cancel.clone(),
        }
    }

    /// Account for one state taken up for examination; errors once the
    /// budget is spent or the cancellation flag is raised.
    fn tick(&mut self) -> Result<(), Error> {
        if let Some(max) = self.max_states {
            if self.explored >= max {
                return Err(Error::Aborted {
                    explored: self.explored,
                });
            }
        }

        if let Some(cancel) = &self.cancel {
            if cancel.load(Ordering::Relaxed) {
                return Err(Error::Aborted {
                    explored: self.explored,
                });
            }
        }

        self.explored += 1;
        Ok(())
    }
}
