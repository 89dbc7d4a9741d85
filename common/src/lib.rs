pub mod geometry;
pub mod layout;
pub mod search;

use std::fmt;

use bitvec::{bitbox, boxed::BitBox, prelude::Lsb0};

/// Identifies a hole on the board. Holes are numbered `0..Board::holes()`.
pub type Vertex = usize;

/// A single jump: the peg at `src` leaps the peg at `over` and comes to
/// rest in the empty hole `dst`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub src: Vertex,
    pub over: Vertex,
    pub dst: Vertex,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}->{}", self.src, self.over, self.dst)
    }
}

/// One way a peg could leave a given hole: which hole it would jump and
/// where it would land. Occupancy is not part of the topology; callers
/// check it against a [`BoardState`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct JumpOption {
    pub over: Vertex,
    pub dst: Vertex,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The transition table references holes that don't exist, or yields
    /// a jump whose three holes are not pairwise distinct.
    MalformedTopology(String),
    /// The requested end state can never be reached from the start state.
    InvalidGoal(String),
    /// The search hit its budget or was cancelled before finishing.
    Aborted { explored: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedTopology(msg) => write!(f, "malformed board topology: {msg}"),
            Error::InvalidGoal(msg) => write!(f, "invalid goal: {msg}"),
            Error::Aborted { explored } => {
                write!(f, "search aborted after exploring {explored} states")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Board topology: for every hole, the ordered list of jumps a peg
/// sitting there could attempt.
///
/// Built once from a transition table and immutable afterwards, so a
/// single board can back any number of searches.
#[derive(Clone, Debug)]
pub struct Board {
    holes: usize,
    jumps: Vec<Vec<JumpOption>>,
}

impl Board {
    /// Build a board from a transition table: `transitions[v][d]` is the
    /// hole adjacent to `v` in direction `d`, if any. A jump exists
    /// wherever two steps can be taken in the same direction: the first
    /// adjacent hole is jumped, the second is the landing hole.
    pub fn from_transitions(transitions: &[Vec<Option<Vertex>>]) -> Result<Self, Error> {
        let holes = transitions.len();

        for (v, row) in transitions.iter().enumerate() {
            for &cell in row {
                if let Some(n) = cell {
                    if n >= holes {
                        return Err(Error::MalformedTopology(format!(
                            "hole {v} has a neighbour {n}, but only holes 0..{holes} exist"
                        )));
                    }
                }
            }
        }

        let mut jumps = vec![Vec::new(); holes];
        for (src, row) in transitions.iter().enumerate() {
            for (dir, &cell) in row.iter().enumerate() {
                let Some(over) = cell else { continue };
                let Some(&Some(dst)) = transitions[over].get(dir) else {
                    continue;
                };

                if over == src || dst == src || dst == over {
                    return Err(Error::MalformedTopology(format!(
                        "jump {src} over {over} to {dst} in direction {dir} is degenerate"
                    )));
                }

                jumps[src].push(JumpOption { over, dst });
            }
        }

        Ok(Board { holes, jumps })
    }

    /// Number of holes on the board.
    pub fn holes(&self) -> usize {
        self.holes
    }

    /// The jumps a peg at `v` could attempt, in declared direction order.
    pub fn jump_options(&self, v: Vertex) -> &[JumpOption] {
        &self.jumps[v]
    }

    /// All moves that are legal in `state`: lowest source hole first,
    /// declared direction order within a hole. The order is stable so
    /// repeated searches of the same position take the same branches.
    pub fn legal_moves<'a>(&'a self, state: &'a BoardState) -> MoveGen<'a> {
        MoveGen {
            board: self,
            state,
            src: 0,
            opt: 0,
        }
    }

    /// True if at least one legal move exists. Stops at the first hit.
    pub fn has_moves(&self, state: &BoardState) -> bool {
        self.legal_moves(state).next().is_some()
    }
}

/// Lazy enumeration of the legal moves in one state.
///
/// See [`Board::legal_moves`] for the emission order.
pub struct MoveGen<'a> {
    board: &'a Board,
    state: &'a BoardState,
    src: Vertex,
    opt: usize,
}

impl Iterator for MoveGen<'_> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        while self.src < self.board.holes {
            if !self.state.is_occupied(self.src) {
                self.src += 1;
                self.opt = 0;
                continue;
            }

            while let Some(&JumpOption { over, dst }) = self.board.jumps[self.src].get(self.opt) {
                self.opt += 1;
                if self.state.is_occupied(over) && !self.state.is_occupied(dst) {
                    return Some(Move {
                        src: self.src,
                        over,
                        dst,
                    });
                }
            }

            self.src += 1;
            self.opt = 0;
        }

        None
    }
}

/// Which holes currently hold a peg.
///
/// A fixed-width bitset over the board's holes plus a cached peg count.
/// Cheap to clone; breadth-first search keeps one copy per frontier
/// entry, depth-first search mutates a single instance in place.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    pegs: BitBox<u32>,
    count: u32,
}

impl BoardState {
    pub fn empty(holes: usize) -> Self {
        BoardState {
            pegs: bitbox![u32, Lsb0; 0; holes],
            count: 0,
        }
    }

    /// A state with pegs in exactly the given holes.
    pub fn with_pegs(holes: usize, pegs: impl IntoIterator<Item = Vertex>) -> Self {
        let mut state = Self::empty(holes);
        for v in pegs {
            assert!(v < holes, "peg {v} outside a board with {holes} holes");
            if !state.pegs[v] {
                state.pegs.set(v, true);
                state.count += 1;
            }
        }
        state
    }

    pub fn holes(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_occupied(&self, v: Vertex) -> bool {
        self.pegs[v]
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> u32 {
        self.count
    }

    /// Pegged holes in ascending order.
    pub fn pegs(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.pegs.iter_ones()
    }

    /// The state with pegs exactly where this one has none.
    pub fn complement(&self) -> Self {
        let holes = self.holes();
        Self::with_pegs(holes, (0..holes).filter(|&v| !self.is_occupied(v)))
    }

    /// Whether `mv` may be played here: source and jumped holes pegged,
    /// landing hole free.
    pub fn permits(&self, mv: Move) -> bool {
        self.pegs[mv.src] && self.pegs[mv.over] && !self.pegs[mv.dst]
    }

    /// Play `mv`. The move must be legal in this state; the generator
    /// only hands out moves that are.
    pub fn apply(&mut self, mv: Move) {
        debug_assert!(self.permits(mv));
        self.pegs.set(mv.src, false);
        self.pegs.set(mv.over, false);
        self.pegs.set(mv.dst, true);
        self.count -= 1;
    }

    /// Take back `mv`. Only valid directly after the matching [`apply`].
    ///
    /// [`apply`]: BoardState::apply
    pub fn undo(&mut self, mv: Move) {
        debug_assert!(!self.pegs[mv.src] && !self.pegs[mv.over] && self.pegs[mv.dst]);
        self.pegs.set(mv.src, true);
        self.pegs.set(mv.over, true);
        self.pegs.set(mv.dst, false);
        self.count += 1;
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.pegs().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ring3() -> Board {
        Board::from_transitions(&[
            vec![Some(1), Some(2)],
            vec![Some(2), Some(0)],
            vec![Some(0), Some(1)],
        ])
        .unwrap()
    }

    fn ring4() -> Board {
        Board::from_transitions(&[
            vec![Some(1), Some(3)],
            vec![Some(2), Some(0)],
            vec![Some(3), Some(1)],
            vec![Some(0), Some(2)],
        ])
        .unwrap()
    }

    // Holes in a row; direction 0 walks right, direction 1 walks left.
    fn line_board(n: usize) -> Board {
        let transitions: Vec<Vec<Option<Vertex>>> = (0..n)
            .map(|v| vec![(v + 1 < n).then(|| v + 1), v.checked_sub(1)])
            .collect();
        Board::from_transitions(&transitions).unwrap()
    }

    fn state_from_bits(occupancy: &[bool]) -> BoardState {
        BoardState::with_pegs(
            occupancy.len(),
            occupancy
                .iter()
                .enumerate()
                .filter_map(|(v, &pegged)| pegged.then_some(v)),
        )
    }

    #[test]
    fn transition_table_builds_expected_jumps() {
        let board = ring3();

        assert_eq!(board.holes(), 3);
        assert_eq!(
            board.jump_options(0),
            &[
                JumpOption { over: 1, dst: 2 },
                JumpOption { over: 2, dst: 1 }
            ]
        );
        assert_eq!(
            board.jump_options(1),
            &[
                JumpOption { over: 2, dst: 0 },
                JumpOption { over: 0, dst: 2 }
            ]
        );
        assert_eq!(
            board.jump_options(2),
            &[
                JumpOption { over: 0, dst: 1 },
                JumpOption { over: 1, dst: 0 }
            ]
        );
    }

    #[test]
    fn neighbour_out_of_range_is_malformed() {
        let result = Board::from_transitions(&[vec![Some(3)], vec![None]]);
        assert!(matches!(result, Err(Error::MalformedTopology(_))));
    }

    #[test]
    fn two_hole_loop_is_degenerate() {
        // jumping 0 over 1 would land back on 0
        let result = Board::from_transitions(&[vec![Some(1)], vec![Some(0)]]);
        assert!(matches!(result, Err(Error::MalformedTopology(_))));
    }

    #[test]
    fn moves_on_the_three_hole_ring() {
        let board = ring3();
        let state = BoardState::with_pegs(3, [0, 1]);

        let moves: Vec<Move> = board.legal_moves(&state).collect();
        assert_eq!(
            moves,
            vec![
                Move {
                    src: 0,
                    over: 1,
                    dst: 2
                },
                Move {
                    src: 1,
                    over: 0,
                    dst: 2
                },
            ]
        );
    }

    #[test]
    fn moves_on_the_four_hole_ring() {
        let board = ring4();
        let state = BoardState::with_pegs(4, [0, 1]);

        let moves: Vec<Move> = board.legal_moves(&state).collect();
        assert_eq!(moves.len(), 2);
        assert_ne!(moves[0].dst, moves[1].dst);
        assert!(moves.iter().all(|mv| mv.dst == 2 || mv.dst == 3));
    }

    #[test]
    fn full_board_has_no_moves() {
        let board = ring3();
        let state = BoardState::with_pegs(3, [0, 1, 2]);
        assert!(!board.has_moves(&state));
    }

    #[test]
    fn apply_and_undo_are_inverse() {
        let board = ring3();
        let mut state = BoardState::with_pegs(3, [0, 1]);
        let original = state.clone();

        let mv = board.legal_moves(&state).next().unwrap();
        state.apply(mv);
        assert_eq!(state.peg_count(), 1);
        assert!(state.is_occupied(mv.dst));
        assert!(!state.is_occupied(mv.src));
        assert!(!state.is_occupied(mv.over));

        state.undo(mv);
        assert_eq!(state, original);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = BoardState::with_pegs(5, [3, 1, 4]);
        let b = BoardState::with_pegs(5, [4, 3, 1]);
        assert_eq!(a, b);
    }

    #[test]
    fn complement_flips_every_hole() {
        let state = BoardState::with_pegs(4, [1, 3]);
        assert_eq!(state.complement(), BoardState::with_pegs(4, [0, 2]));
        assert_eq!(state.complement().complement(), state);
    }

    #[test]
    fn display_lists_pegs_in_order() {
        let state = BoardState::with_pegs(5, [4, 0, 2]);
        assert_eq!(state.to_string(), "{0, 2, 4}");
    }

    proptest! {
        #[test]
        fn undoing_any_legal_move_restores_the_state(
            occupancy in proptest::collection::vec(any::<bool>(), 1..20)
        ) {
            let board = line_board(occupancy.len());
            let state = state_from_bits(&occupancy);

            for mv in board.legal_moves(&state).collect::<Vec<_>>() {
                let mut scratch = state.clone();
                scratch.apply(mv);
                prop_assert_eq!(scratch.peg_count(), state.peg_count() - 1);
                scratch.undo(mv);
                prop_assert_eq!(&scratch, &state);
            }
        }

        #[test]
        fn generator_repeats_itself_on_an_unchanged_state(
            occupancy in proptest::collection::vec(any::<bool>(), 1..20)
        ) {
            let board = line_board(occupancy.len());
            let state = state_from_bits(&occupancy);

            let first: Vec<Move> = board.legal_moves(&state).collect();
            let second: Vec<Move> = board.legal_moves(&state).collect();
            prop_assert_eq!(first, second);
        }
    }
}
