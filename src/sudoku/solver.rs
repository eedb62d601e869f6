//! Defines the backtracking Sudoku solver.
//!
//! This module provides the [`Backtracker`] struct, which implements a
//! classical depth-first backtracking search over a [`Board`]. The solver
//! takes a partially filled board as input and determines whether the empty
//! cells can be completed without violating the row, column, and block
//! constraints. If they can, the board is left fully filled with the first
//! solution reachable in search order.
//!
//! The core logic involves:
//! 1.  **Cell selection:** The next cell to fill is always the first empty
//!     cell in row-major order, as reported by [`Board::next_empty_cell`].
//! 2.  **Candidate enumeration:** Digits `1` through `9` are tried in
//!     ascending order; [`Board::can_place`] prunes candidates that would
//!     violate a constraint.
//! 3.  **Backtracking:** When a placed candidate leads to a dead end, the
//!     placement is undone, a backtrack event is counted, and the next
//!     candidate is tried.
//!
//! There is no constraint propagation, no value-ordering heuristic, and no
//! timeout: correctness rests on exhaustive enumeration alone, and a
//! pathological input may search for a very long time. Recursion depth is
//! bounded by the number of cells, so the call stack stays shallow.

use crate::sudoku::board::Board;

/// The example puzzle solved by the driver before the self-test suite runs.
pub const EXAMPLE_PUZZLE: &str =
    "004300209005009001070060043006002087190007400050083000600000105003508690042910300";

/// The unique solution of [`EXAMPLE_PUZZLE`].
pub const EXAMPLE_SOLUTION: &str =
    "864371259325849761971265843436192587198657432257483916689734125713528694542916378";

/// Known puzzle/solution pairs used by the self-test suite.
// https://www.kaggle.com/bryanpark/sudoku
pub const SELFTEST_PAIRS: [(&str, &str); 10] = [
    (
        "004300209005009001070060043006002087190007400050083000600000105003508690042910300",
        "864371259325849761971265843436192587198657432257483916689734125713528694542916378",
    ),
    (
        "040100050107003960520008000000000017000906800803050620090060543600080700250097100",
        "346179258187523964529648371965832417472916835813754629798261543631485792254397186",
    ),
    (
        "600120384008459072000006005000264030070080006940003000310000050089700000502000190",
        "695127384138459672724836915851264739273981546946573821317692458489715263562348197",
    ),
    (
        "497200000100400005000016098620300040300900000001072600002005870000600004530097061",
        "497258316186439725253716498629381547375964182841572639962145873718623954534897261",
    ),
    (
        "005910308009403060027500100030000201000820007006007004000080000640150700890000420",
        "465912378189473562327568149738645291954821637216397854573284916642159783891736425",
    ),
    (
        "005910308009403060027500100030000201000820007006007004000080000640150700890000420",
        "465912378189473562327568149738645291954821637216397854573284916642159783891736425",
    ),
    (
        "009065430007000800600108020003090002501403960804000100030509007056080000070240090",
        "289765431317924856645138729763891542521473968894652173432519687956387214178246395",
    ),
    (
        "000000657702400100350006000500020009210300500047109008008760090900502030030018206",
        "894231657762495183351876942583624719219387564647159328128763495976542831435918276",
    ),
    (
        "503070190000006750047190600400038000950200300000010072000804001300001860086720005",
        "563472198219386754847195623472638519951247386638519472795864231324951867186723945",
    ),
    (
        "060720908084003001700100065900008000071060000002010034000200706030049800215000090",
        "163725948584693271729184365946358127371462589852917634498231756637549812215876493",
    ),
];

/// Counters collected during a solve.
///
/// The counters are cumulative over the lifetime of a [`Backtracker`]; a
/// fresh solver starts from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Number of backtrack events: a previously placed candidate being
    /// undone because no subsequent cell could be completed.
    pub backtracks: usize,
    /// Number of trial placements made, including ones later undone.
    pub placements: usize,
}

/// A depth-first backtracking solver over a [`Board`].
///
/// The solver owns its board for the duration of the search and mutates it
/// in place: each trial placement writes a cell, and each backtrack clears
/// it again. After [`Backtracker::solve`] returns `true` the board holds the
/// first solution in search order; after `false` it is byte-identical to the
/// input (every placement was undone).
#[derive(Debug, Clone)]
pub struct Backtracker {
    /// The board being searched, mutated in place.
    board: Board,
    /// Counters accumulated during the search.
    stats: SolveStats,
}

impl Backtracker {
    /// Creates a new solver for the given board, with zeroed counters.
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            stats: SolveStats {
                backtracks: 0,
                placements: 0,
            },
        }
    }

    /// Attempts to complete the board.
    ///
    /// The search proceeds as follows:
    /// 1.  Find the next empty cell in row-major order. If there is none, the
    ///     board is complete and the search succeeds immediately.
    /// 2.  For each candidate digit `1` through `9` in ascending order, skip
    ///     it unless [`Board::can_place`] allows it; otherwise place it and
    ///     recurse.
    /// 3.  If the recursion succeeds, the placement stays and success
    ///     propagates up. If it fails, count a backtrack, clear the cell, and
    ///     continue with the next candidate.
    /// 4.  If all nine candidates are exhausted, this branch is a dead end:
    ///     return `false` so the caller one level up backtracks in turn.
    ///
    /// The base case deliberately trusts the input: a board with no empty
    /// cells is reported solved without re-validating it, matching the
    /// incremental invariant that filled cells never violate a constraint.
    /// Callers handing over a fully filled board of unknown provenance can
    /// check it with [`Board::is_solved`] instead.
    ///
    /// # Returns
    ///
    /// * `true` if a solution reachable from the current partial assignment
    ///   exists; the board is left fully filled with it.
    /// * `false` if the search space is exhausted; the board is left in its
    ///   original state.
    pub fn solve(&mut self) -> bool {
        let Some((row, col)) = self.board.next_empty_cell() else {
            return true;
        };

        for candidate in 1..=9 {
            if !self.board.can_place(row, col, candidate) {
                continue;
            }

            self.board.set(row, col, candidate);
            self.stats.placements += 1;

            if self.solve() {
                return true;
            }

            self.stats.backtracks += 1;
            self.board.clear(row, col);
        }

        false
    }

    /// Returns the board in its current state.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the solver and returns the board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::codec;

    #[test]
    fn test_solve_example_puzzle() {
        let board = codec::decode(EXAMPLE_PUZZLE).expect("example puzzle must decode");
        let mut solver = Backtracker::new(board);

        assert!(solver.solve());
        assert_eq!(codec::encode_compact(solver.board()), EXAMPLE_SOLUTION);
        assert!(solver.board().is_solved());
    }

    #[test]
    fn test_already_solved_board_succeeds_without_backtracking() {
        let board = codec::decode(EXAMPLE_SOLUTION).expect("known solution must decode");
        let mut solver = Backtracker::new(board);

        assert!(solver.solve());
        assert_eq!(solver.stats(), SolveStats::default());
        assert_eq!(codec::encode_compact(solver.board()), EXAMPLE_SOLUTION);
    }

    #[test]
    fn test_unsolvable_board_is_left_untouched() {
        // Row 0 holds 1-8 with its last cell open, and the 9 that cell would
        // need is already taken in column 8: no candidate fits.
        let mut cells = [[0u8; 9]; 9];
        for (col, value) in (1..=8u8).enumerate() {
            cells[0][col] = value;
        }
        cells[1][8] = 9;
        let board = Board::from(cells);
        let before = codec::encode_compact(&board);

        let mut solver = Backtracker::new(board);
        assert!(!solver.solve());
        assert_eq!(codec::encode_compact(solver.board()), before);
        assert_eq!(solver.stats().backtracks, 0);
    }

    #[test]
    fn test_failed_search_backtracks_and_restores() {
        // Row 0 needs {1, 2} in its first two cells. Column 0 already holds
        // a 2, so (0, 0) must take 1; column 1 also holds a 2, which leaves
        // (0, 1) with nothing. The search places the 1, hits the dead end,
        // undoes it, and exhausts the root cell.
        let mut cells = [[0u8; 9]; 9];
        for col in 2..9 {
            cells[0][col] = u8::try_from(col + 1).expect("digit fits in u8"); // 3..=9
        }
        cells[3][0] = 2;
        cells[6][1] = 2;
        let board = Board::from(cells);
        let before = codec::encode_compact(&board);

        let mut solver = Backtracker::new(board);
        assert!(!solver.solve());
        assert_eq!(
            solver.stats(),
            SolveStats {
                backtracks: 1,
                placements: 1,
            }
        );
        assert_eq!(codec::encode_compact(solver.board()), before);
    }

    #[test]
    fn test_determinism() {
        let board = codec::decode(EXAMPLE_PUZZLE).expect("example puzzle must decode");
        let mut first = Backtracker::new(board);
        let mut second = Backtracker::new(board);

        assert!(first.solve());
        assert!(second.solve());
        assert_eq!(first.board(), second.board());
        assert_eq!(first.stats(), second.stats());
    }

    #[test]
    fn test_selftest_corpus_solves_to_known_solutions() {
        for (case, (puzzle, solution)) in SELFTEST_PAIRS.iter().enumerate() {
            let board = codec::decode(puzzle).expect("corpus puzzle must decode");
            let mut solver = Backtracker::new(board);

            assert!(solver.solve(), "corpus case {case} reported unsolvable");
            assert_eq!(
                codec::encode_compact(solver.board()),
                *solution,
                "corpus case {case} produced a wrong solution"
            );
        }
    }

    #[test]
    fn test_empty_board_has_a_solution() {
        let mut solver = Backtracker::new(Board::new());
        assert!(solver.solve());
        assert!(solver.board().is_solved());
        // First empty cell, ascending candidates: row 0 must come out 1-9.
        let solved = solver.into_board();
        for col in 0..9 {
            assert_eq!(solved.get(0, col), u8::try_from(col + 1).expect("digit fits in u8"));
        }
    }
}
