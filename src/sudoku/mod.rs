#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Core Sudoku functionality: the grid, its constraint queries, the
//! backtracking search, and the text encodings used for interchange.

/// The `board` module defines the 9x9 grid and its row/column/block constraint queries.
pub mod board;

/// The `codec` module converts boards to and from the 81-character digit string and
/// produces the boxed display rendering.
pub mod codec;

/// The `solver` module implements the recursive backtracking search over a board.
pub mod solver;
