#![deny(missing_docs)]
//! This crate provides a correctness-oriented solver for standard 9x9 Sudoku puzzles,
//! built on exhaustive constraint-checked backtracking search.

/// The `sudoku` module contains the board representation, the backtracking solver,
/// and the codec for the 81-character text encoding.
pub mod sudoku;
