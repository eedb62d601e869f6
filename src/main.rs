//! # sudoku-solver
//!
//! `sudoku-solver` is a command-line solver for standard 9x9 Sudoku puzzles.
//! Puzzles are given as 81-character digit strings in row-major order, with
//! `'0'` marking empty cells. The solver runs an exhaustive backtracking
//! search: always the first empty cell in row-major order, candidate digits
//! tried in ascending order, counting every backtrack as it goes.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a single puzzle given on the command line
//! sudoku-solver 004300209005009001070060043006002087190007400050083000600000105003508690042910300
//!
//! # The same, as an explicit subcommand
//! sudoku-solver text --input 004300209005009001070060043006002087190007400050083000600000105003508690042910300
//!
//! # Solve every puzzle line of a file (one 81-character string per line,
//! # '#' comment lines and blank lines are skipped)
//! sudoku-solver file --path puzzles.sudoku
//!
//! # Walk a directory tree and solve every *.sudoku file in it
//! sudoku-solver dir --path puzzles/
//!
//! # Run the built-in self-test suite of known puzzle/solution pairs
//! sudoku-solver selftest
//!
//! # Generate shell completions
//! sudoku-solver completions bash
//! ```
//!
//! ### Common options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `--verify`: Re-check solved boards with the validity queries (default: `true`).
//! -   `--stats`: Print parse/search statistics after solving (default: `true`).
//! -   `-p, --print-solution`: Print the solved board's compact encoding as well
//!     as its boxed rendering (default: `false`).
//!
//! An unsolvable puzzle is reported as `UNSOLVABLE`; it is a normal outcome,
//! not an error. Malformed puzzle input (wrong length, non-digit characters)
//! is reported with a descriptive message and exit code 1.

use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sudoku_solver::sudoku::board::{Board, CELL_COUNT};
use sudoku_solver::sudoku::codec;
use sudoku_solver::sudoku::solver::{Backtracker, EXAMPLE_PUZZLE, SELFTEST_PAIRS, SolveStats};
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage figures in the statistics block.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the Sudoku solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A backtracking Sudoku solver")]
struct Cli {
    /// An optional global puzzle argument. If provided without a subcommand,
    /// it's treated as an 81-character compact puzzle encoding to solve.
    #[arg(global = true)]
    puzzle: Option<String>,

    /// Specifies the subcommand to execute (e.g. `text`, `file`, `dir`, `selftest`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the Sudoku solver.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve a puzzle provided as an 81-character string.
    Text {
        /// The compact puzzle encoding: 81 digits in row-major order, '0' for
        /// an empty cell.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every puzzle line of a puzzle file.
    File {
        /// Path to the puzzle file: one 81-character encoding per line,
        /// '#' comment lines and blank lines are skipped.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Walk a directory tree and solve every `*.sudoku` file found.
    Dir {
        /// Path to the directory to walk.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Run the built-in self-test suite: solve the example puzzle, then check
    /// the known puzzle/solution pairs and print each solved board.
    Selftest {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-check solved boards with the row/column/block validity queries.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Enable printing of parse and search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Enable printing of the solved board's compact encoding in addition to
    /// its boxed rendering.
    #[arg(short, long, default_value_t = false)]
    print_solution: bool,
}

/// Main entry point of the Sudoku solver application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // Handle the case where a puzzle is provided globally without a
    // subcommand.
    if let Some(puzzle) = cli.puzzle.clone() {
        if cli.command.is_none() {
            exit_on_error(solve_text(&puzzle, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::Text { input, common }) => exit_on_error(solve_text(&input, &common)),
        Some(Commands::File { path, common }) => exit_on_error(solve_file(&path, &common)),
        Some(Commands::Dir { path, common }) => exit_on_error(solve_dir(&path, &common)),
        Some(Commands::Selftest { common }) => exit_on_error(run_selftest(&common)),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "sudoku-solver",
                &mut std::io::stdout(),
            );
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

/// Prints the error message and exits with code 1 if `result` is an error.
fn exit_on_error(result: Result<(), String>) {
    if let Err(message) = result {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Solves a single puzzle given as its compact encoding.
///
/// # Errors
///
/// If the encoding is malformed (wrong length or non-digit characters).
fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let board = codec::decode(input.trim()).map_err(|e| format!("Error parsing puzzle: {e}"))?;
    let parse_time = time.elapsed();

    println!("Parsed puzzle:\n{board}");
    solve_and_report(board, common, parse_time);
    Ok(())
}

/// Solves every puzzle line of a puzzle file.
///
/// # Errors
///
/// If the file doesn't exist, can't be read, or contains a malformed puzzle
/// line.
fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Puzzle file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
    let puzzles = collect_puzzle_lines(&content);
    let parse_time = time.elapsed();

    log::debug!("Read {} puzzle line(s) from {}", puzzles.len(), path.display());

    for (line_number, line) in puzzles {
        println!("Solving: {}:{line_number}", path.display());
        let board =
            codec::decode(line).map_err(|e| format!("{}:{line_number}: {e}", path.display()))?;
        solve_and_report(board, common, parse_time);
    }

    Ok(())
}

/// Solves every `*.sudoku` file under a directory tree.
///
/// # Errors
///
/// If any puzzle file fails to read or parse.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        std::process::exit(1);
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            log::debug!("Skipping non-sudoku entry: {}", file_path.display());
            continue;
        }

        if !file_path.is_file() {
            continue;
        }

        solve_file(&file_path, common)?;
    }

    Ok(())
}

/// Runs the fixed self-test suite.
///
/// First solves the hardcoded example puzzle, printing its compact encoding
/// before and after the solve. Then solves each known puzzle/solution pair,
/// asserting that the solver succeeds and reproduces the known solution
/// exactly, and prints each solved board's boxed rendering.
///
/// # Errors
///
/// If a corpus entry fails to decode.
///
/// # Panics
///
/// If the solver reports a corpus puzzle unsolvable or produces a solution
/// that differs from the known one. A mismatch here is an internal
/// inconsistency, not a user error, and aborts rather than reporting
/// gracefully.
fn run_selftest(common: &CommonOptions) -> Result<(), String> {
    let board =
        codec::decode(EXAMPLE_PUZZLE).map_err(|e| format!("Error parsing example puzzle: {e}"))?;
    println!("{}", codec::encode_compact(&board));

    let mut solver = Backtracker::new(board);
    solver.solve();
    println!("{}", codec::encode_compact(solver.board()));

    for (case, (puzzle, expected)) in SELFTEST_PAIRS.iter().enumerate() {
        println!("{case}");
        let board = codec::decode(puzzle).map_err(|e| format!("case {case}: {e}"))?;

        let time = std::time::Instant::now();
        let mut solver = Backtracker::new(board);
        let solved = solver.solve();
        let elapsed = time.elapsed();

        assert!(solved, "self-test case {case} reported unsolvable");
        let actual = codec::encode_compact(solver.board());
        assert_eq!(
            actual, *expected,
            "self-test case {case} produced a wrong solution"
        );

        print!("{}", solver.board());
        if common.stats {
            let s = solver.stats();
            println!(
                "case {case}: {} backtracks, {} placements in {elapsed:?}",
                s.backtracks, s.placements
            );
        }
    }

    println!("Self-test passed: {} case(s)", SELFTEST_PAIRS.len());
    Ok(())
}

/// Solves a board and reports results including stats and verification.
///
/// # Arguments
/// * `board` - The decoded puzzle board.
/// * `common` - `CommonOptions` providing solver configuration (debug, verify, stats).
/// * `parse_time` - The time taken to parse the puzzle input.
fn solve_and_report(board: Board, common: &CommonOptions, parse_time: Duration) {
    let clues = board.filled_cells();

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let mut solver = Backtracker::new(board);
    let solved = solver.solve();
    let elapsed = time.elapsed();

    if common.debug {
        println!("Solved: {solved}");
        println!("Time: {elapsed:?}");
    }

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(solver.board(), solved);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            clues,
            &solver.stats(),
            allocated_mib,
            resident_mib,
            solved,
        );
    }

    if solved {
        if common.print_solution {
            println!("Solution: {}", codec::encode_compact(solver.board()));
        }
        print!("{}", solver.board());
    } else {
        println!("No solution found");
    }
}

/// Verifies a solved board against the validity queries.
///
/// Prints whether the verification was successful. If verification fails, it
/// panics. If the puzzle was unsolvable, it prints "UNSOLVABLE".
///
/// # Arguments
/// * `board` - The board left behind by the solver.
/// * `solved` - Whether the solver reported success.
fn verify_solution(board: &Board, solved: bool) {
    if solved {
        let ok = board.is_solved();
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Extracts the puzzle lines from a puzzle file's contents.
///
/// Each line is trimmed; blank lines and lines starting with '#' are
/// skipped. Returns the surviving lines paired with their 1-based line
/// numbers for error reporting.
fn collect_puzzle_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect_vec()
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of puzzle and search statistics.
///
/// # Arguments
/// * `parse_time` - Duration spent parsing the input.
/// * `elapsed` - Duration spent by the solver.
/// * `clues` - Number of filled cells in the input puzzle.
/// * `s` - `SolveStats` collected by the solver.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
/// * `solved` - Whether the solver reported success.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    clues: usize,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Puzzle Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Cells", CELL_COUNT);
    stat_line("Clues", clues);
    stat_line("Empty cells", CELL_COUNT - clues);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line_with_rate("Placements", s.placements, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_puzzle_lines_simple() {
        let content = "111\n222\n";
        let expected = vec![(1, "111"), (2, "222")];
        assert_eq!(collect_puzzle_lines(content), expected);
    }

    #[test]
    fn test_collect_puzzle_lines_skips_comments_and_blanks() {
        let content = "# header comment\n\n111\n   \n# trailing comment\n222";
        let expected = vec![(3, "111"), (6, "222")];
        assert_eq!(collect_puzzle_lines(content), expected);
    }

    #[test]
    fn test_collect_puzzle_lines_trims_whitespace() {
        let content = "  111  \n\t222\t\n";
        let expected = vec![(1, "111"), (2, "222")];
        assert_eq!(collect_puzzle_lines(content), expected);
    }

    #[test]
    fn test_collect_puzzle_lines_empty_input() {
        let expected: Vec<(usize, &str)> = vec![];
        assert_eq!(collect_puzzle_lines(""), expected);
    }
}
