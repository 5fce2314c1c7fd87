//! Minimum-cost assignment of agents to tasks with the Hungarian method.
//!
//! ```
//! use hungarian_method::{solve, SquareMatrix};
//!
//! let costs = SquareMatrix::from_rows([[4, 1, 3], [2, 0, 5], [3, 2, 2]]).unwrap();
//! let solution = solve(costs).unwrap();
//! assert_eq!(solution.tasks(), vec![1, 0, 2]);
//! assert_eq!(solution.total_cost, 5);
//! ```

mod assign;
mod cover;
mod error;
mod grid;
mod matching;
mod matrix;
mod reduce;
mod solver;

pub use assign::{assign_tasks, Assignment};
pub use cover::{cover_zeros, create_zeros, is_assignable, CoverSet, CoverStrategy, Line};
pub use error::Error;
pub use grid::Grid;
pub use matching::ZeroMatching;
pub use matrix::SquareMatrix;
pub use reduce::{subtract_col_minima, subtract_row_minima, ReducedView, ReductionLedger};
pub use solver::{solve, solve_with, Solution, Solver, SolverConfig, State};
