//! Fill crossword grids from a word list. The puzzle geometry lives in
//! [`crossword`], candidate-set pruning (node and arc consistency) in
//! [`propagate`], and backtracking search in [`search`]; [`parse`] and
//! [`render`] handle the text formats around them.

pub mod crossword;
pub mod error;
pub mod parse;
pub mod propagate;
pub mod render;
pub mod search;

pub use crossword::{Crossword, Direction, Variable};
pub use error::{FillError, Result};
pub use propagate::Domains;
pub use render::{letter_at, letter_grid, render};
pub use search::{Assignment, Solver};
