//! The engine of a generalized N-in-a-row game: tic-tac-toe, Connect-4
//! style "drop" games, and any other combination of board size and line
//! length.
//!
//! The interesting part is the [`RunTracker`], which keeps an incremental
//! per-cell, per-[`Direction`] model of how long each open line is and how
//! much of it a side already holds. [`select()`] scores moves from two such
//! trackers without ever rescanning the board. [`Game`] ties the pieces
//! together in the order that keeps them consistent.

pub use direction::*;
pub use errors::*;
pub use game::*;
pub use grid::*;
pub use ruleset::*;
pub use run_tracker::*;
pub use selector::*;
pub use visualization::*;
pub use win::*;

#[cfg(test)]
mod arbitrary;
mod direction;
mod errors;
mod game;
mod grid;
mod ruleset;
mod run_tracker;
mod selector;
mod visualization;
mod win;
