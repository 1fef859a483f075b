//! Go-Board: the rules engine of Go.
//!
//! This crate implements stone placement, capture, suicide and ko checks,
//! territory scoring, and a small game sequencer on top of them.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size and game-flow parameters
//! - [`board`] - Cells, colors, the grid and its flood fills
//! - [`position`] - Core game logic (placement legality, captures, scoring)
//! - [`session`] - Turn and pass sequencing, end of game, win tally
//! - [`policy`] - Move suggestion behind a single trait
//! - [`env`] - Step/reward wrapper for sequential-decision training
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use go_board::board::Color;
//! use go_board::session::{GameSession, MoveOutcome, PassOutcome};
//!
//! let mut game = GameSession::new(9).unwrap();
//! assert!(matches!(game.request_move(4, 4), MoveOutcome::Placed(_)));
//! game.request_pass();
//! let PassOutcome::Ended(result) = game.request_pass() else {
//!     unreachable!()
//! };
//! assert_eq!(result.winner, Color::Black);
//! ```

pub mod board;
pub mod constants;
pub mod env;
pub mod gtp;
pub mod policy;
pub mod position;
pub mod session;
