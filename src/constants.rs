//! Board dimensions, size limits and game-flow constants.
//!
//! The default board size is selected with Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//! - `board19x19`: 19x19 board
//!
//! ```sh
//! cargo build                                               # 9x9 (default)
//! cargo build --no-default-features --features board19x19   # 19x19
//! ```
//!
//! The size is only a default: every board carries its own runtime size,
//! which the command line can override.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
#[cfg(feature = "board9x9")]
pub const DEFAULT_SIZE: usize = 9;

#[cfg(feature = "board13x13")]
pub const DEFAULT_SIZE: usize = 13;

#[cfg(feature = "board19x19")]
pub const DEFAULT_SIZE: usize = 19;

#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable only one of 'board9x9', 'board13x13' or 'board19x19'");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!("Must enable exactly one board size feature: 'board9x9', 'board13x13' or 'board19x19'");

/// Smallest board. On 1x1 every placement is suicide, so only passes remain.
pub const MIN_SIZE: usize = 1;

/// Largest board expressible with GTP column letters (A-Z without I).
pub const MAX_SIZE: usize = 25;

// =============================================================================
// Game Flow
// =============================================================================

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;

/// Self-play safety cap, in moves per point (captures let games run long).
pub const MAX_GAME_LEN_FACTOR: usize = 3;

/// Reward given by the environment wrapper for a rejected action.
pub const INVALID_ACTION_REWARD: i64 = -1;

// =============================================================================
// Display
// =============================================================================

/// Black stone glyph.
pub const STONE_BLACK: char = 'X';

/// White stone glyph.
pub const STONE_WHITE: char = 'O';

/// Empty point glyph.
pub const EMPTY: char = '.';
