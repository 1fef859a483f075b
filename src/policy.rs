//! Move suggestion.
//!
//! A [`Policy`] looks at a position and answers with a move or a pass. It
//! borrows the position read-only; moves are applied by whoever owns the
//! game.

use crate::board::Point;
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play { x: usize, y: usize },
    Pass,
}

/// Chooses an action for the player to move.
pub trait Policy {
    fn choose(&mut self, position: &Position) -> Action;
}

/// Uniformly random legal moves that never fill the mover's own eyes.
///
/// Passes once own-eye fills are the only legal placements left.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic sequence of choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, position: &Position) -> Action {
        let grid = position.grid();
        let me = position.current_player();

        let mut candidates: Vec<Point> = grid
            .points()
            .filter(|&pt| grid.at(pt).is_empty() && grid.is_eyeish(pt) != Some(me))
            .collect();
        self.rng.shuffle(&mut candidates);

        // Some candidates are suicide or ko; take the first one that is not
        candidates
            .into_iter()
            .find(|&(x, y)| position.is_legal(x, y))
            .map_or(Action::Pass, |(x, y)| Action::Play { x, y })
    }
}
