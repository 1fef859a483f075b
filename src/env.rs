//! Sequential-decision wrapper for training loops.
//!
//! Actions are flat indices: `a < size * size` places at
//! `(a / size, a % size)` and `a == size * size` passes. The reward after a
//! step is the mover's score minus the opponent's.

use crate::board::{BoardError, Color, Grid};
use crate::constants::INVALID_ACTION_REWARD;
use crate::session::{GameSession, MoveOutcome, PassOutcome};

/// Result of one environment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub observation: Grid,
    pub reward: i64,
    pub done: bool,
}

pub struct GoEnv {
    session: GameSession,
}

impl GoEnv {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self {
            session: GameSession::new(size)?,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn size(&self) -> usize {
        self.session.position().size()
    }

    /// Number of distinct actions, the pass included.
    pub fn action_count(&self) -> usize {
        self.size() * self.size() + 1
    }

    /// Start a new episode and return the first observation.
    pub fn reset(&mut self) -> Grid {
        self.session.restart();
        self.session.position().board_state()
    }

    pub fn step(&mut self, action: usize) -> Step {
        let size = self.size();
        let mover = self.session.current_player();

        let (reward, done) = if action == size * size {
            match self.session.request_pass() {
                PassOutcome::Passed { .. } => (self.reward(mover), false),
                PassOutcome::Ended(_) => (self.reward(mover), true),
                PassOutcome::GameOver => (0, true),
            }
        } else if action > size * size {
            (INVALID_ACTION_REWARD, true)
        } else {
            let (x, y) = (action / size, action % size);
            match self.session.request_move(x, y) {
                MoveOutcome::Placed(_) => {
                    let full = self.session.position().grid().is_full();
                    (self.reward(mover), full)
                }
                MoveOutcome::Rejected(_) => (INVALID_ACTION_REWARD, true),
                MoveOutcome::GameOver => (0, true),
            }
        };

        Step {
            observation: self.session.position().board_state(),
            reward,
            done,
        }
    }

    fn reward(&self, mover: Color) -> i64 {
        let score = self.session.position().calculate_score();
        i64::from(score.for_color(mover)) - i64::from(score.for_color(mover.opponent()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_action_maps_to_x_then_y() {
        let mut env = GoEnv::new(9).unwrap();
        // 1 * 9 + 2 -> x = 1, y = 2
        let step = env.step(11);
        assert!(!step.done);
        assert_eq!(step.observation.get(1, 2), Some(Cell::Black));
        // Black owns every other point
        assert_eq!(step.reward, 80);
    }

    #[test]
    fn test_rejected_action_ends_episode() {
        let mut env = GoEnv::new(9).unwrap();
        env.step(0);
        let step = env.step(0);
        assert_eq!(step.reward, INVALID_ACTION_REWARD);
        assert!(step.done);

        let step = env.step(env.action_count());
        assert!(step.done);
    }

    #[test]
    fn test_two_passes_finish() {
        let mut env = GoEnv::new(9).unwrap();
        let pass = env.action_count() - 1;
        assert!(!env.step(pass).done);
        let step = env.step(pass);
        assert!(step.done);
        assert!(env.session().is_over());
        assert_eq!(env.reset(), Grid::new(9));
    }
}
