//! Game sequencing on top of a [`Position`]: turns, passes and the end of the game.
//!
//! A session is `InProgress` until two consecutive passes or an explicit
//! [`GameSession::end_game`]; it then stays `Ended` with a fixed result until
//! [`GameSession::restart`].

use crate::board::{BoardError, Color};
use crate::constants::PASSES_TO_END;
use crate::position::{MoveError, Placement, Position, Score};

/// Score and winner of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: Score,
    pub winner: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Ended(GameResult),
}

/// Wins per color across restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub black_wins: u32,
    pub white_wins: u32,
}

impl Tally {
    pub fn wins(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_wins,
            Color::White => self.white_wins,
        }
    }

    fn record(&mut self, winner: Color) {
        match winner {
            Color::Black => self.black_wins += 1,
            Color::White => self.white_wins += 1,
        }
    }
}

/// What happened to a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Placed(Placement),
    Rejected(MoveError),
    /// The game is over; nothing was done
    GameOver,
}

/// What happened to a pass request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Turn handed over; `consecutive` passes so far
    Passed { consecutive: u32 },
    /// This pass ended the game
    Ended(GameResult),
    /// The game was already over
    GameOver,
}

/// One game at a time over an exclusively owned position.
pub struct GameSession {
    position: Position,
    consecutive_passes: u32,
    state: SessionState,
    tally: Tally,
}

impl GameSession {
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self {
            position: Position::new(size)?,
            consecutive_passes: 0,
            state: SessionState::InProgress,
            tally: Tally::default(),
        })
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn current_player(&self) -> Color {
        self.position.current_player()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, SessionState::Ended(_))
    }

    /// The final result, once the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            SessionState::Ended(result) => Some(result),
            SessionState::InProgress => None,
        }
    }

    pub fn consecutive_passes(&self) -> u32 {
        self.consecutive_passes
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Place a stone for the player to move.
    pub fn request_move(&mut self, x: usize, y: usize) -> MoveOutcome {
        if self.is_over() {
            return MoveOutcome::GameOver;
        }
        match self.position.play(x, y) {
            Ok(placement) => {
                self.consecutive_passes = 0;
                MoveOutcome::Placed(placement)
            }
            Err(err) => MoveOutcome::Rejected(err),
        }
    }

    /// Pass the turn. The second consecutive pass ends and scores the game.
    pub fn request_pass(&mut self) -> PassOutcome {
        if self.is_over() {
            return PassOutcome::GameOver;
        }
        self.consecutive_passes += 1;
        if self.consecutive_passes >= PASSES_TO_END {
            return PassOutcome::Ended(self.finish());
        }
        self.position.pass();
        PassOutcome::Passed {
            consecutive: self.consecutive_passes,
        }
    }

    /// End the game now (resignation, UI action). Scores it the first time;
    /// later calls return the same result.
    pub fn end_game(&mut self) -> GameResult {
        match self.state {
            SessionState::Ended(result) => result,
            SessionState::InProgress => self.finish(),
        }
    }

    fn finish(&mut self) -> GameResult {
        let score = self.position.calculate_score();
        let result = GameResult {
            score,
            winner: score.winner(),
        };
        self.tally.record(result.winner);
        self.state = SessionState::Ended(result);
        result
    }

    /// Fresh board, same tally.
    pub fn restart(&mut self) {
        self.position.reset();
        self.consecutive_passes = 0;
        self.state = SessionState::InProgress;
    }
}
