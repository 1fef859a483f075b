//! Go position: placement legality, captures, the ko restriction and scoring.
//!
//! This module provides the core game logic:
//! - Stone placement with capture of opponent groups left without liberties
//! - Suicide rejection (unless the placement captures)
//! - Positional ko: a placement may not recreate any earlier grid
//! - Territory scoring plus prisoners
//!
//! A placement is resolved on a scratch copy of the grid and committed only
//! when every rule passes, so a rejected move leaves the position untouched.

use std::collections::HashSet;
use std::fmt;

use crate::board::{BoardError, Cell, Color, Grid, Point, Region};
use crate::constants::{MAX_SIZE, MIN_SIZE};

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Point is not empty
    Occupied,
    /// Move would leave its own group without liberties and captures nothing
    Suicide,
    /// Move recreates an earlier board position
    Ko,
    /// Coordinates are not on the board
    OffBoard { x: usize, y: usize },
}

impl MoveError {
    /// Rule violations are routine; `OffBoard` is a caller bug.
    pub fn is_rule_violation(&self) -> bool {
        !matches!(self, MoveError::OffBoard { .. })
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::Suicide => write!(f, "illegal move: suicide"),
            MoveError::Ko => write!(f, "illegal move: repeats an earlier position"),
            MoveError::OffBoard { x, y } => write!(f, "illegal move: ({x}, {y}) is off the board"),
        }
    }
}

impl std::error::Error for MoveError {}

/// An accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub point: Point,
    pub color: Color,
    /// Opponent stones removed by this placement
    pub captured: Vec<Point>,
}

/// Final score: territory plus prisoners for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn for_color(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Black wins only with a strictly higher score; ties go to White.
    pub fn winner(&self) -> Color {
        if self.black > self.white {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn margin(&self) -> u32 {
        self.black.abs_diff(self.white)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.winner() {
            Color::Black => 'B',
            Color::White => 'W',
        };
        write!(f, "{side}+{}", self.margin())
    }
}

/// A Go position (board state plus everything the rules need to remember).
#[derive(Clone, Debug)]
pub struct Position {
    grid: Grid,
    current_player: Color,
    /// Black stones removed from the board (taken by White)
    captured_black: u32,
    /// White stones removed from the board (taken by Black)
    captured_white: u32,
    /// Every grid produced by an accepted placement since the last reset
    history: HashSet<Grid>,
}

impl Position {
    /// An empty board with Black to play.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            grid: Grid::new(size),
            current_player: Color::Black,
            captured_black: 0,
            captured_white: 0,
            history: HashSet::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn captured_black(&self) -> u32 {
        self.captured_black
    }

    pub fn captured_white(&self) -> u32 {
        self.captured_white
    }

    /// Opponent stones `color` has taken off the board.
    pub fn captures_by(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.captured_white,
            Color::White => self.captured_black,
        }
    }

    /// Number of accepted placements since the last reset.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// An independent copy of the grid.
    pub fn board_state(&self) -> Grid {
        self.grid.clone()
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), BoardError> {
        if self.grid.contains(x, y) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                size: self.size(),
            })
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        self.check_bounds(x, y)?;
        Ok(self.grid.at((x, y)))
    }

    /// The group containing the stone at `(x, y)`.
    pub fn group(&self, x: usize, y: usize) -> Result<Vec<Point>, BoardError> {
        if self.cell(x, y)?.is_empty() {
            return Err(BoardError::EmptyPoint { x, y });
        }
        Ok(self.grid.group((x, y)))
    }

    /// True iff any point of `group` has an empty neighbor.
    pub fn has_liberties(&self, group: &[Point]) -> Result<bool, BoardError> {
        for &(x, y) in group {
            self.check_bounds(x, y)?;
        }
        Ok(self.grid.has_liberties(group))
    }

    /// Distinct liberties of the group containing `(x, y)`.
    pub fn liberties(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        let group = self.group(x, y)?;
        Ok(self.grid.liberty_count(&group))
    }

    /// Work out the grid that placing at `pt` would produce, without
    /// touching `self`. Returns the new grid and the stones it captures.
    fn resolve(&self, x: usize, y: usize) -> Result<(Grid, Vec<Point>), MoveError> {
        if !self.grid.contains(x, y) {
            return Err(MoveError::OffBoard { x, y });
        }
        let pt = (x, y);
        if !self.grid.at(pt).is_empty() {
            return Err(MoveError::Occupied);
        }

        let opp = Cell::from(self.current_player.opponent());
        let mut next = self.grid.clone();
        next.set(pt, self.current_player.into());

        let mut captured = Vec::new();
        for n in self.grid.neighbors(pt) {
            // A group already removed through another neighbor reads Empty here
            if next.at(n) != opp {
                continue;
            }
            let group = next.group(n);
            if !next.has_liberties(&group) {
                for &stone in &group {
                    next.set(stone, Cell::Empty);
                }
                captured.extend(group);
            }
        }

        if captured.is_empty() && !next.has_liberties(&next.group(pt)) {
            return Err(MoveError::Suicide);
        }
        if self.history.contains(&next) {
            return Err(MoveError::Ko);
        }
        Ok((next, captured))
    }

    /// Place a stone for the player to move at `(x, y)`.
    ///
    /// On success the grid, capture counts, history and player to move are
    /// updated together. On failure nothing changes.
    pub fn play(&mut self, x: usize, y: usize) -> Result<Placement, MoveError> {
        let (next, captured) = self.resolve(x, y)?;
        let color = self.current_player;

        let taken = captured.len() as u32;
        match color.opponent() {
            Color::Black => self.captured_black += taken,
            Color::White => self.captured_white += taken,
        }
        self.history.insert(next.clone());
        self.grid = next;
        self.current_player = color.opponent();

        Ok(Placement {
            point: (x, y),
            color,
            captured,
        })
    }

    /// Boolean form of [`Position::play`].
    ///
    /// Rule violations (occupied, suicide, ko) return `Ok(false)`; only
    /// off-board coordinates are an error.
    pub fn place_stone(&mut self, x: usize, y: usize) -> Result<bool, BoardError> {
        match self.play(x, y) {
            Ok(_) => Ok(true),
            Err(MoveError::OffBoard { x, y }) => Err(BoardError::OutOfBounds {
                x,
                y,
                size: self.size(),
            }),
            Err(_) => Ok(false),
        }
    }

    /// Would `play(x, y)` succeed right now?
    pub fn is_legal(&self, x: usize, y: usize) -> bool {
        self.resolve(x, y).is_ok()
    }

    /// Give the turn away without placing a stone.
    pub fn pass(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// The territory partition of the current grid.
    pub fn regions(&self) -> Vec<Region> {
        self.grid.regions()
    }

    /// Territory plus prisoners for each side. Pure: repeated calls on an
    /// unchanged position give the same result.
    pub fn calculate_score(&self) -> Score {
        let (mut black, mut white) = (0u32, 0u32);
        for region in self.regions() {
            match region.owner {
                Some(Color::Black) => black += region.points.len() as u32,
                Some(Color::White) => white += region.points.len() as u32,
                None => {}
            }
        }
        Score {
            black: black + self.captured_white,
            white: white + self.captured_black,
        }
    }

    /// Back to an empty board with Black to play and no history.
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.size());
        self.current_player = Color::Black;
        self.captured_black = 0;
        self.captured_white = 0;
        self.history.clear();
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        writeln!(
            f,
            "to move: {}  captures: black {} white {}",
            self.current_player,
            self.captures_by(Color::Black),
            self.captures_by(Color::White)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Play a sequence of points, alternating colors; `None` passes.
    fn setup(size: usize, moves: &[Option<Point>]) -> Position {
        let mut pos = Position::new(size).unwrap();
        for mv in moves {
            match *mv {
                Some((x, y)) => {
                    pos.play(x, y)
                        .unwrap_or_else(|e| panic!("setup move ({x}, {y}): {e}"));
                }
                None => pos.pass(),
            }
        }
        pos
    }

    #[test]
    fn test_new_rejects_bad_size() {
        assert_eq!(Position::new(0).unwrap_err(), BoardError::InvalidSize(0));
        assert_eq!(
            Position::new(MAX_SIZE + 1).unwrap_err(),
            BoardError::InvalidSize(MAX_SIZE + 1)
        );
        assert!(Position::new(19).is_ok());
    }

    #[test]
    fn test_single_point_board() {
        let mut pos = Position::new(1).unwrap();
        assert_eq!(pos.play(0, 0), Err(MoveError::Suicide));
        assert_eq!(pos.place_stone(0, 0), Ok(false));
        assert_eq!(pos.calculate_score(), Score { black: 0, white: 0 });
        assert_eq!(pos.regions().len(), 1);
    }

    #[test]
    fn test_play_basic() {
        let mut pos = Position::new(9).unwrap();
        let placement = pos.play(4, 4).unwrap();
        assert_eq!(placement.color, Color::Black);
        assert!(placement.captured.is_empty());
        assert_eq!(pos.cell(4, 4), Ok(Cell::Black));
        assert_eq!(pos.current_player(), Color::White);
        assert_eq!(pos.history_len(), 1);
    }

    #[test]
    fn test_occupied() {
        let mut pos = setup(9, &[Some((4, 4))]);
        assert_eq!(pos.play(4, 4), Err(MoveError::Occupied));
        assert_eq!(pos.current_player(), Color::White);
    }

    #[test]
    fn test_off_board_is_distinct() {
        let mut pos = Position::new(9).unwrap();
        let err = pos.play(9, 0).unwrap_err();
        assert!(!err.is_rule_violation());
        assert_eq!(
            pos.place_stone(0, 9),
            Err(BoardError::OutOfBounds { x: 0, y: 9, size: 9 })
        );
    }

    #[test]
    fn test_group_on_empty_point() {
        let pos = Position::new(9).unwrap();
        assert_eq!(pos.group(3, 3), Err(BoardError::EmptyPoint { x: 3, y: 3 }));
    }

    #[test]
    fn test_off_board_queries_fail() {
        let pos = setup(9, &[Some((0, 1)), Some((8, 1)), Some((1, 0))]);
        // (9, 0) would wrap onto (0, 1) in the flat grid
        assert_eq!(
            pos.has_liberties(&[(9, 0)]),
            Err(BoardError::OutOfBounds { x: 9, y: 0, size: 9 })
        );
        assert_eq!(
            pos.has_liberties(&[(0, 1), (20, 20)]),
            Err(BoardError::OutOfBounds { x: 20, y: 20, size: 9 })
        );
        assert_eq!(
            pos.group(9, 0),
            Err(BoardError::OutOfBounds { x: 9, y: 0, size: 9 })
        );
        assert!(pos.group(20, 20).is_err());
        assert!(pos.liberties(20, 20).is_err());
        assert_eq!(pos.has_liberties(&[(0, 1)]), Ok(true));
    }

    #[test]
    fn test_liberties_of_single_stone() {
        let pos = setup(9, &[Some((4, 4))]);
        assert_eq!(pos.liberties(4, 4), Ok(4));
        let pos = setup(9, &[Some((0, 0))]);
        assert_eq!(pos.liberties(0, 0), Ok(2));
    }

    #[test]
    fn test_capture_credits_placing_player() {
        // White takes the black stone in the corner
        let mut pos = setup(9, &[Some((0, 0)), Some((1, 0)), Some((8, 8))]);
        let placement = pos.play(0, 1).unwrap();
        assert_eq!(placement.captured, vec![(0, 0)]);
        assert_eq!(pos.cell(0, 0), Ok(Cell::Empty));
        assert_eq!(pos.captured_black(), 1);
        assert_eq!(pos.captures_by(Color::White), 1);
        assert_eq!(pos.captured_white(), 0);
    }

    #[test]
    fn test_suicide_leaves_state_alone() {
        let mut pos = setup(9, &[Some((8, 8)), Some((1, 0)), Some((8, 7)), Some((0, 1))]);
        let before = pos.board_state();
        assert_eq!(pos.play(0, 0), Err(MoveError::Suicide));
        assert_eq!(pos.board_state(), before);
        assert_eq!(pos.current_player(), Color::Black);
        assert_eq!(pos.history_len(), 4);
        assert!(!pos.is_legal(0, 0));
    }

    #[test]
    fn test_capture_beats_suicide() {
        // Black at (0,1) is surrounded by white, but fills the last liberty
        // of the white corner stone and so gets a liberty back.
        let mut pos = setup(
            9,
            &[
                Some((1, 0)),
                Some((0, 0)),
                Some((8, 8)),
                Some((1, 1)),
                Some((8, 7)),
                Some((0, 2)),
            ],
        );
        let placement = pos.play(0, 1).unwrap();
        assert_eq!(placement.captured, vec![(0, 0)]);
        assert_eq!(pos.captured_white(), 1);
        assert_eq!(pos.liberties(0, 1), Ok(1));
    }

    #[test]
    fn test_pass_only_toggles_player() {
        let mut pos = setup(9, &[Some((2, 2))]);
        let grid = pos.board_state();
        pos.pass();
        assert_eq!(pos.current_player(), Color::Black);
        assert_eq!(pos.board_state(), grid);
        assert_eq!(pos.history_len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut pos = setup(9, &[Some((0, 0)), Some((1, 0)), Some((8, 8)), Some((0, 1))]);
        pos.reset();
        assert_eq!(pos.board_state(), Grid::new(9));
        assert_eq!(pos.current_player(), Color::Black);
        assert_eq!(pos.captured_black(), 0);
        assert_eq!(pos.captured_white(), 0);
        assert_eq!(pos.history_len(), 0);
    }

    #[test]
    fn test_score_display_ties_to_white() {
        let score = Score { black: 5, white: 5 };
        assert_eq!(score.winner(), Color::White);
        assert_eq!(score.to_string(), "W+0");
        let score = Score { black: 7, white: 2 };
        assert_eq!(score.to_string(), "B+5");
    }
}
