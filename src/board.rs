//! Board data model: stone colors, cells, the square grid and flood fills.
//!
//! The grid is stored row-major in a flat `Vec<Cell>`; points are `(x, y)`
//! pairs with `(0, 0)` in the top-left corner. Every traversal here is an
//! explicit worklist with a visited table, so stack depth does not grow with
//! the board.

use std::fmt;

use crate::constants::{EMPTY, STONE_BLACK, STONE_WHITE};

/// A point on the board as `(x, y)`.
pub type Point = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// State of a single intersection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Color of the stone on this cell, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// Invalid input handed to the board: a contract violation rather than a
/// rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board size outside the supported range
    InvalidSize(usize),
    /// Coordinates not on the board
    OutOfBounds { x: usize, y: usize, size: usize },
    /// A stone was required but the point is empty
    EmptyPoint { x: usize, y: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidSize(size) => write!(f, "invalid board size {size}"),
            BoardError::OutOfBounds { x, y, size } => {
                write!(f, "point ({x}, {y}) is off a {size}x{size} board")
            }
            BoardError::EmptyPoint { x, y } => write!(f, "no stone at ({x}, {y})"),
        }
    }
}

impl std::error::Error for BoardError {}

/// A maximal 4-connected set of empty points and the color that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    /// `Some(color)` iff every stone bordering the region has that color
    pub owner: Option<Color>,
}

/// A `size x size` grid of cells.
///
/// Grids compare and hash by content, which is what makes them usable as
/// exact position snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An empty grid. Size validation is the caller's job.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Cell at `(x, y)`, or `None` off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.cells[self.idx((x, y))])
    }

    /// Cell at a point known to be on the board.
    pub(crate) fn at(&self, pt: Point) -> Cell {
        self.cells[self.idx(pt)]
    }

    pub(crate) fn set(&mut self, pt: Point, cell: Cell) {
        let i = self.idx(pt);
        self.cells[i] = cell;
    }

    /// The on-board orthogonal neighbors of `pt`.
    pub fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        [
            (x > 0).then(|| (x - 1, y)),
            (x + 1 < s).then(|| (x + 1, y)),
            (y > 0).then(|| (x, y - 1)),
            (y + 1 < s).then(|| (x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    /// Rows from top to bottom, for consumers wanting a 2-D view.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Flood fill from `start` over 4-adjacent cells holding the same value.
    /// `start` must be on the board; `Position::group` checks it.
    ///
    /// For a stone this is its group; for an empty point it is the empty
    /// region around it.
    pub(crate) fn group(&self, start: Point) -> Vec<Point> {
        let cell = self.at(start);
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut group = Vec::new();

        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            group.push(pt);
            for n in self.neighbors(pt) {
                if !visited[self.idx(n)] && self.at(n) == cell {
                    stack.push(n);
                }
            }
        }
        group
    }

    /// True iff some member of `group` touches an empty point.
    pub(crate) fn has_liberties(&self, group: &[Point]) -> bool {
        group
            .iter()
            .any(|&pt| self.neighbors(pt).any(|n| self.at(n).is_empty()))
    }

    /// Number of distinct empty points touching `group`.
    pub(crate) fn liberty_count(&self, group: &[Point]) -> usize {
        let mut seen = vec![false; self.cells.len()];
        let mut libs = 0;
        for &pt in group {
            for n in self.neighbors(pt) {
                let i = self.idx(n);
                if self.at(n).is_empty() && !seen[i] {
                    seen[i] = true;
                    libs += 1;
                }
            }
        }
        libs
    }

    /// Returns the color surrounding an empty point if all its neighbors are
    /// stones of that one color. May be a false eye.
    pub(crate) fn is_eyeish(&self, pt: Point) -> Option<Color> {
        if !self.at(pt).is_empty() {
            return None;
        }
        let mut eyecolor = None;
        for n in self.neighbors(pt) {
            let c = self.at(n).color()?;
            match eyecolor {
                None => eyecolor = Some(c),
                Some(e) if e != c => return None,
                _ => {}
            }
        }
        eyecolor
    }

    /// Partition every empty point into maximal regions and attribute each
    /// one to the single color on its border, if there is one.
    pub fn regions(&self) -> Vec<Region> {
        let mut visited = vec![false; self.cells.len()];
        let mut regions = Vec::new();

        for start in self.points() {
            if visited[self.idx(start)] || !self.at(start).is_empty() {
                continue;
            }

            let mut stack = vec![start];
            let mut points = Vec::new();
            let (mut black, mut white) = (false, false);

            while let Some(pt) = stack.pop() {
                let i = self.idx(pt);
                if visited[i] {
                    continue;
                }
                visited[i] = true;
                points.push(pt);
                for n in self.neighbors(pt) {
                    match self.at(n) {
                        Cell::Empty if !visited[self.idx(n)] => stack.push(n),
                        Cell::Black => black = true,
                        Cell::White => white = true,
                        _ => {}
                    }
                }
            }

            let owner = match (black, white) {
                (true, false) => Some(Color::Black),
                (false, true) => Some(Color::White),
                _ => None,
            };
            regions.push(Region { points, owner });
        }
        regions
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                let ch = match cell {
                    Cell::Black => STONE_BLACK,
                    Cell::White => STONE_WHITE,
                    Cell::Empty => EMPTY,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
