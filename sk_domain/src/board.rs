//! Boards in the usual sokoban text notation.

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate, 1-indexed: column 1 is the leftmost, row 1 the top.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub fn new(col: usize, row: usize) -> Position {
        Position { col, row }
    }

    /// The position `steps` cells away in direction `d`, if it stays on the
    /// positive side of the grid.
    pub fn offset(&self, d: Direction, steps: usize) -> Option<Position> {
        let (dc, dr) = d.delta();
        let col = self.col as i64 + dc * steps as i64;
        let row = self.row as i64 + dr * steps as i64;
        if col < 1 || row < 1 {
            None
        } else {
            Some(Position::new(col as usize, row as usize))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "({}, {})", self.col, self.row)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Axis {
    Col,
    Row,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// In the order the move enumeration is declared.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Symbol of the direction in the move enumeration.
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Left => "l",
            Direction::Up => "u",
            Direction::Right => "r",
            Direction::Down => "d",
        }
    }

    /// Which side of the agent a neighbouring cell is on (left, top, right, bottom).
    pub fn side(&self) -> &'static str {
        match self {
            Direction::Left => "l",
            Direction::Up => "t",
            Direction::Right => "r",
            Direction::Down => "b",
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Col,
            Direction::Up | Direction::Down => Axis::Row,
        }
    }

    /// -1 towards column/row 1, +1 away from it.
    pub fn step(&self) -> i64 {
        match self {
            Direction::Left | Direction::Up => -1,
            Direction::Right | Direction::Down => 1,
        }
    }

    pub fn delta(&self) -> (i64, i64) {
        match self.axis() {
            Axis::Col => (self.step(), 0),
            Axis::Row => (0, self.step()),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmtr, "{}", self.symbol())
    }
}

/// A rectangular grid of cells. Immutable once built.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Vec<char>>,
}

impl Board {
    /// Rejects empty grids and rows of differing width.
    pub fn new<S: AsRef<str>>(rows: &[S]) -> SKResult<Board> {
        let cells: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = match cells.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(SKError::MalformedBoard("empty board".into())),
        };
        if let Some((i, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SKError::MalformedBoard(format!(
                "row {} has {} cells, expected {}",
                i + 1,
                r.len(),
                width
            )));
        }
        Ok(Board { cells })
    }

    /// Right-pads short rows with floor so ragged levels become rectangular.
    pub fn padded<S: AsRef<str>>(rows: &[S]) -> SKResult<Board> {
        let width = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let padded: Vec<String> = rows
            .iter()
            .map(|r| format!("{:<width$}", r.as_ref(), width = width))
            .collect();
        Board::new(&padded)
    }

    /// One board per text block; trailing blank lines are ignored.
    pub fn from_text(text: &str) -> SKResult<Board> {
        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        while lines.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
            lines.pop();
        }
        Board::new(&lines)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn cell(&self, p: Position) -> Option<char> {
        if p.row == 0 || p.col == 0 {
            return None;
        }
        self.cells
            .get(p.row - 1)
            .and_then(|r| r.get(p.col - 1))
            .copied()
    }

    /// All cells in row-major order with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (Position::new(c + 1, r + 1), *cell))
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            writeln!(fmtr, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}
