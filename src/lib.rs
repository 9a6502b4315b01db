//! Decode, verify and play grid mazes stored as rows of hex digits
//!
//! Every character of the input is one hexadecimal digit describing the
//! four walls of one cell: bit 3 is the east wall, bit 2 the west wall,
//! bit 1 the south wall and bit 0 the north wall. Newlines separate rows,
//! and all rows must be equally long.
//!
//! # Examples
//! ## Walking a small maze
//! ```
//! use hexmaze::{Game, Maze, Side};
//!
//! let maze = Maze::parse_hex("739\n73a").unwrap();
//! maze.validate().unwrap();
//!
//! let mut game = Game::new(maze);
//! game.step(Side::East);
//! game.step(Side::East);
//! game.step(Side::South);
//! assert!(game.has_won());
//! ```
//!
//! ## Rendering the bundled map
//! ```
//! use hexmaze::{Maze, SAMPLE_MAZE};
//!
//! let maze = Maze::parse_hex(SAMPLE_MAZE).unwrap();
//! assert_eq!((maze.height(), maze.width()), (10, 25));
//!
//! let svg = hexmaze::svg::render(&maze, None);
//! assert!(svg.starts_with("<svg"));
//! ```

use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;
use thiserror::Error;

#[cfg(feature = "mapgen")]
pub mod maze_generator;
pub mod svg;

/// The map that ships with the crate, a 10 by 25 maze.
pub const SAMPLE_MAZE: &str = "\
597333331395397313333313b
c6339595adccd639633b51239
cd53286a70ac619c5333a639c
c4a59e5396969cc6ad51b53ac
ce5a632bc5a5ac61b4ac5a738
432339ddcc5a5adc5ad6a5958
cd5396accccdc58cc5239c6ac
cccd633accc4aec6a639cc59c
68c43339cccc5949719cc6acc
7a6a7332a6a6a6a63a6a633ae";

/// One side of a cell, doubling as a movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        })
    }
}

/// Failure while parsing or checking a maze
///
/// All of these are deterministic. Re-running on the same input yields
/// the same error, so the caller decides what to do with the input; the
/// library never repairs a bad maze.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The input contained a character that is not a hexadecimal digit.
    #[error("invalid wall digit {digit:?}, expected one of 0-9a-f")]
    Decode { digit: char },
    /// Rows decoded to different lengths, or the input was empty.
    #[error("row {row} is {len} cells wide, expected {expected}")]
    MalformedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A cell on the outer edge is missing its boundary wall.
    #[error("missing {side} boundary wall at row {row}, column {col}")]
    OpenBoundary { side: Side, row: usize, col: usize },
    /// Two neighbouring cells disagree about the wall between them.
    #[error("cell at row {row}, column {col} disagrees with its {side} neighbour about their shared wall")]
    WallMismatch { side: Side, row: usize, col: usize },
}

/// Wall flags of one maze cell
///
/// A set flag means a wall stands on that side. Cells are plain values;
/// the grid they live in is rebuilt from text rather than patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Cell {
    /// Decode one hex digit into wall flags.
    ///
    /// The digit is read as a 4-bit value: bit 3 east, bit 2 west,
    /// bit 1 south, bit 0 north. The mapping is arbitrary but fixed;
    /// anyone authoring mazes has to use the same one. Both digit cases
    /// are accepted.
    ///
    /// # Examples
    /// ```
    /// use hexmaze::Cell;
    /// let cell = Cell::decode('9').unwrap();
    /// assert!(cell.east && cell.north);
    /// assert!(!cell.west && !cell.south);
    /// ```
    pub fn decode(digit: char) -> Result<Self, MazeError> {
        let value = digit.to_digit(16).ok_or(MazeError::Decode { digit })? as u8;
        Ok(Cell {
            north: value & 0b0001 != 0,
            south: value & 0b0010 != 0,
            west: value & 0b0100 != 0,
            east: value & 0b1000 != 0,
        })
    }

    /// Encode the wall flags back into one lowercase hex digit.
    ///
    /// Exact inverse of [Self::decode].
    pub fn encode(&self) -> char {
        let value = (self.east as u8) << 3
            | (self.west as u8) << 2
            | (self.south as u8) << 1
            | self.north as u8;
        b"0123456789abcdef"[value as usize] as char
    }

    /// Whether a wall stands on the given side.
    pub fn wall(&self, side: Side) -> bool {
        match side {
            Side::North => self.north,
            Side::South => self.south,
            Side::East => self.east,
            Side::West => self.west,
        }
    }
}

/// An integer (row, col) pair.
///
/// Serves both as a cell index and as a lattice point, an intersection
/// of grid lines. The lattice point (row, col) is the top-left corner of
/// the cell with the same index, so a grid of `h` by `w` cells has
/// `h + 1` by `w + 1` lattice points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

/// A unit-length wall between two lattice points.
///
/// Segments are either horizontal or vertical and always point towards
/// growing row or column. Equality is over the ordered endpoint pair;
/// adjacent cells report their shared wall with identical endpoints, so
/// a set of segments holds each wall once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallSegment {
    pub from: Point,
    pub to: Point,
}

/// A rectangular grid of wall-flagged cells
///
/// Row 0 is the top of the maze and column 0 its left edge. The grid is
/// immutable once parsed; when the source text changes, parse a fresh
/// maze instead of editing this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
}

impl Maze {
    const SIDES: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

    /// Parse maze representation from rows of hex digits.
    ///
    /// Surrounding whitespace is trimmed from the input and from each
    /// row. Fails if any character is not a hex digit, if rows differ in
    /// length, or if the input holds no cells at all.
    ///
    /// # Examples
    /// ```
    /// use hexmaze::Maze;
    /// let maze = Maze::parse_hex("
    /// 739
    /// 73a").unwrap();
    /// assert_eq!((maze.height(), maze.width()), (2, 3));
    /// ```
    pub fn parse_hex(text: &str) -> Result<Self, MazeError> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();
        for (row, line) in text.trim().split('\n').enumerate() {
            let decoded = line
                .trim()
                .chars()
                .map(Cell::decode)
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(first) = cells.first() {
                if decoded.len() != first.len() {
                    return Err(MazeError::MalformedGrid {
                        row,
                        len: decoded.len(),
                        expected: first.len(),
                    });
                }
            }
            cells.push(decoded);
        }
        if cells[0].is_empty() {
            return Err(MazeError::MalformedGrid {
                row: 0,
                len: 0,
                expected: 1,
            });
        }
        Ok(Maze { cells })
    }

    #[cfg(feature = "mapgen")]
    pub(crate) fn from_cells(cells: Vec<Vec<Cell>>) -> Self {
        Maze { cells }
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// The cell at the given coordinates, if it is on the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|cells| cells.get(col))
    }

    /// Serialize back to rows of lowercase hex digits.
    pub fn to_hex(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(Cell::encode).collect::<String>())
            .join("\n")
    }

    /// Verify wall consistency across the whole grid.
    ///
    /// Every cell on the outer edge must be walled towards the outside,
    /// and both cells on either side of an interior wall must report it.
    /// Scans in row-major order and stops at the first violation; use
    /// [Self::violations] to collect them all. Meant as a check on
    /// hand-authored mazes, parsing and rendering never call it.
    pub fn validate(&self) -> Result<(), MazeError> {
        match self.violation_scan().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every wall-consistency violation in the grid, in row-major order.
    ///
    /// Same checks as [Self::validate], collected instead of cut short.
    /// An interior disagreement is reported from both offending cells.
    pub fn violations(&self) -> Vec<MazeError> {
        self.violation_scan().collect()
    }

    fn violation_scan(&self) -> impl Iterator<Item = MazeError> + '_ {
        (0..self.height())
            .cartesian_product(0..self.width())
            .flat_map(move |(row, col)| {
                Self::SIDES
                    .into_iter()
                    .filter_map(move |side| self.side_violation(row, col, side))
            })
    }

    /// Check one side of one cell.
    ///
    /// Towards the outside of the grid the wall must be present; towards
    /// a neighbour the flag must equal the neighbour's opposite flag.
    fn side_violation(&self, row: usize, col: usize, side: Side) -> Option<MazeError> {
        let cell = &self.cells[row][col];
        let neighbour = match side {
            Side::North => (row > 0).then(|| self.cells[row - 1][col].south),
            Side::South => (row + 1 < self.height()).then(|| self.cells[row + 1][col].north),
            Side::West => (col > 0).then(|| self.cells[row][col - 1].east),
            Side::East => (col + 1 < self.width()).then(|| self.cells[row][col + 1].west),
        };
        match neighbour {
            None if !cell.wall(side) => Some(MazeError::OpenBoundary { side, row, col }),
            Some(other) if cell.wall(side) != other => {
                Some(MazeError::WallMismatch { side, row, col })
            }
            _ => None,
        }
    }

    /// Collect the walls of the maze as unit segments between lattice
    /// points.
    ///
    /// Each set flag becomes one segment along the matching edge of the
    /// cell. Adjacent cells emit their shared wall with identical
    /// endpoints, so inserting into a set leaves each wall exactly once.
    /// Iteration order of the result is unspecified.
    pub fn walls(&self) -> HashSet<WallSegment> {
        let mut walls = HashSet::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.north {
                    walls.insert(WallSegment {
                        from: Point { row, col },
                        to: Point { row, col: col + 1 },
                    });
                }
                if cell.south {
                    walls.insert(WallSegment {
                        from: Point { row: row + 1, col },
                        to: Point {
                            row: row + 1,
                            col: col + 1,
                        },
                    });
                }
                if cell.east {
                    walls.insert(WallSegment {
                        from: Point { row, col: col + 1 },
                        to: Point {
                            row: row + 1,
                            col: col + 1,
                        },
                    });
                }
                if cell.west {
                    walls.insert(WallSegment {
                        from: Point { row, col },
                        to: Point { row: row + 1, col },
                    });
                }
            }
        }
        walls
    }

    /// Draw the maze with ASCII box characters.
    ///
    /// When `player` names a cell, that cell is marked with `()`.
    pub fn to_ascii(&self, player: Option<Point>) -> String {
        let mut out = String::new();
        for (row, cells) in self.cells.iter().enumerate() {
            out.push('+');
            for cell in cells {
                out.push_str(if cell.north { "--+" } else { "  +" });
            }
            out.push('\n');
            out.push(if cells[0].west { '|' } else { ' ' });
            for (col, cell) in cells.iter().enumerate() {
                let here = player == Some(Point { row, col });
                out.push_str(if here { "()" } else { "  " });
                out.push(if cell.east { '|' } else { ' ' });
            }
            out.push('\n');
        }
        out.push('+');
        for cell in &self.cells[self.height() - 1] {
            out.push_str(if cell.south { "--+" } else { "  +" });
        }
        out.push('\n');
        out
    }
}

/// One play session: a maze and the player's position in it
///
/// The maze stays untouched for the whole session; the player position
/// is the only mutable state, and it belongs to whoever owns the
/// session. The player starts in the top-left cell and wins by reaching
/// the bottom-right cell.
#[derive(Debug, Clone)]
pub struct Game {
    maze: Maze,
    player: Point,
}

impl Game {
    /// Start a session with the player in the top-left cell.
    pub fn new(maze: Maze) -> Self {
        Game {
            maze,
            player: Point { row: 0, col: 0 },
        }
    }

    /// Try to move one cell towards `side`.
    ///
    /// The move is legal when the current cell has no wall on that side
    /// and the target cell is still on the grid. Returns whether the
    /// player moved; an illegal move leaves the position unchanged.
    pub fn step(&mut self, side: Side) -> bool {
        let Point { row, col } = self.player;
        if self.maze.cells[row][col].wall(side) {
            return false;
        }
        // Boundary walls keep a consistent maze closed; the bounds
        // checks also cover mazes that were never validated.
        let target = match side {
            Side::North if row > 0 => Point { row: row - 1, col },
            Side::South if row + 1 < self.maze.height() => Point { row: row + 1, col },
            Side::West if col > 0 => Point { row, col: col - 1 },
            Side::East if col + 1 < self.maze.width() => Point { row, col: col + 1 },
            _ => return false,
        };
        self.player = target;
        true
    }

    /// Whether the player stands on the bottom-right cell.
    pub fn has_won(&self) -> bool {
        self.player
            == Point {
                row: self.maze.height() - 1,
                col: self.maze.width() - 1,
            }
    }

    /// Current player cell.
    pub fn player(&self) -> Point {
        self.player
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }
}
