//! Map generation

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Cell, Maze};

/// Maze generator for additional maps.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Chance of carving into an already visited cell, which leaves a
    /// loop in the maze.
    const LOOP_CHANCE: f64 = 0.05;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Generate a maze of the given dimensions, both at least one cell.
    ///
    /// Starts from a grid with every wall up and carves passages with a
    /// randomized depth-first walk from a random cell. Carving removes
    /// both flags of the shared wall, so the result always passes
    /// [Maze::validate]. At random, the walk also carves into cells it
    /// has already seen; those mazes contain loops.
    pub fn generate_maze(&mut self, height: usize, width: usize) -> Maze {
        let walled = Cell {
            north: true,
            south: true,
            east: true,
            west: true,
        };
        let mut cells: Vec<Vec<Cell>> = (0..height)
            .map(|_| (0..width).map(|_| walled).collect())
            .collect();
        let mut visited: Vec<Vec<bool>> = (0..height)
            .map(|_| (0..width).map(|_| false).collect())
            .collect();

        let start_row = self.random.gen_range(0..height);
        let start_col = self.random.gen_range(0..width);
        visited[start_row][start_col] = true;
        self.carve(&mut cells, &mut visited, start_row, start_col);

        Maze::from_cells(cells)
    }

    /// Carve passages outward from the current cell.
    ///
    /// From the current position, go into random directions. Open the
    /// shared wall whenever the neighbour has not been visited yet (or
    /// at random, skip this check) and continue the walk from fresh
    /// neighbours.
    fn carve(
        &mut self,
        cells: &mut [Vec<Cell>],
        visited: &mut [Vec<bool>],
        row: usize,
        col: usize,
    ) {
        let mut directions = Self::DIRECTIONS.to_vec();
        directions.shuffle(&mut self.random);

        for (dy, dx) in directions {
            let next_row = row as i32 + dy;
            let next_col = col as i32 + dx;
            if next_row < 0
                || next_col < 0
                || next_row >= cells.len() as i32
                || next_col >= cells[0].len() as i32
            {
                continue;
            }
            let (next_row, next_col) = (next_row as usize, next_col as usize);

            if !visited[next_row][next_col] {
                Self::open_between(cells, (row, col), (next_row, next_col));
                visited[next_row][next_col] = true;
                self.carve(cells, visited, next_row, next_col);
            } else if self.random.gen_bool(Self::LOOP_CHANCE) {
                Self::open_between(cells, (row, col), (next_row, next_col));
            }
        }
    }

    /// Remove both flags of the wall shared by two adjacent cells.
    fn open_between(cells: &mut [Vec<Cell>], from: (usize, usize), to: (usize, usize)) {
        let (row, col) = from;
        let (next_row, next_col) = to;
        if next_row < row {
            cells[row][col].north = false;
            cells[next_row][next_col].south = false;
        } else if next_row > row {
            cells[row][col].south = false;
            cells[next_row][next_col].north = false;
        } else if next_col < col {
            cells[row][col].west = false;
            cells[next_row][next_col].east = false;
        } else {
            cells[row][col].east = false;
            cells[next_row][next_col].west = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::maze_generator::MazeGenerator;
    use crate::Maze;

    #[test]
    fn generated_maze_is_consistent() {
        let mut gen = MazeGenerator::new(Some(0));
        let maze = gen.generate_maze(15, 15);

        assert_eq!((maze.height(), maze.width()), (15, 15));
        assert!(maze.validate().is_ok());
    }

    #[test]
    fn generated_maze_round_trips_through_hex() {
        let mut gen = MazeGenerator::new(Some(7));
        let maze = gen.generate_maze(9, 12);

        let reparsed = Maze::parse_hex(&maze.to_hex()).unwrap();
        assert_eq!(maze, reparsed);
    }

    #[test]
    fn same_seed_same_maze() {
        let first = MazeGenerator::new(Some(42)).generate_maze(10, 25);
        let second = MazeGenerator::new(Some(42)).generate_maze(10, 25);
        assert_eq!(first.to_hex(), second.to_hex());
    }

    #[test]
    fn single_cell_maze_is_fully_walled() {
        let maze = MazeGenerator::new(Some(1)).generate_maze(1, 1);
        assert_eq!(maze.to_hex(), "f");
    }
}
