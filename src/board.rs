use std::time::Instant;

use tracing::info;

use super::coord::{Coord, Offset};
use super::distances::DistanceTable;
use super::error::{Error, Result};

pub const WALL: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Floor,
}

impl CellKind {
    pub fn from_char(c: char) -> Self {
        if c == WALL {
            CellKind::Wall
        } else {
            CellKind::Floor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    pub fn offset(self) -> Offset {
        match self {
            Direction::Left => Offset::new(-1, 0),
            Direction::Right => Offset::new(1, 0),
            Direction::Top => Offset::new(0, -1),
            Direction::Bottom => Offset::new(0, 1),
        }
    }
}

/// Cell indices of the floor cells adjacent to a cell. Walls never get links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    left: Option<usize>,
    right: Option<usize>,
    top: Option<usize>,
    bottom: Option<usize>,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Top => self.top,
            Direction::Bottom => self.bottom,
        }
    }

    fn set(&mut self, direction: Direction, index: usize) {
        let slot = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Top => &mut self.top,
            Direction::Bottom => &mut self.bottom,
        };
        *slot = Some(index);
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let neighbors = *self;
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| neighbors.get(direction))
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub pos: Coord,
    pub kind: CellKind,
    neighbors: Neighbors,
}

impl Cell {
    fn new(pos: Coord, kind: CellKind) -> Self {
        Cell {
            pos,
            kind,
            neighbors: Neighbors::default(),
        }
    }

    pub fn is_floor(&self) -> bool {
        self.kind == CellKind::Floor
    }

    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }
}

/// Static grid topology with toroidal adjacency and the all-pairs floor
/// distance table. Built once per game and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    distances: DistanceTable,
}

impl Board {
    /// Builds the board from `height` rows of `width` characters, `#` being
    /// wall and anything else floor.
    pub fn new<S: AsRef<str>>(width: usize, height: usize, rows: &[S]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyGrid { width, height });
        }
        if rows.len() != height {
            return Err(Error::RowCount {
                expected: height,
                actual: rows.len(),
            });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row: &str = row.as_ref();
            let actual = row.chars().count();
            if actual != width {
                return Err(Error::RowLength {
                    row: y,
                    expected: width,
                    actual,
                });
            }
            for (x, c) in row.chars().enumerate() {
                cells.push(Cell::new(Coord::new(x, y), CellKind::from_char(c)));
            }
        }

        let mut board = Board {
            width,
            height,
            cells,
            distances: DistanceTable::default(),
        };

        let start = Instant::now();
        board.link_cells();
        board.distances = DistanceTable::compute(&board.cells);

        info!(
            width,
            height,
            floor = board.floor_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "board ready"
        );

        Ok(board)
    }

    /// Parses newline separated rows.
    pub fn parse(width: usize, height: usize, text: &str) -> Result<Self> {
        let rows = text.lines().collect::<Vec<_>>();
        Self::new(width, height, &rows)
    }

    // Each floor cell links to its right and bottom floor neighbors, and the
    // neighbor gets the reverse link, so every pair is visited once.
    fn link_cells(&mut self) {
        for index in 0..self.cells.len() {
            if !self.cells[index].is_floor() {
                continue;
            }

            let pos = self.cells[index].pos;
            for (forward, backward) in [
                (Direction::Right, Direction::Left),
                (Direction::Bottom, Direction::Top),
            ] {
                let other = self.index_of(pos.wrapped(forward.offset(), self.width, self.height));
                if self.cells[other].is_floor() {
                    self.cells[index].neighbors.set(forward, other);
                    self.cells[other].neighbors.set(backward, index);
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index_of(&self, pos: Coord) -> usize {
        pos.index(self.width)
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Cell at `pos`, which must lie inside the grid.
    pub fn cell(&self, pos: Coord) -> &Cell {
        debug_assert!(self.contains(pos), "{} outside the grid", pos);
        &self.cells[self.index_of(pos)]
    }

    pub fn cell_at(&self, x: usize, y: usize) -> &Cell {
        self.cell(Coord::new(x, y))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn floor_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_floor())
    }

    pub fn floor_count(&self) -> usize {
        self.floor_cells().count()
    }

    pub fn distances(&self) -> &DistanceTable {
        &self.distances
    }

    /// Shortest step count between two cells, `None` if either is a wall or
    /// no floor path connects them.
    pub fn distance(&self, from: Coord, to: Coord) -> Option<u32> {
        debug_assert!(self.contains(from), "{} outside the grid", from);
        debug_assert!(self.contains(to), "{} outside the grid", to);
        self.distances.get(self.index_of(from), self.index_of(to))
    }

    /// First cell on a shortest path from `from` to `to`. Returns `from`
    /// itself when already there and `None` when `to` is unreachable.
    pub fn next_step(&self, from: Coord, to: Coord) -> Option<Coord> {
        let remaining = self.distance(from, to)?;
        if remaining == 0 {
            return Some(from);
        }

        let target = self.index_of(to);
        self.cell(from)
            .neighbors()
            .iter()
            .find(|&n| self.distances.get(n, target) == Some(remaining - 1))
            .map(|n| self.cells[n].pos)
    }
}
