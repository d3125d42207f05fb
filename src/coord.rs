use std::fmt;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

/// Signed step on the grid, applied with toroidal wrapping.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Offset { dx, dy }
    }
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    pub fn index(self, width: usize) -> usize {
        self.y * width + self.x
    }

    pub fn from_index(index: usize, width: usize) -> Self {
        Coord {
            x: index % width,
            y: index / width,
        }
    }

    pub fn wrapped(self, offset: Offset, width: usize, height: usize) -> Coord {
        Coord {
            x: wrap(self.x, offset.dx, width),
            y: wrap(self.y, offset.dy, height),
        }
    }
}

fn wrap(value: usize, delta: i32, size: usize) -> usize {
    let size = size as i64;
    (value as i64 + delta as i64).rem_euclid(size) as usize
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
