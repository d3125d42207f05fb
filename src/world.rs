use tracing::warn;

use super::board::Board;
use super::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub id: i32,
    pub mine: bool,
    pub pos: Coord,
}

impl Unit {
    pub fn new(id: i32, mine: bool, pos: Coord) -> Self {
        Unit { id, mine, pos }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub pos: Coord,
    pub value: i32,
}

impl Collectible {
    pub fn new(pos: Coord, value: i32) -> Self {
        Collectible { pos, value }
    }
}

/// Live entities reported for the current turn.
///
/// Cells hold back-references as indices into this turn's unit and
/// collectible lists; `clear` drops both before the next turn is read.
/// The lookup tables are sized for one board, so a turn only comes from
/// `Turn::new`.
#[derive(Debug)]
pub struct Turn {
    pub my_score: i32,
    pub opponent_score: i32,
    width: usize,
    units: Vec<Unit>,
    collectibles: Vec<Collectible>,
    unit_at: Vec<Option<usize>>,
    collectible_at: Vec<Option<usize>>,
}

impl Turn {
    pub fn new(board: &Board) -> Self {
        let size = board.cells().len();
        Turn {
            my_score: 0,
            opponent_score: 0,
            width: board.width(),
            units: Vec::new(),
            collectibles: Vec::new(),
            unit_at: vec![None; size],
            collectible_at: vec![None; size],
        }
    }

    pub fn clear(&mut self) {
        for unit in &self.units {
            self.unit_at[unit.pos.index(self.width)] = None;
        }
        for collectible in &self.collectibles {
            self.collectible_at[collectible.pos.index(self.width)] = None;
        }
        self.units.clear();
        self.collectibles.clear();
        self.my_score = 0;
        self.opponent_score = 0;
    }

    pub fn add_unit(&mut self, unit: Unit) {
        self.unit_at[unit.pos.index(self.width)] = Some(self.units.len());
        self.units.push(unit);
    }

    /// Records a collectible. One reported on a wall is inconsistent data,
    /// but it is still recorded so the turn can go on.
    pub fn add_collectible(&mut self, board: &Board, collectible: Collectible) {
        if !board.cell(collectible.pos).is_floor() {
            warn!(pos = %collectible.pos, value = collectible.value, "collectible reported on a wall");
        }
        self.collectible_at[collectible.pos.index(self.width)] = Some(self.collectibles.len());
        self.collectibles.push(collectible);
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn my_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.mine)
    }

    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn unit_at(&self, pos: Coord) -> Option<&Unit> {
        self.unit_at[pos.index(self.width)].map(|i| &self.units[i])
    }

    pub fn collectible_at(&self, pos: Coord) -> Option<&Collectible> {
        self.collectible_at[pos.index(self.width)].map(|i| &self.collectibles[i])
    }

    /// Cells holding a live collectible, in report order.
    pub fn collectible_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.collectibles.iter().map(|c| c.pos)
    }
}
