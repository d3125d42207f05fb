use tracing::{debug, warn};

use super::*;

/// Board, the current turn and the selector, driven once per turn by the
/// game loop.
pub struct Game {
    board: Board,
    turn: Turn,
    pub selector: TargetSelector,
}

impl Game {
    pub fn new(board: Board, selector: TargetSelector) -> Self {
        let turn = Turn::new(&board);
        Game {
            board,
            turn,
            selector,
        }
    }

    pub fn from_setup(setup: &GridSetup, selector: TargetSelector) -> error::Result<Self> {
        let board = Board::new(setup.width, setup.height, &setup.rows)?;
        Ok(Game::new(board, selector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    pub fn start_turn(&mut self) {
        self.turn.clear();
    }

    pub fn add_unit(&mut self, unit: Unit) {
        if !self.board.contains(unit.pos) {
            warn!(unit = unit.id, pos = %unit.pos, "unit outside the grid, ignored");
            return;
        }
        self.turn.add_unit(unit);
    }

    pub fn add_collectible(&mut self, collectible: Collectible) {
        if !self.board.contains(collectible.pos) {
            warn!(pos = %collectible.pos, "collectible outside the grid, ignored");
            return;
        }
        self.turn.add_collectible(&self.board, collectible);
    }

    /// Replaces the live overlay with a freshly read turn.
    pub fn apply(&mut self, input: TurnInput) {
        self.start_turn();
        self.turn.my_score = input.my_score;
        self.turn.opponent_score = input.opponent_score;

        for unit in input.units {
            self.add_unit(unit);
        }
        for collectible in input.collectibles {
            self.add_collectible(collectible);
        }

        debug!(
            units = self.turn.units().len(),
            collectibles = self.turn.collectibles().len(),
            my_score = self.turn.my_score,
            opponent_score = self.turn.opponent_score,
            "turn applied"
        );
    }

    pub fn finish_turn(&self) -> Vec<Command> {
        self.selector.plan(&self.board, &self.turn)
    }

    pub fn play(&mut self, input: TurnInput) -> Vec<Command> {
        self.apply(input);
        self.finish_turn()
    }
}
