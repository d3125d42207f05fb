use std::cmp::Ordering;

use tracing::debug;

use super::*;

/// How collectibles are ranked against each other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Ranking {
    /// Distance is the only key; value is ignored.
    #[default]
    Nearest,
    /// Higher value first, nearer first among equal values.
    ValueFirst,
}

/// A reachable collectible as seen from one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Coord,
    pub value: i32,
    pub distance: u32,
    /// Position of the collectible in this turn's reports.
    pub order: usize,
}

/// Total order over candidates: the one that sorts first is the target.
/// Report order breaks any remaining tie so the choice is deterministic.
pub fn compare_candidates(ranking: Ranking, a: &Candidate, b: &Candidate) -> Ordering {
    let primary = match ranking {
        Ranking::Nearest => a.distance.cmp(&b.distance),
        Ranking::ValueFirst => b
            .value
            .cmp(&a.value)
            .then_with(|| a.distance.cmp(&b.distance)),
    };
    primary.then_with(|| a.order.cmp(&b.order))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TargetSelector {
    pub ranking: Ranking,
}

impl TargetSelector {
    pub fn new(ranking: Ranking) -> Self {
        TargetSelector { ranking }
    }

    /// Collectibles reachable from `from`. Ones with no path are skipped.
    pub fn candidates<'a>(
        &self,
        board: &'a Board,
        turn: &'a Turn,
        from: Coord,
    ) -> impl Iterator<Item = Candidate> + 'a {
        turn.collectibles()
            .iter()
            .enumerate()
            .filter_map(move |(order, c)| {
                board.distance(from, c.pos).map(|distance| Candidate {
                    pos: c.pos,
                    value: c.value,
                    distance,
                    order,
                })
            })
    }

    pub fn select_target(&self, board: &Board, turn: &Turn, unit: &Unit) -> Coord {
        let candidates = self.candidates(board, turn, unit.pos).collect::<Vec<_>>();
        let best = candidates
            .iter()
            .min_by(|a, b| compare_candidates(self.ranking, a, b));

        match best {
            Some(best) => {
                debug!(
                    unit = unit.id,
                    candidates = candidates.len(),
                    from = %unit.pos,
                    target = %best.pos,
                    value = best.value,
                    distance = best.distance,
                    "target selected"
                );
                best.pos
            }
            None => {
                debug!(
                    unit = unit.id,
                    candidates = candidates.len(),
                    collectibles = turn.collectibles().len(),
                    pos = %unit.pos,
                    "no reachable collectible, staying"
                );
                unit.pos
            }
        }
    }

    /// One move per owned unit, in report order.
    pub fn plan(&self, board: &Board, turn: &Turn) -> Vec<Command> {
        turn.my_units()
            .map(|unit| Command::Move {
                id: unit.id,
                target: self.select_target(board, turn, unit),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn_with(board: &Board, unit: Unit, collectibles: &[(usize, usize, i32)]) -> Turn {
        let mut turn = Turn::new(board);
        turn.add_unit(unit);
        for &(x, y, value) in collectibles {
            turn.add_collectible(board, Collectible::new(Coord::new(x, y), value));
        }
        turn
    }

    fn candidate(distance: u32, value: i32, order: usize) -> Candidate {
        Candidate {
            pos: Coord::new(order, 0),
            value,
            distance,
            order,
        }
    }

    #[test]
    fn nearest_ignores_value() {
        let near = candidate(1, 1, 1);
        let far = candidate(5, 50, 0);
        assert_eq!(compare_candidates(Ranking::Nearest, &near, &far), Ordering::Less);
        assert_eq!(compare_candidates(Ranking::ValueFirst, &near, &far), Ordering::Greater);
    }

    #[test]
    fn value_first_breaks_value_ties_by_distance() {
        let near = candidate(2, 10, 1);
        let far = candidate(3, 10, 0);
        assert_eq!(compare_candidates(Ranking::ValueFirst, &near, &far), Ordering::Less);
    }

    #[test]
    fn report_order_breaks_full_ties() {
        let first = candidate(2, 1, 0);
        let second = candidate(2, 1, 1);
        for ranking in [Ranking::Nearest, Ranking::ValueFirst] {
            assert_eq!(compare_candidates(ranking, &first, &second), Ordering::Less);
            assert_eq!(compare_candidates(ranking, &second, &first), Ordering::Greater);
        }
    }

    #[test]
    fn stays_put_without_collectibles() {
        let board = Board::parse(3, 1, "   ").unwrap();
        let unit = Unit::new(0, true, Coord::new(1, 0));
        let turn = turn_with(&board, unit, &[]);
        let selector = TargetSelector::default();
        assert_eq!(selector.select_target(&board, &turn, &unit), Coord::new(1, 0));
    }

    #[test]
    fn wraparound_tie_is_resolved_by_ranking() {
        let board = Board::parse(5, 1, "     ").unwrap();
        let unit = Unit::new(0, true, Coord::new(0, 0));
        let turn = turn_with(&board, unit, &[(1, 0, 1), (4, 0, 10)]);

        assert_eq!(board.distance(Coord::new(0, 0), Coord::new(1, 0)), Some(1));
        assert_eq!(board.distance(Coord::new(0, 0), Coord::new(4, 0)), Some(1));

        let nearest = TargetSelector::new(Ranking::Nearest);
        assert_eq!(nearest.select_target(&board, &turn, &unit), Coord::new(1, 0));

        let value_first = TargetSelector::new(Ranking::ValueFirst);
        assert_eq!(value_first.select_target(&board, &turn, &unit), Coord::new(4, 0));
    }

    #[test]
    fn wraparound_tie_follows_report_order_when_nearest() {
        let board = Board::parse(5, 1, "     ").unwrap();
        let unit = Unit::new(0, true, Coord::new(0, 0));
        let turn = turn_with(&board, unit, &[(4, 0, 10), (1, 0, 1)]);
        let nearest = TargetSelector::new(Ranking::Nearest);
        assert_eq!(nearest.select_target(&board, &turn, &unit), Coord::new(4, 0));
    }

    #[test]
    fn unreachable_collectibles_are_excluded() {
        let board = Board::parse(6, 1, "  #  #").unwrap();
        let unit = Unit::new(0, true, Coord::new(0, 0));
        let turn = turn_with(&board, unit, &[(3, 0, 10), (1, 0, 1)]);

        let selector = TargetSelector::new(Ranking::ValueFirst);
        assert_eq!(selector.candidates(&board, &turn, unit.pos).count(), 1);
        assert_eq!(selector.select_target(&board, &turn, &unit), Coord::new(1, 0));
    }

    #[test]
    fn stays_put_when_nothing_is_reachable() {
        let board = Board::parse(6, 1, "  #  #").unwrap();
        let unit = Unit::new(0, true, Coord::new(1, 0));
        let turn = turn_with(&board, unit, &[(3, 0, 10), (4, 0, 1)]);
        let selector = TargetSelector::default();
        assert_eq!(selector.select_target(&board, &turn, &unit), Coord::new(1, 0));
    }

    #[test]
    fn collectible_on_wall_is_never_a_target() {
        let board = Board::parse(3, 1, " # ").unwrap();
        let unit = Unit::new(0, true, Coord::new(0, 0));
        let turn = turn_with(&board, unit, &[(1, 0, 10)]);
        let selector = TargetSelector::default();
        assert_eq!(selector.select_target(&board, &turn, &unit), Coord::new(0, 0));
    }

    #[test]
    fn plans_one_move_per_owned_unit() {
        let board = Board::parse(5, 2, "     \n     ").unwrap();
        let mut turn = Turn::new(&board);
        turn.add_unit(Unit::new(3, true, Coord::new(0, 0)));
        turn.add_unit(Unit::new(0, false, Coord::new(2, 0)));
        turn.add_unit(Unit::new(1, true, Coord::new(4, 1)));
        turn.add_collectible(&board, Collectible::new(Coord::new(3, 1), 1));

        let commands = TargetSelector::default().plan(&board, &turn);
        assert_eq!(
            commands,
            vec![
                Command::Move {
                    id: 3,
                    target: Coord::new(3, 1)
                },
                Command::Move {
                    id: 1,
                    target: Coord::new(3, 1)
                },
            ]
        );
    }
}
