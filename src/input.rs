use std::collections::VecDeque;
use std::io::BufRead;

use super::coord::Coord;
use super::error::{Error, Result};
use super::world::{Collectible, Unit};

macro_rules! parse_input {
    ($x:expr, $t:ident, $field:expr) => {{
        let raw = $x;
        raw.trim().parse::<$t>().map_err(|_| Error::Parse {
            field: $field,
            value: raw.trim().to_string(),
        })?
    }};
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSetup {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnInput {
    pub my_score: i32,
    pub opponent_score: i32,
    pub units: Vec<Unit>,
    pub collectibles: Vec<Collectible>,
}

/// Reads the game protocol from any buffered source.
///
/// Grid rows are read as whole lines since spaces are floor. Everything after
/// the grid is whitespace separated tokens, so line breaks inside a turn
/// record do not matter.
pub struct InputReader<R> {
    source: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(source: R) -> Self {
        InputReader {
            source,
            tokens: VecDeque::new(),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let end = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(end);
        Ok(Some(line))
    }

    fn try_token(&mut self) -> Result<Option<String>> {
        while self.tokens.is_empty() {
            match self.read_line()? {
                Some(line) => self
                    .tokens
                    .extend(line.split_whitespace().map(str::to_string)),
                None => return Ok(None),
            }
        }
        Ok(self.tokens.pop_front())
    }

    fn token(&mut self, expected: &'static str) -> Result<String> {
        self.try_token()?.ok_or(Error::UnexpectedEof { expected })
    }

    pub fn read_setup(&mut self) -> Result<GridSetup> {
        let width = parse_input!(self.token("width")?, usize, "width");
        let height = parse_input!(self.token("height")?, usize, "height");
        self.tokens.clear();

        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            let row = self
                .read_line()?
                .ok_or(Error::UnexpectedEof { expected: "grid row" })?;
            rows.push(row);
        }

        Ok(GridSetup {
            width,
            height,
            rows,
        })
    }

    /// Next turn record, or `None` once the input is exhausted.
    pub fn read_turn(&mut self) -> Result<Option<TurnInput>> {
        let Some(my_score) = self.try_token()? else {
            return Ok(None);
        };
        let my_score = parse_input!(my_score, i32, "my score");
        let opponent_score = parse_input!(self.token("opponent score")?, i32, "opponent score");

        let unit_count = parse_input!(self.token("unit count")?, usize, "unit count");
        let mut units = Vec::with_capacity(unit_count);
        for _ in 0..unit_count {
            let id = parse_input!(self.token("unit id")?, i32, "unit id");
            let mine = parse_input!(self.token("unit owner")?, i32, "unit owner") != 0;
            let x = parse_input!(self.token("unit x")?, usize, "unit x");
            let y = parse_input!(self.token("unit y")?, usize, "unit y");
            // type id, speed turns left, ability cooldown
            for field in ["unit type", "unit speed", "unit cooldown"] {
                self.token(field)?;
            }
            units.push(Unit::new(id, mine, Coord::new(x, y)));
        }

        let collectible_count = parse_input!(
            self.token("collectible count")?,
            usize,
            "collectible count"
        );
        let mut collectibles = Vec::with_capacity(collectible_count);
        for _ in 0..collectible_count {
            let x = parse_input!(self.token("collectible x")?, usize, "collectible x");
            let y = parse_input!(self.token("collectible y")?, usize, "collectible y");
            let value = parse_input!(self.token("collectible value")?, i32, "collectible value");
            collectibles.push(Collectible::new(Coord::new(x, y), value));
        }

        Ok(Some(TurnInput {
            my_score,
            opponent_score,
            units,
            collectibles,
        }))
    }
}
