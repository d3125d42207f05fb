use std::fmt;

use super::coord::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { id: i32, target: Coord },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { id, target } => write!(f, "MOVE {} {} {}", id, target.x, target.y),
        }
    }
}

/// All commands of one turn go on a single line, separated by `|`.
pub fn join_commands(commands: &[Command]) -> String {
    commands
        .iter()
        .map(Command::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}
