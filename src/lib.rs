pub mod board;
pub mod command;
pub mod coord;
pub mod distances;
pub mod error;
pub mod game;
pub mod input;
pub mod strategy;
pub mod world;

pub use board::*;
pub use command::*;
pub use coord::*;
pub use distances::*;
pub use error::Error;
pub use game::*;
pub use input::*;
pub use strategy::*;
pub use world::*;
