mod config;
mod constants;
mod food;
mod game_engine;
mod game_state;
mod snake;

pub mod util;

pub use config::*;
pub use constants::*;
pub use food::*;
pub use game_engine::*;
pub use game_state::*;
pub use snake::*;
pub use util::{PseudoRandom, RandomGenerator};
