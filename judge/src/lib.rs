mod config;
mod game;
mod matchup;
mod player;
pub use config::*;
pub use game::*;
pub use matchup::*;
pub use player::*;
