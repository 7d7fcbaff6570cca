//! Level configuration and game initialization

pub mod game_init;
pub mod level;

pub use game_init::LevelGenerator;
pub use level::{CardSpec, LevelConfig, LevelLoader};
