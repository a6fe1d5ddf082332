pub mod matchmaking;
pub mod summary;

pub use matchmaking::{generate_matches, PLAYERS_PER_MATCH};
pub use summary::{summarize, PlayerLoad};
