pub mod points;

pub use points::{compute_rankings, UNKNOWN_PLAYER};
