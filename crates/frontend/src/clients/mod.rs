pub mod backend;
pub mod puzzle_api;

pub use backend::BackendClient;
pub use puzzle_api::{PuzzleApiClient, PuzzleData, PuzzleSource};
