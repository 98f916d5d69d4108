pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::VoteAction;
pub use error::CoreError;
pub use structs::{
    AssignCategory, Category, Joke, JokeCounts, MAX_CATEGORY_NAME_LEN, NewCategory, NewJoke,
    SetCounts, VoteRequest,
};
