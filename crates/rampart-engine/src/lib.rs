//! Evaluation and search for rampart.

pub mod eval;
pub mod search;

pub use eval::{evaluate, evaluate_with_moves, MATE};
pub use search::{search, SearchResult, DEFAULT_DEPTH};
