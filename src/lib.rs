pub mod amendment;
pub mod api;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod progress;
pub mod search;

pub use amendment::generate_amendment_clauses;
pub use search::search_keyword;
