pub mod authors;
pub mod cli;
pub mod compose;
pub mod config;
pub mod errors;
pub mod git;
pub mod hook;
pub mod message;
pub mod prompt;
pub mod utils;
