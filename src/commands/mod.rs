pub mod completions;
pub mod config;
pub mod discover;
pub mod send;
