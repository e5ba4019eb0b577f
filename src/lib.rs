pub mod actors;
pub mod cli;
pub mod error;
pub mod fallback;
pub mod gallery;
pub mod github;
pub mod loader;
pub mod models;
pub mod pagination;
pub mod panels;
pub mod prefs;
pub mod render;
pub mod search;
pub mod server;
pub mod state;
pub mod time_ago;
pub mod types;
