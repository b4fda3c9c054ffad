//! MultiLingo API — library crate for the REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `mlg-e2e-tests`) can access `AppState`, `build_router` and the
//! storage and chat types.

pub mod chat;
pub mod config;
pub mod conversation;
pub mod db;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod store;
