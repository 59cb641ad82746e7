// src/lib.rs

//! Bulk profile leaderboard library.
//!
//! Resolves profile URLs to account identifiers, fetches per-account solve
//! statistics from the remote GraphQL service, and ranks the results.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
