//! GameButler: pick a game to play out of your own library.
//!
//! The [`services::loader`] normalizes either supported CSV layout into a
//! [`models::Library`], and [`services::Recommender`] answers filtered
//! random-pick queries over it. The HTTP API and the CLI are thin front ends.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
