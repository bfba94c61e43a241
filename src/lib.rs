//! # Steam Showcase
//!
//! A personal profile page built from the Steam Web API, with a bundled
//! fallback dataset for when the API is not configured.
//!
//! ## Architecture
//!
//! - **models**: Profile, game and achievement types plus the page view model
//! - **steam**: Gateway to the four Web API endpoints, failing soft
//! - **aggregate**: Ranking, achievement join and totals
//! - **fallback**: Embedded static dataset
//! - **render**: HTML page rendering
//! - **api**: Axum routes
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod config;
pub mod fallback;
pub mod models;
pub mod render;
pub mod steam;

pub use models::*;
