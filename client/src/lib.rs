//! Air quality lookup page.
//!
//! Looks up current air quality for a city through a backend proxy,
//! and shows one card per monitoring station with an AQI, a status badge,
//! and health advice. Visitors can subscribe to daily updates by email.
//!
//! # Building
//! The page glue targets the browser:
//! `cargo build --target wasm32-unknown-unknown --features web`.
//! Everything else builds and tests on the host.
//!
pub mod alerts;
pub mod atmosphere;
pub mod config;
mod error;
pub mod search;
pub mod shape;
pub mod subscribe;
pub mod view;

#[cfg(feature = "web")]
pub mod web;

pub use config::ClientConfig;
pub use error::Error;
pub use shape::{shape_result, shape_results, DisplayRecord};
