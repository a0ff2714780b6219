//! Errors surfaced by the page glue.
//!
//! The `Display` text of each variant is the message shown to the user.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No data found for \"{city}\". Try a different city name.")]
    NoData { city: String },

    #[error("Failed to fetch data. Please try again later.")]
    Fetch(String),

    #[error("Failed to fetch data. Please try again later.")]
    Decode(#[from] serde_json::Error),

    #[error("Please enter your email")]
    MissingEmail,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Failed to subscribe. Please try again.")]
    SubscribeFailed(String),

    #[error("could not read saved data: {0}")]
    Io(#[from] std::io::Error),
}
