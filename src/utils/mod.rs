//! Utility functions.
//!
//! Collection of helper functions used across the bot.

pub mod parser;
pub mod time;

pub use parser::{html_escape, optional_arg};
pub use time::{away_for, elapsed_secs, natural_time};
