//! Background tasks module
//!
//! This module contains the countdown ticker that runs alongside the HTTP server.

pub mod ticker;

// Re-export main items
pub use ticker::{ticker_task, Ticker, TICK_PERIOD};
