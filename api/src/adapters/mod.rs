//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod market_data;

pub use market_data::{default_market_context, InMemoryMarketData};
