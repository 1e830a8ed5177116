//! Feed view-state module
//!
//! Holds the selection (tab, sort, category and difficulty filters) and
//! derives the visualization and challenge lists from it.

mod controller;
mod filter;
mod selection;

#[cfg(test)]
mod property_tests;

pub use controller::*;
pub use filter::*;
pub use selection::*;
