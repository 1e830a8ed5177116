//! Data model for users, challenges and visualizations
//!
//! All records are immutable once loaded; see [`FixtureSet`] for the bundled
//! sample data.

mod challenge;
mod fixtures;
mod user;
mod visualization;

pub use challenge::*;
pub use fixtures::*;
pub use user::*;
pub use visualization::*;
