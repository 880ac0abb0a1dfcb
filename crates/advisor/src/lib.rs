//! Twenty48 advisor crate - turns search results into human-readable
//! move suggestions for a UI to display.

mod suggestion;

pub use suggestion::Advisor;
