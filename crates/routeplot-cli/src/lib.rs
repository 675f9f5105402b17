//! routeplot CLI library.
//!
//! Terminal styling and output formatting shared by the `routeplot` binary.

pub mod output;
pub mod terminal;
