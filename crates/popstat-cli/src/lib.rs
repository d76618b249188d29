//! CLI library components for the population trend analyzer.

pub mod logging;
pub mod pipeline;
