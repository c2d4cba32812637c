//! Application-wide middleware

pub mod metrics;
