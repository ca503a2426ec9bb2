//! Application services orchestrating domain entities over the ports.

pub mod import;
pub mod lifecycle;
pub mod report;
