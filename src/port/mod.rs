//! Trait seams between the application core and its adapters.

pub mod store;
