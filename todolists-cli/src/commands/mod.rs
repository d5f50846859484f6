//! Command implementations for the todolists CLI

pub mod serve;

pub use serve::run_serve;
