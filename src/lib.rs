pub mod assemble;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod fetch;
pub mod frame;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod table;

#[cfg(test)]
mod fixtures;
