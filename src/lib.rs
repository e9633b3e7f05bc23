pub mod build;
pub mod config;
pub mod error;
pub mod options;
pub mod shell;
pub mod topo;

pub use error::{Result, SwitchError};

#[cfg(test)]
mod test;
