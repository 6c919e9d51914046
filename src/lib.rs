//! Draft changelog generation from the pull requests merged since the last
//! release tag.
pub mod changelog;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod repo;

pub use cli::Args;
pub use config::Options;
pub use error::{ChangelistError, Result};
