pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{storage::LocalStorage, tsv::TsvWordSource};
pub use crate::app::{engine::XwordEngine, pipeline::CrosswordPipeline};
pub use crate::core::crossword::Crossword;
pub use crate::domain::model::{Bearing, Direction, Position, Word, WordEntry};
pub use crate::utils::error::{Result, XwordError};
