pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::JServiceClient;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{loader::BoardLoader, session::GameSession};
pub use domain::model::{Board, Category, CellId, Clue, DisplayText, RevealState};
pub use utils::error::{BoardError, Result};
