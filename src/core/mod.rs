pub mod loader;
pub mod render;
pub mod reveal;
pub mod session;

pub use crate::domain::model::{Board, Category, CellId, Clue, DisplayText, RevealState};
pub use crate::domain::ports::{ConfigProvider, TriviaSource};
pub use crate::utils::error::Result;
