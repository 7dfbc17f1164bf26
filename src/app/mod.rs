// Terminal presentation and the interactive game loop.

pub mod game_loop;
pub mod terminal;

pub use game_loop::{run, Command, LoopOptions};
