//! pomofocus library - countdown timer, to-do list and terminal UI

pub mod cli;
pub mod config;
pub mod sound;
pub mod task;
pub mod timer;
pub mod tui;
