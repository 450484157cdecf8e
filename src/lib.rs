pub mod calendar;
pub mod cmds;
pub mod config;
pub mod ctrl;
pub mod error;
pub mod events;
pub mod grid;
pub mod hebrew;
pub mod ui;
