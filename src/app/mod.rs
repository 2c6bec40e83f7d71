pub use crate::app::main_loop::AppMainLoop;
pub use app::{App, AppChannels};

// Module declarations
pub mod actions;
pub mod app;
pub mod binds_handler;
pub mod cli;
pub mod config;
pub mod constructor;
pub mod event_handlers;
pub mod logging;
pub mod main_loop;
pub mod navigation;
pub mod screen;
pub mod terminal;
