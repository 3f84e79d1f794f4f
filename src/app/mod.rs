pub mod config;
pub mod state;

pub mod cli;
pub mod dispatcher;
pub mod events;
pub mod input_handler;
pub mod keys;
pub mod poller;
pub use state::*;
