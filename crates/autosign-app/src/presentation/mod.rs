pub mod bootstrap;
pub mod cli;
pub mod http;
pub mod state;
