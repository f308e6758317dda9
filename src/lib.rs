pub mod calculator;
pub mod config;
pub mod repl;
pub mod session;
pub mod terminal;
