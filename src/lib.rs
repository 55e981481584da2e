pub mod cask;
pub mod caskroom;
pub mod commands;
pub mod config;
pub mod loader;
pub mod runtime;
