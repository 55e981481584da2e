//! Command implementations behind the CLI.

mod caskroom;
mod list;

pub use caskroom::{any, init, path};
pub use list::{ListOptions, list};
