//! Command-line interface module.

mod args;
pub mod apply;
pub mod check;
pub mod common;
pub mod edit;
pub mod render;
pub mod schema;

pub use args::{Cli, Commands, EditArgs, WriteArgs};
