//! Host-side support: turning user input into tool input, keeping the current
//! selection, and presenting results.

pub mod input;
pub mod render;
mod shell;

pub use input::{Cell, RawInput, RawRow, collect};
pub use render::{OutputFormat, describe, render};
pub use shell::Shell;
