//! Data models shared by the server and the client core.
//!
//! Wire shapes are camelCase to match the browser client contract.

mod generation;
mod history;
mod style;

pub use generation::*;
pub use history::*;
pub use style::*;
