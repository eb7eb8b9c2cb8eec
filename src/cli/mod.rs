//! CLI command handling

pub mod detect;
pub mod input;
pub mod list;
pub mod output;
pub mod paste;
pub mod run;
pub mod setup;

pub use detect::*;
pub use list::*;
pub use output::*;
pub use paste::*;
pub use run::*;
pub use setup::*;
