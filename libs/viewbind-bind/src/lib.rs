//! Build-time half of view binding: turns the scanned `#[bind_view(..)]`
//! records into one `<Owner>_ViewBinder` source file per owner, plus a
//! `register_all` manifest that registers them with the runtime.

pub use builder::*;
pub use emit::*;
pub use generate::*;
pub use group::*;
pub use manifest::*;

mod builder;
mod emit;
mod generate;
mod group;
mod manifest;
