//! Reads `#[bind_view(..)]` metadata out of Rust sources.
//!
//! The [`SourceScanner`] plays the part of the compiler's declaration feed: it
//! reports every place the binding attribute appears, valid or not. [`extract`]
//! then turns those raw sightings into [`BindingRecord`]s, rejecting anything
//! that can not be bound.

pub use attribute::*;
pub use error::*;
pub use extract::*;
pub use member::*;
pub use scan::*;

mod attribute;
mod error;
mod extract;
mod member;
mod scan;

/// Attribute name looked for when none is configured.
pub const DEFAULT_ATTRIBUTE: &str = "bind_view";
