//! Run-time half of viewbind.
//!
//! Generated binders implement [`ViewBinder`] for their owner type and are
//! collected into a [`Registry`] by the generated `register_all` function. At run
//! time [`bind_instance`] (or a [`Resolver`]) derives the binder name from the
//! target's type name, looks it up, and runs it.
//!
//! ```ignore
//! let mut registry = Registry::new();
//! register_all(&mut registry)?;
//! let resolver = Resolver::new(registry);
//!
//! let mut screen = LoginScreen::new(window);
//! resolver.bind_instance(&mut screen)?;
//! ```

mod contract;
mod error;
mod registry;
mod resolver;

pub use contract::*;
pub use error::*;
pub use registry::*;
pub use resolver::*;
pub use viewbind_core::ViewId;
