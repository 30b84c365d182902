//! GLX over an Xlib display connection.
//!
//! A [`DisplayConnection`] owns the `Display` and everything shared between
//! threads: the Xlib bootstrap functions, the GLX library, the capability
//! snapshot and the pending-error table. A [`GlxDisplay`] is one thread's
//! view of it, with its own bound alias table.

mod display;
mod introspect;
mod xlib;

pub use display::{DisplayConnection, GlxDisplay, SharedConnection};
pub use introspect::GlxIntrospection;
pub use xlib::Xlib;
