//! Context-aware GL and GLX dispatch.
//!
//! [`Gl`] binds the GL alias catalog for the context current on the calling
//! thread and exposes typed, `Result`-returning wrappers. [`GlxDisplay`] does
//! the same for GLX over an Xlib display, serializing calls per connection
//! and translating asynchronous X errors.
//!
//! ```no_run
//! use glaze_binding::ContextId;
//! use glaze_config::Config;
//! use glaze_gl::{Gl, GlxDisplay, ffi};
//!
//! # fn main() -> glaze_gl::Result<()> {
//! let config = Config::default();
//! let display = GlxDisplay::open(None, &config)?;
//! // ... create a context and make it current ...
//! let loader = display.proc_loader()?;
//! // SAFETY: the loader resolves through glXGetProcAddress for the current context.
//! let (gl, report) = unsafe { Gl::load(&loader, ContextId::new(1), &config)? };
//! println!("{} commands unavailable", report.unbound.len());
//! gl.clear(ffi::GL_COLOR_BUFFER_BIT)?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
pub mod ffi;
pub mod glx;
mod introspect;
mod sink;

pub use context::Gl;
pub use error::{Error, Result};
pub use glx::{DisplayConnection, GlxDisplay, SharedConnection};
pub use introspect::GlIntrospection;
pub use sink::{CallOutcome, CallRecord, CallSink, NullSink, TracingSink};
