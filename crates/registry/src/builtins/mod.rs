//! Alias tables shipped with glaze.

pub mod gl;
pub mod glx;

pub use gl::{GL_COMMANDS, GlCommand};
pub use glx::{GLX_COMMANDS, GlxCommand};
