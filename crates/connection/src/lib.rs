//! Native connection plumbing: cross-thread serialization and error
//! translation.
//!
//! Some window-system connections (an Xlib `Display`) are not safe for
//! concurrent use and report failures asynchronously, keyed by connection
//! rather than by call. This crate provides:
//!
//! - [`ConnectionLocks`]: a per-connection lock that is a no-op until
//!   multithreading is enabled for that connection.
//! - [`ErrorTable`] and [`ErrorReporter`]: the pending-error map written by
//!   native error callbacks and drained after each call.
//! - [`check_sync`] and [`check_async`]: turn native error state into
//!   [`NativeError`]s.
//! - [`xlib`]: the `XSetErrorHandler` trampoline feeding an [`ErrorReporter`].

mod handle;
mod lock;
mod table;
mod translate;
pub mod xlib;

pub use handle::ConnectionHandle;
pub use lock::{ConnectionGuard, ConnectionLocks, LockError};
pub use table::{ErrorReporter, ErrorTable, PendingError, ProtocolError};
pub use translate::{LastErrorSource, NativeError, NativeErrorKind, check_async, check_sync};
