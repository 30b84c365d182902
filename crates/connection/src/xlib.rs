//! Xlib error callback adapter.
//!
//! `XSetErrorHandler` takes one process-wide C function pointer with no user
//! data. The trampoline here forwards each event to the [`ErrorReporter`]
//! installed with [`set_reporter`], keyed by the `Display` that raised it.

use std::ffi::{c_int, c_uchar, c_ulong, c_void};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{ConnectionHandle, ErrorReporter, ErrorTable, ProtocolError};

/// Layout of Xlib's `XErrorEvent`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct XErrorEvent {
	pub type_: c_int,
	pub display: *mut c_void,
	pub resource_id: c_ulong,
	pub serial: c_ulong,
	pub error_code: c_uchar,
	pub request_code: c_uchar,
	pub minor_code: c_uchar,
}

pub type XErrorHandler = Option<unsafe extern "C" fn(*mut c_void, *mut XErrorEvent) -> c_int>;
pub type XSetErrorHandlerFn = unsafe extern "C" fn(XErrorHandler) -> XErrorHandler;

static REPORTER: RwLock<Option<ErrorReporter>> = parking_lot::const_rwlock(None);

/// Routes subsequent error events to `reporter`, returning the previous one.
pub fn set_reporter(reporter: ErrorReporter) -> Option<ErrorReporter> {
	REPORTER.write().replace(reporter)
}

pub fn clear_reporter() -> Option<ErrorReporter> {
	REPORTER.write().take()
}

/// Table behind the installed reporter, installing a fresh one if none is set.
pub fn ensure_reporter() -> Arc<ErrorTable> {
	let mut slot = REPORTER.write();
	match slot.as_ref() {
		Some(reporter) => Arc::clone(reporter.table()),
		None => {
			let table = ErrorTable::new();
			*slot = Some(table.reporter());
			table
		}
	}
}

/// Installs the trampoline with `set_handler` and returns the handler it
/// replaced.
///
/// # Safety
///
/// `set_handler` must be Xlib's `XSetErrorHandler` (or follow its contract).
pub unsafe fn install_error_handler(set_handler: XSetErrorHandlerFn) -> XErrorHandler {
	// SAFETY: caller guarantees `set_handler` is `XSetErrorHandler`.
	let previous = unsafe { set_handler(Some(trampoline)) };
	tracing::debug!(replaced = previous.is_some(), "xlib error handler installed");
	previous
}

/// The C callback registered by [`install_error_handler`].
pub fn handler() -> unsafe extern "C" fn(*mut c_void, *mut XErrorEvent) -> c_int {
	trampoline
}

unsafe extern "C" fn trampoline(display: *mut c_void, event: *mut XErrorEvent) -> c_int {
	// SAFETY: Xlib passes a valid event for the duration of the callback.
	let Some(event) = (unsafe { event.as_ref() }) else {
		return 0;
	};
	let handle = ConnectionHandle::from_ptr(display);
	let error = ProtocolError {
		error_code: event.error_code,
		request_code: event.request_code,
		minor_code: event.minor_code,
		resource_id: u64::from(event.resource_id),
		serial: u64::from(event.serial),
	};

	match REPORTER.read().as_ref() {
		Some(reporter) => reporter.report(handle, error),
		None => tracing::warn!(%handle, %error, "xlib error with no reporter installed"),
	}
	0
}

/// Name of a core X protocol error code.
pub fn error_code_name(code: u8) -> Option<&'static str> {
	Some(match code {
		1 => "BadRequest",
		2 => "BadValue",
		3 => "BadWindow",
		4 => "BadPixmap",
		5 => "BadAtom",
		6 => "BadCursor",
		7 => "BadFont",
		8 => "BadMatch",
		9 => "BadDrawable",
		10 => "BadAccess",
		11 => "BadAlloc",
		12 => "BadColor",
		13 => "BadGC",
		14 => "BadIDChoice",
		15 => "BadName",
		16 => "BadLength",
		17 => "BadImplementation",
		_ => return None,
	})
}
