use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ConnectionHandle;

/// Details of an asynchronously reported protocol error (an `XErrorEvent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolError {
	pub error_code: u8,
	pub request_code: u8,
	pub minor_code: u8,
	pub resource_id: u64,
	pub serial: u64,
}

impl fmt::Display for ProtocolError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match crate::xlib::error_code_name(self.error_code) {
			Some(name) => write!(f, "{name}")?,
			None => write!(f, "error {}", self.error_code)?,
		}
		write!(
			f,
			" (request {}.{}, resource {:#x}, serial {})",
			self.request_code, self.minor_code, self.resource_id, self.serial
		)
	}
}

/// The error waiting to be surfaced for one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingError {
	/// First error reported since the last check.
	pub error: ProtocolError,
	/// Errors reported after the first one before it was collected.
	pub suppressed: u32,
}

/// Pending asynchronous errors keyed by connection.
///
/// Native callbacks write through an [`ErrorReporter`]; the translator takes
/// and clears the entry for the connection it just used. Entries for other
/// connections are never touched by that check.
#[derive(Debug, Default)]
pub struct ErrorTable {
	pending: Mutex<FxHashMap<ConnectionHandle, PendingError>>,
}

impl ErrorTable {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn reporter(self: &Arc<Self>) -> ErrorReporter {
		ErrorReporter { table: Arc::clone(self) }
	}

	/// Records `error` for `handle`, keeping the first pending error.
	pub fn record(&self, handle: ConnectionHandle, error: ProtocolError) {
		let mut pending = self.pending.lock();
		pending
			.entry(handle)
			.and_modify(|p| p.suppressed = p.suppressed.saturating_add(1))
			.or_insert(PendingError { error, suppressed: 0 });
	}

	/// Removes and returns the pending error for `handle`.
	pub fn take(&self, handle: ConnectionHandle) -> Option<PendingError> {
		self.pending.lock().remove(&handle)
	}

	pub fn has_pending(&self, handle: ConnectionHandle) -> bool {
		self.pending.lock().contains_key(&handle)
	}

	pub fn pending_connections(&self) -> usize {
		self.pending.lock().len()
	}
}

/// Cloneable handle the native layer uses to deliver error events.
#[derive(Debug, Clone)]
pub struct ErrorReporter {
	table: Arc<ErrorTable>,
}

impl ErrorReporter {
	pub fn report(&self, handle: ConnectionHandle, error: ProtocolError) {
		tracing::debug!(%handle, %error, "native connection error reported");
		self.table.record(handle, error);
	}

	pub fn table(&self) -> &Arc<ErrorTable> {
		&self.table
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn bad_window(serial: u64) -> ProtocolError {
		ProtocolError {
			error_code: 3,
			request_code: 18,
			minor_code: 0,
			resource_id: 0x40_0001,
			serial,
		}
	}

	#[test]
	fn first_error_is_kept_and_later_ones_counted() {
		let table = ErrorTable::new();
		let handle = ConnectionHandle::new(0xd1);
		let reporter = table.reporter();
		reporter.report(handle, bad_window(10));
		reporter.report(handle, bad_window(11));
		reporter.report(handle, bad_window(12));

		assert_eq!(
			table.take(handle),
			Some(PendingError {
				error: bad_window(10),
				suppressed: 2
			})
		);
		assert_eq!(table.take(handle), None);
	}

	#[test]
	fn entries_are_isolated_per_connection() {
		let table = ErrorTable::new();
		let (a, b) = (ConnectionHandle::new(1), ConnectionHandle::new(2));
		table.record(a, bad_window(1));

		assert_eq!(table.take(b), None);
		assert!(table.has_pending(a));
		assert_eq!(table.pending_connections(), 1);
	}

	#[test]
	fn display_names_known_codes() {
		assert_eq!(
			bad_window(7).to_string(),
			"BadWindow (request 18.0, resource 0x400001, serial 7)"
		);
	}
}
