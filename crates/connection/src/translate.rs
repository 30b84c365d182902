use std::fmt;

use crate::{ConnectionHandle, ErrorTable, ProtocolError};

/// Upper bound on error flags drained after one call. Lost contexts can
/// report an error on every query.
const MAX_DRAINED: u32 = 16;

/// A synchronous "last error" query such as `glGetError`.
pub trait LastErrorSource {
	/// Returns and clears one pending error code, or 0 when none is pending.
	fn take_error(&self) -> u32;

	/// Symbolic name for `code`, used in error messages.
	fn describe(&self, _code: u32) -> Option<&'static str> {
		None
	}
}

/// A native failure surfaced after a call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{command}: {kind}")]
pub struct NativeError {
	pub command: &'static str,
	pub kind: NativeErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeErrorKind {
	/// Error code from a synchronous query. `further` counts additional flags
	/// that were drained after it.
	Code {
		code: u32,
		name: Option<&'static str>,
		further: u32,
	},
	/// Asynchronous protocol error delivered through the error callback.
	Protocol { error: ProtocolError, suppressed: u32 },
}

impl fmt::Display for NativeErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Code { code, name, further } => {
				match name {
					Some(name) => write!(f, "{name} ({code:#06x})")?,
					None => write!(f, "error {code:#06x}")?,
				}
				if *further > 0 {
					write!(f, " and {further} more")?;
				}
				Ok(())
			}
			Self::Protocol { error, suppressed } => {
				write!(f, "{error}")?;
				if *suppressed > 0 {
					write!(f, " and {suppressed} more")?;
				}
				Ok(())
			}
		}
	}
}

/// Drains `source` after `command` and reports the first error code.
pub fn check_sync<S: LastErrorSource + ?Sized>(command: &'static str, source: &S) -> Result<(), NativeError> {
	let code = source.take_error();
	if code == 0 {
		return Ok(());
	}

	let mut further = 0;
	while further < MAX_DRAINED && source.take_error() != 0 {
		further += 1;
	}

	Err(NativeError {
		command,
		kind: NativeErrorKind::Code {
			code,
			name: source.describe(code),
			further,
		},
	})
}

/// Collects the pending asynchronous error recorded for `handle`, if any.
///
/// Must run while the connection lock is held so the entry belongs to calls
/// made by this thread.
pub fn check_async(command: &'static str, handle: ConnectionHandle, table: &ErrorTable) -> Result<(), NativeError> {
	match table.take(handle) {
		None => Ok(()),
		Some(pending) => Err(NativeError {
			command,
			kind: NativeErrorKind::Protocol {
				error: pending.error,
				suppressed: pending.suppressed,
			},
		}),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use pretty_assertions::assert_eq;

	use super::*;

	struct Flags(RefCell<Vec<u32>>);

	impl Flags {
		fn new(codes: &[u32]) -> Self {
			Self(RefCell::new(codes.iter().rev().copied().collect()))
		}
	}

	impl LastErrorSource for Flags {
		fn take_error(&self) -> u32 {
			self.0.borrow_mut().pop().unwrap_or(0)
		}

		fn describe(&self, code: u32) -> Option<&'static str> {
			(code == 0x0500).then_some("GL_INVALID_ENUM")
		}
	}

	struct Stuck;

	impl LastErrorSource for Stuck {
		fn take_error(&self) -> u32 {
			0x0507
		}
	}

	#[test]
	fn clean_source_is_ok() {
		assert_eq!(check_sync("glFlush", &Flags::new(&[])), Ok(()));
	}

	#[test]
	fn first_code_wins_and_rest_are_drained() {
		let flags = Flags::new(&[0x0500, 0x0502, 0x0505]);
		let err = check_sync("glClear", &flags).unwrap_err();
		assert_eq!(
			err.kind,
			NativeErrorKind::Code {
				code: 0x0500,
				name: Some("GL_INVALID_ENUM"),
				further: 2
			}
		);
		assert_eq!(err.to_string(), "glClear: GL_INVALID_ENUM (0x0500) and 2 more");
		assert_eq!(check_sync("glClear", &flags), Ok(()));
	}

	#[test]
	fn draining_is_bounded() {
		let err = check_sync("glFinish", &Stuck).unwrap_err();
		assert_eq!(
			err.kind,
			NativeErrorKind::Code {
				code: 0x0507,
				name: None,
				further: MAX_DRAINED
			}
		);
	}

	#[test]
	fn async_check_consumes_only_its_connection() {
		let table = ErrorTable::new();
		let (mine, other) = (ConnectionHandle::new(1), ConnectionHandle::new(2));
		let error = ProtocolError {
			error_code: 8,
			request_code: 154,
			minor_code: 5,
			resource_id: 0,
			serial: 99,
		};
		table.record(other, error);

		assert_eq!(check_async("glXMakeContextCurrent", mine, &table), Ok(()));
		let err = check_async("glXMakeContextCurrent", other, &table).unwrap_err();
		assert_eq!(err.kind, NativeErrorKind::Protocol { error, suppressed: 0 });
		assert!(!table.has_pending(other));
	}
}
