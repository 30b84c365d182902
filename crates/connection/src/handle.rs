use std::ffi::c_void;
use std::fmt;

/// Identity of a native connection, derived from its handle pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionHandle(usize);

impl ConnectionHandle {
	pub fn from_ptr(ptr: *const c_void) -> Self {
		Self(ptr as usize)
	}

	pub const fn new(raw: usize) -> Self {
		Self(raw)
	}

	pub const fn raw(self) -> usize {
		self.0
	}
}

impl fmt::Display for ConnectionHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "conn:{:#x}", self.0)
	}
}
