use std::ffi::{CString, c_char, c_void};

use crate::{Address, LibraryLoader, LoadError, ResolveError, SymbolLoader};

/// Signature shared by `glXGetProcAddress[ARB]`, `eglGetProcAddress` and
/// `wglGetProcAddress`.
pub type GetProcAddressFn = unsafe extern "system" fn(name: *const c_char) -> *const c_void;

/// Resolves symbols through an API-specific get-proc-address entry point,
/// falling back to the library's plain exports.
///
/// Some drivers hand out small integers instead of null for unknown names
/// (`wglGetProcAddress` returns 1, 2, 3 or -1); those are treated as misses.
pub struct ProcAddressLoader {
	get_proc: GetProcAddressFn,
	entry_point: &'static str,
	/// Keeps the entry point's library loaded.
	library: Option<LibraryLoader>,
	fallback: bool,
}

impl ProcAddressLoader {
	/// Looks up `entry_point` in `library` and uses it for resolution, with the
	/// library's exports as fallback.
	pub fn open(library: LibraryLoader, entry_point: &'static str) -> Result<Self, LoadError> {
		let address = library.resolve(entry_point).map_err(|_| LoadError::MissingEntryPoint {
			entry_point,
			library: library.name().to_string(),
		})?;
		// SAFETY: every supported entry point has the `GetProcAddressFn` shape.
		let get_proc = unsafe { address.cast::<GetProcAddressFn>() };
		Ok(Self {
			get_proc,
			entry_point,
			library: Some(library),
			fallback: true,
		})
	}

	/// Wraps an already-known entry point.
	pub fn from_fn(get_proc: GetProcAddressFn, entry_point: &'static str, fallback: Option<LibraryLoader>) -> Self {
		Self {
			get_proc,
			entry_point,
			fallback: fallback.is_some(),
			library: fallback,
		}
	}

	/// Enables or disables falling back to the library's exports.
	pub fn with_export_fallback(mut self, enabled: bool) -> Self {
		self.fallback = enabled;
		self
	}

	pub fn entry_point(&self) -> &'static str {
		self.entry_point
	}
}

/// Non-null values that drivers return to mean "not found".
fn is_sentinel(ptr: *const c_void) -> bool {
	matches!(ptr as usize, 1 | 2 | 3 | usize::MAX)
}

impl SymbolLoader for ProcAddressLoader {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		let name = CString::new(symbol).map_err(|_| ResolveError::InvalidName {
			symbol: symbol.to_string(),
		})?;

		// SAFETY: `name` is NUL-terminated and outlives the call.
		let ptr = unsafe { (self.get_proc)(name.as_ptr()) };
		if !is_sentinel(ptr) {
			if let Some(address) = Address::from_ptr(ptr) {
				return Ok(address);
			}
		}

		match &self.library {
			Some(library) if self.fallback => library.resolve(symbol),
			_ => Err(ResolveError::not_found(symbol)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::ffi::CStr;

	use super::*;

	extern "system" fn target() {}

	unsafe extern "system" fn fake_get_proc(name: *const c_char) -> *const c_void {
		// SAFETY: the loader always passes a valid C string.
		let name = unsafe { CStr::from_ptr(name) };
		match name.to_bytes() {
			b"glReal" => target as *const c_void,
			b"glBogusOne" => 1 as *const c_void,
			b"glBogusMax" => usize::MAX as *const c_void,
			_ => std::ptr::null(),
		}
	}

	#[test]
	fn resolves_through_entry_point() {
		let loader = ProcAddressLoader::from_fn(fake_get_proc, "fakeGetProcAddress", None);
		let addr = loader.resolve("glReal").unwrap();
		assert_eq!(addr.as_ptr(), target as *const c_void);
	}

	#[test]
	fn sentinel_values_are_misses() {
		let loader = ProcAddressLoader::from_fn(fake_get_proc, "fakeGetProcAddress", None);
		assert_eq!(loader.resolve("glBogusOne"), Err(ResolveError::not_found("glBogusOne")));
		assert_eq!(loader.resolve("glBogusMax"), Err(ResolveError::not_found("glBogusMax")));
		assert_eq!(loader.resolve("glMissing"), Err(ResolveError::not_found("glMissing")));
	}

	#[test]
	fn interior_nul_is_rejected_before_calling_native_code() {
		let loader = ProcAddressLoader::from_fn(fake_get_proc, "fakeGetProcAddress", None);
		assert!(matches!(loader.resolve("gl\0Real"), Err(ResolveError::InvalidName { .. })));
	}
}
