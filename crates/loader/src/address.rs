use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// A resolved, non-null native address.
///
/// Addresses are plain values: they carry no ownership and stay meaningful
/// only while the library or context they came from is alive and current.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(NonNull<c_void>);

// SAFETY: an address is an integer-like handle; it is never dereferenced
// through this type, only reinterpreted as a function pointer by callers that
// uphold the native API's threading rules.
unsafe impl Send for Address {}
// SAFETY: see `Send`.
unsafe impl Sync for Address {}

impl Address {
	pub fn from_ptr(ptr: *const c_void) -> Option<Self> {
		NonNull::new(ptr.cast_mut()).map(Self)
	}

	/// Address of a function pointer, mostly for fakes in tests.
	pub fn of_fn<F: Copy>(f: F) -> Self {
		const { assert!(size_of::<F>() == size_of::<*const c_void>(), "not a function pointer") };
		// SAFETY: `F` is pointer-sized; function pointers are never null.
		let ptr: *const c_void = unsafe { std::mem::transmute_copy(&f) };
		Self(NonNull::new(ptr.cast_mut()).unwrap_or(NonNull::dangling()))
	}

	pub fn as_ptr(self) -> *const c_void {
		self.0.as_ptr()
	}

	/// Reinterprets the address as a function pointer of type `F`.
	///
	/// # Safety
	///
	/// `F` must be an `extern` function pointer type matching the native
	/// symbol's real signature and calling convention.
	pub unsafe fn cast<F: Copy>(self) -> F {
		const { assert!(size_of::<F>() == size_of::<*const c_void>(), "not a function pointer") };
		let ptr = self.as_ptr();
		// SAFETY: size checked above; signature is the caller's contract.
		unsafe { std::mem::transmute_copy(&ptr) }
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Address({:p})", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	extern "system" fn forty_two() -> u32 {
		42
	}

	#[test]
	fn cast_round_trips_a_function_pointer() {
		let addr = Address::of_fn(forty_two as extern "system" fn() -> u32);
		// SAFETY: the address came from a function of exactly this type.
		let f: extern "system" fn() -> u32 = unsafe { addr.cast() };
		assert_eq!(f(), 42);
	}

	#[test]
	fn null_is_rejected() {
		assert!(Address::from_ptr(std::ptr::null()).is_none());
	}
}
