use std::ffi::c_void;
use std::sync::Arc;

use libloading::Library;

use crate::{Address, LoadError, ResolveError, SymbolLoader};

/// Resolves exported symbols from a dynamic library through the OS loader.
///
/// Cloning shares the underlying library handle; the library stays loaded
/// until the last clone is dropped.
#[derive(Clone)]
pub struct LibraryLoader {
	library: Arc<Library>,
	name: Arc<str>,
}

impl LibraryLoader {
	/// Opens the first loadable library among `candidates`.
	pub fn open_first<S: AsRef<str>>(candidates: &[S]) -> Result<Self, LoadError> {
		let mut last_err = None;
		for candidate in candidates {
			let candidate = candidate.as_ref();
			// SAFETY: loading GL-family driver libraries runs their initializers;
			// these are the system driver libraries callers asked for.
			match unsafe { Library::new(candidate) } {
				Ok(library) => {
					tracing::debug!(library = candidate, "opened native library");
					return Ok(Self {
						library: Arc::new(library),
						name: candidate.into(),
					});
				}
				Err(e) => {
					tracing::trace!(library = candidate, error = %e, "library candidate unavailable");
					last_err = Some(e);
				}
			}
		}

		match last_err {
			Some(source) => Err(LoadError::Open {
				candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
				source,
			}),
			None => Err(LoadError::NoCandidates),
		}
	}

	/// Symbols already loaded into the current process.
	#[cfg(unix)]
	pub fn this() -> Self {
		let library: Library = libloading::os::unix::Library::this().into();
		Self {
			library: Arc::new(library),
			name: "<process>".into(),
		}
	}

	/// Symbols already loaded into the current process.
	#[cfg(windows)]
	pub fn this() -> Result<Self, LoadError> {
		let library = libloading::os::windows::Library::this().map_err(|source| LoadError::Open {
			candidates: vec!["<process>".to_string()],
			source,
		})?;
		Ok(Self {
			library: Arc::new(library.into()),
			name: "<process>".into(),
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

impl SymbolLoader for LibraryLoader {
	fn resolve(&self, symbol: &str) -> Result<Address, ResolveError> {
		if symbol.contains('\0') {
			return Err(ResolveError::InvalidName {
				symbol: symbol.to_string(),
			});
		}

		// SAFETY: the symbol is only read as an address; it is never called
		// through this signature.
		let ptr = unsafe {
			self.library
				.get::<unsafe extern "C" fn()>(symbol.as_bytes())
				.map(|sym| *sym as *const c_void)
		};

		match ptr {
			Ok(ptr) => Address::from_ptr(ptr).ok_or_else(|| ResolveError::not_found(symbol)),
			Err(_) => Err(ResolveError::not_found(symbol)),
		}
	}
}

impl std::fmt::Debug for LibraryLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LibraryLoader").field("name", &self.name).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_candidate_list_is_reported() {
		let err = LibraryLoader::open_first::<&str>(&[]).unwrap_err();
		assert!(matches!(err, LoadError::NoCandidates));
	}

	#[test]
	fn missing_libraries_list_every_candidate() {
		let err = LibraryLoader::open_first(&["libglaze-does-not-exist.so.7", "glaze-nope.dll"]).unwrap_err();
		match err {
			LoadError::Open { candidates, .. } => assert_eq!(candidates.len(), 2),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[cfg(target_os = "linux")]
	#[test]
	fn process_loader_finds_libc_exports() {
		let this = LibraryLoader::this();
		assert!(this.resolve("malloc").is_ok());
		assert_eq!(
			this.resolve("glaze_definitely_not_exported"),
			Err(ResolveError::not_found("glaze_definitely_not_exported"))
		);
		assert!(matches!(this.resolve("mal\0loc"), Err(ResolveError::InvalidName { .. })));
	}
}
